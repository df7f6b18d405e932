//! In-memory SQLite datasets for unit tests

use sqlx::sqlite::SqlitePoolOptions;

use super::SqliteStore;
use super::sqlite::SCHEMA;

/// (station, date, precipitation, temperature)
pub(crate) type Row = (&'static str, &'static str, Option<f64>, f64);

/// Two stations spanning 2010-01-01..2017-08-23; USC1 has the most rows.
pub(crate) fn sample_rows() -> Vec<Row> {
    vec![
        ("USC1", "2010-01-01", Some(0.08), 65.0),
        ("USC2", "2010-01-01", Some(0.28), 63.0),
        ("USC1", "2016-08-22", Some(0.0), 72.0),
        ("USC1", "2016-08-23", Some(0.7), 76.0),
        ("USC2", "2016-12-31", None, 68.0),
        ("USC2", "2017-08-23", Some(0.45), 79.0),
        ("USC1", "2017-08-23", Some(0.0), 81.0),
    ]
}

/// A single-connection pool so every acquire sees the same in-memory database.
pub(crate) async fn memory_store(stations: &[&str], rows: &[Row]) -> SqliteStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    for station in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?, ?)")
            .bind(*station)
            .bind(format!("{station} station"))
            .execute(&pool)
            .await
            .unwrap();
    }

    for (station, date, prcp, tobs) in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    SqliteStore::from_pool(pool)
}
