use std::sync::Arc;

use climate_api::store::sqlite::SCHEMA;
use climate_api::{AppState, SqliteStore};
use sqlx::sqlite::SqlitePoolOptions;

/// (station, date, precipitation, temperature)
pub type Row = (&'static str, &'static str, Option<f64>, f64);

pub const STATIONS: [&str; 3] = ["USC1", "USC2", "USC3"];

pub fn sample_rows() -> Vec<Row> {
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

pub async fn app_state(rows: &[Row]) -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    for station in STATIONS {
        sqlx::query("INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?, ?, 21.3, -157.8, 3.0)")
            .bind(station)
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

    AppState::new(Arc::new(SqliteStore::from_pool(pool)))
}
