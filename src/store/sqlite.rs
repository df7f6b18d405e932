//! SQLite-backed observation store

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, info, instrument};

use super::{DateOrder, ObservationFilter, ObservationStore};
use crate::Result;
use crate::config::DatabaseConfig;
use crate::models::{Observation, Station, StationCount, TemperatureSummary};

/// Table layout of the historical dataset
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS station (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    name TEXT,
    latitude REAL,
    longitude REAL,
    elevation REAL
);
CREATE TABLE IF NOT EXISTS measurement (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp REAL,
    tobs REAL NOT NULL
);
";

const OBSERVATION_COLUMNS: &str = "SELECT station AS station_id, date, \
     CAST(prcp AS REAL) AS precipitation, \
     CAST(tobs AS REAL) AS temperature_observed \
     FROM measurement";

const STATION_COLUMNS: &str = "SELECT station AS station_id, name, \
     CAST(latitude AS REAL) AS latitude, \
     CAST(longitude AS REAL) AS longitude, \
     CAST(elevation AS REAL) AS elevation \
     FROM station ORDER BY id";

/// Observation store over a pooled SQLite database
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the dataset read-only with the configured pool limits
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds.into()))
            .connect_with(options)
            .await?;

        info!(
            "Opened observation store at {} (max {} connections)",
            config.url, config.max_connections
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ObservationFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(since) = &filter.since {
        builder.push(" AND date >= ").push_bind(since.clone());
    }
    if let Some(until) = &filter.until {
        builder.push(" AND date <= ").push_bind(until.clone());
    }
    if let Some(station) = &filter.station {
        builder.push(" AND station = ").push_bind(station.clone());
    }
}

#[async_trait]
impl ObservationStore for SqliteStore {
    #[instrument(level = "debug", skip(self))]
    async fn query_observations(
        &self,
        filter: &ObservationFilter,
        order: DateOrder,
        limit: Option<u32>,
    ) -> Result<Vec<Observation>> {
        let mut builder = QueryBuilder::<Sqlite>::new(OBSERVATION_COLUMNS);
        push_filter(&mut builder, filter);
        builder.push(match order {
            DateOrder::Ascending => " ORDER BY date ASC, station ASC",
            DateOrder::Descending => " ORDER BY date DESC, station ASC",
        });
        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let mut conn = self.pool.acquire().await?;
        let rows = builder
            .build_query_as::<Observation>()
            .fetch_all(&mut *conn)
            .await?;

        debug!("Fetched {} observations", rows.len());
        Ok(rows)
    }

    #[instrument(level = "debug", skip(self))]
    async fn query_stations(&self) -> Result<Vec<Station>> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, Station>(STATION_COLUMNS)
            .fetch_all(&mut *conn)
            .await?;

        debug!("Fetched {} stations", rows.len());
        Ok(rows)
    }

    #[instrument(level = "debug", skip(self))]
    async fn temperature_stats(&self, filter: &ObservationFilter) -> Result<TemperatureSummary> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT CAST(MIN(tobs) AS REAL) AS min, \
             CAST(MAX(tobs) AS REAL) AS max, \
             CAST(AVG(tobs) AS REAL) AS avg \
             FROM measurement",
        );
        push_filter(&mut builder, filter);

        let mut conn = self.pool.acquire().await?;
        let summary = builder
            .build_query_as::<TemperatureSummary>()
            .fetch_one(&mut *conn)
            .await?;

        Ok(summary)
    }

    #[instrument(level = "debug", skip(self))]
    async fn count_by_station(&self, filter: &ObservationFilter) -> Result<Vec<StationCount>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT station AS station_id, COUNT(*) AS observations FROM measurement",
        );
        push_filter(&mut builder, filter);
        builder.push(" GROUP BY station ORDER BY observations DESC, station ASC");

        let mut conn = self.pool.acquire().await?;
        let counts = builder
            .build_query_as::<StationCount>()
            .fetch_all(&mut *conn)
            .await?;

        Ok(counts)
    }
}
