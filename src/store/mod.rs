//! Observation store contract
//!
//! The aggregation engine only talks to the dataset through
//! [`ObservationStore`]. Every call is a self-contained unit of work: an
//! implementation acquires whatever connection it needs and releases it
//! before returning.

pub mod sqlite;

#[cfg(test)]
pub(crate) mod fixtures;

use async_trait::async_trait;

use crate::Result;
use crate::models::{Observation, Station, StationCount, TemperatureSummary};

pub use sqlite::SqliteStore;

/// Ordering on the observation date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    Ascending,
    Descending,
}

/// Row filter over observations. Date bounds are inclusive string comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationFilter {
    pub since: Option<String>,
    pub until: Option<String>,
    pub station: Option<String>,
}

impl ObservationFilter {
    /// Matches every observation
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn since<S: Into<String>>(mut self, date: S) -> Self {
        self.since = Some(date.into());
        self
    }

    #[must_use]
    pub fn until<S: Into<String>>(mut self, date: S) -> Self {
        self.until = Some(date.into());
        self
    }

    #[must_use]
    pub fn station<S: Into<String>>(mut self, station_id: S) -> Self {
        self.station = Some(station_id.into());
        self
    }
}

/// Read-only query contract over the observation and station collections
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Observations matching `filter`, ordered by date (station id breaks ties).
    async fn query_observations(
        &self,
        filter: &ObservationFilter,
        order: DateOrder,
        limit: Option<u32>,
    ) -> Result<Vec<Observation>>;

    /// All station rows.
    async fn query_stations(&self) -> Result<Vec<Station>>;

    /// MIN/MAX/AVG of observed temperature over matching rows.
    async fn temperature_stats(&self, filter: &ObservationFilter) -> Result<TemperatureSummary>;

    /// Observation counts per station over matching rows.
    async fn count_by_station(&self, filter: &ObservationFilter) -> Result<Vec<StationCount>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_builder() {
        let filter = ObservationFilter::all()
            .since("2017-01-01")
            .until("2017-12-31")
            .station("USC00519281");

        assert_eq!(filter.since.as_deref(), Some("2017-01-01"));
        assert_eq!(filter.until.as_deref(), Some("2017-12-31"));
        assert_eq!(filter.station.as_deref(), Some("USC00519281"));
        assert_eq!(ObservationFilter::all(), ObservationFilter::default());
    }
}
