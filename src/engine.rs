//! Aggregation engine
//!
//! Derives the facts the API reports (dataset date bounds, the most active
//! station, temperature aggregates and rolling series) by composing queries
//! against an [`ObservationStore`].

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::models::{DateRange, PrecipitationReading, StationTemperatures, TemperatureSummary};
use crate::store::{DateOrder, ObservationFilter, ObservationStore};
use crate::{ClimateError, Result};

/// Read-through aggregates over the observation store
#[derive(Clone)]
pub struct AggregationEngine {
    store: Arc<dyn ObservationStore>,
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn ObservationStore>) -> Self {
        Self { store }
    }

    /// Most recent observation date
    #[instrument(skip(self))]
    pub async fn latest_observation_date(&self) -> Result<String> {
        self.boundary_date(DateOrder::Descending).await
    }

    /// Oldest observation date
    #[instrument(skip(self))]
    pub async fn earliest_observation_date(&self) -> Result<String> {
        self.boundary_date(DateOrder::Ascending).await
    }

    async fn boundary_date(&self, order: DateOrder) -> Result<String> {
        self.store
            .query_observations(&ObservationFilter::all(), order, Some(1))
            .await?
            .into_iter()
            .next()
            .map(|observation| observation.date)
            .ok_or(ClimateError::EmptyDataset)
    }

    /// Station with the most observation rows.
    ///
    /// Ties go to the lexicographically smallest station id, whatever order
    /// the store returned the counts in.
    #[instrument(skip(self))]
    pub async fn most_active_station(&self) -> Result<String> {
        let counts = self.store.count_by_station(&ObservationFilter::all()).await?;

        let most_active = counts
            .into_iter()
            .max_by(|a, b| {
                a.observations
                    .cmp(&b.observations)
                    .then_with(|| b.station_id.cmp(&a.station_id))
            })
            .ok_or(ClimateError::EmptyDataset)?;

        debug!(
            "Most active station {} with {} observations",
            most_active.station_id, most_active.observations
        );
        Ok(most_active.station_id)
    }

    /// MIN/MAX/AVG temperature over `[range.start, range.end]`
    #[instrument(skip(self))]
    pub async fn temperature_summary(&self, range: &DateRange) -> Result<TemperatureSummary> {
        let filter = ObservationFilter::all()
            .since(range.start.as_str())
            .until(range.end.as_str());
        self.store.temperature_stats(&filter).await
    }

    /// Precipitation for every station from `range.start` onward, oldest first.
    /// `range.end` is not applied.
    #[instrument(skip(self))]
    pub async fn precipitation_series(&self, range: &DateRange) -> Result<Vec<PrecipitationReading>> {
        let filter = ObservationFilter::all().since(range.start.as_str());
        let rows = self
            .store
            .query_observations(&filter, DateOrder::Ascending, None)
            .await?;

        Ok(rows
            .into_iter()
            .map(|observation| PrecipitationReading {
                date: observation.date,
                precipitation: observation.precipitation,
            })
            .collect())
    }

    /// Temperatures of the most active station from `range.start` onward.
    /// `range.end` is not applied.
    #[instrument(skip(self))]
    pub async fn temperatures_for_most_active_station(
        &self,
        range: &DateRange,
    ) -> Result<StationTemperatures> {
        let station_id = self.most_active_station().await?;
        let filter = ObservationFilter::all()
            .since(range.start.as_str())
            .station(station_id.as_str());

        let temperatures = self
            .store
            .query_observations(&filter, DateOrder::Ascending, None)
            .await?
            .into_iter()
            .map(|observation| observation.temperature_observed)
            .collect();

        Ok(StationTemperatures {
            station_id,
            temperatures,
        })
    }

    /// Distinct station ids in the order the store lists them
    #[instrument(skip(self))]
    pub async fn station_ids(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        Ok(self
            .store
            .query_stations()
            .await?
            .into_iter()
            .map(|station| station.station_id)
            .filter(|id| seen.insert(id.clone()))
            .collect())
    }
}
