//! Range query service
//!
//! Validates caller-supplied dates against the dataset's actual bounds and
//! shapes engine aggregates into reportable records.

use tracing::{debug, instrument};

use crate::dates::{format_date, one_year_before, parse_strict_date};
use crate::engine::AggregationEngine;
use crate::error::ValidationReason;
use crate::models::{DateRange, PrecipitationReading, StationTemperatures, SummaryRecord};
use crate::{ClimateError, Result};

/// Orchestrates validation and aggregation for the HTTP layer
#[derive(Clone)]
pub struct RangeQueryService {
    engine: AggregationEngine,
}

impl RangeQueryService {
    pub fn new(engine: AggregationEngine) -> Self {
        Self { engine }
    }

    /// `[latest - 365 days, latest]`
    #[instrument(skip(self))]
    pub async fn rolling_year_window(&self) -> Result<DateRange> {
        let latest = self.engine.latest_observation_date().await?;
        let start = one_year_before(parse_strict_date(&latest)?);
        Ok(DateRange::new(format_date(start), latest))
    }

    /// Range from `start` to the latest observation date
    #[instrument(skip(self))]
    pub async fn validated_single_start(&self, start: &str) -> Result<DateRange> {
        let (earliest, latest) = self.dataset_bounds().await?;
        check_date(start, &earliest, &latest)?;
        Ok(DateRange::new(start, latest))
    }

    /// Range between two caller dates.
    ///
    /// `start <= end` is not checked: a reversed range yields an empty summary.
    #[instrument(skip(self))]
    pub async fn validated_range(&self, start: &str, end: &str) -> Result<DateRange> {
        let (earliest, latest) = self.dataset_bounds().await?;
        check_bounds(start, &earliest, &latest)?;
        check_bounds(end, &earliest, &latest)?;
        check_format(start)?;
        check_format(end)?;

        let range = DateRange::new(start, end);
        if range.is_reversed() {
            debug!("Reversed range {} > {}", range.start, range.end);
        }
        Ok(range)
    }

    /// Temperature summary for `range`, always exactly one record
    #[instrument(skip(self))]
    pub async fn summary_stats(&self, range: &DateRange) -> Result<Vec<SummaryRecord>> {
        let summary = self.engine.temperature_summary(range).await?;
        Ok(vec![SummaryRecord::new(range, summary)])
    }

    /// Precipitation across all stations for the rolling year window
    pub async fn precipitation_last_year(&self) -> Result<Vec<PrecipitationReading>> {
        let window = self.rolling_year_window().await?;
        self.engine.precipitation_series(&window).await
    }

    /// Most active station's temperatures for the rolling year window
    pub async fn most_active_station_temperatures(&self) -> Result<StationTemperatures> {
        let window = self.rolling_year_window().await?;
        self.engine.temperatures_for_most_active_station(&window).await
    }

    pub async fn station_ids(&self) -> Result<Vec<String>> {
        self.engine.station_ids().await
    }

    async fn dataset_bounds(&self) -> Result<(String, String)> {
        let earliest = self.engine.earliest_observation_date().await?;
        let latest = self.engine.latest_observation_date().await?;
        Ok((earliest, latest))
    }
}

/// Bounds first, then format. Fixed-width dates compare correctly as strings.
fn check_date(date: &str, earliest: &str, latest: &str) -> Result<()> {
    check_bounds(date, earliest, latest)?;
    check_format(date)
}

fn check_bounds(date: &str, earliest: &str, latest: &str) -> Result<()> {
    if date > latest || date < earliest {
        return Err(ClimateError::validation(ValidationReason::OutOfRange, date));
    }
    Ok(())
}

fn check_format(date: &str) -> Result<()> {
    parse_strict_date(date)
        .map(|_| ())
        .map_err(|_| ClimateError::validation(ValidationReason::BadFormat, date))
}
