//! Stored rows as read from the observation store

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One station-day reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Observation {
    /// Reporting station
    pub station_id: String,
    /// Calendar day as `YYYY-MM-DD`
    pub date: String,
    /// Precipitation in inches, absent when not reported
    pub precipitation: Option<f64>,
    /// Observed temperature in degrees Fahrenheit
    pub temperature_observed: f64,
}

/// Weather station metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Station {
    pub station_id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Number of observations recorded by one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StationCount {
    pub station_id: String,
    pub observations: i64,
}
