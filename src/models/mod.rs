//! Data models for the climate API
//!
//! This module contains the domain models organized by concern:
//! - Observation: stored station-day readings and station metadata
//! - Summary: derived ranges and aggregate results returned to callers

pub mod observation;
pub mod summary;

// Re-export all public types for convenient access
pub use observation::{Observation, Station, StationCount};
pub use summary::{
    DateRange, PrecipitationReading, StationTemperatures, SummaryRecord, TemperatureSummary,
    TobsEntry,
};
