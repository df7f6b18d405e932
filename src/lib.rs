//! `climate_api` - Read-only HTTP API over historical weather observations
//!
//! This library provides the query layer over a fixed station/observation
//! dataset: date validation, rolling one-year windows, the most active
//! station and min/max/avg temperature summaries over date ranges.

pub mod api;
pub mod config;
pub mod dates;
pub mod engine;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use crate::config::ClimateApiConfig;
pub use engine::AggregationEngine;
pub use error::{ClimateError, ValidationReason};
pub use models::{DateRange, Observation, Station, SummaryRecord, TemperatureSummary};
pub use service::RangeQueryService;
pub use store::{ObservationStore, SqliteStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimateError>;
