//! Derived values: date ranges, aggregates and their response shapes

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use sqlx::FromRow;

/// Inclusive range of `YYYY-MM-DD` dates.
///
/// `start <= end` is not enforced; a reversed range simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    #[must_use]
    pub fn new<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// True when `start` sorts after `end`
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

/// MIN/MAX/AVG of observed temperature. All `None` when no rows matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, Deserialize, FromRow)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl TemperatureSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.avg.is_none()
    }
}

/// Reportable summary for a date range
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "Start")]
    pub start: String,
    #[serde(rename = "End")]
    pub end: String,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
}

impl SummaryRecord {
    #[must_use]
    pub fn new(range: &DateRange, summary: TemperatureSummary) -> Self {
        Self {
            start: range.start.clone(),
            end: range.end.clone(),
            tmin: summary.min,
            tmax: summary.max,
            tavg: summary.avg,
        }
    }
}

/// A dated precipitation reading, serialized as `{"<date>": <precipitation>}`
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: String,
    pub precipitation: Option<f64>,
}

impl Serialize for PrecipitationReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.precipitation)?;
        map.end()
    }
}

/// Temperatures recorded by a single station, in date order
#[derive(Debug, Clone, PartialEq)]
pub struct StationTemperatures {
    pub station_id: String,
    pub temperatures: Vec<f64>,
}

/// One element of the `/tobs` response list
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum TobsEntry {
    Temperature(f64),
    Station(String),
}

impl StationTemperatures {
    /// Each temperature followed by the station id, the historical `/tobs` shape
    #[must_use]
    pub fn interleaved(&self) -> Vec<TobsEntry> {
        self.temperatures
            .iter()
            .flat_map(|t| {
                [
                    TobsEntry::Temperature(*t),
                    TobsEntry::Station(self.station_id.clone()),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_precipitation_reading_is_single_key_object() {
        let readings = vec![
            PrecipitationReading {
                date: "2017-08-22".to_string(),
                precipitation: Some(0.5),
            },
            PrecipitationReading {
                date: "2017-08-23".to_string(),
                precipitation: None,
            },
        ];

        let value = serde_json::to_value(&readings).unwrap();
        assert_eq!(value, json!([{"2017-08-22": 0.5}, {"2017-08-23": null}]));
    }

    #[test]
    fn test_summary_record_field_names() {
        let range = DateRange::new("2017-01-01", "2017-01-31");
        let record = SummaryRecord::new(
            &range,
            TemperatureSummary {
                min: Some(60.0),
                max: Some(80.0),
                avg: Some(70.5),
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "Start": "2017-01-01",
                "End": "2017-01-31",
                "TMIN": 60.0,
                "TMAX": 80.0,
                "TAVG": 70.5
            })
        );
    }

    #[test]
    fn test_empty_summary_serializes_nulls() {
        let range = DateRange::new("2017-02-01", "2017-01-01");
        assert!(range.is_reversed());

        let record = SummaryRecord::new(&range, TemperatureSummary::default());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["TMIN"], json!(null));
        assert_eq!(value["TMAX"], json!(null));
        assert_eq!(value["TAVG"], json!(null));
    }

    #[test]
    fn test_interleaved_tobs() {
        let temps = StationTemperatures {
            station_id: "USC1".to_string(),
            temperatures: vec![70.0, 72.0],
        };

        let value = serde_json::to_value(temps.interleaved()).unwrap();
        assert_eq!(value, json!([70.0, "USC1", 72.0, "USC1"]));
    }
}
