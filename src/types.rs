use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::util::format_optional;

/// One incident row exactly as it appears in the CSV. Every field is text so
/// a single malformed cell never rejects the whole row.
#[derive(Debug, Deserialize)]
pub struct RawIncident {
    #[serde(rename = "eventid")]
    pub event_id: Option<String>,
    #[serde(rename = "iyear")]
    pub year: Option<String>,
    #[serde(rename = "latitude")]
    pub latitude: Option<String>,
    #[serde(rename = "longitude")]
    pub longitude: Option<String>,
    #[serde(rename = "region_txt")]
    pub region: Option<String>,
    #[serde(rename = "country_txt")]
    pub country: Option<String>,
    #[serde(rename = "gname")]
    pub group: Option<String>,
    #[serde(rename = "attacktype1_txt")]
    pub attack_type: Option<String>,
    #[serde(rename = "targtype1_txt")]
    pub target_type: Option<String>,
    #[serde(rename = "nkill")]
    pub killed: Option<String>,
    #[serde(rename = "nwound")]
    pub wounded: Option<String>,
}

/// Columns the incident loader refuses to run without.
pub const INCIDENT_COLUMNS: [&str; 11] = [
    "eventid",
    "iyear",
    "latitude",
    "longitude",
    "region_txt",
    "country_txt",
    "gname",
    "attacktype1_txt",
    "targtype1_txt",
    "nkill",
    "nwound",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Incident {
    pub event_id: String,
    pub year: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region: String,
    pub country: String,
    pub group: String,
    pub attack_type: String,
    pub target_type: String,
    pub killed: Option<f64>,
    pub wounded: Option<f64>,
    /// Filled in by `loader::normalize_casualties`.
    pub casualties: Option<f64>,
}

impl Incident {
    /// Killed plus wounded with missing values counted as zero.
    pub fn casualty_count(&self) -> f64 {
        self.casualties
            .unwrap_or_else(|| self.killed.unwrap_or(0.0) + self.wounded.unwrap_or(0.0))
    }

    /// `(latitude, longitude)` when both are present and usable on a map.
    /// The source file marks a few bad longitudes with huge negative values.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() && lon > -180.0 => {
                Some((lat, lon))
            }
            _ => None,
        }
    }
}

/// One country-year military expenditure figure (long format).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingRecord {
    pub name: String,
    pub code: String,
    pub entity_type: String,
    pub year: i32,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Tabled)]
pub struct MapPoint {
    #[serde(rename = "lat")]
    #[tabled(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    #[tabled(rename = "Longitude")]
    pub longitude: f64,
    #[tabled(rename = "Casualties")]
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct YearTrendRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Attacks")]
    #[tabled(rename = "Attacks")]
    pub attacks: u64,
    #[serde(rename = "Casualties")]
    #[tabled(rename = "Casualties")]
    pub casualties: f64,
    #[serde(rename = "CasualtiesPerAttack")]
    #[tabled(rename = "CasualtiesPerAttack")]
    #[tabled(display_with = "format_optional")]
    pub casualties_per_attack: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct GroupRank {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Group")]
    #[tabled(rename = "Group")]
    pub group: String,
    #[serde(rename = "Attacks")]
    #[tabled(rename = "Attacks")]
    pub attacks: u64,
}

/// One bar of a "top N" panel.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct RankedEntry {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    /// `None` is a gap, never zero.
    pub value: Option<f64>,
}

/// A labelled year-indexed line or bar trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.year == year)
            .and_then(|p| p.value)
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
