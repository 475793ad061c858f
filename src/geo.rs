use serde::Serialize;

use crate::types::{Incident, MapPoint};

/// Lat/lon extent of a point set, for centring the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl MapBounds {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }
}

/// Incidents of `year` that can be placed on a map, weighted by casualties.
/// Input order is preserved.
pub fn extract_points(incidents: &[Incident], year: i32) -> Vec<MapPoint> {
    incidents
        .iter()
        .filter(|i| i.year == year)
        .filter_map(|i| {
            i.coordinates().map(|(latitude, longitude)| MapPoint {
                latitude,
                longitude,
                weight: i.casualty_count(),
            })
        })
        .collect()
}

pub fn bounds(points: &[MapPoint]) -> Option<MapBounds> {
    let first = points.first()?;
    let init = MapBounds {
        min_latitude: first.latitude,
        max_latitude: first.latitude,
        min_longitude: first.longitude,
        max_longitude: first.longitude,
    };
    Some(points.iter().skip(1).fold(init, |b, p| MapBounds {
        min_latitude: b.min_latitude.min(p.latitude),
        max_latitude: b.max_latitude.max(p.latitude),
        min_longitude: b.min_longitude.min(p.longitude),
        max_longitude: b.max_longitude.max(p.longitude),
    }))
}
