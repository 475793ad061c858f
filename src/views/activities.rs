use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{YEAR_MAX, YEAR_MIN};
use crate::error::ViewError;
use crate::geo::{self, MapBounds};
use crate::types::{Incident, MapPoint, YearTrendRow};

/// "Terrorist activities" page: one year on the map plus the full trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitiesView {
    pub year: i32,
    /// Every incident recorded in `year`, mapped or not.
    pub total_attacks: u64,
    pub total_casualties: f64,
    /// Incidents of `year` with usable coordinates (`points.len()`).
    pub mapped_attacks: u64,
    pub points: Vec<MapPoint>,
    pub bounds: Option<MapBounds>,
    /// Independent of `year`.
    pub trend: Vec<YearTrendRow>,
}

pub fn activities_view(incidents: &[Incident], year: i32) -> Result<ActivitiesView, ViewError> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(ViewError::YearOutOfRange(year));
    }

    let (total_attacks, total_casualties) = incidents
        .iter()
        .filter(|i| i.year == year)
        .fold((0u64, 0.0f64), |(n, c), i| (n + 1, c + i.casualty_count()));

    let points = geo::extract_points(incidents, year);
    let bounds = geo::bounds(&points);
    log::debug!(
        "activities {}: {} attacks, {} mapped",
        year,
        total_attacks,
        points.len()
    );

    Ok(ActivitiesView {
        year,
        total_attacks,
        total_casualties,
        mapped_attacks: points.len() as u64,
        points,
        bounds,
        trend: yearly_trend(incidents),
    })
}

/// Attacks and casualties per year. Covers the whole slider domain plus any
/// other year in the data; a year with no attacks has no per-attack ratio.
pub fn yearly_trend(incidents: &[Incident]) -> Vec<YearTrendRow> {
    let mut by_year: BTreeMap<i32, (u64, f64)> =
        (YEAR_MIN..=YEAR_MAX).map(|y| (y, (0, 0.0))).collect();
    for i in incidents {
        let e = by_year.entry(i.year).or_insert((0, 0.0));
        e.0 += 1;
        e.1 += i.casualty_count();
    }
    by_year
        .into_iter()
        .map(|(year, (attacks, casualties))| YearTrendRow {
            year,
            attacks,
            casualties,
            casualties_per_attack: (attacks > 0).then(|| casualties / attacks as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(year: i32, killed: Option<f64>, wounded: Option<f64>) -> Incident {
        Incident {
            year,
            latitude: Some(1.0),
            longitude: Some(2.0),
            killed,
            wounded,
            ..Default::default()
        }
    }

    #[test]
    fn rejects_years_outside_the_slider() {
        assert_eq!(
            activities_view(&[], 1969),
            Err(ViewError::YearOutOfRange(1969))
        );
        assert_eq!(
            activities_view(&[], 2018),
            Err(ViewError::YearOutOfRange(2018))
        );
    }

    #[test]
    fn totals_include_unmapped_incidents() {
        let mut unmapped = incident(2000, Some(1.0), Some(1.0));
        unmapped.latitude = None;
        let incidents = vec![incident(2000, Some(3.0), None), unmapped];
        let view = activities_view(&incidents, 2000).unwrap();
        assert_eq!(view.total_attacks, 2);
        assert_eq!(view.total_casualties, 5.0);
        assert_eq!(view.mapped_attacks, 1);
        assert_eq!(view.points.len(), 1);
    }

    #[test]
    fn empty_year_has_no_ratio() {
        let incidents = vec![incident(1970, Some(2.0), Some(2.0)), incident(1970, None, None)];
        let trend = yearly_trend(&incidents);
        assert_eq!(trend.len(), (YEAR_MAX - YEAR_MIN + 1) as usize);
        assert_eq!(trend[0].year, 1970);
        assert_eq!(trend[0].attacks, 2);
        assert_eq!(trend[0].casualties_per_attack, Some(2.0));
        let empty = trend.iter().find(|r| r.year == 1993).unwrap();
        assert_eq!(empty.attacks, 0);
        assert_eq!(empty.casualties_per_attack, None);
    }

    #[test]
    fn trend_extends_to_years_outside_the_domain() {
        let trend = yearly_trend(&[incident(2018, Some(1.0), None)]);
        assert_eq!(trend.last().map(|r| r.year), Some(2018));
    }
}
