use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{SpendingScale, SPENDING_SCALES};
use crate::error::ViewError;
use crate::spending::{align_to_years, rescale, split_spending};
use crate::types::{Incident, Series, SeriesPoint, SpendingRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingView {
    pub casualties: Series,
    /// Unscaled World spending, when the file has a World row.
    pub world: Option<Series>,
    /// Rescaled country spending, one point per casualty year.
    pub countries: Vec<Series>,
}

/// Total casualties per incident year.
pub fn casualties_by_year(incidents: &[Incident]) -> Series {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for i in incidents {
        *by_year.entry(i.year).or_insert(0.0) += i.casualty_count();
    }
    let points = by_year
        .into_iter()
        .map(|(year, total)| SeriesPoint {
            year,
            value: Some(total),
        })
        .collect();
    Series::new("casualties", points)
}

pub fn spending_view(
    spending: &[SpendingRecord],
    incidents: &[Incident],
) -> Result<SpendingView, ViewError> {
    spending_view_with(spending, incidents, &SPENDING_SCALES)
}

/// Like [`spending_view`] with an explicit set of country scales.
pub fn spending_view_with(
    spending: &[SpendingRecord],
    incidents: &[Incident],
    scales: &[SpendingScale],
) -> Result<SpendingView, ViewError> {
    let split = split_spending(spending);
    let casualties = casualties_by_year(incidents);
    let years = casualties.years();

    let countries = scales
        .iter()
        .map(|scale| {
            let raw = split
                .nations
                .country_series(scale.country)
                .ok_or_else(|| ViewError::UnknownKey {
                    kind: "spending country",
                    name: scale.country.to_string(),
                })?;
            let scaled = rescale(&raw, scale.divisor, scale.label);
            Ok(align_to_years(&scaled, &years))
        })
        .collect::<Result<Vec<_>, ViewError>>()?;

    Ok(SpendingView {
        casualties,
        world: split.world,
        countries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, year: i32, amount: Option<f64>) -> SpendingRecord {
        SpendingRecord {
            name: name.to_string(),
            code: String::new(),
            entity_type: "Country".to_string(),
            year,
            amount,
        }
    }

    #[test]
    fn casualties_sum_per_year() {
        let incidents = vec![
            Incident { year: 2001, killed: Some(2.0), wounded: Some(1.0), ..Default::default() },
            Incident { year: 2001, killed: None, wounded: Some(4.0), ..Default::default() },
            Incident { year: 2003, ..Default::default() },
        ];
        let series = casualties_by_year(&incidents);
        assert_eq!(series.years(), vec![2001, 2003]);
        assert_eq!(series.value_at(2001), Some(7.0));
        assert_eq!(series.value_at(2003), Some(0.0));
    }

    #[test]
    fn missing_country_is_reported() {
        let spending = vec![record("Iraq", 2001, Some(1.0))];
        let err = spending_view(&spending, &[]).unwrap_err();
        assert_eq!(
            err,
            ViewError::UnknownKey {
                kind: "spending country",
                name: "Nigeria".to_string()
            }
        );
    }

    #[test]
    fn country_series_follow_casualty_years() {
        let spending = vec![
            record("Iraq", 2000, Some(4e5)),
            record("Iraq", 2001, Some(2e5)),
        ];
        let incidents = vec![
            Incident { year: 2001, killed: Some(1.0), ..Default::default() },
            Incident { year: 2002, killed: Some(1.0), ..Default::default() },
        ];
        let scales = [SpendingScale { country: "Iraq", divisor: 1e5, label: "Iraq x1e5" }];
        let view = spending_view_with(&spending, &incidents, &scales).unwrap();
        let iraq = &view.countries[0];
        assert_eq!(iraq.label, "Iraq x1e5");
        assert_eq!(iraq.years(), vec![2001, 2002]);
        assert_eq!(iraq.value_at(2001), Some(2.0));
        assert_eq!(iraq.points[1].value, None);
    }
}
