use serde::Serialize;

use crate::crosstab::Crosstab;
use crate::error::ViewError;
use crate::types::Incident;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionsView {
    /// Every region, in order of first appearance (the multiselect options).
    pub regions: Vec<String>,
    /// Regions actually charted, in `regions` order.
    pub selected: Vec<String>,
    /// Year x region attack counts restricted to `selected`.
    pub attacks: Crosstab<i32>,
}

/// Attacks per year per region. An empty selection means every region.
pub fn regions_view(incidents: &[Incident], selected: &[String]) -> Result<RegionsView, ViewError> {
    let table = Crosstab::count(incidents.iter().map(|i| (i.year, i.region.as_str())));
    if let Some(unknown) = selected.iter().find(|r| !table.has_column(r)) {
        return Err(ViewError::UnknownKey {
            kind: "region",
            name: unknown.clone(),
        });
    }

    let regions = table.columns().to_vec();
    let attacks = if selected.is_empty() {
        table
    } else {
        table.retain_columns(selected)
    };
    Ok(RegionsView {
        regions,
        selected: attacks.columns().to_vec(),
        attacks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incidents() -> Vec<Incident> {
        [
            (1980, "Central America & Caribbean"),
            (1980, "Western Europe"),
            (1981, "South Asia"),
            (1981, "Western Europe"),
            (1982, "South Asia"),
        ]
        .into_iter()
        .map(|(year, region)| Incident {
            year,
            region: region.to_string(),
            ..Default::default()
        })
        .collect()
    }

    #[test]
    fn empty_selection_is_every_region() {
        let data = incidents();
        let all = regions_view(&data, &[]).unwrap();
        let named: Vec<String> = all.regions.clone();
        let explicit = regions_view(&data, &named).unwrap();
        assert_eq!(all, explicit);
        assert_eq!(
            all.selected,
            vec!["Central America & Caribbean", "Western Europe", "South Asia"]
        );
    }

    #[test]
    fn selection_follows_region_order_not_pick_order() {
        let data = incidents();
        let picked = vec!["South Asia".to_string(), "Central America & Caribbean".to_string()];
        let view = regions_view(&data, &picked).unwrap();
        assert_eq!(
            view.attacks.columns(),
            &["Central America & Caribbean", "South Asia"]
        );
        assert_eq!(view.attacks.get(&1982, "South Asia"), Some(1));
        assert_eq!(view.regions.len(), 3);
    }

    #[test]
    fn column_sums_equal_region_counts() {
        let data = incidents();
        let view = regions_view(&data, &[]).unwrap();
        for region in &view.regions {
            let expected = data.iter().filter(|i| &i.region == region).count() as u64;
            assert_eq!(view.attacks.column_total(region), Some(expected));
        }
    }

    #[test]
    fn unknown_region_is_reported() {
        let err = regions_view(&incidents(), &["Atlantis".to_string()]).unwrap_err();
        assert_eq!(
            err,
            ViewError::UnknownKey {
                kind: "region",
                name: "Atlantis".to_string()
            }
        );
    }
}
