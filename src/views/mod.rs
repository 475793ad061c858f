// View builders: pure functions from the base tables plus filter parameters
// to the tables and series one dashboard page displays.
pub mod activities;
pub mod groups;
pub mod military;
pub mod regions;
pub mod targets;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::spending::split_spending;
use crate::types::{Incident, SpendingRecord};

pub use activities::{activities_view, ActivitiesView};
pub use groups::{groups_view, GroupsView};
pub use military::{spending_view, SpendingView};
pub use regions::{regions_view, RegionsView};
pub use targets::{targets_view, TargetsView};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_incidents: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub total_casualties: f64,
    pub total_groups: usize,
    pub total_countries: usize,
    pub total_regions: usize,
    pub spending_countries: usize,
    pub generated_at: DateTime<Utc>,
}

pub fn dataset_summary(incidents: &[Incident], spending: &[SpendingRecord]) -> DatasetSummary {
    let groups: HashSet<&str> = incidents.iter().map(|i| i.group.as_str()).collect();
    let countries: HashSet<&str> = incidents.iter().map(|i| i.country.as_str()).collect();
    let regions: HashSet<&str> = incidents.iter().map(|i| i.region.as_str()).collect();
    DatasetSummary {
        total_incidents: incidents.len(),
        first_year: incidents.iter().map(|i| i.year).min(),
        last_year: incidents.iter().map(|i| i.year).max(),
        total_casualties: incidents.iter().map(Incident::casualty_count).sum(),
        total_groups: groups.len(),
        total_countries: countries.len(),
        total_regions: regions.len(),
        spending_countries: split_spending(spending).nations.countries().len(),
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_distinct_labels() {
        let incidents = vec![
            Incident {
                year: 1999,
                group: "A".into(),
                country: "X".into(),
                region: "R".into(),
                killed: Some(2.0),
                ..Default::default()
            },
            Incident {
                year: 2004,
                group: "B".into(),
                country: "X".into(),
                region: "R".into(),
                wounded: Some(1.0),
                ..Default::default()
            },
        ];
        let s = dataset_summary(&incidents, &[]);
        assert_eq!(s.total_incidents, 2);
        assert_eq!(s.first_year, Some(1999));
        assert_eq!(s.last_year, Some(2004));
        assert_eq!(s.total_casualties, 3.0);
        assert_eq!(s.total_groups, 2);
        assert_eq!(s.total_countries, 1);
        assert_eq!(s.spending_countries, 0);
    }
}
