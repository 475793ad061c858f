use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::catalog::{
    scope_label, DrilldownCase, DRILLDOWN_CASES, DRILLDOWN_DEPTH, FOCUS_COUNTRY_COUNT,
    FOCUS_REGIONS, TOP_GROUP_COUNT,
};
use crate::crosstab::Crosstab;
use crate::error::ViewError;
use crate::types::{GroupRank, Incident, RankedEntry, Series, SeriesPoint};
use crate::util::{ranked_sums, value_counts};

/// Three-panel breakdown of one group inside one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDrilldown {
    pub title: String,
    pub group: String,
    pub region: String,
    pub casualties_by_country: Vec<RankedEntry>,
    pub attack_types: Vec<RankedEntry>,
    pub target_types: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupsView {
    /// The canonical ranking, regardless of selection.
    pub top_groups: Vec<GroupRank>,
    /// Year x group attack counts for the selected top-10 groups, rank order.
    pub timeline: Crosstab<i32>,
    /// Region x group attack counts, columns renamed to short labels.
    pub scope: Crosstab<String>,
    pub drilldowns: Vec<GroupDrilldown>,
    /// One casualty trend per focus region, in `FOCUS_REGIONS` order.
    pub region_trends: Vec<RegionTrend>,
}

/// Casualties per year for the leading countries of one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTrend {
    pub region: String,
    pub countries: Vec<Series>,
}

/// The ten most active named groups. The single most frequent label is the
/// unattributed bucket and is skipped.
pub fn top_groups(incidents: &[Incident]) -> Result<Vec<GroupRank>, ViewError> {
    let counts = value_counts(incidents.iter().map(|i| i.group.as_str()));
    let needed = TOP_GROUP_COUNT + 1;
    if counts.len() < needed {
        return Err(ViewError::NotEnoughGroups {
            needed,
            found: counts.len(),
        });
    }
    Ok(counts
        .into_iter()
        .skip(1)
        .take(TOP_GROUP_COUNT)
        .enumerate()
        .map(|(idx, (group, attacks))| GroupRank {
            rank: idx + 1,
            group,
            attacks,
        })
        .collect())
}

pub fn groups_view(incidents: &[Incident], selected: &[String]) -> Result<GroupsView, ViewError> {
    let top = top_groups(incidents)?;
    let names: Vec<&str> = top.iter().map(|g| g.group.as_str()).collect();

    if let Some(unknown) = selected.iter().find(|s| !names.contains(&s.as_str())) {
        return Err(ViewError::UnknownKey {
            kind: "top-10 group",
            name: unknown.clone(),
        });
    }
    let picked: Vec<&str> = if selected.is_empty() {
        names.clone()
    } else {
        let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
        names.iter().copied().filter(|n| wanted.contains(n)).collect()
    };

    let timeline = Crosstab::count(incidents.iter().map(|i| (i.year, i.group.as_str())))
        .select_columns(picked.as_slice());
    let scope = scope_of_operation(incidents, &names)?;
    let drilldowns = DRILLDOWN_CASES
        .iter()
        .map(|case| group_drilldown(incidents, case))
        .collect::<Result<Vec<_>, _>>()?;
    let region_trends = FOCUS_REGIONS
        .iter()
        .map(|region| {
            Ok(RegionTrend {
                region: region.to_string(),
                countries: region_casualty_trend(incidents, region, FOCUS_COUNTRY_COUNT)?,
            })
        })
        .collect::<Result<Vec<_>, ViewError>>()?;

    Ok(GroupsView {
        top_groups: top,
        timeline,
        scope,
        drilldowns,
        region_trends,
    })
}

/// Region x group counts over `groups` with each column renamed to its
/// fixed short label. Fails if any group has no label: the labels only
/// describe one specific ranking.
pub fn scope_of_operation(
    incidents: &[Incident],
    groups: &[&str],
) -> Result<Crosstab<String>, ViewError> {
    let unlabelled: Vec<String> = groups
        .iter()
        .filter(|g| scope_label(g).is_none())
        .map(|g| g.to_string())
        .collect();
    if !unlabelled.is_empty() {
        return Err(ViewError::ScopeLabelMismatch(unlabelled));
    }

    let table = Crosstab::count(
        incidents
            .iter()
            .map(|i| (i.region.clone(), i.group.as_str())),
    )
    .select_columns(groups);
    let labels = table
        .columns()
        .iter()
        .filter_map(|g| scope_label(g))
        .map(str::to_string)
        .collect();
    Ok(table.with_column_names(labels))
}

pub fn group_drilldown(
    incidents: &[Incident],
    case: &DrilldownCase,
) -> Result<GroupDrilldown, ViewError> {
    let rows: Vec<&Incident> = incidents
        .iter()
        .filter(|i| i.group == case.group && i.region == case.region)
        .collect();
    if rows.is_empty() {
        return Err(ViewError::NoData(format!("{} in {}", case.group, case.region)));
    }

    let casualties_by_country = top_entries(ranked_sums(
        rows.iter().map(|i| (i.country.as_str(), i.casualty_count())),
    ));
    let attack_types = top_entries(count_entries(rows.iter().map(|i| i.attack_type.as_str())));
    let target_types = top_entries(count_entries(rows.iter().map(|i| i.target_type.as_str())));

    Ok(GroupDrilldown {
        title: case.title.to_string(),
        group: case.group.to_string(),
        region: case.region.to_string(),
        casualties_by_country,
        attack_types,
        target_types,
    })
}

/// One casualty-per-year series for each of the `n` countries with the most
/// incidents in `region`. Years run over the region's incident years; a year
/// with no incident in a country is a gap.
pub fn region_casualty_trend(
    incidents: &[Incident],
    region: &str,
    n: usize,
) -> Result<Vec<Series>, ViewError> {
    let rows: Vec<&Incident> = incidents.iter().filter(|i| i.region == region).collect();
    if rows.is_empty() {
        return Err(ViewError::NoData(region.to_string()));
    }

    let mut sums: BTreeMap<i32, BTreeMap<&str, f64>> = BTreeMap::new();
    for i in &rows {
        *sums
            .entry(i.year)
            .or_default()
            .entry(i.country.as_str())
            .or_insert(0.0) += i.casualty_count();
    }

    let leaders = value_counts(rows.iter().map(|i| i.country.as_str()));
    Ok(leaders
        .into_iter()
        .take(n)
        .map(|(country, _)| {
            let points = sums
                .iter()
                .map(|(&year, by_country)| SeriesPoint {
                    year,
                    value: by_country.get(country.as_str()).copied(),
                })
                .collect();
            Series::new(country, points)
        })
        .collect())
}

fn count_entries<'a, I>(values: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(values)
        .into_iter()
        .map(|(name, n)| (name, n as f64))
        .collect()
}

fn top_entries(ranked: Vec<(String, f64)>) -> Vec<RankedEntry> {
    ranked
        .into_iter()
        .take(DRILLDOWN_DEPTH)
        .map(|(name, value)| RankedEntry { name, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(group: &str, n: usize) -> Vec<Incident> {
        (0..n)
            .map(|_| Incident {
                year: 2000,
                group: group.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn too_few_groups_is_an_error() {
        let mut data = named("Unknown", 3);
        data.extend(named("Taliban", 2));
        assert_eq!(
            top_groups(&data),
            Err(ViewError::NotEnoughGroups { needed: 11, found: 2 })
        );
    }

    #[test]
    fn ranking_skips_the_most_frequent_and_breaks_ties_by_appearance() {
        let mut data = named("Unknown", 50);
        for (i, g) in ["g01", "g02", "g03", "g04", "g05", "g06", "g07", "g08", "g09", "g10", "g11"]
            .iter()
            .enumerate()
        {
            data.extend(named(g, if i < 2 { 5 } else { 3 }));
        }
        let top = top_groups(&data).unwrap();
        assert_eq!(top.len(), TOP_GROUP_COUNT);
        assert_eq!(top[0].group, "g01");
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[1].group, "g02");
        assert_eq!(top[9].group, "g10");
        assert!(top.iter().all(|g| g.group != "Unknown"));
    }

    #[test]
    fn scope_rejects_unlabelled_groups() {
        let err = scope_of_operation(&[], &["Taliban", "g01"]).unwrap_err();
        assert_eq!(err, ViewError::ScopeLabelMismatch(vec!["g01".to_string()]));
    }

    #[test]
    fn drilldown_without_rows_is_no_data() {
        let err = group_drilldown(&named("Taliban", 2), &DRILLDOWN_CASES[1]).unwrap_err();
        assert!(matches!(err, ViewError::NoData(_)));
    }

    #[test]
    fn region_trend_leaves_gaps() {
        let mk = |year, country: &str, killed| Incident {
            year,
            region: "South Asia".to_string(),
            country: country.to_string(),
            killed: Some(killed),
            ..Default::default()
        };
        let data = vec![
            mk(2001, "India", 1.0),
            mk(2002, "India", 2.0),
            mk(2002, "Nepal", 4.0),
            mk(2002, "India", 1.0),
        ];
        let trend = region_casualty_trend(&data, "South Asia", 5).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "India");
        assert_eq!(trend[0].value_at(2002), Some(3.0));
        assert_eq!(trend[1].label, "Nepal");
        assert_eq!(trend[1].points[0].value, None);
        assert_eq!(trend[1].value_at(2002), Some(4.0));
    }
}
