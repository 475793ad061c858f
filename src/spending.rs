// Reshape the long-format spending records into a World series plus a
// year-by-country table, and rescale country series for display.
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::catalog::{COUNTRY_TYPE, WORLD_ENTITY};
use crate::types::{Series, SeriesPoint, SpendingRecord};

/// Years as rows, countries as columns. Countries keep file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NationsTable {
    years: Vec<i32>,
    countries: Vec<String>,
    /// `values[year][country]`
    values: Vec<Vec<Option<f64>>>,
}

impl NationsTable {
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn get(&self, year: i32, country: &str) -> Option<f64> {
        let y = self.years.binary_search(&year).ok()?;
        let c = self.countries.iter().position(|n| n == country)?;
        self.values[y][c]
    }

    /// The country's column over every year of the table.
    pub fn country_series(&self, country: &str) -> Option<Series> {
        let c = self.countries.iter().position(|n| n == country)?;
        let points = self
            .years
            .iter()
            .zip(&self.values)
            .map(|(&year, line)| SeriesPoint {
                year,
                value: line[c],
            })
            .collect();
        Some(Series::new(country, points))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSplit {
    /// `None` when the file has no World row.
    pub world: Option<Series>,
    pub nations: NationsTable,
}

/// Separate the World aggregate from per-country rows. Countries with no
/// figure in any year are dropped.
pub fn split_spending(records: &[SpendingRecord]) -> SpendingSplit {
    let years: Vec<i32> = records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut world: Vec<SeriesPoint> = Vec::new();
    let mut countries: Vec<String> = Vec::new();
    let mut by_country: HashMap<&str, HashMap<i32, f64>> = HashMap::new();

    for r in records {
        if r.name == WORLD_ENTITY {
            world.push(SeriesPoint {
                year: r.year,
                value: r.amount,
            });
            continue;
        }
        if r.entity_type != COUNTRY_TYPE {
            continue;
        }
        let entry = by_country.entry(r.name.as_str()).or_insert_with(|| {
            countries.push(r.name.clone());
            HashMap::new()
        });
        if let Some(amount) = r.amount {
            entry.insert(r.year, amount);
        }
    }

    countries.retain(|c| by_country.get(c.as_str()).is_some_and(|v| !v.is_empty()));
    let values: Vec<Vec<Option<f64>>> = years
        .iter()
        .map(|year| {
            countries
                .iter()
                .map(|c| by_country.get(c.as_str()).and_then(|v| v.get(year).copied()))
                .collect::<Vec<_>>()
        })
        .collect();

    world.sort_by_key(|p| p.year);
    let world = (!world.is_empty()).then(|| Series::new(WORLD_ENTITY, world));
    log::debug!(
        "spending split: {} countries over {} years",
        countries.len(),
        years.len()
    );
    SpendingSplit {
        world,
        nations: NationsTable {
            years,
            countries,
            values,
        },
    }
}

/// `value / divisor` at every point; gaps stay gaps.
pub fn rescale(series: &Series, divisor: f64, label: &str) -> Series {
    let points = series
        .points
        .iter()
        .map(|p| SeriesPoint {
            year: p.year,
            value: p.value.map(|v| v / divisor),
        })
        .collect();
    Series::new(label, points)
}

/// Left join onto `years`: one point per year, `None` where `series` has none.
pub fn align_to_years(series: &Series, years: &[i32]) -> Series {
    let lookup: HashMap<i32, Option<f64>> =
        series.points.iter().map(|p| (p.year, p.value)).collect();
    let points = years
        .iter()
        .map(|&year| SeriesPoint {
            year,
            value: lookup.get(&year).copied().flatten(),
        })
        .collect();
    Series::new(series.label.clone(), points)
}
