use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

use crate::crosstab::Crosstab;
use crate::error::OutputError;
use crate::types::Series;
use crate::util::{format_int, format_optional};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Header row plus one record per table row; headers come from the table.
pub fn write_crosstab<R: Display>(
    path: &Path,
    row_header: &str,
    table: &Crosstab<R>,
) -> Result<(), OutputError>
where
    R: Ord + Clone,
{
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(crosstab_header(row_header, table))?;
    for (row, cells) in table.iter_rows() {
        let mut record = vec![row.to_string()];
        record.extend(cells.iter().map(u64::to_string));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Wide layout: a `Year` column and one column per series. Gaps are empty.
pub fn write_series(path: &Path, series: &[Series]) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    let (header, rows) = series_grid(series, |v| v.map(|x| x.to_string()).unwrap_or_default());
    wtr.write_record(&header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", render_rows(rows, max_rows));
}

pub fn render_rows<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)\n".to_string();
    }
    format!("{}\n", Table::new(slice).with(Style::markdown()))
}

pub fn preview_crosstab<R>(row_header: &str, table: &Crosstab<R>, max_rows: usize)
where
    R: Display + Ord + Clone,
{
    println!("{}", render_crosstab(row_header, table, max_rows));
}

pub fn render_crosstab<R>(row_header: &str, table: &Crosstab<R>, max_rows: usize) -> String
where
    R: Display + Ord + Clone,
{
    if table.is_empty() {
        return "(no rows)\n".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(crosstab_header(row_header, table));
    for (row, cells) in table.iter_rows().take(max_rows) {
        let mut record = vec![row.to_string()];
        record.extend(cells.iter().map(|n| format_int(*n)));
        builder.push_record(record);
    }
    format!("{}\n", builder.build().with(Style::markdown()))
}

pub fn preview_series(series: &[Series], max_rows: usize) {
    println!("{}", render_series(series, max_rows));
}

pub fn render_series(series: &[Series], max_rows: usize) -> String {
    let (header, rows) = series_grid(series, |v| format_optional(&v));
    if rows.is_empty() {
        return "(no rows)\n".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows.into_iter().take(max_rows) {
        builder.push_record(row);
    }
    format!("{}\n", builder.build().with(Style::markdown()))
}

fn crosstab_header<R>(row_header: &str, table: &Crosstab<R>) -> Vec<String>
where
    R: Ord + Clone,
{
    let mut header = vec![row_header.to_string()];
    header.extend(table.columns().iter().cloned());
    header
}

/// Union of all series years, ascending, one cell per series.
fn series_grid<F>(series: &[Series], cell: F) -> (Vec<String>, Vec<Vec<String>>)
where
    F: Fn(Option<f64>) -> String,
{
    let mut header = vec!["Year".to_string()];
    header.extend(series.iter().map(|s| s.label.clone()));
    let years: BTreeSet<i32> = series.iter().flat_map(|s| s.years()).collect();
    let rows = years
        .into_iter()
        .map(|year| {
            let mut row = vec![year.to_string()];
            row.extend(series.iter().map(|s| cell(s.value_at(year))));
            row
        })
        .collect();
    (header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SeriesPoint, YearTrendRow};

    #[test]
    fn empty_tables_render_placeholder() {
        let rows: Vec<YearTrendRow> = Vec::new();
        assert_eq!(render_rows(&rows, 5), "(no rows)\n");
        let table: Crosstab<i32> = Crosstab::count(Vec::<(i32, &str)>::new());
        assert_eq!(render_crosstab("Year", &table, 5), "(no rows)\n");
    }

    #[test]
    fn crosstab_preview_has_header_and_limited_rows() {
        let table = Crosstab::count(vec![(2000, "South Asia"), (2001, "South Asia"), (2002, "Western Europe")]);
        let text = render_crosstab("Year", &table, 2);
        assert!(text.contains("South Asia"));
        assert!(text.contains("2001"));
        assert!(!text.contains("2002"));
    }

    #[test]
    fn series_preview_shows_gaps_as_blank() {
        let series = vec![
            Series::new("a", vec![SeriesPoint { year: 2000, value: Some(1500.0) }]),
            Series::new("b", vec![SeriesPoint { year: 2001, value: Some(2.0) }]),
        ];
        let (header, rows) = series_grid(&series, |v| format_optional(&v));
        assert_eq!(header, vec!["Year", "a", "b"]);
        assert_eq!(rows[0], vec!["2000", "1,500.00", ""]);
        assert_eq!(rows[1], vec!["2001", "", "2.00"]);
        assert!(render_series(&series, 10).contains("1,500.00"));
    }
}
