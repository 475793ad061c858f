use crate::error::DataLoadError;
use crate::types::{Incident, RawIncident, SpendingRecord, INCIDENT_COLUMNS};
use crate::util::{decode_latin1, parse_f64_safe, parse_i32_safe, text_or};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub missing_coordinates: usize,
}

/// Load the incident CSV. Missing casualty figures stay `None`; see
/// [`normalize_casualties`].
pub fn load_incidents(path: &Path) -> Result<(Vec<Incident>, LoadReport), DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_incidents(file, path)
}

/// Same as [`load_incidents`] over any reader; `origin` names the source in errors.
pub fn read_incidents<R: Read>(
    reader: R,
    origin: &Path,
) -> Result<(Vec<Incident>, LoadReport), DataLoadError> {
    let csv_err = |source| DataLoadError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    if let Some(column) = INCIDENT_COLUMNS
        .iter()
        .find(|c| !headers.iter().any(|h| h.trim() == **c))
    {
        return Err(DataLoadError::MissingColumn {
            path: origin.to_path_buf(),
            column: column.to_string(),
        });
    }

    let mut report = LoadReport::default();
    let mut incidents: Vec<Incident> = Vec::new();

    for result in rdr.deserialize::<RawIncident>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::debug!("{}: skipping row {}: {}", origin.display(), report.total_rows, e);
                report.parse_errors += 1;
                continue;
            }
        };

        let year = match parse_i32_safe(row.year.as_deref()) {
            Some(y) => y,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };

        // Negative counts are data-entry noise; treat them like blanks.
        let killed = parse_f64_safe(row.killed.as_deref()).filter(|v| *v >= 0.0);
        let wounded = parse_f64_safe(row.wounded.as_deref()).filter(|v| *v >= 0.0);

        let incident = Incident {
            event_id: text_or(row.event_id, ""),
            year,
            latitude: parse_f64_safe(row.latitude.as_deref()),
            longitude: parse_f64_safe(row.longitude.as_deref()),
            region: text_or(row.region, "Unknown"),
            country: text_or(row.country, "Unknown"),
            group: text_or(row.group, "Unknown"),
            attack_type: text_or(row.attack_type, "Unknown"),
            target_type: text_or(row.target_type, "Unknown"),
            killed,
            wounded,
            casualties: None,
        };
        if incident.coordinates().is_none() {
            report.missing_coordinates += 1;
        }
        incidents.push(incident);
    }

    report.loaded_rows = incidents.len();
    if report.parse_errors > 0 {
        log::warn!(
            "{}: skipped {} of {} rows that could not be parsed",
            origin.display(),
            report.parse_errors,
            report.total_rows
        );
    }
    Ok((incidents, report))
}

/// Zero-fill missing killed/wounded and derive the casualty column.
pub fn normalize_casualties(incidents: Vec<Incident>) -> Vec<Incident> {
    incidents
        .into_iter()
        .map(|mut i| {
            let killed = i.killed.unwrap_or(0.0);
            let wounded = i.wounded.unwrap_or(0.0);
            i.killed = Some(killed);
            i.wounded = Some(wounded);
            i.casualties = Some(killed + wounded);
            i
        })
        .collect()
}

/// Load the ISO-8859-1 encoded military spending CSV and melt its year
/// columns into one record per entity and year.
pub fn load_spending(path: &Path) -> Result<Vec<SpendingRecord>, DataLoadError> {
    let bytes = std::fs::read(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_spending(bytes.as_slice(), path)
}

pub fn read_spending<R: Read>(
    mut reader: R,
    origin: &Path,
) -> Result<Vec<SpendingRecord>, DataLoadError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| DataLoadError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
    let text = decode_latin1(&bytes);

    let csv_err = |source| DataLoadError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = rdr.headers().map_err(csv_err)?.clone();

    let position = |name: &str| -> Result<usize, DataLoadError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DataLoadError::MissingColumn {
                path: origin.to_path_buf(),
                column: name.to_string(),
            })
    };
    let name_idx = position("Name")?;
    let type_idx = position("Type")?;
    let code_idx = position("Code").ok();

    // Every header that reads as a year is a data column.
    let year_columns: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| parse_i32_safe(Some(h)).map(|y| (i, y)))
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(csv_err)?;
        let name = row.get(name_idx).unwrap_or("").trim().to_string();
        if name.is_empty() {
            continue;
        }
        let entity_type = row.get(type_idx).unwrap_or("").trim().to_string();
        let code = code_idx
            .and_then(|i| row.get(i))
            .unwrap_or("")
            .trim()
            .to_string();
        for &(idx, year) in &year_columns {
            records.push(SpendingRecord {
                name: name.clone(),
                code: code.clone(),
                entity_type: entity_type.clone(),
                year,
                amount: parse_f64_safe(row.get(idx)),
            });
        }
    }
    Ok(records)
}
