// Process-lifetime, read-only base tables.
//
// Each table is parsed at most once per path, even when several callers ask
// for it at the same time: concurrent first requests block on the same
// `OnceCell` instead of re-reading the file.
use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::Config;
use crate::error::DataLoadError;
use crate::loader;
use crate::types::{Incident, SpendingRecord};
use crate::util::format_int;

/// Single-flight cache of one loaded table per file path.
pub struct DataCache<T> {
    cells: Mutex<HashMap<PathBuf, Arc<OnceCell<Arc<T>>>>>,
}

impl<T> Default for DataCache<T> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> DataCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, running `load` only if no earlier
    /// call succeeded. A failed load is not cached.
    pub fn get_or_load<F>(&self, path: &Path, load: F) -> Result<Arc<T>, DataLoadError>
    where
        F: FnOnce(&Path) -> Result<T, DataLoadError>,
    {
        let cell = {
            let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
            cells.entry(path.to_path_buf()).or_default().clone()
        };
        if cell.get().is_some() {
            log::debug!("{}: using cached table", path.display());
        }
        cell.get_or_try_init(|| load(path).map(Arc::new)).cloned()
    }
}

static INCIDENTS: Lazy<DataCache<Vec<Incident>>> = Lazy::new(DataCache::new);
static SPENDING: Lazy<DataCache<Vec<SpendingRecord>>> = Lazy::new(DataCache::new);

/// The two immutable base tables every view builder reads from.
#[derive(Debug, Clone)]
pub struct DataContext {
    incidents: Arc<Vec<Incident>>,
    spending: Arc<Vec<SpendingRecord>>,
}

impl DataContext {
    /// Load (or reuse) both tables named in `config`. Either file failing is
    /// fatal: there is no partial dashboard.
    pub fn open(config: &Config) -> Result<Self, DataLoadError> {
        let incidents = INCIDENTS.get_or_load(&config.incidents_path, load_normalized_incidents)?;
        let spending = SPENDING.get_or_load(&config.spending_path, |path| {
            let records = loader::load_spending(path)?;
            log::info!(
                "{}: {} spending figures loaded",
                path.display(),
                format_int(records.len())
            );
            Ok(records)
        })?;
        Ok(Self {
            incidents,
            spending,
        })
    }

    /// Build a context from tables already in memory. Casualties are
    /// normalized here so views always see zero-filled figures.
    pub fn from_tables(incidents: Vec<Incident>, spending: Vec<SpendingRecord>) -> Self {
        Self {
            incidents: Arc::new(loader::normalize_casualties(incidents)),
            spending: Arc::new(spending),
        }
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn spending(&self) -> &[SpendingRecord] {
        &self.spending
    }
}

fn load_normalized_incidents(path: &Path) -> Result<Vec<Incident>, DataLoadError> {
    let (incidents, report) = loader::load_incidents(path)?;
    log::info!(
        "{}: {} rows read, {} loaded, {} skipped, {} without usable coordinates",
        path.display(),
        format_int(report.total_rows),
        format_int(report.loaded_rows),
        format_int(report.parse_errors),
        format_int(report.missing_coordinates)
    );
    Ok(loader::normalize_casualties(incidents))
}
