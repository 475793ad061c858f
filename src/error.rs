use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{YEAR_MAX, YEAR_MIN};

/// Failure to read one of the two base tables. Always fatal at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} is missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// A view could not be built from the current filter parameters.
///
/// These are "no data" answers for the presentation layer, not crashes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("year {0} is outside {min}..={max}", min = YEAR_MIN, max = YEAR_MAX)]
    YearOutOfRange(i32),
    #[error("no {kind} named `{name}`")]
    UnknownKey { kind: &'static str, name: String },
    #[error("no data for {0}")]
    NoData(String),
    #[error("need at least {needed} distinct groups to rank a top 10, found {found}")]
    NotEnoughGroups { needed: usize, found: usize },
    #[error("top-10 ranking no longer matches the scope-of-operation labels; unlabelled: {}", .0.join(", "))]
    ScopeLabelMismatch(Vec<String>),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] DataLoadError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_error_names_the_slider_domain() {
        assert_eq!(
            ViewError::YearOutOfRange(1969).to_string(),
            "year 1969 is outside 1970..=2017"
        );
    }

    #[test]
    fn load_errors_name_the_file() {
        let err = DataLoadError::MissingColumn {
            path: PathBuf::from("data1.csv"),
            column: "iyear".to_string(),
        };
        assert_eq!(err.to_string(), "data1.csv is missing required column `iyear`");
    }
}
