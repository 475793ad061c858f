use std::path::PathBuf;

/// Runtime settings. Built from the command line in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub incidents_path: PathBuf,
    pub spending_path: PathBuf,
    /// Where page exports (CSV + JSON) are written.
    pub out_dir: PathBuf,
    /// Rows shown in each console preview table.
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            incidents_path: PathBuf::from("data1.csv"),
            spending_path: PathBuf::from("Militaryspending.csv"),
            out_dir: PathBuf::from("reports"),
            preview_rows: 10,
        }
    }
}

impl Config {
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }
}
