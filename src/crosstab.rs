use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A count matrix: one row per distinct row key (ascending), one column per
/// distinct category in the order categories were first seen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crosstab<R> {
    rows: Vec<R>,
    columns: Vec<String>,
    cells: Vec<Vec<u64>>,
}

impl<R: Ord + Clone> Crosstab<R> {
    /// Count `(row, column)` observations.
    pub fn count<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, &'a str)>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut column_index: HashMap<&'a str, usize> = HashMap::new();
        let mut by_row: BTreeMap<R, HashMap<usize, u64>> = BTreeMap::new();
        for (row, column) in pairs {
            let idx = *column_index.entry(column).or_insert_with(|| {
                columns.push(column.to_string());
                columns.len() - 1
            });
            *by_row.entry(row).or_default().entry(idx).or_insert(0) += 1;
        }

        let width = columns.len();
        let (rows, cells) = by_row
            .into_iter()
            .map(|(row, counts)| {
                let mut line = vec![0u64; width];
                for (idx, n) in counts {
                    line[idx] = n;
                }
                (row, line)
            })
            .unzip();
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Count at `(row, column)`; `None` if either key is absent.
    pub fn get(&self, row: &R, column: &str) -> Option<u64> {
        let r = self.rows.binary_search(row).ok()?;
        let c = self.column_position(column)?;
        Some(self.cells[r][c])
    }

    /// Iterate a row's cells alongside their row key.
    pub fn iter_rows(&self) -> impl Iterator<Item = (&R, &[u64])> {
        self.rows.iter().zip(self.cells.iter().map(Vec::as_slice))
    }

    /// One column as `(row key, count)` pairs over every row.
    pub fn column(&self, name: &str) -> Option<Vec<(R, u64)>> {
        let c = self.column_position(name)?;
        Some(
            self.rows
                .iter()
                .cloned()
                .zip(self.cells.iter().map(|line| line[c]))
                .collect(),
        )
    }

    pub fn column_total(&self, name: &str) -> Option<u64> {
        let c = self.column_position(name)?;
        Some(self.cells.iter().map(|line| line[c]).sum())
    }

    /// Keep only the named columns, in the order they are listed.
    /// Names that are not columns are ignored.
    pub fn select_columns<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let picks: Vec<usize> = names
            .iter()
            .filter_map(|n| self.column_position(n.as_ref()))
            .collect();
        self.project(&picks)
    }

    /// Keep only the named columns, in this table's own column order.
    pub fn retain_columns<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let keep: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        let picks: Vec<usize> = (0..self.columns.len())
            .filter(|&i| keep.contains(self.columns[i].as_str()))
            .collect();
        self.project(&picks)
    }

    /// Columns in ascending name order.
    pub fn sorted_columns(&self) -> Self {
        let mut picks: Vec<usize> = (0..self.columns.len()).collect();
        picks.sort_by(|&a, &b| self.columns[a].cmp(&self.columns[b]));
        self.project(&picks)
    }

    /// Replace column names one for one.
    pub fn with_column_names(mut self, names: Vec<String>) -> Self {
        debug_assert_eq!(names.len(), self.columns.len());
        self.columns = names;
        self
    }

    fn project(&self, picks: &[usize]) -> Self {
        Self {
            rows: self.rows.clone(),
            columns: picks.iter().map(|&i| self.columns[i].clone()).collect(),
            cells: self
                .cells
                .iter()
                .map(|line| picks.iter().map(|&i| line[i]).collect())
                .collect(),
        }
    }
}
