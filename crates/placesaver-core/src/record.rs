use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// One place to import: created by the record source, consumed once by the
/// save sequencer, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRecord {
    pub title: String,
    pub url: Url,
    pub memo: Option<String>,
}

/// Inclusive 1-based row window over the input file.
///
/// The default of `from = 2` skips a header row. Validated before the file is
/// opened and before any browser interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    from: usize,
    to: Option<usize>,
}

impl RowWindow {
    pub fn new(from: usize, to: Option<usize>) -> Result<Self> {
        if from < 1 {
            return Err(Error::InvalidWindow("--from must be 1 or more".into()));
        }
        if let Some(to) = to {
            if to < 1 {
                return Err(Error::InvalidWindow("--to must be 1 or more".into()));
            }
            if to < from {
                return Err(Error::InvalidWindow(format!(
                    "--to ({to}) must not be less than --from ({from})"
                )));
            }
        }
        Ok(Self { from, to })
    }

    fn contains(&self, row: usize) -> bool {
        row >= self.from && self.to.is_none_or(|to| row <= to)
    }

    /// True once the row is past the end of the window.
    fn exhausted(&self, row: usize) -> bool {
        self.to.is_some_and(|to| row > to)
    }
}

impl Default for RowWindow {
    fn default() -> Self {
        Self { from: 2, to: None }
    }
}

/// Raw input row: title, memo, url, and one ignored trailing column.
#[derive(Debug, Deserialize)]
struct RawRow(String, String, String, #[allow(dead_code)] String);

/// Reads place records from a delimited file, restricted to a row window.
pub struct RecordSource {
    path: PathBuf,
    window: RowWindow,
}

impl RecordSource {
    pub fn new(path: impl Into<PathBuf>, window: RowWindow) -> Self {
        Self {
            path: path.into(),
            window,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records inside the window, in file order.
    ///
    /// The whole window is read and validated up front; a malformed row or
    /// URL inside the window fails the run before any browser work starts.
    pub fn load(&self) -> Result<Vec<PlaceRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row_number = index + 1;
            if self.window.exhausted(row_number) {
                break;
            }
            let row = row?;
            if !self.window.contains(row_number) {
                continue;
            }
            if row.len() != 4 {
                return Err(Error::ColumnCount {
                    row: row_number,
                    found: row.len(),
                });
            }
            let raw: RawRow = row.deserialize(None)?;
            records.push(Self::parse_row(row_number, raw)?);
        }

        tracing::debug!("Read {} record(s) from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn parse_row(row_number: usize, raw: RawRow) -> Result<PlaceRecord> {
        let url = Url::parse(raw.2.trim()).map_err(|source| Error::InvalidUrl {
            row: row_number,
            url: raw.2.clone(),
            source,
        })?;
        let memo = match raw.1.trim() {
            "" => None,
            memo => Some(memo.to_string()),
        };
        Ok(PlaceRecord {
            title: raw.0,
            url,
            memo,
        })
    }
}
