mod parser;

pub use parser::NAME_COLUMN;

use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read team sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid team sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("no sheet with a 'Name' column found")]
    MissingNameColumn,
}

/// Names read from the first sheet that carried a `Name` column.
#[derive(Debug, Clone)]
pub struct TeamSheet {
    pub source: PathBuf,
    pub names: Vec<String>,
}

pub struct TeamSheetImporter;

impl TeamSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<String>, ImportError> {
        parser::parse_names(reader)
    }

    /// Tries each candidate in order and keeps the first with a `Name`
    /// column. Any other failure stops the search.
    pub fn select_sheet<P: AsRef<Path>>(candidates: &[P]) -> Result<TeamSheet, ImportError> {
        for candidate in candidates {
            let path = candidate.as_ref();
            match Self::from_path(path) {
                Ok(names) => {
                    return Ok(TeamSheet {
                        source: path.to_path_buf(),
                        names,
                    })
                }
                Err(ImportError::MissingNameColumn) => {
                    debug!(sheet = %path.display(), "sheet has no Name column, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        Err(ImportError::MissingNameColumn)
    }
}
