mod parser;

use super::store::InMemorySignalStore;
use std::io::Read;
use std::path::Path;

pub const EXTRACTED_FILE: &str = "extracted.csv";
pub const BRIEFS_FILE: &str = "briefs.csv";
pub const HISTORY_FILE: &str = "history.csv";

#[derive(Debug)]
pub enum SignalImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { field: &'static str, value: String },
    InvalidConfidence { id: String, value: String },
}

impl std::fmt::Display for SignalImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalImportError::Io(err) => write!(f, "failed to read signal export: {}", err),
            SignalImportError::Csv(err) => write!(f, "invalid signal CSV data: {}", err),
            SignalImportError::InvalidDate { field, value } => {
                write!(f, "{field} '{value}' is not a YYYY-MM-DD date")
            }
            SignalImportError::InvalidConfidence { id, value } => {
                write!(f, "signal '{id}' has unrecognized confidence '{value}'")
            }
        }
    }
}

impl std::error::Error for SignalImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalImportError::Io(err) => Some(err),
            SignalImportError::Csv(err) => Some(err),
            SignalImportError::InvalidDate { .. } | SignalImportError::InvalidConfidence { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for SignalImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SignalImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Hydrates an [`InMemorySignalStore`] from CSV exports of the three sources.
pub struct SignalStoreImporter;

impl SignalStoreImporter {
    /// Reads `extracted.csv` (required) plus `briefs.csv` and `history.csv` when present.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<InMemorySignalStore, SignalImportError> {
        let dir = dir.as_ref();
        let extracted = std::fs::File::open(dir.join(EXTRACTED_FILE))?;
        let briefs = open_optional(&dir.join(BRIEFS_FILE))?;
        let history = open_optional(&dir.join(HISTORY_FILE))?;

        Self::from_readers(extracted, briefs, history)
    }

    pub fn from_readers<E, B, H>(
        extracted: E,
        briefs: Option<B>,
        history: Option<H>,
    ) -> Result<InMemorySignalStore, SignalImportError>
    where
        E: Read,
        B: Read,
        H: Read,
    {
        let extracted = parser::parse_extracted(extracted)?;
        let briefs = match briefs {
            Some(reader) => parser::parse_briefs(reader)?,
            None => Vec::new(),
        };
        let history = match history {
            Some(reader) => parser::parse_history(reader)?,
            None => Vec::new(),
        };

        Ok(InMemorySignalStore::new(extracted, briefs, history))
    }
}

fn open_optional(path: &Path) -> Result<Option<std::fs::File>, SignalImportError> {
    match std::fs::File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
