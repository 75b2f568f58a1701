// CSV spreadsheet accumulating bracket-draw results across runs.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::model::Matchup;

/// Header row written once, when the file is created.
pub const HEADER: [&str; 3] = ["Draw", "Player 1", "Player 2"];

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to open spreadsheet {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write spreadsheet {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Append-only matchup spreadsheet at a fixed path.
#[derive(Debug, Clone)]
pub struct MatchupSheet {
    path: PathBuf,
}

impl MatchupSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row per matchup, tagged with `draw_id`. Creates the file
    /// (and any missing parent directories) with the header row if it does
    /// not exist yet or is empty. Returns the number of rows written.
    pub fn append(&self, draw_id: &str, matchups: &[Matchup]) -> Result<usize, SheetError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let needs_header = file
            .metadata()
            .map_err(|source| self.io_error(source))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            info!("starting spreadsheet {}", self.path.display());
            writer
                .write_record(HEADER)
                .map_err(|source| self.csv_error(source))?;
        }
        for matchup in matchups {
            writer
                .write_record([draw_id, matchup.home.name.as_str(), matchup.away.name.as_str()])
                .map_err(|source| self.csv_error(source))?;
        }
        writer.flush().map_err(|source| self.io_error(source))?;

        Ok(matchups.len())
    }

    fn io_error(&self, source: std::io::Error) -> SheetError {
        SheetError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> SheetError {
        SheetError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

/// Generate a draw id from the current UTC timestamp.
///
/// Format: `draw_YYYYMMDD_HHMMSS_SSS` (e.g. `draw_20261016_201502_123`).
pub fn generate_draw_id() -> String {
    chrono::Utc::now()
        .format("draw_%Y%m%d_%H%M%S_%3f")
        .to_string()
}
