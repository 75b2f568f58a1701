// Error taxonomy for tournament operations.

use cupdraw_core::draw::DrawError;
use cupdraw_core::model::PlayerId;
use cupdraw_core::sheet::SheetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Number of players must be even (currently {count}).")]
    OddPlayerCount { count: usize },

    #[error("Player name must not be blank.")]
    InvalidName,

    #[error("No player with id {id}.")]
    PlayerNotFound { id: PlayerId },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

impl TournamentError {
    /// Whether the caller can fix the request. Storage and spreadsheet
    /// failures are not the caller's fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::OddPlayerCount { .. } | Self::InvalidName | Self::PlayerNotFound { .. }
        )
    }
}

impl From<DrawError> for TournamentError {
    fn from(err: DrawError) -> Self {
        match err {
            DrawError::OddPlayerCount { count } => Self::OddPlayerCount { count },
        }
    }
}
