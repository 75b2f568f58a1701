// Tournament operations: registration, team choice and the two draws, on top
// of the player store and the matchup spreadsheet.

pub mod error;
pub mod tournament;

pub use error::TournamentError;
pub use tournament::{BracketDraw, Tournament};
