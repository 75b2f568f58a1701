// The tournament service: one method per operation exposed to clients.

use anyhow::Context;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use cupdraw_core::config::StorageConfig;
use cupdraw_core::db::Database;
use cupdraw_core::draw;
use cupdraw_core::model::{Matchup, NewPlayer, PickAssignment, Player, PlayerId};
use cupdraw_core::sheet::{self, MatchupSheet};

use crate::error::TournamentError;

/// Result of a bracket draw, as recorded in the spreadsheet.
#[derive(Debug, Clone, Serialize)]
pub struct BracketDraw {
    pub draw_id: String,
    pub matchups: Vec<Matchup>,
}

/// Owns the player store and the matchup spreadsheet.
///
/// Every operation either completes or leaves stored state untouched; odd
/// player counts are rejected before anything is written.
pub struct Tournament {
    db: Database,
    sheet: MatchupSheet,
}

impl Tournament {
    pub fn new(db: Database, sheet: MatchupSheet) -> Self {
        Self { db, sheet }
    }

    /// Open the database and spreadsheet at the configured locations.
    pub fn open(storage: &StorageConfig) -> anyhow::Result<Self> {
        let db = Database::open(&storage.db_path)
            .with_context(|| format!("failed to open player store {}", storage.db_path))?;
        Ok(Self::new(db, MatchupSheet::new(&storage.sheet_path)))
    }

    pub fn sheet(&self) -> &MatchupSheet {
        &self.sheet
    }

    /// Register a player. The name is trimmed and must not be blank; it does
    /// not need to be unique.
    pub fn register(&self, mut player: NewPlayer) -> Result<Player, TournamentError> {
        let trimmed = player.name.trim();
        if trimmed.is_empty() {
            warn!("rejected registration with blank name");
            return Err(TournamentError::InvalidName);
        }
        player.name = trimmed.to_string();

        let stored = self.db.insert_player(&player)?;
        info!("registered player {} ({})", stored.id, stored.name);
        Ok(stored)
    }

    pub fn players(&self) -> Result<Vec<Player>, TournamentError> {
        Ok(self.db.list_players()?)
    }

    /// Set the team of one player. Repeating the call with the same team is
    /// a no-op.
    pub fn choose_team(&self, id: PlayerId, team: &str) -> Result<Player, TournamentError> {
        match self.db.set_team(id, team)? {
            Some(player) => {
                info!("player {} ({}) chose team {}", player.id, player.name, team);
                Ok(player)
            }
            None => {
                warn!("team choice for unknown player {id}");
                Err(TournamentError::PlayerNotFound { id })
            }
        }
    }

    /// Draw a fresh pick order over all registered players and persist it.
    pub fn draw_pick_order(&self) -> Result<Vec<PickAssignment>, TournamentError> {
        self.draw_pick_order_with(&mut rand::thread_rng())
    }

    pub fn draw_pick_order_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<PickAssignment>, TournamentError> {
        let players = self.db.list_players()?;
        let order = draw::draw_pick_order(&players, rng).inspect_err(|e| {
            warn!("pick-order draw rejected: {e}");
        })?;

        self.db.save_pick_order(&order)?;
        info!("drew pick order for {} players", order.len());
        Ok(order)
    }

    /// Split all registered players into two brackets, pair them and append
    /// the pairs to the spreadsheet. Player rows are not modified.
    pub fn draw_brackets(&self) -> Result<BracketDraw, TournamentError> {
        self.draw_brackets_with(&mut rand::thread_rng())
    }

    pub fn draw_brackets_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<BracketDraw, TournamentError> {
        let players = self.db.list_players()?;
        let matchups = draw::split_brackets(&players, rng).inspect_err(|e| {
            warn!("bracket draw rejected: {e}");
        })?;

        let draw_id = sheet::generate_draw_id();
        self.sheet.append(&draw_id, &matchups)?;
        info!(
            "drew {} matchups ({draw_id}) into {}",
            matchups.len(),
            self.sheet.path().display()
        );

        Ok(BracketDraw { draw_id, matchups })
    }
}
