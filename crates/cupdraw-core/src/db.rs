// SQLite persistence layer for registered players.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::model::{NewPlayer, PickAssignment, Player, PlayerId};

/// SQLite-backed store for the player table. All mutations are keyed on the
/// player id; names are never used for lookups.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the player
    /// table exists. Pass `":memory:"` for an ephemeral in-memory database
    /// (useful for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS players (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                name       TEXT NOT NULL,
                team       TEXT,
                pick_order INTEGER
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock).
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Insert a new player row and return it with its assigned id.
    pub fn insert_player(&self, player: &NewPlayer) -> Result<Player> {
        let conn = self.conn();
        conn.query_row(
            "INSERT INTO players (name, team, pick_order)
             VALUES (?1, ?2, ?3)
             RETURNING id, name, team, pick_order",
            params![player.name, player.team, player.pick_order],
            player_from_row,
        )
        .context("failed to insert player")
    }

    /// All players, ordered by registration (id).
    pub fn list_players(&self) -> Result<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, name, team, pick_order FROM players ORDER BY id")
            .context("failed to prepare list_players query")?;

        let players = stmt
            .query_map([], player_from_row)
            .context("failed to query players")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map player rows")?;

        Ok(players)
    }

    /// Look up a single player. Returns `None` if no row has this id.
    #[cfg(test)]
    fn get_player(&self, id: PlayerId) -> Result<Option<Player>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, team, pick_order FROM players WHERE id = ?1",
            params![id],
            player_from_row,
        )
        .optional()
        .context("failed to load player")
    }

    /// Set the team of one player. Returns the updated row, or `None` if no
    /// player has this id. Writing the same team twice leaves the row as it
    /// was after the first write.
    pub fn set_team(&self, id: PlayerId, team: &str) -> Result<Option<Player>> {
        let conn = self.conn();
        conn.query_row(
            "UPDATE players SET team = ?1 WHERE id = ?2
             RETURNING id, name, team, pick_order",
            params![team, id],
            player_from_row,
        )
        .optional()
        .context("failed to update team")
    }

    /// Persist the ranks of a pick-order draw in a single transaction, so a
    /// failed write leaves every previous rank in place.
    pub fn save_pick_order(&self, assignments: &[PickAssignment]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin transaction")?;
        {
            let mut stmt = tx
                .prepare("UPDATE players SET pick_order = ?1 WHERE id = ?2")
                .context("failed to prepare pick order update")?;
            for assignment in assignments {
                stmt.execute(params![assignment.pick_order, assignment.player_id])
                    .context("failed to update pick order")?;
            }
        }
        tx.commit().context("failed to commit pick order")?;
        Ok(())
    }

    /// Drop the player table so every later store call fails. Lets callers
    /// exercise their storage-failure paths.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn drop_players_table(&self) -> Result<()> {
        self.conn()
            .execute_batch("DROP TABLE players;")
            .context("failed to drop players table")
    }
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        team: row.get(2)?,
        pick_order: row.get(3)?,
    })
}
