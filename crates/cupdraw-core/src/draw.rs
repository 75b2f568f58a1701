// Random draws: pick order and bracket split.
//
// Both draws are pure: they shuffle a copy of the input with the supplied
// random source and never touch storage.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::model::{Matchup, PickAssignment, Player};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("number of players must be even, got {count}")]
    OddPlayerCount { count: usize },
}

fn require_even(players: &[Player]) -> Result<(), DrawError> {
    if players.len() % 2 != 0 {
        return Err(DrawError::OddPlayerCount {
            count: players.len(),
        });
    }
    Ok(())
}

/// Shuffle the players uniformly and rank them 1..=N in shuffled order.
///
/// The result is ordered by rank. Every player gets exactly one rank, even
/// when several players share a name.
pub fn draw_pick_order<R: Rng + ?Sized>(
    players: &[Player],
    rng: &mut R,
) -> Result<Vec<PickAssignment>, DrawError> {
    require_even(players)?;

    let mut shuffled: Vec<&Player> = players.iter().collect();
    shuffled.shuffle(rng);

    Ok(shuffled
        .into_iter()
        .zip(1u32..)
        .map(|(player, rank)| PickAssignment {
            player_id: player.id,
            name: player.name.clone(),
            pick_order: rank,
        })
        .collect())
}

/// Shuffle the players uniformly, cut the list in half and pair the first
/// half (bracket A) with the second half (bracket B) index by index.
pub fn split_brackets<R: Rng + ?Sized>(
    players: &[Player],
    rng: &mut R,
) -> Result<Vec<Matchup>, DrawError> {
    require_even(players)?;

    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    let bracket_b = shuffled.split_off(shuffled.len() / 2);
    Ok(shuffled
        .into_iter()
        .zip(bracket_b)
        .map(|(home, away)| Matchup { home, away })
        .collect())
}
