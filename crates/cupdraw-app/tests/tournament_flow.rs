// Integration tests for the tournament service.
//
// These run the full register → pick order → team choice → bracket draw flow
// against a file-backed SQLite store and a real spreadsheet file, and check
// the draw properties across many random seeds.

use std::collections::HashSet;
use std::path::Path;

use cupdraw_app::{Tournament, TournamentError};
use cupdraw_core::config::StorageConfig;
use cupdraw_core::model::{NewPlayer, Player};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===========================================================================
// Test helpers
// ===========================================================================

fn storage_in(dir: &Path) -> StorageConfig {
    StorageConfig {
        db_path: dir.join("players.db").display().to_string(),
        sheet_path: dir.join("tournament.csv").display().to_string(),
    }
}

fn register(t: &Tournament, names: &[&str]) -> Vec<Player> {
    names
        .iter()
        .map(|n| t.register(NewPlayer::named(*n)).expect("registration should succeed"))
        .collect()
}

fn sheet_rows(path: &Path) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("sheet should exist")
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

// ===========================================================================
// Full flow
// ===========================================================================

#[test]
fn full_tournament_flow() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tournament::open(&storage_in(dir.path())).unwrap();

    let players = register(&t, &["Ana", "Bia", "Caio", "Duda"]);

    let order = t.draw_pick_order().unwrap();
    assert_eq!(order.len(), 4);

    for (player, team) in players.iter().zip(["Brasil", "Argentina", "França", "Japão"]) {
        t.choose_team(player.id, team).unwrap();
    }

    let draw = t.draw_brackets().unwrap();
    assert_eq!(draw.matchups.len(), 2);
    for m in &draw.matchups {
        assert!(m.home.team.is_some());
        assert!(m.away.team.is_some());
    }

    let rows = sheet_rows(t.sheet().path());
    assert_eq!(rows[0], vec!["Draw", "Player 1", "Player 2"]);
    assert_eq!(rows.len(), 3);
    assert!(rows[1..].iter().all(|r| r[0] == draw.draw_id));
}

#[test]
fn state_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let storage = storage_in(dir.path());

    let id = {
        let t = Tournament::open(&storage).unwrap();
        let p = register(&t, &["Ana"]).remove(0);
        t.choose_team(p.id, "Brasil").unwrap();
        p.id
    };

    let t = Tournament::open(&storage).unwrap();
    let players = t.players().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].id, id);
    assert_eq!(players[0].team.as_deref(), Some("Brasil"));
}

// ===========================================================================
// Draw properties
// ===========================================================================

#[test]
fn pick_order_is_a_permutation_for_every_even_roster() {
    for n in (2..=16).step_by(2) {
        let dir = tempfile::tempdir().unwrap();
        let t = Tournament::open(&storage_in(dir.path())).unwrap();
        let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        register(&t, &refs);

        for seed in 0..5 {
            t.draw_pick_order_with(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            let mut ranks: Vec<u32> = t
                .players()
                .unwrap()
                .iter()
                .map(|p| p.pick_order.expect("every player ranked"))
                .collect();
            ranks.sort_unstable();
            assert_eq!(ranks, (1..=n as u32).collect::<Vec<_>>());
        }
    }
}

#[test]
fn duplicate_names_get_distinct_ranks() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tournament::open(&storage_in(dir.path())).unwrap();
    register(&t, &["Davi", "Davi", "Davi", "Eva"]);

    t.draw_pick_order().unwrap();

    let ranks: HashSet<u32> = t
        .players()
        .unwrap()
        .iter()
        .filter_map(|p| p.pick_order)
        .collect();
    assert_eq!(ranks, HashSet::from([1, 2, 3, 4]));
}

#[test]
fn bracket_draw_uses_every_player_once() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tournament::open(&storage_in(dir.path())).unwrap();
    let players = register(&t, &["A", "B", "C", "D", "E", "F", "G", "H"]);
    let expected: HashSet<i64> = players.iter().map(|p| p.id).collect();

    for seed in 0..25 {
        let draw = t
            .draw_brackets_with(&mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_eq!(draw.matchups.len(), 4);

        let ids: Vec<i64> = draw
            .matchups
            .iter()
            .flat_map(|m| [m.home.id, m.away.id])
            .collect();
        assert_eq!(ids.len(), 8);
        assert_eq!(ids.iter().copied().collect::<HashSet<_>>(), expected);
    }
}

#[test]
fn repeated_draws_append_under_one_header() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tournament::open(&storage_in(dir.path())).unwrap();
    register(&t, &["A", "B", "C", "D"]);

    t.draw_brackets().unwrap();
    t.draw_brackets().unwrap();
    t.draw_brackets().unwrap();

    let rows = sheet_rows(t.sheet().path());
    assert_eq!(rows.len(), 1 + 3 * 2);
    assert_eq!(rows.iter().filter(|r| r[0] == "Draw").count(), 1);
}

// ===========================================================================
// Rejections
// ===========================================================================

#[test]
fn odd_roster_rejects_both_draws_without_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tournament::open(&storage_in(dir.path())).unwrap();
    let players = register(&t, &["A", "B", "C"]);
    t.choose_team(players[0].id, "Brasil").unwrap();
    let before = t.players().unwrap();

    assert!(matches!(
        t.draw_pick_order(),
        Err(TournamentError::OddPlayerCount { count: 3 })
    ));
    assert!(matches!(
        t.draw_brackets(),
        Err(TournamentError::OddPlayerCount { count: 3 })
    ));

    assert_eq!(t.players().unwrap(), before);
    assert!(!t.sheet().path().exists());
}

#[test]
fn choosing_the_same_team_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tournament::open(&storage_in(dir.path())).unwrap();
    let p = register(&t, &["Ana", "Bia"]).remove(0);

    t.choose_team(p.id, "Brasil").unwrap();
    let once = t.players().unwrap();
    t.choose_team(p.id, "Brasil").unwrap();
    assert_eq!(t.players().unwrap(), once);
}
