// Core of the tournament draw: player model, SQLite store, draw engine,
// matchup spreadsheet and configuration loading.

pub mod config;
pub mod db;
pub mod draw;
pub mod model;
pub mod sheet;
