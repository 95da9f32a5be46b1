//! Console Pokédex: an in-memory query index over Pokémon records, a CSV
//! companion store, a stat chart window and the interactive menu tying them
//! together.

pub mod app;
pub mod color;
pub mod data;
pub mod shell;
pub mod state;
pub mod ui;
