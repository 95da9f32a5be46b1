//! Data layer: core types, loading, querying and the CSV companion store.
//!
//! Architecture:
//! ```text
//!  pokedex.json / pokedex.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<PokemonRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ PokedexIndex  │  name / type / stat queries, sort, compare
//!   └──────────────┘
//!        │  uses
//!        ▼
//!   ┌──────────┐   ┌──────────┐
//!   │  filter   │   │ compare  │
//!   └──────────┘   └──────────┘
//!
//!   ┌──────────┐
//!   │  store    │  append / remove rows of the companion CSV
//!   └──────────┘
//! ```

pub mod compare;
pub mod error;
pub mod filter;
pub mod index;
pub mod loader;
pub mod model;
pub mod store;

pub use error::{LoadError, QueryError, StoreError};
pub use index::PokedexIndex;
pub use model::{Names, PokemonRecord, PokemonType, Stat, Stats};
