pub mod launcher;
pub mod plot;
