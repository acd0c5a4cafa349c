pub mod decklist;
pub mod types;

pub use decklist::{DeckError, Decklist};
pub use types::{BasicLand, CardEntry, EntryError};
