pub mod output;
pub mod plan;
pub mod prompt;

pub use output::{render_json, render_report, render_text};
pub use plan::PlanFile;
pub use prompt::{is_yes, Prompter};

use crate::card::DeckError;
use crate::shuffler::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Plan(#[from] PlanError),
}
