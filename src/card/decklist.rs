use crate::card::types::{CardEntry, EntryError};
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid decklist entry at line {line} ('{text}'): {reason}")]
    MalformedEntry {
        line: usize,
        text: String,
        reason: EntryError,
    },
    #[error("Decklist is empty (is there an empty line at the start?)")]
    EmptyDecklist,
    #[error("Decklist has more than {} cards (line {line})", u32::MAX)]
    TooManyCards { line: usize },
}

/// A parsed Arena export: main deck entries plus the untouched sideboard block
#[derive(Debug, Clone, PartialEq)]
pub struct Decklist {
    pub entries: Vec<CardEntry>,
    pub decksize: u32,
    pub sideboard: Vec<String>,
}

impl Decklist {
    /// Parse a decklist file. The main deck ends at the first empty line,
    /// the next block of non-empty lines is the sideboard.
    pub fn from_file(path: &str) -> Result<Self, DeckError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, DeckError> {
        let mut lines = content.lines().enumerate();

        let mut entries = Vec::new();
        let mut decksize: u32 = 0;
        for (line_num, line) in lines.by_ref() {
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            let entry = parse_entry(line_num + 1, line)?;
            decksize = decksize
                .checked_add(entry.count())
                .ok_or(DeckError::TooManyCards { line: line_num + 1 })?;
            entries.push(entry);
        }

        if decksize == 0 {
            return Err(DeckError::EmptyDecklist);
        }

        // sideboard lines are passed through as written
        let sideboard = lines
            .map(|(_, line)| line)
            .take_while(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Decklist {
            entries,
            decksize,
            sideboard,
        })
    }

    /// Read the main deck (and optionally the sideboard) block by block from
    /// an interactive reader, stopping at empty lines.
    pub fn read_blocks<R: BufRead>(reader: &mut R, with_sideboard: bool) -> Result<Self, DeckError> {
        let mut content = String::new();
        let blocks = if with_sideboard { 2 } else { 1 };
        let mut seen_blocks = 0;
        let mut line = String::new();

        while seen_blocks < blocks {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            let bare = line.trim_end_matches(&['\r', '\n'][..]);
            let block_ended = if seen_blocks == 0 {
                bare.trim().is_empty()
            } else {
                bare.is_empty()
            };
            if block_ended {
                seen_blocks += 1;
            }
            content.push_str(&line);
        }

        Self::parse(&content)
    }

    /// Sum of counts across the current entries
    pub fn total_count(&self) -> u32 {
        self.entries.iter().map(CardEntry::count).sum()
    }
}

fn parse_entry(line: usize, text: &str) -> Result<CardEntry, DeckError> {
    text.parse().map_err(|reason| DeckError::MalformedEntry {
        line,
        text: text.to_string(),
        reason,
    })
}
