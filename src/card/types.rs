use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a decklist line fails structural validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("too few elements in the entry")]
    TooFewElements,
    #[error("invalid card count '{0}'")]
    InvalidCount(String),
    #[error("card name is empty")]
    EmptyName,
    #[error("set code '{0}' is not 3 characters long")]
    InvalidSetCode(String),
    #[error("collector number is empty")]
    EmptyCollectorNumber,
}

/// One line of an Arena decklist: "4 Legion Lieutenant (RIX) 163"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CardEntry {
    count: u32,
    name: String,
    set_code: String,
    collector_number: String,
}

impl CardEntry {
    pub fn new(
        count: u32,
        name: impl Into<String>,
        set_code: impl Into<String>,
        collector_number: impl Into<String>,
    ) -> Result<Self, EntryError> {
        let name = name.into();
        let set_code = set_code.into();
        let collector_number = collector_number.into();

        if count == 0 {
            return Err(EntryError::InvalidCount(count.to_string()));
        }
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }
        if set_code.chars().count() != 3 {
            return Err(EntryError::InvalidSetCode(set_code));
        }
        if collector_number.is_empty() {
            return Err(EntryError::EmptyCollectorNumber);
        }

        Ok(CardEntry {
            count,
            name,
            set_code,
            collector_number,
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_code(&self) -> &str {
        &self.set_code
    }

    pub fn collector_number(&self) -> &str {
        &self.collector_number
    }

    /// Same card and printing, regardless of count
    pub fn same_printing(&self, other: &CardEntry) -> bool {
        self.name == other.name
            && self.set_code == other.set_code
            && self.collector_number == other.collector_number
    }

    /// Split into an entry of `first` copies and the remainder.
    /// The remainder is None when `first` covers the whole entry.
    pub fn split(&self, first: u32) -> (CardEntry, Option<CardEntry>) {
        if first == 0 || first >= self.count {
            return (self.clone(), None);
        }
        let head = CardEntry {
            count: first,
            ..self.clone()
        };
        let tail = CardEntry {
            count: self.count - first,
            ..self.clone()
        };
        (head, Some(tail))
    }
}

impl FromStr for CardEntry {
    type Err = EntryError;

    /// Count is everything before the first space, set code and collector
    /// number are the last two words, the name is whatever is left between.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (count_str, rest) = line.split_once(' ').ok_or(EntryError::TooFewElements)?;

        let mut tail = rest.rsplitn(3, ' ');
        let collector_number = tail.next().ok_or(EntryError::TooFewElements)?;
        let set_code = tail.next().ok_or(EntryError::TooFewElements)?;
        let name = tail.next().ok_or(EntryError::TooFewElements)?;

        if count_str.is_empty() || !count_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(EntryError::InvalidCount(count_str.to_string()));
        }
        let count: u32 = count_str
            .parse()
            .map_err(|_| EntryError::InvalidCount(count_str.to_string()))?;

        let set_code = set_code.trim_matches(|c| c == '(' || c == ')');

        CardEntry::new(count, name, set_code, collector_number)
    }
}

impl fmt::Display for CardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) {}",
            self.count, self.name, self.set_code, self.collector_number
        )
    }
}

/// The five basic land types, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BasicLand {
    Plains,
    Island,
    Swamp,
    Mountain,
    Forest,
}

impl BasicLand {
    pub const ALL: [BasicLand; 5] = [
        BasicLand::Plains,
        BasicLand::Island,
        BasicLand::Swamp,
        BasicLand::Mountain,
        BasicLand::Forest,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BasicLand::Plains => "Plains",
            BasicLand::Island => "Island",
            BasicLand::Swamp => "Swamp",
            BasicLand::Mountain => "Mountain",
            BasicLand::Forest => "Forest",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            BasicLand::Plains => "Plains",
            BasicLand::Island => "Islands",
            BasicLand::Swamp => "Swamps",
            BasicLand::Mountain => "Mountains",
            BasicLand::Forest => "Forests",
        }
    }

    /// Exact, case-sensitive match against the card name
    pub fn from_card_name(name: &str) -> Option<BasicLand> {
        BasicLand::ALL.into_iter().find(|b| b.name() == name)
    }
}
