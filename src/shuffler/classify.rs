use crate::card::{BasicLand, CardEntry};
use crate::shuffler::PlanError;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Basic land entries grouped by type, in `BasicLand::ALL` order
pub type BasicGroups = [Vec<CardEntry>; 5];

/// Reference to one land group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LandRef {
    Basic(BasicLand),
    Nonbasic(usize),
}

impl LandRef {
    /// Number shown in selection menus: basics are 1..=5, nonbasics follow
    pub fn menu_number(self) -> usize {
        match self {
            LandRef::Basic(basic) => basic.index() + 1,
            LandRef::Nonbasic(i) => BasicLand::ALL.len() + i + 1,
        }
    }

    pub fn from_menu_number(number: usize) -> Option<LandRef> {
        let basics = BasicLand::ALL.len();
        match number {
            0 => None,
            n if n <= basics => Some(LandRef::Basic(BasicLand::ALL[n - 1])),
            n => Some(LandRef::Nonbasic(n - basics - 1)),
        }
    }
}

impl fmt::Display for LandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandRef::Basic(basic) => write!(f, "{}", basic.plural()),
            LandRef::Nonbasic(i) => write!(f, "nonbasic #{}", i + 1),
        }
    }
}

/// Every land group of a deck: the five basic types plus designated nonbasics
#[derive(Debug, Clone, Default)]
pub struct LandGroups {
    pub basics: BasicGroups,
    pub nonbasics: Vec<CardEntry>,
}

impl LandGroups {
    pub fn new(basics: BasicGroups, nonbasics: Vec<CardEntry>) -> Self {
        LandGroups { basics, nonbasics }
    }

    /// Entries belonging to a group; empty for unknown references
    pub fn entries(&self, land: LandRef) -> &[CardEntry] {
        match land {
            LandRef::Basic(basic) => &self.basics[basic.index()],
            LandRef::Nonbasic(i) => self.nonbasics.get(i).map(std::slice::from_ref).unwrap_or(&[]),
        }
    }

    pub fn is_empty_group(&self, land: LandRef) -> bool {
        self.entries(land).is_empty()
    }

    pub fn count(&self, land: LandRef) -> u32 {
        self.entries(land).iter().map(CardEntry::count).sum()
    }

    /// Human readable group name: plural for basics, card name for nonbasics
    pub fn label(&self, land: LandRef) -> String {
        match land {
            LandRef::Basic(basic) => basic.plural().to_string(),
            LandRef::Nonbasic(i) => self
                .nonbasics
                .get(i)
                .map(|e| e.name().to_string())
                .unwrap_or_else(|| land.to_string()),
        }
    }

    /// Non-empty groups, basics first in category order, then nonbasics
    pub fn non_empty(&self) -> Vec<LandRef> {
        BasicLand::ALL
            .into_iter()
            .map(LandRef::Basic)
            .chain((0..self.nonbasics.len()).map(LandRef::Nonbasic))
            .filter(|land| !self.is_empty_group(*land))
            .collect()
    }

    /// Find a group by card name; basics also answer to their plural
    pub fn find(&self, name: &str) -> Option<LandRef> {
        let basic = BasicLand::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name) || b.plural().eq_ignore_ascii_case(name));
        if let Some(basic) = basic {
            return Some(LandRef::Basic(basic));
        }
        self.nonbasics
            .iter()
            .position(|e| e.name().eq_ignore_ascii_case(name))
            .map(LandRef::Nonbasic)
    }

    pub fn total_count(&self) -> u32 {
        self.basics
            .iter()
            .flatten()
            .chain(self.nonbasics.iter())
            .map(CardEntry::count)
            .sum()
    }
}

/// Pull basic lands out of a decklist.
/// Returns the grouped basics and the remaining entries, both in original order.
pub fn separate_basics(decklist: Vec<CardEntry>) -> (BasicGroups, Vec<CardEntry>) {
    let mut groups: BasicGroups = Default::default();
    let mut remaining = Vec::with_capacity(decklist.len());

    for entry in decklist {
        match BasicLand::from_card_name(entry.name()) {
            Some(basic) => groups[basic.index()].push(entry),
            None => remaining.push(entry),
        }
    }

    (groups, remaining)
}

/// Pull the entries at `indices` out of `decklist` as nonbasic lands.
/// Nonbasics come back in the order their indices were given.
pub fn separate_nonbasics(
    decklist: Vec<CardEntry>,
    indices: &[usize],
) -> Result<(Vec<CardEntry>, Vec<CardEntry>), PlanError> {
    let mut seen = HashSet::new();
    for &index in indices {
        if index >= decklist.len() {
            return Err(PlanError::InvalidSelection(format!(
                "index {} is out of range for {} entries",
                index,
                decklist.len()
            )));
        }
        if !seen.insert(index) {
            return Err(PlanError::InvalidSelection(format!(
                "index {} was selected twice",
                index
            )));
        }
    }

    let mut slots: Vec<Option<CardEntry>> = decklist.into_iter().map(Some).collect();
    let nonbasics = indices
        .iter()
        .filter_map(|&index| slots[index].take())
        .collect();
    let remaining = slots.into_iter().flatten().collect();

    Ok((nonbasics, remaining))
}

/// Case-insensitive substring search over card names, skipping `exclude`
pub fn find_matches(decklist: &[CardEntry], query: &str, exclude: &[usize]) -> Vec<usize> {
    let query = query.to_lowercase();
    decklist
        .iter()
        .enumerate()
        .filter(|(i, _)| !exclude.contains(i))
        .filter(|(_, entry)| entry.name().to_lowercase().contains(&query))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: u32, name: &str) -> CardEntry {
        CardEntry::new(count, name, "XLN", "1").unwrap()
    }

    fn names(entries: &[CardEntry]) -> Vec<&str> {
        entries.iter().map(CardEntry::name).collect()
    }

    #[test]
    fn test_separate_basics_groups_by_exact_name() {
        let deck = vec![
            entry(4, "Legion Lieutenant"),
            entry(6, "Plains"),
            entry(3, "Swamp"),
            entry(2, "Plains"),
            entry(1, "Snow-Covered Plains"),
            entry(1, "plains"),
        ];
        let (groups, rest) = separate_basics(deck);

        assert_eq!(groups[BasicLand::Plains.index()].len(), 2);
        assert_eq!(groups[BasicLand::Plains.index()][0].count(), 6);
        assert_eq!(groups[BasicLand::Plains.index()][1].count(), 2);
        assert_eq!(groups[BasicLand::Swamp.index()].len(), 1);
        assert!(groups[BasicLand::Island.index()].is_empty());
        assert_eq!(
            names(&rest),
            vec!["Legion Lieutenant", "Snow-Covered Plains", "plains"]
        );
    }

    #[test]
    fn test_separate_nonbasics_preserves_order() {
        let deck = vec![
            entry(1, "Arch of Orazca"),
            entry(4, "Call to the Feast"),
            entry(1, "Isolated Chapel"),
            entry(3, "Unclaimed Territory"),
        ];
        let (nonbasics, rest) = separate_nonbasics(deck, &[3, 0, 2]).expect("valid indices");
        assert_eq!(
            names(&nonbasics),
            vec!["Unclaimed Territory", "Arch of Orazca", "Isolated Chapel"]
        );
        assert_eq!(names(&rest), vec!["Call to the Feast"]);
    }

    #[test]
    fn test_separate_nonbasics_rejects_bad_indices() {
        let deck = vec![entry(1, "Arch of Orazca"), entry(1, "Isolated Chapel")];
        assert!(matches!(
            separate_nonbasics(deck.clone(), &[2]),
            Err(PlanError::InvalidSelection(_))
        ));
        assert!(matches!(
            separate_nonbasics(deck, &[1, 1]),
            Err(PlanError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_find_matches_is_case_insensitive_and_skips_selected() {
        let deck = vec![
            entry(1, "Detection Tower"),
            entry(1, "Tower of Champions"),
            entry(4, "Shock"),
        ];
        assert_eq!(find_matches(&deck, "tower", &[]), vec![0, 1]);
        assert_eq!(find_matches(&deck, "TOWER", &[0]), vec![1]);
        assert!(find_matches(&deck, "forest", &[]).is_empty());
    }

    #[test]
    fn test_menu_numbers_round_trip() {
        assert_eq!(LandRef::Basic(BasicLand::Plains).menu_number(), 1);
        assert_eq!(LandRef::Nonbasic(0).menu_number(), 6);
        assert_eq!(LandRef::from_menu_number(5), Some(LandRef::Basic(BasicLand::Forest)));
        assert_eq!(LandRef::from_menu_number(7), Some(LandRef::Nonbasic(1)));
        assert_eq!(LandRef::from_menu_number(0), None);
    }

    #[test]
    fn test_land_groups_queries() {
        let (basics, rest) = separate_basics(vec![
            entry(8, "Plains"),
            entry(6, "Swamp"),
            entry(1, "Isolated Chapel"),
        ]);
        let (nonbasics, _) = separate_nonbasics(rest, &[0]).unwrap();
        let groups = LandGroups::new(basics, nonbasics);

        assert_eq!(
            groups.non_empty(),
            vec![
                LandRef::Basic(BasicLand::Plains),
                LandRef::Basic(BasicLand::Swamp),
                LandRef::Nonbasic(0)
            ]
        );
        assert_eq!(groups.find("swamps"), Some(LandRef::Basic(BasicLand::Swamp)));
        assert_eq!(groups.find("Isolated Chapel"), Some(LandRef::Nonbasic(0)));
        assert_eq!(groups.find("Forest Dryad"), None);
        assert_eq!(groups.label(LandRef::Nonbasic(0)), "Isolated Chapel");
        assert_eq!(groups.count(LandRef::Basic(BasicLand::Plains)), 8);
        assert_eq!(groups.total_count(), 15);
        assert!(groups.is_empty_group(LandRef::Nonbasic(3)));
    }
}
