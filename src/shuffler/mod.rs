pub mod analyze;
pub mod assemble;
pub mod classify;
pub mod order;
pub mod plan;

pub use analyze::{analyze, GroupReport, OPENING_HAND};
pub use assemble::assemble;
pub use classify::{find_matches, separate_basics, separate_nonbasics, LandGroups, LandRef};
pub use order::order_spells;
pub use plan::{build_priority, PriorityBuilder, PriorityStep, Zone, Zones};

use crate::card::CardEntry;
use crate::rng::DeckRng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("'{query}' matches more than one card: {}", .matches.join(", "))]
    AmbiguousSelection { query: String, matches: Vec<String> },
    #[error("Unknown position '{0}' (use top/t, middle/m, bottom/b or none/n)")]
    UnknownZone(String),
    #[error("No land or card named '{0}'")]
    UnknownLand(String),
    #[error("Expected {expected} fake costs, got {got}")]
    CostCountMismatch { expected: usize, got: usize },
    #[error("No fake cost given for '{0}'")]
    MissingCost(String),
}

/// Everything decided about a deck before it is rebuilt
#[derive(Debug, Clone)]
pub struct ShufflePlan {
    pub groups: LandGroups,
    pub spells: Vec<CardEntry>,
    pub zones: Zones,
    pub priority: Vec<LandRef>,
    pub costs: Option<Vec<f64>>,
}

impl ShufflePlan {
    /// Order the spells and merge the lands back in
    pub fn rebuild(&self, decksize: u32, rng: &mut DeckRng) -> Result<Vec<CardEntry>, PlanError> {
        let spells = order_spells(self.spells.clone(), self.costs.as_deref(), rng)?;
        Ok(assemble(
            spells,
            &self.groups,
            &self.zones,
            &self.priority,
            decksize,
            rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::BasicLand;

    #[test]
    fn test_rebuild_with_costs() {
        let mut deck: Vec<CardEntry> = (1..=17)
            .map(|i| CardEntry::new(1, format!("Spell {}", i), "RIX", i.to_string()).unwrap())
            .collect();
        deck.insert(5, CardEntry::new(8, "Plains", "M19", "261").unwrap());

        let (basics, spells) = separate_basics(deck);
        let groups = LandGroups::new(basics, Vec::new());
        let plains = LandRef::Basic(BasicLand::Plains);
        let mut zones = Zones::new();
        zones.set(&groups, plains, Zone::Top).unwrap();
        // costs in reverse so ordering is visible
        let costs: Vec<f64> = (1..=17).rev().map(f64::from).collect();

        let plan = ShufflePlan {
            priority: build_priority(&groups, &zones, &[]),
            groups,
            spells,
            zones,
            costs: Some(costs),
        };
        let out = plan.rebuild(25, &mut DeckRng::new(Some(3))).unwrap();

        assert_eq!(out[0].name(), "Plains");
        assert_eq!(out[1].name(), "Spell 17");
        assert_eq!(out[17].name(), "Spell 1");
    }

    #[test]
    fn test_error_messages() {
        let err = PlanError::AmbiguousSelection {
            query: "tower".to_string(),
            matches: vec!["Detection Tower".to_string(), "Tower of Champions".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "'tower' matches more than one card: Detection Tower, Tower of Champions"
        );
    }
}
