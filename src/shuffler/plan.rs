use crate::shuffler::classify::{LandGroups, LandRef};
use crate::shuffler::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Where a land group should end up in the rebuilt deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Zone {
    #[default]
    None,
    Top,
    Middle,
    Bottom,
}

impl Zone {
    /// Zones that take part in priority ordering, front to back
    pub const ORDERED: [Zone; 3] = [Zone::Top, Zone::Middle, Zone::Bottom];

    pub fn description(self) -> &'static str {
        match self {
            Zone::None => "wherever",
            Zone::Top => "at the top",
            Zone::Middle => "in the middle",
            Zone::Bottom => "at the bottom",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::None => "none",
            Zone::Top => "top",
            Zone::Middle => "middle",
            Zone::Bottom => "bottom",
        }
    }
}

impl FromStr for Zone {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "n" => Ok(Zone::None),
            "top" | "front" | "t" => Ok(Zone::Top),
            "middle" | "m" => Ok(Zone::Middle),
            "bottom" | "back" | "b" => Ok(Zone::Bottom),
            _ => Err(PlanError::UnknownZone(s.to_string())),
        }
    }
}

impl TryFrom<String> for Zone {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.as_str().to_string()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone assignment for every land group. Unassigned groups are `Zone::None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zones {
    assigned: BTreeMap<LandRef, Zone>,
}

impl Zones {
    pub fn new() -> Self {
        Zones::default()
    }

    pub fn get(&self, land: LandRef) -> Zone {
        self.assigned.get(&land).copied().unwrap_or_default()
    }

    /// Assign a zone to a non-empty group
    pub fn set(&mut self, groups: &LandGroups, land: LandRef, zone: Zone) -> Result<(), PlanError> {
        if groups.is_empty_group(land) {
            return Err(PlanError::InvalidSelection(format!(
                "{} has no cards in this deck",
                land
            )));
        }
        self.assigned.insert(land, zone);
        Ok(())
    }

    fn groups_in(&self, groups: &LandGroups, zone: Zone) -> Vec<LandRef> {
        groups
            .non_empty()
            .into_iter()
            .filter(|land| self.get(*land) == zone)
            .collect()
    }
}

/// What the priority builder needs next
#[derive(Debug, Clone, PartialEq)]
pub enum PriorityStep {
    /// Pick which of `candidates` goes first within `zone`
    Choose { zone: Zone, candidates: Vec<LandRef> },
    Done,
}

/// Builds the priority list one selection at a time.
///
/// Zones are walked Top, Middle, Bottom. Within a zone the caller picks
/// groups until one is left, which is appended without asking. A deck with a
/// single land group needs no choices at all.
pub struct PriorityBuilder<'a> {
    groups: &'a LandGroups,
    zones: &'a Zones,
    order: Vec<LandRef>,
    zone_idx: usize,
}

impl<'a> PriorityBuilder<'a> {
    pub fn new(groups: &'a LandGroups, zones: &'a Zones) -> Self {
        let mut builder = PriorityBuilder {
            groups,
            zones,
            order: Vec::new(),
            zone_idx: 0,
        };

        let lands = groups.non_empty();
        if let [only] = lands.as_slice() {
            if zones.get(*only) != Zone::None {
                builder.order.push(*only);
            }
            builder.zone_idx = Zone::ORDERED.len();
        }

        builder
    }

    fn candidates(&self, zone: Zone) -> Vec<LandRef> {
        self.zones
            .groups_in(self.groups, zone)
            .into_iter()
            .filter(|land| !self.order.contains(land))
            .collect()
    }

    fn skip_empty_zones(&mut self) {
        while let Some(&zone) = Zone::ORDERED.get(self.zone_idx) {
            if !self.candidates(zone).is_empty() {
                break;
            }
            self.zone_idx += 1;
        }
    }

    /// Advance to the next decision, auto-completing zones with one group left
    pub fn next_step(&mut self) -> PriorityStep {
        loop {
            self.skip_empty_zones();
            let Some(&zone) = Zone::ORDERED.get(self.zone_idx) else {
                return PriorityStep::Done;
            };
            let candidates = self.candidates(zone);
            if candidates.len() > 1 {
                return PriorityStep::Choose { zone, candidates };
            }
            self.order.push(candidates[0]);
            self.zone_idx += 1;
        }
    }

    /// Put `land` next in line. Only current candidates are accepted.
    pub fn select(&mut self, land: LandRef) -> Result<(), PlanError> {
        self.skip_empty_zones();
        let zone = Zone::ORDERED
            .get(self.zone_idx)
            .copied()
            .ok_or_else(|| PlanError::InvalidSelection("priority list is complete".to_string()))?;

        if !self.candidates(zone).contains(&land) {
            return Err(PlanError::InvalidSelection(format!(
                "{} is not waiting for a position {}",
                self.groups.label(land),
                zone.description()
            )));
        }
        self.order.push(land);
        Ok(())
    }

    /// Complete the list; unanswered choices fall back to group order
    pub fn finish(mut self) -> Vec<LandRef> {
        while let PriorityStep::Choose { candidates, .. } = self.next_step() {
            self.order.push(candidates[0]);
        }
        self.order
    }
}

/// Build the priority list without interaction: at every step the first
/// group of `preferred` that is a candidate wins, otherwise group order.
pub fn build_priority(groups: &LandGroups, zones: &Zones, preferred: &[LandRef]) -> Vec<LandRef> {
    let mut builder = PriorityBuilder::new(groups, zones);
    while let PriorityStep::Choose { candidates, .. } = builder.next_step() {
        let pick = preferred
            .iter()
            .find(|land| candidates.contains(land))
            .copied()
            .unwrap_or(candidates[0]);
        builder.order.push(pick);
    }
    builder.finish()
}
