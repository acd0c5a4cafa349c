use crate::card::{CardEntry, Decklist};
use crate::cli::CliError;
use crate::shuffler::{
    build_priority, find_matches, separate_basics, separate_nonbasics, LandGroups, LandRef,
    PlanError, ShufflePlan, Zone, Zones,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers to every interactive question, for scripted runs
///
/// ```json
/// {
///   "nonbasic_lands": ["Isolated Chapel", "territory"],
///   "zones": { "Plains": "top", "Swamp": "bottom" },
///   "priority": ["Swamp", "Plains"],
///   "costs": { "Duress": 1.0 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanFile {
    /// Name queries for cards to treat as lands, matched like the search prompt
    pub nonbasic_lands: Vec<String>,
    /// Zone per land group, keyed by basic name (singular or plural) or card name
    pub zones: BTreeMap<String, Zone>,
    /// Preferred order inside each zone
    pub priority: Vec<String>,
    /// Fake cost per spell name; random spell order when absent
    pub costs: Option<BTreeMap<String, f64>>,
}

impl PlanFile {
    pub fn from_file(path: &str) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve every answer against a decklist
    pub fn apply(&self, decklist: &Decklist) -> Result<ShufflePlan, PlanError> {
        let (basics, rest) = separate_basics(decklist.entries.clone());

        let mut indices = Vec::with_capacity(self.nonbasic_lands.len());
        for query in &self.nonbasic_lands {
            indices.push(resolve_query(&rest, query, &indices)?);
        }
        let (nonbasics, spells) = separate_nonbasics(rest, &indices)?;
        let groups = LandGroups::new(basics, nonbasics);

        let mut zones = Zones::new();
        let mut named: BTreeMap<LandRef, &str> = BTreeMap::new();
        for (name, zone) in &self.zones {
            let land = find_land(&groups, name)?;
            if let Some(earlier) = named.insert(land, name) {
                return Err(PlanError::InvalidSelection(format!(
                    "\"{}\" and \"{}\" both set the zone of {}",
                    earlier,
                    name,
                    groups.label(land)
                )));
            }
            zones.set(&groups, land, *zone)?;
        }

        let preferred = self
            .priority
            .iter()
            .map(|name| find_land(&groups, name))
            .collect::<Result<Vec<_>, _>>()?;
        let priority = build_priority(&groups, &zones, &preferred);

        let costs = match &self.costs {
            Some(costs) => Some(
                spells
                    .iter()
                    .map(|spell| lookup_cost(costs, spell))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(ShufflePlan {
            groups,
            spells,
            zones,
            priority,
            costs,
        })
    }
}

/// A query must pick out one card; an exact name beats partial matches
fn resolve_query(decklist: &[CardEntry], query: &str, taken: &[usize]) -> Result<usize, PlanError> {
    let found = find_matches(decklist, query, taken);
    match found.as_slice() {
        [] => Err(PlanError::UnknownLand(query.to_string())),
        [only] => Ok(*only),
        many => many
            .iter()
            .copied()
            .find(|&i| decklist[i].name().eq_ignore_ascii_case(query))
            .ok_or_else(|| PlanError::AmbiguousSelection {
                query: query.to_string(),
                matches: many.iter().map(|&i| decklist[i].name().to_string()).collect(),
            }),
    }
}

fn find_land(groups: &LandGroups, name: &str) -> Result<LandRef, PlanError> {
    groups
        .find(name)
        .ok_or_else(|| PlanError::UnknownLand(name.to_string()))
}

fn lookup_cost(costs: &BTreeMap<String, f64>, spell: &CardEntry) -> Result<f64, PlanError> {
    costs
        .get(spell.name())
        .or_else(|| {
            costs
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(spell.name()))
                .map(|(_, cost)| cost)
        })
        .copied()
        .ok_or_else(|| PlanError::MissingCost(spell.name().to_string()))
}
