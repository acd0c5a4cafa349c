use crate::card::CardEntry;
use crate::rng::DeckRng;
use crate::shuffler::classify::{LandGroups, LandRef};
use crate::shuffler::plan::Zone;
use crate::shuffler::{PlanError, ShufflePlan};
use rayon::prelude::*;
use serde::Serialize;

/// Cards in an opening hand
pub const OPENING_HAND: u32 = 7;

/// How often one land group shows up in the opening hand of rebuilt decks
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub land: LandRef,
    pub label: String,
    pub zone: Zone,
    pub copies: u32,
    /// Mean copies among the first `OPENING_HAND` cards of the rebuilt deck
    pub mean_in_hand: f64,
    /// Mean copies in an opening hand of a uniformly shuffled deck
    pub uniform_in_hand: f64,
}

/// Copies of each group within the first `OPENING_HAND` cards
fn hand_counts(deck: &[CardEntry], groups: &LandGroups, lands: &[LandRef]) -> Vec<u32> {
    let mut counts = vec![0; lands.len()];
    let mut left = OPENING_HAND;

    for entry in deck {
        if left == 0 {
            break;
        }
        let drawn = entry.count().min(left);
        left -= drawn;

        let owner = lands.iter().position(|land| {
            groups
                .entries(*land)
                .iter()
                .any(|e| e.same_printing(entry))
        });
        if let Some(i) = owner {
            counts[i] += drawn;
        }
    }

    counts
}

/// Rebuild the deck `trials` times with consecutive seeds and report, per
/// land group, how many copies end up in the opening hand on average.
/// `on_trial` is called once per finished trial, from worker threads.
pub fn analyze<F>(
    plan: &ShufflePlan,
    decksize: u32,
    trials: usize,
    base_seed: u64,
    on_trial: F,
) -> Result<Vec<GroupReport>, PlanError>
where
    F: Fn() + Sync,
{
    let lands = plan.groups.non_empty();

    let per_trial = (0..trials)
        .into_par_iter()
        .map(|i| -> Result<Vec<u32>, PlanError> {
            let mut rng = DeckRng::new(Some(base_seed.wrapping_add(i as u64)));
            let deck = plan.rebuild(decksize, &mut rng)?;
            on_trial();
            Ok(hand_counts(&deck, &plan.groups, &lands))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let reports = lands
        .iter()
        .enumerate()
        .map(|(i, &land)| {
            let copies = plan.groups.count(land);
            let total: u64 = per_trial.iter().map(|counts| u64::from(counts[i])).sum();
            let mean_in_hand = if trials == 0 {
                0.0
            } else {
                total as f64 / trials as f64
            };
            GroupReport {
                land,
                label: plan.groups.label(land),
                zone: plan.zones.get(land),
                copies,
                mean_in_hand,
                uniform_in_hand: f64::from(copies) * f64::from(OPENING_HAND) / f64::from(decksize.max(1)),
            }
        })
        .collect();

    Ok(reports)
}
