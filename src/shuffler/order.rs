use crate::card::CardEntry;
use crate::rng::DeckRng;
use crate::shuffler::PlanError;

/// Order the spell pool.
///
/// With costs, cheaper spells go first and equal costs keep their original
/// relative order. Without costs the pool is shuffled uniformly.
pub fn order_spells(
    spells: Vec<CardEntry>,
    costs: Option<&[f64]>,
    rng: &mut DeckRng,
) -> Result<Vec<CardEntry>, PlanError> {
    let Some(costs) = costs else {
        let mut spells = spells;
        rng.shuffle(&mut spells);
        return Ok(spells);
    };

    if costs.len() != spells.len() {
        return Err(PlanError::CostCountMismatch {
            expected: spells.len(),
            got: costs.len(),
        });
    }

    let mut keyed: Vec<(f64, CardEntry)> = costs.iter().copied().zip(spells).collect();
    // sort_by is stable
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, entry)| entry).collect())
}
