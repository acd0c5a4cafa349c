use crate::card::CardEntry;
use crate::rng::DeckRng;
use crate::shuffler::classify::{LandGroups, LandRef};
use crate::shuffler::plan::{Zone, Zones};
use std::collections::VecDeque;
use std::iter::Peekable;

/// Output being built, with its running card count
struct Rebuilt {
    entries: Vec<CardEntry>,
    count: u32,
}

impl Rebuilt {
    fn push(&mut self, entry: CardEntry) {
        self.count += entry.count();
        self.entries.push(entry);
    }

    fn push_group(&mut self, groups: &LandGroups, land: LandRef) {
        for entry in groups.entries(land) {
            self.push(entry.clone());
        }
    }

    /// Append groups from the front of the priority queue while they sit in `zone`
    fn drain_zone<I>(&mut self, queue: &mut Peekable<I>, groups: &LandGroups, zones: &Zones, zone: Zone)
    where
        I: Iterator<Item = LandRef>,
    {
        while let Some(land) = queue.next_if(|land| zones.get(*land) == zone) {
            self.push_group(groups, land);
        }
    }
}

/// Merge ordered spells and zoned land groups into the final decklist.
///
/// Lands outside the priority list are scattered among the spells first.
/// Then top lands, spells up to half the deck (splitting the entry that
/// crosses the half-mark), middle lands, the rest of the spells and finally
/// the bottom lands.
pub fn assemble(
    spells: Vec<CardEntry>,
    groups: &LandGroups,
    zones: &Zones,
    priority: &[LandRef],
    decksize: u32,
    rng: &mut DeckRng,
) -> Vec<CardEntry> {
    let mut working: VecDeque<CardEntry> = spells.into();

    for land in groups.non_empty() {
        if priority.contains(&land) {
            continue;
        }
        for entry in groups.entries(land) {
            let at = rng.insertion_index(working.len());
            working.insert(at, entry.clone());
        }
    }

    let mut out = Rebuilt {
        entries: Vec::with_capacity(working.len() + priority.len() + 1),
        count: 0,
    };
    let mut queue = priority.iter().copied().peekable();

    out.drain_zone(&mut queue, groups, zones, Zone::Top);

    // Runs short when the spells give out before the half-mark;
    // the rest of the deck then simply follows
    let half = decksize / 2;
    while out.count < half {
        let Some(entry) = working.pop_front() else {
            break;
        };
        let (head, rest) = entry.split(half - out.count);
        out.push(head);
        if let Some(rest) = rest {
            working.push_front(rest);
        }
    }

    out.drain_zone(&mut queue, groups, zones, Zone::Middle);

    for entry in working {
        out.push(entry);
    }
    for land in queue {
        out.push_group(groups, land);
    }

    out.entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::BasicLand;
    use crate::shuffler::classify::separate_basics;
    use crate::shuffler::plan::build_priority;

    const PLAINS: LandRef = LandRef::Basic(BasicLand::Plains);
    const SWAMPS: LandRef = LandRef::Basic(BasicLand::Swamp);

    fn entry(count: u32, name: &str) -> CardEntry {
        CardEntry::new(count, name, "RIX", "1").unwrap()
    }

    fn spells(counts: &[u32]) -> Vec<CardEntry> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| entry(c, &format!("Spell {}", i + 1)))
            .collect()
    }

    fn total(entries: &[CardEntry]) -> u32 {
        entries.iter().map(CardEntry::count).sum()
    }

    fn basics(entries: Vec<CardEntry>) -> LandGroups {
        let (basics, rest) = separate_basics(entries);
        assert!(rest.is_empty());
        LandGroups::new(basics, Vec::new())
    }

    #[test]
    fn test_top_lands_then_half_then_rest() {
        let groups = basics(vec![entry(8, "Plains")]);
        let mut zones = Zones::new();
        zones.set(&groups, PLAINS, Zone::Top).unwrap();
        let priority = build_priority(&groups, &zones, &[]);

        let out = assemble(
            spells(&[1; 17]),
            &groups,
            &zones,
            &priority,
            25,
            &mut DeckRng::new(Some(1)),
        );

        assert_eq!(out.len(), 18);
        assert_eq!(out[0].name(), "Plains");
        assert_eq!(out[1].name(), "Spell 1");
        assert_eq!(out[17].name(), "Spell 17");
        assert_eq!(total(&out), 25);
    }

    #[test]
    fn test_entry_crossing_half_mark_is_split() {
        let groups = basics(vec![entry(3, "Swamp")]);
        let mut zones = Zones::new();
        zones.set(&groups, SWAMPS, Zone::Middle).unwrap();
        let priority = build_priority(&groups, &zones, &[]);

        // 4 + 4 + 4 + 4 + 4 + 3 lands = 23, half = 11
        let out = assemble(
            spells(&[4, 4, 4, 4, 4]),
            &groups,
            &zones,
            &priority,
            23,
            &mut DeckRng::new(Some(1)),
        );

        let counts: Vec<u32> = out.iter().map(CardEntry::count).collect();
        let names: Vec<&str> = out.iter().map(CardEntry::name).collect();
        assert_eq!(counts, vec![4, 4, 3, 3, 1, 4, 4]);
        assert_eq!(
            names,
            vec!["Spell 1", "Spell 2", "Spell 3", "Swamp", "Spell 3", "Spell 4", "Spell 5"]
        );
        assert_eq!(total(&out), 23);
    }

    #[test]
    fn test_exact_half_mark_produces_no_empty_entry() {
        let groups = basics(vec![entry(4, "Island")]);
        let island = LandRef::Basic(BasicLand::Island);
        let mut zones = Zones::new();
        zones.set(&groups, island, Zone::Middle).unwrap();
        let priority = build_priority(&groups, &zones, &[]);

        let out = assemble(
            spells(&[4, 4, 4, 4, 4]),
            &groups,
            &zones,
            &priority,
            24,
            &mut DeckRng::new(Some(1)),
        );

        assert!(out.iter().all(|e| e.count() > 0));
        assert_eq!(out[3].name(), "Island");
        assert_eq!(total(&out[..3]), 12);
        assert_eq!(total(&out), 24);
    }

    #[test]
    fn test_bottom_lands_trail() {
        let groups = basics(vec![entry(5, "Plains"), entry(5, "Swamp")]);
        let mut zones = Zones::new();
        zones.set(&groups, PLAINS, Zone::Bottom).unwrap();
        zones.set(&groups, SWAMPS, Zone::Bottom).unwrap();
        let priority = build_priority(&groups, &zones, &[SWAMPS]);

        let out = assemble(
            spells(&[2, 2, 2, 2, 2]),
            &groups,
            &zones,
            &priority,
            20,
            &mut DeckRng::new(Some(1)),
        );

        let n = out.len();
        assert_eq!(out[n - 2].name(), "Swamp");
        assert_eq!(out[n - 1].name(), "Plains");
        assert_eq!(total(&out), 20);
    }

    #[test]
    fn test_lone_nonbasic_group_goes_to_its_zone() {
        let groups = LandGroups::new(Default::default(), vec![entry(4, "Field of Ruin")]);
        let field = LandRef::Nonbasic(0);

        for zone in [Zone::Top, Zone::Bottom] {
            let mut zones = Zones::new();
            zones.set(&groups, field, zone).unwrap();
            let priority = build_priority(&groups, &zones, &[]);
            assert_eq!(priority, vec![field]);

            let out = assemble(
                spells(&[3, 3, 3]),
                &groups,
                &zones,
                &priority,
                13,
                &mut DeckRng::new(Some(1)),
            );
            let placed = match zone {
                Zone::Top => out.first(),
                _ => out.last(),
            };
            assert_eq!(placed.map(CardEntry::name), Some("Field of Ruin"));
            assert_eq!(out.iter().filter(|e| e.name() == "Field of Ruin").count(), 1);
            assert_eq!(total(&out), 13);
        }
    }

    #[test]
    fn test_spells_run_out_before_half() {
        let groups = basics(vec![entry(4, "Plains"), entry(10, "Swamp")]);
        let mut zones = Zones::new();
        zones.set(&groups, PLAINS, Zone::Top).unwrap();
        zones.set(&groups, SWAMPS, Zone::Middle).unwrap();
        let priority = build_priority(&groups, &zones, &[]);

        // half = 8, but top lands and spells only reach 6
        let out = assemble(
            spells(&[2]),
            &groups,
            &zones,
            &priority,
            16,
            &mut DeckRng::new(Some(1)),
        );

        let names: Vec<&str> = out.iter().map(CardEntry::name).collect();
        assert_eq!(names, vec!["Plains", "Spell 1", "Swamp"]);
        assert_eq!(total(&out), 16);
    }

    #[test]
    fn test_unprioritized_lands_are_scattered_even_into_empty_pool() {
        let groups = basics(vec![entry(3, "Forest"), entry(2, "Forest"), entry(4, "Island")]);
        let zones = Zones::new();
        let priority = build_priority(&groups, &zones, &[]);
        assert!(priority.is_empty());

        for seed in 0..20 {
            let out = assemble(
                Vec::new(),
                &groups,
                &zones,
                &priority,
                9,
                &mut DeckRng::new(Some(seed)),
            );
            assert_eq!(out.len(), 3);
            assert_eq!(total(&out), 9);
        }
    }

    #[test]
    fn test_count_conserved_across_seeds() {
        let (basics, rest) = separate_basics(vec![
            entry(7, "Plains"),
            entry(1, "Plains"),
            entry(6, "Swamp"),
            entry(2, "Island"),
            entry(1, "Isolated Chapel"),
            entry(3, "Unclaimed Territory"),
        ]);
        let groups = LandGroups::new(basics, rest);
        let mut zones = Zones::new();
        zones.set(&groups, PLAINS, Zone::Top).unwrap();
        zones.set(&groups, SWAMPS, Zone::Middle).unwrap();
        zones.set(&groups, LandRef::Nonbasic(0), Zone::Bottom).unwrap();
        let priority = build_priority(&groups, &zones, &[]);

        let pool = spells(&[4, 4, 2, 3, 4, 4, 2, 4, 3, 4, 2]);
        let decksize = total(&pool) + groups.total_count();

        for seed in 0..50 {
            let out = assemble(
                pool.clone(),
                &groups,
                &zones,
                &priority,
                decksize,
                &mut DeckRng::new(Some(seed)),
            );
            assert_eq!(total(&out), decksize);
            assert!(out.iter().all(|e| e.count() > 0));

            // Top lands lead, bottom land trails
            assert_eq!(out[0].name(), "Plains");
            assert_eq!(out[1].name(), "Plains");
            assert_eq!(out.last().unwrap().name(), "Isolated Chapel");
        }
    }
}
