use crate::card::{CardEntry, Decklist};
use crate::cli::CliError;
use crate::shuffler::{
    find_matches, separate_basics, separate_nonbasics, LandGroups, LandRef, PriorityBuilder,
    PriorityStep, ShufflePlan, Zone, Zones,
};
use std::io::{self, BufRead, Write};

const TRUE_INPUTS: [&str; 5] = ["yes", "y", "true", "t", "1"];

pub fn is_yes(answer: &str) -> bool {
    TRUE_INPUTS.contains(&answer.trim().to_lowercase().as_str())
}

/// Console question-and-answer session over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `question` and read one line. EOF is an error.
    fn ask(&mut self, question: &str) -> Result<String, CliError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input ended").into());
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn say(&mut self, text: &str) -> Result<(), CliError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool, CliError> {
        Ok(is_yes(&self.ask(question)?))
    }

    pub fn read_decklist(&mut self) -> Result<Decklist, CliError> {
        let with_sideboard = self.confirm("Does this deck have a sideboard? (y/n): ")?;
        self.say("Paste in your decklist (Arena format),")?;
        self.say("an empty line ends the list:")?;
        self.output.flush()?;
        Ok(Decklist::read_blocks(&mut self.input, with_sideboard)?)
    }

    pub fn announce_lands(&mut self, groups: &LandGroups) -> Result<(), CliError> {
        self.say("Found lands:")?;
        for land in groups.non_empty() {
            let count = groups.count(land);
            let name = match land {
                LandRef::Basic(basic) if count == 1 => basic.name().to_string(),
                _ => groups.label(land),
            };
            self.say(&format!(" *{} {}", count, name))?;
        }
        Ok(())
    }

    /// Substring search loop; returns indices into `decklist` in selection order
    pub fn choose_nonbasics(&mut self, decklist: &[CardEntry]) -> Result<Vec<usize>, CliError> {
        self.say("Type in names or parts of names of nonbasics you wish to treat as lands")?;
        self.say("(eg. \"tower\" will match \"Detection Tower\")")?;
        self.say("Empty line to stop")?;

        let mut selected = Vec::new();
        loop {
            let query = self.ask(">")?;
            if query.trim().is_empty() {
                break;
            }

            let found = find_matches(decklist, query.trim(), &selected);
            match found.as_slice() {
                [] => self.say("Didn't find any matching cards! Check for typos")?,
                [only] => {
                    let name = decklist[*only].name();
                    if self.confirm(&format!("Is \"{}\" what you're looking for? (y/n): ", name))? {
                        selected.push(*only);
                        self.say(&format!("{} is marked as a nonbasic land.", name))?;
                    } else {
                        self.say("Ok, check for any typos")?;
                    }
                }
                many => {
                    self.say("Multiple cards match this, did you mean:")?;
                    for (i, &index) in many.iter().enumerate() {
                        self.say(&format!(" *{} - {}", i + 1, decklist[index].name()))?;
                    }
                    let answer = self.ask(&format!(
                        "(1-{} or 0 if none of them are right): ",
                        many.len()
                    ))?;
                    match answer.trim().parse::<usize>().unwrap_or(0) {
                        0 => self.say("Ok, check for any typos")?,
                        n if n <= many.len() => {
                            let index = many[n - 1];
                            selected.push(index);
                            self.say(&format!(
                                "{} is marked as a nonbasic land.",
                                decklist[index].name()
                            ))?;
                        }
                        _ => self.say("Invalid number or not a number!")?,
                    }
                }
            }
        }

        Ok(selected)
    }

    pub fn choose_zones(&mut self, groups: &LandGroups) -> Result<Zones, CliError> {
        self.say("\nNow you'll specify land positions in the new decklist")?;
        self.say(" *top    - INCREASES their chance of being in the opening hand")?;
        self.say(" *middle - EQUALIZES their chance of being in the opening hand")?;
        self.say(" *bottom - DECREASES their chance of being in the opening hand")?;
        self.say(" *none   - the lands go wherever")?;

        let mut zones = Zones::new();
        for land in groups.non_empty() {
            let label = groups.label(land);
            let zone = loop {
                let answer = self.ask(&format!("Where should {} be put? (t/m/b/n): ", label))?;
                match answer.parse::<Zone>() {
                    Ok(zone) => break zone,
                    Err(_) => self.say("I don't know where that is!")?,
                }
            };
            zones.set(groups, land, zone)?;
            self.say(&format!("{} will go {}", label, zone.description()))?;
        }
        Ok(zones)
    }

    pub fn choose_priority(&mut self, groups: &LandGroups, zones: &Zones) -> Result<Vec<LandRef>, CliError> {
        let mut builder = PriorityBuilder::new(groups, zones);
        let mut explained = false;
        let mut current = None;

        while let PriorityStep::Choose { zone, candidates } = builder.next_step() {
            if !explained {
                self.say("\nNow you'll pick land priority within their position")?;
                self.say("Lands picked first go nearer the top of the deck")?;
                explained = true;
            }
            if current != Some(zone) {
                self.say(&format!("\nChoose the land priority {}", zone.description()))?;
                current = Some(zone);
            }

            self.say("Choose next land:")?;
            for land in &candidates {
                self.say(&format!(" *{} - {}", land.menu_number(), groups.label(*land)))?;
            }
            let answer = self.ask(">")?;
            let choice = answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(LandRef::from_menu_number);
            match choice.map(|land| (land, builder.select(land))) {
                Some((land, Ok(()))) => {
                    self.say(&format!("{} will go before the rest", groups.label(land)))?
                }
                _ => self.say("Invalid index!")?,
            }
        }

        Ok(builder.finish())
    }

    /// Ask for fake costs, one per spell, in pool order
    pub fn choose_costs(&mut self, spells: &[CardEntry]) -> Result<Option<Vec<f64>>, CliError> {
        self.say("\nNow you can specify FAKE mana costs for nonland cards")?;
        self.say("Cards with LESS cost go on top, INCREASING their chance of being drawn")?;
        self.say("They are not checked and can be anything, like 3.5 for a hard to cast 3-drop")?;
        self.say("Without them nonland cards are placed at random")?;
        if !self.confirm("Do you wish to specify fake mana costs? (y/n): ")? {
            return Ok(None);
        }

        let mut costs = Vec::with_capacity(spells.len());
        for spell in spells {
            let cost = loop {
                let answer = self.ask(&format!(
                    "What's the fake cost of \"{}\"? (number): ",
                    spell.name()
                ))?;
                match answer.trim().parse::<f64>() {
                    Ok(cost) if cost.is_finite() => break cost,
                    _ => self.say("That's not a number!")?,
                }
            };
            costs.push(cost);
        }
        Ok(Some(costs))
    }

    /// Walk the whole interactive session for an already parsed decklist
    pub fn plan(&mut self, decklist: &Decklist) -> Result<ShufflePlan, CliError> {
        let (basics, rest) = separate_basics(decklist.entries.clone());
        let basics_only = LandGroups::new(basics, Vec::new());
        self.announce_lands(&basics_only)?;

        let indices = if self.confirm(
            "Are there any nonbasic lands you wish to place (this isn't required)? (y/n): ",
        )? {
            self.choose_nonbasics(&rest)?
        } else {
            Vec::new()
        };
        let (nonbasics, spells) = separate_nonbasics(rest, &indices)?;
        let groups = LandGroups::new(basics_only.basics, nonbasics);

        let zones = self.choose_zones(&groups)?;
        let priority = self.choose_priority(&groups, &zones)?;
        let costs = self.choose_costs(&spells)?;

        Ok(ShufflePlan {
            groups,
            spells,
            zones,
            priority,
            costs,
        })
    }
}
