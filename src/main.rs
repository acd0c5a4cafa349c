use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use mtg_land_shuffler::card::Decklist;
use mtg_land_shuffler::cli::{render_json, render_report, render_text, CliError, PlanFile, Prompter};
use mtg_land_shuffler::logger;
use mtg_land_shuffler::logger::Logger;
use mtg_land_shuffler::rng::DeckRng;
use mtg_land_shuffler::shuffler::analyze;
use std::io;

#[derive(Parser)]
#[command(name = "mtg-land-shuffler")]
#[command(about = "Reorder an MTG Arena decklist to place lands where you want them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    shuffle: ShuffleArgs,
}

#[derive(Args)]
struct ShuffleArgs {
    /// Decklist file in Arena format (read from stdin when absent)
    #[arg(short, long)]
    deck: Option<String>,

    /// JSON plan file answering the questions (interactive when absent)
    #[arg(short, long)]
    plan: Option<String>,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the rebuilt deck as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild a decklist (default)
    Shuffle(ShuffleArgs),

    /// Measure how often each land group lands in the opening hand
    Analyze {
        /// Decklist file in Arena format
        #[arg(short, long)]
        deck: String,

        /// JSON plan file
        #[arg(short, long)]
        plan: String,

        /// Number of rebuilds to sample
        #[arg(short, long, default_value = "1000")]
        trials: usize,

        /// Seed of the first rebuild; the rest follow consecutively
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Shuffle(args)) => run_shuffle(&args),
        Some(Commands::Analyze {
            deck,
            plan,
            trials,
            seed,
        }) => run_analyze(&deck, &plan, trials, seed),
        None => run_shuffle(&cli.shuffle),
    };

    if let Err(e) = result {
        eprintln!("✗ {}", e);
        logger!(ERROR, "Something went wrong, aborting");
        std::process::exit(1);
    }
}

fn run_shuffle(args: &ShuffleArgs) -> Result<(), CliError> {
    Logger::set_verbose(args.verbose);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let deck = match &args.deck {
        Some(path) => {
            let deck = Decklist::from_file(path)?;
            eprintln!("✓ Loaded {} cards from {}", deck.decksize, path);
            deck
        }
        None => prompter.read_decklist()?,
    };
    logger!(
        DEBUG,
        "Main deck: {} entries, {} cards; sideboard: {} lines",
        deck.entries.len(),
        deck.decksize,
        deck.sideboard.len()
    );

    let plan = match &args.plan {
        Some(path) => PlanFile::from_file(path)?.apply(&deck)?,
        None => prompter.plan(&deck)?,
    };
    logger!(
        DEBUG,
        "{} land groups, priority {:?}, {} spells, costs given: {}",
        plan.groups.non_empty().len(),
        plan.priority,
        plan.spells.len(),
        plan.costs.is_some()
    );

    let mut rng = DeckRng::new(args.seed);
    logger!(INFO, "Shuffling with seed {}", rng.seed());

    let rebuilt = plan.rebuild(deck.decksize, &mut rng)?;
    let total: u32 = rebuilt.iter().map(|e| e.count()).sum();
    if total != deck.decksize {
        logger!(WARN, "Rebuilt deck has {} cards, expected {}", total, deck.decksize);
    }

    if args.json {
        println!("{}", render_json(&rebuilt, &deck.sideboard)?);
    } else {
        println!("\nHere's your new decklist:");
        print!("{}", render_text(&rebuilt, &deck.sideboard));
        println!("\nYou can now import this into MTGA");
    }

    Ok(())
}

fn run_analyze(deck_file: &str, plan_file: &str, trials: usize, seed: Option<u64>) -> Result<(), CliError> {
    let deck = Decklist::from_file(deck_file)?;
    let plan = PlanFile::from_file(plan_file)?.apply(&deck)?;
    let base_seed = seed.unwrap_or_else(|| DeckRng::new(None).seed());
    logger!(INFO, "Sampling {} rebuilds from seed {}", trials, base_seed);

    println!("\n=== Opening Hand Analysis ===\n");
    println!("Deck: {} ({} cards)", deck_file, deck.decksize);
    println!("Plan: {}", plan_file);
    println!("Seed: {}", base_seed);
    println!();

    let bar = ProgressBar::new(trials as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} rebuilds ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = std::time::Instant::now();
    let reports = analyze(&plan, deck.decksize, trials, base_seed, || bar.inc(1))?;
    bar.finish_and_clear();

    print!("{}", render_report(&reports, trials));
    println!("\nCompleted in {:.2?}", start.elapsed());
    Ok(())
}
