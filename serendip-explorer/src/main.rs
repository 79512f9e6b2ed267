//! Serendip - random concepts from embedding space
//!
//! ```text
//! serendip concept --method walk --seed science -n 5
//! serendip concept --method interpolate -n 10
//! serendip explore --random-chance 0.3 -n 3
//! serendip explore --add-interest mycelium
//! serendip prompt
//! ```
//!
//! Concepts go to stdout, logs to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serendip_core::config::validate_probability;
use serendip_core::{SerendipConfig, SerendipResult, DEFAULT_SEED_WORD, SELECTION_WINDOW};
use serendip_explorer::{
    AgentPrompt, ConceptSampler, Explorer, InterestStore, LazyProvider, SampleRequest, SeedLog,
    Selector,
};
use tracing_subscriber::EnvFilter;

/// Generate random concepts by sampling a word-embedding space
#[derive(Parser)]
#[command(name = "serendip")]
#[command(version)]
#[command(about = "Generate random concepts by sampling a word-embedding space")]
struct Cli {
    /// Embedding model (word2vec .bin, or text format); overrides SERENDIP_MODEL
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate concepts with one sampling method
    Concept {
        /// pure_random, walk or interpolate
        #[arg(long, default_value = "walk")]
        method: String,

        /// Seed word for the walk method
        #[arg(long, default_value = DEFAULT_SEED_WORD)]
        seed: String,

        /// How far the walk drifts (0.1 = close, 1.0 = far)
        #[arg(long)]
        noise: Option<f32>,

        /// Pick among this many top filtered neighbors
        #[arg(long, default_value_t = SELECTION_WINDOW)]
        window: usize,

        /// Number of concepts to generate
        #[arg(short = 'n', default_value_t = 1)]
        count: usize,
    },
    /// Alternate between pure discovery and walks from your interests
    Explore {
        /// Chance of pure random vs interest walk (default: 0.3)
        #[arg(long)]
        random_chance: Option<f64>,

        /// Number of concepts
        #[arg(short = 'n', default_value_t = 1)]
        count: usize,

        /// Add a new interest
        #[arg(long)]
        add_interest: Option<String>,

        /// List current interests
        #[arg(long)]
        list_interests: bool,

        /// Append each exploration to the seed log
        #[arg(long)]
        log: bool,
    },
    /// Walk from a rotating seed word and print an exploration brief for an agent
    Prompt {
        /// Seed log file (default: logs/exploration_seeds.txt)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if e.is_transient() {
                eprintln!("hint: check the model and data paths, then try again");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> SerendipResult<()> {
    let mut config = SerendipConfig::from_env();
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    config.validate()?;

    let provider = LazyProvider::from_path(&config.model_path, config.model_limit);
    let mut rng = rand::thread_rng();

    match cli.command {
        Commands::Concept {
            method,
            seed,
            noise,
            window,
            count,
        } => {
            // Reject bad methods before paying for the model load
            let noise = noise.unwrap_or(config.noise_scale);
            let request = SampleRequest::parse(&method, Some(seed), Some(noise))?;

            let space = provider.get()?;
            let sampler = ConceptSampler::new(&*space).with_selector(Selector::with_window(window));
            for _ in 0..count {
                let selection = sampler.random_concept(&request, &mut rng)?;
                println!("{}", selection.word());
            }
        }

        Commands::Explore {
            random_chance,
            count,
            add_interest,
            list_interests,
            log,
        } => {
            let mut interests = InterestStore::load(&config.interests_path)?;

            if list_interests {
                println!("Current interests:");
                for interest in interests.interests() {
                    println!("  - {interest}");
                }
                return Ok(());
            }

            if let Some(word) = add_interest {
                if interests.add_interest(&word)? {
                    println!("Added interest: {word}");
                } else {
                    println!("Already exists or invalid: {word}");
                }
                return Ok(());
            }

            let random_chance = random_chance.unwrap_or(config.random_chance);
            validate_probability(random_chance)?;

            let space = provider.get()?;
            let explorer = Explorer::new(&*space, interests);
            let seed_log = SeedLog::new(&config.seed_log_path);
            for _ in 0..count {
                let result = explorer.explore(random_chance, &mut rng)?;
                println!("{result}");
                if log {
                    seed_log.record(&result)?;
                }
            }
        }

        Commands::Prompt { log_file } => {
            let space = provider.get()?;
            let prompt = AgentPrompt::generate(&*space, &mut rng)?;
            println!("{prompt}");

            let seed_log = SeedLog::new(log_file.unwrap_or(config.seed_log_path));
            seed_log.append(Some(&prompt.seed), prompt.concept())?;
            println!("Seed logged to: {}", seed_log.path().display());
        }
    }

    Ok(())
}
