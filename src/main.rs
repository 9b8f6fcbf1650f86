use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use cyberattack::config::Config;
use cyberattack::config_loader::{self, CliOverrides};
use cyberattack::render;
use cyberattack::rollout::{self, EpisodeSummary};

/// Turn-based network penetration simulator driven by a random attacker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Total number of machines on the network
    #[arg(long)]
    machines: Option<usize>,

    /// Number of service types per machine
    #[arg(long)]
    services: Option<usize>,

    /// Seed for network generation
    #[arg(long)]
    seed: Option<u64>,

    /// Number of episodes to run
    #[arg(long)]
    episodes: Option<usize>,

    /// Step limit per episode
    #[arg(long)]
    max_steps: Option<usize>,

    /// Write a JSON episode report to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the network state at the end of the first episode
    #[arg(long)]
    render: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            machines: self.machines,
            services: self.services,
            seed: self.seed,
            episodes: self.episodes,
            max_steps: self.max_steps,
        }
    }
}

/// Load the configuration, start logging, then apply CLI overrides.
///
/// The log level lives in the configuration file, so the file is read
/// silently and `init_logging` runs before anything else is logged.
fn prepare_config(args: &Args, init_logging: impl FnOnce(&str)) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config_loader::read_config(path)?,
        None => Config::default(),
    };

    init_logging(&config.general.log_level);

    match &args.config {
        Some(path) => info!("Loaded configuration from: {:?}", path),
        None => info!("No configuration file given, using defaults"),
    }
    config_loader::apply_overrides(&mut config, &args.overrides())?;

    Ok(config)
}

fn init_env_logger(level: &str) {
    // Initialize logging, RUST_LOG takes precedence over the configured level
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();
    let config = prepare_config(&args, init_env_logger)?;

    info!("Starting cyberattack simulator");
    info!(
        "Network: {} machines, {} services, seed {}",
        config.environment.machines, config.environment.services, config.environment.seed
    );

    let episodes = rollout::run_random_episodes(&config)?;
    for episode in &episodes {
        let summary = &episode.summary;
        info!(
            "Episode {}: {} steps, reward {:.1}, {} compromised, goal {}",
            summary.episode, summary.steps, summary.total_reward, summary.compromised, summary.goal_reached
        );
    }

    if args.render {
        if let Some(first) = episodes.first() {
            println!("{}", render(&first.observation));
        }
    }

    if let Some(output) = &args.output {
        let summaries: Vec<EpisodeSummary> = episodes.iter().map(|e| e.summary.clone()).collect();
        rollout::write_report(output, &summaries)?;
    }

    info!("Simulation completed successfully");
    Ok(())
}
