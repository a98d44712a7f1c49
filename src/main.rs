//! Peppered - CLI Entry Point
//!
//! Runs a scripted selection session headlessly and writes the chart and
//! exports.

use clap::{Parser, Subcommand};
use peppered::export::ExportSystem;
use peppered::{Command, Config, Outcome, Simulation};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "peppered")]
#[command(version)]
#[command(about = "Natural-selection demo: light and dark specimens under a changing backdrop")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Commands: e(liminate) m(utate) s(pawn) b/env, separated by spaces or commas
        #[arg(short, long, default_value = "e e s")]
        script: String,

        /// Number of times the script is repeated
        #[arg(short, long, default_value = "10")]
        repeat: usize,

        /// Output directory for chart and exports
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            script,
            repeat,
            output,
            seed,
            quiet,
        } => run_session(config, &script, repeat, output, seed, quiet),

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_session(
    config_path: PathBuf,
    script: &str,
    repeat: usize,
    output: PathBuf,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };
    init_logging(&config.logging.log_level);

    let commands = Command::parse_script(script)?;

    let mut sim = if let Some(s) = seed {
        println!("Using seed: {}", s);
        Simulation::new_with_seed(config.clone(), s)
    } else {
        Simulation::new(config.clone())
    };

    println!("Starting session");
    println!("  Population size: {}", config.population.size);
    println!("  Initial backdrop: {}", sim.environment.state().name());
    println!("  Script: {} commands x {}", commands.len(), repeat);
    println!();

    'session: for _ in 0..repeat {
        for &command in &commands {
            let outcome = sim.apply(command);

            if !quiet {
                println!("{}", sim.stats.summary());
            }

            if let Outcome::Extinct { generation } = outcome {
                println!("\nPopulation extinct at generation {}", generation);
                break 'session;
            }
        }
    }

    println!();
    println!("=== Session Complete ===");
    println!("Commands: {}", sim.stats.commands);
    println!("Generations: {}", sim.generation_count());
    println!("Final backdrop: {}", sim.environment.state().name());
    println!("{}", sim.stats.summary());

    let manifest = ExportSystem::export_all(&sim, &output)?;
    println!();
    println!("Composition: {}", manifest.composition_file);
    println!("Lineage: {}", manifest.lineage_file);
    println!("History: {}", manifest.history_file);
    println!("Summary: {}", manifest.summary_file);
    match manifest.chart_file {
        Some(path) => println!("Chart: {}", path),
        None => println!("Chart: not written (see log)"),
    }

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
