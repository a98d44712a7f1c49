//! Simulation driver - applies one command at a time to the latest generation.

use crate::commands::Command;
use crate::config::Config;
use crate::environment::{Backdrop, Environment, EnvironmentInterval};
use crate::population::{Population, PopulationError};
use crate::snapshot::HistorySnapshot;
use crate::specimen::Phenotype;
use crate::stats::{CompositionHistory, Stats};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Result of applying one command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Eliminated { newly_dead: usize },
    Mutated { mutated: usize },
    Spawned { generation: usize, light_count: usize },
    EnvironmentChanged { interval: EnvironmentInterval, now: Backdrop },
    /// Spawn requested but no member of the latest generation is alive
    Extinct { generation: usize },
}

/// The whole run: every generation so far, the environment and the series
/// recorded for charting
pub struct Simulation {
    /// All generations, index 0 = initial
    pub populations: Vec<Population>,

    pub environment: Environment,

    /// Composition series and backdrop intervals
    pub history: CompositionHistory,

    // Statistics
    pub stats: Stats,

    // Configuration
    pub config: Config,

    /// Generation count at the last backdrop change
    last_change_generation: usize,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    /// Create a new simulation with the given configuration
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new simulation with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_rng(config, rng, seed)
    }

    fn with_rng(config: Config, mut rng: ChaCha8Rng, seed: u64) -> Self {
        let initial = Population::seed(config.population.size, config.environment.initial, &mut rng);

        Self::from_initial(config, initial, rng, seed)
    }

    /// Start from a hand-built initial generation
    pub fn with_initial(config: Config, initial: Population, seed: u64) -> Self {
        Self::from_initial(config, initial, ChaCha8Rng::seed_from_u64(seed), seed)
    }

    fn from_initial(mut config: Config, mut initial: Population, rng: ChaCha8Rng, seed: u64) -> Self {
        config.population.size = initial.len();
        let environment = Environment::new(&config.environment);
        initial.backdrop = environment.state();

        let mut stats = Stats::new();
        stats.update(&initial, environment.state());

        log::info!(
            "Initial generation: {} specimens ({} light, {} dark), seed {}",
            initial.len(),
            initial.count(Phenotype::Light),
            initial.count(Phenotype::Dark),
            seed
        );

        Self {
            populations: vec![initial],
            environment,
            history: CompositionHistory::new(config.population.size),
            stats,
            config,
            last_change_generation: 0,
            rng,
            seed,
        }
    }

    /// Apply a single command to the latest generation
    pub fn apply(&mut self, command: Command) -> Outcome {
        let outcome = match command {
            Command::Eliminate => self.eliminate(),
            Command::Mutate => self.mutate(),
            Command::SpawnGeneration => self.spawn(),
            Command::ChangeEnvironment => self.change_environment(),
        };

        self.stats.commands += 1;
        self.update_stats();
        outcome
    }

    /// Apply commands in order
    pub fn run_script<I: IntoIterator<Item = Command>>(&mut self, commands: I) -> Vec<Outcome> {
        commands.into_iter().map(|c| self.apply(c)).collect()
    }

    fn eliminate(&mut self) -> Outcome {
        let profile = self.environment.elimination_profile();
        let batch = self.config.evolution.elimination_batch;
        let backdrop = self.environment.state();

        let latest = Self::latest_of(&mut self.populations);
        let newly_dead = latest.eliminate(batch, &profile, &mut self.rng);
        latest.backdrop = backdrop;

        Outcome::Eliminated { newly_dead }
    }

    fn mutate(&mut self) -> Outcome {
        let rate = self.config.evolution.mutation_rate;
        let backdrop = self.environment.state();

        let latest = Self::latest_of(&mut self.populations);
        let mutated = latest.mutate(rate, &mut self.rng);
        latest.backdrop = backdrop;

        Outcome::Mutated { mutated }
    }

    fn spawn(&mut self) -> Outcome {
        let sort_by_parent = self.config.evolution.sort_by_parent;
        let latest = &self.populations[self.populations.len() - 1];

        let next = latest
            .generate_offspring(sort_by_parent, &mut self.rng)
            .and_then(|offspring| Population::from_offspring(latest, offspring));

        let mut next = match next {
            Ok(next) => next,
            Err(PopulationError::Extinct { generation }) => {
                log::warn!("Generation {} is extinct, nothing to spawn", generation);
                return Outcome::Extinct { generation };
            }
            Err(e) => {
                log::error!("Spawn failed: {}", e);
                return Outcome::Extinct {
                    generation: latest.generation(),
                };
            }
        };
        next.backdrop = self.environment.state();

        let generation = next.generation();
        let light_count = next.count_alive(Phenotype::Light);

        self.populations.push(next);
        self.history.record_generation(light_count);

        log::info!(
            "Spawned generation {}: {} light, {} dark",
            generation,
            light_count,
            self.config.population.size - light_count
        );

        Outcome::Spawned {
            generation,
            light_count,
        }
    }

    fn change_environment(&mut self) -> Outcome {
        let interval = EnvironmentInterval {
            start_generation: self.last_change_generation,
            end_generation: self.populations.len(),
            backdrop: self.environment.state(),
        };
        self.history.record_interval(interval);
        self.last_change_generation = self.populations.len();
        self.environment.advance();

        log::info!(
            "Backdrop changed {} -> {} after generation {}",
            interval.backdrop.name(),
            self.environment.state().name(),
            self.populations.len() - 1
        );

        Outcome::EnvironmentChanged {
            interval,
            now: self.environment.state(),
        }
    }

    fn latest_of(populations: &mut [Population]) -> &mut Population {
        let last = populations.len() - 1;
        &mut populations[last]
    }

    /// Update statistics
    fn update_stats(&mut self) {
        let backdrop = self.environment.state();
        let latest = &self.populations[self.populations.len() - 1];
        self.stats.update(latest, backdrop);
    }

    /// The generation commands act on
    pub fn latest(&self) -> &Population {
        // History always holds at least the initial generation
        &self.populations[self.populations.len() - 1]
    }

    /// Number of generations so far
    pub fn generation_count(&self) -> usize {
        self.populations.len()
    }

    /// Backdrop bands up to the latest generation, for chart shading
    pub fn bands(&self) -> Vec<EnvironmentInterval> {
        self.history
            .bands(self.populations.len(), self.environment.state())
    }

    /// Render input for the whole history
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::from_simulation(self)
    }

    /// Check if the latest generation has no survivors
    pub fn is_extinct(&self) -> bool {
        self.latest().is_extinct()
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
