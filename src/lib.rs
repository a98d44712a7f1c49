//! # Peppered
//!
//! Interactive natural-selection demo: a population of light and dark
//! specimens resting on a backdrop that can switch between light and dark.
//!
//! ## Features
//!
//! - **Selective elimination**: weighted sampling biased by the backdrop
//! - **Lineage**: every generation keeps positional links to its parents
//! - **Charting**: composition history with backdrop bands (PNG or live)
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: Seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust
//! use peppered::{Command, Config, Simulation};
//!
//! let mut sim = Simulation::new_with_seed(Config::default(), 42);
//!
//! // Eliminate, breed, switch the backdrop, breed again
//! sim.run_script([
//!     Command::Eliminate,
//!     Command::SpawnGeneration,
//!     Command::ChangeEnvironment,
//!     Command::SpawnGeneration,
//! ]);
//!
//! println!("{}", sim.stats.summary());
//! assert_eq!(sim.generation_count(), 3);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use peppered::Config;
//!
//! let mut config = Config::default();
//! config.population.size = 40;
//! config.evolution.elimination_batch = 8;
//! ```

pub mod chart;
pub mod commands;
pub mod config;
pub mod environment;
pub mod export;
pub mod population;
pub mod simulation;
pub mod snapshot;
pub mod specimen;
pub mod stats;
pub mod viewport;

#[cfg(feature = "gui")]
pub mod gui;

// Re-export main types
pub use commands::Command;
pub use config::Config;
pub use environment::{Backdrop, Environment};
pub use population::Population;
pub use simulation::{Outcome, Simulation};
pub use specimen::{Phenotype, Specimen};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_session() {
        let mut sim = Simulation::new_with_seed(Config::default(), 1);
        let script = Command::parse_script("e e s m s").unwrap();

        let outcomes = sim.run_script(script);

        assert_eq!(outcomes.len(), 5);
        assert_eq!(sim.generation_count(), 3);
        assert_eq!(sim.history.len(), 2);
    }
}
