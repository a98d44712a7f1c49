//! Backdrop cycling and environment-dependent elimination weights.

use crate::specimen::Phenotype;
use serde::{Deserialize, Serialize};

/// Environment state: the background the specimens rest on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    Light,
    Dark,
}

impl Backdrop {
    /// Number of environment states
    pub const COUNT: usize = 2;

    pub const ALL: [Backdrop; Backdrop::COUNT] = [Backdrop::Light, Backdrop::Dark];

    /// State index (0 = light, 1 = dark)
    pub fn index(&self) -> usize {
        match self {
            Backdrop::Light => 0,
            Backdrop::Dark => 1,
        }
    }

    /// Get next backdrop in the cycle
    pub fn next(&self) -> Backdrop {
        match self {
            Backdrop::Light => Backdrop::Dark,
            Backdrop::Dark => Backdrop::Light,
        }
    }

    /// Background color as RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Backdrop::Light => (211, 211, 211), // Light grey
            Backdrop::Dark => (128, 128, 128),  // Grey
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Backdrop::Light => "light",
            Backdrop::Dark => "dark",
        }
    }
}

/// Relative likelihood of each phenotype being picked for elimination.
///
/// Weights are sampling weights, not probabilities: they must be finite and
/// non-negative but need not sum to one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EliminationProfile {
    pub light: f64,
    pub dark: f64,
}

impl EliminationProfile {
    pub fn new(light: f64, dark: f64) -> Self {
        Self { light, dark }
    }

    /// Weight for a phenotype
    pub fn weight(&self, phenotype: Phenotype) -> f64 {
        match phenotype {
            Phenotype::Light => self.light,
            Phenotype::Dark => self.dark,
        }
    }

    /// Weights in phenotype index order
    pub fn as_array(&self) -> [f64; Phenotype::COUNT] {
        [self.light, self.dark]
    }

    pub fn is_valid(&self) -> bool {
        self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0)
    }

    /// True when `count` members of any phenotype have a finite total weight
    pub fn sums_finite(&self, count: usize) -> bool {
        self.as_array()
            .iter()
            .all(|w| (w * count as f64).is_finite())
    }
}

/// One elimination profile per backdrop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EliminationTable {
    pub light_backdrop: EliminationProfile,
    pub dark_backdrop: EliminationProfile,
}

impl EliminationTable {
    pub fn profile(&self, backdrop: Backdrop) -> EliminationProfile {
        match backdrop {
            Backdrop::Light => self.light_backdrop,
            Backdrop::Dark => self.dark_backdrop,
        }
    }
}

impl Default for EliminationTable {
    fn default() -> Self {
        // Camouflaged specimens are harder to spot
        Self {
            light_backdrop: EliminationProfile::new(0.3, 0.7),
            dark_backdrop: EliminationProfile::new(0.8, 0.2),
        }
    }
}

/// Environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Backdrop at the start of a run
    pub initial: Backdrop,
    /// Elimination weights per backdrop
    pub elimination: EliminationTable,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            initial: Backdrop::Light,
            elimination: EliminationTable::default(),
        }
    }
}

/// The environment shared by every generation of a run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Environment {
    state: Backdrop,
    table: EliminationTable,
}

impl Environment {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            state: config.initial,
            table: config.elimination.clone(),
        }
    }

    /// Current backdrop
    pub fn state(&self) -> Backdrop {
        self.state
    }

    /// Display color of the current backdrop
    pub fn current_color(&self) -> (u8, u8, u8) {
        self.state.color()
    }

    /// Elimination weights under the current backdrop
    pub fn elimination_profile(&self) -> EliminationProfile {
        self.table.profile(self.state)
    }

    /// Rotate to the next backdrop
    pub fn advance(&mut self) {
        self.state = self.state.next();
    }
}

/// A run of generations during which the backdrop did not change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInterval {
    pub start_generation: usize,
    pub end_generation: usize,
    pub backdrop: Backdrop,
}

impl EnvironmentInterval {
    pub fn state_index(&self) -> usize {
        self.backdrop.index()
    }

    pub fn len(&self) -> usize {
        self.end_generation.saturating_sub(self.start_generation)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
