//! Specimens and their heritable phenotype.

use serde::{Deserialize, Serialize};

/// Heritable coloration of a specimen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phenotype {
    Light,
    Dark,
}

impl Phenotype {
    /// Number of distinct phenotypes
    pub const COUNT: usize = 2;

    /// All phenotypes in index order
    pub const ALL: [Phenotype; Phenotype::COUNT] = [Phenotype::Light, Phenotype::Dark];

    /// Position in the palette
    pub fn index(&self) -> usize {
        match self {
            Phenotype::Light => 0,
            Phenotype::Dark => 1,
        }
    }

    /// Phenotype at a palette position (wraps around)
    pub fn from_index(index: usize) -> Phenotype {
        Self::ALL[index % Self::COUNT]
    }

    /// Phenotype reached by a single mutation step
    pub fn next(&self) -> Phenotype {
        Self::from_index(self.index() + 1)
    }

    /// Marker color as RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Phenotype::Light => (192, 192, 192), // Silver
            Phenotype::Dark => (105, 105, 105),  // Dim grey
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Phenotype::Light => "light",
            Phenotype::Dark => "dark",
        }
    }
}

/// A single specimen in a generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specimen {
    pub phenotype: Phenotype,
    pub alive: bool,
}

impl Specimen {
    pub fn new(phenotype: Phenotype) -> Self {
        Self {
            phenotype,
            alive: true,
        }
    }

    /// Copy used as a child in the next generation.
    ///
    /// Offspring are always born alive, even when the parent has since been
    /// eliminated.
    pub fn offspring(&self) -> Specimen {
        Specimen::new(self.phenotype)
    }
}
