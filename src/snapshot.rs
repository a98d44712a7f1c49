//! Snapshot structures for rendering.
//!
//! These are plain copies of simulation state: a front end can draw the
//! history view and the chart from them without touching the simulation.

use crate::environment::{Backdrop, EnvironmentInterval};
use crate::population::Population;
use crate::simulation::Simulation;
use crate::specimen::Phenotype;
use crate::stats::CompositionHistory;

/// Color of lineage connector lines
pub const LINEAGE_COLOR: (u8, u8, u8) = (0, 0, 0);

/// One specimen marker in a row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
    pub index: usize,
    pub phenotype: Phenotype,
    pub alive: bool,
}

/// Connector from a child to its parent in the row above
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineageLink {
    pub child: usize,
    pub parent: usize,
}

/// Render view of one generation
#[derive(Clone, Debug, PartialEq)]
pub struct RowView {
    pub generation: usize,
    pub backdrop: Backdrop,
    pub markers: Vec<Marker>,
    /// Links for alive children (empty for generation 0)
    pub links: Vec<LineageLink>,
}

impl RowView {
    pub fn from_population(population: &Population) -> Self {
        let markers = population
            .members()
            .iter()
            .enumerate()
            .map(|(index, s)| Marker {
                index,
                phenotype: s.phenotype,
                alive: s.alive,
            })
            .collect();

        let links = population
            .parent_of()
            .map(|parents| {
                parents
                    .iter()
                    .zip(population.members())
                    .enumerate()
                    .filter(|(_, (_, s))| s.alive)
                    .map(|(child, (&parent, _))| LineageLink { child, parent })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            generation: population.generation(),
            backdrop: population.backdrop,
            markers,
            links,
        }
    }

    /// Markers that should be drawn
    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.alive)
    }
}

/// Everything a front end needs to draw one frame
#[derive(Clone, Debug)]
pub struct HistorySnapshot {
    pub rows: Vec<RowView>,
    /// Current backdrop (window background)
    pub backdrop: Backdrop,
    pub population_size: usize,
    pub composition: CompositionHistory,
    /// Chart shading up to the latest generation
    pub bands: Vec<EnvironmentInterval>,
}

impl HistorySnapshot {
    /// Create a snapshot from the current simulation state
    pub fn from_simulation(sim: &Simulation) -> Self {
        Self {
            rows: sim.populations.iter().map(RowView::from_population).collect(),
            backdrop: sim.environment.state(),
            population_size: sim.config.population.size,
            composition: sim.history.clone(),
            bands: sim.bands(),
        }
    }

    /// Latest generation index
    pub fn latest_generation(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// Horizontal position of a marker: members are spread evenly with one
/// margin on each side
#[inline]
pub fn marker_x(index: usize, population_size: usize, width: f32) -> f32 {
    let margin = width / (population_size + 1) as f32;
    margin * (index + 1) as f32
}
