//! Statistics tracking for the simulation.

use crate::environment::{Backdrop, EnvironmentInterval};
use crate::population::Population;
use crate::specimen::Phenotype;
use serde::{Deserialize, Serialize};

/// Summary of the latest generation after a command
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Index of the latest generation
    pub generation: usize,
    /// Fixed number of members per generation
    pub population_size: usize,
    /// Alive members
    pub alive: usize,
    /// Alive light members
    pub light_alive: usize,
    /// Alive dark members
    pub dark_alive: usize,
    /// Current backdrop
    pub backdrop: Option<Backdrop>,
    /// Commands processed so far
    pub commands: u64,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats from the latest generation
    pub fn update(&mut self, population: &Population, backdrop: Backdrop) {
        self.generation = population.generation();
        self.population_size = population.len();
        self.alive = population.alive_count();
        self.light_alive = population.count_alive(Phenotype::Light);
        self.dark_alive = population.count_alive(Phenotype::Dark);
        self.backdrop = Some(backdrop);
    }

    /// Eliminated members of the latest generation
    pub fn dead(&self) -> usize {
        self.population_size - self.alive
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:4} | Alive:{:3}/{:3} | Light:{:3} | Dark:{:3} | Backdrop:{}",
            self.generation,
            self.alive,
            self.population_size,
            self.light_alive,
            self.dark_alive,
            self.backdrop.map_or("-", |b| b.name()),
        )
    }
}

/// Composition of each spawned generation plus the backdrop intervals.
///
/// Both series are append-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionHistory {
    /// Members per generation
    pub population_size: usize,
    /// Alive light members of each spawned generation (entry `i` is
    /// generation `i + 1`)
    pub composition: Vec<usize>,
    /// Closed backdrop intervals
    pub intervals: Vec<EnvironmentInterval>,
}

impl CompositionHistory {
    pub fn new(population_size: usize) -> Self {
        Self {
            population_size,
            composition: Vec::new(),
            intervals: Vec::new(),
        }
    }

    /// Record the light count of a freshly spawned generation
    pub fn record_generation(&mut self, light_count: usize) {
        self.composition.push(light_count);
    }

    /// Record a closed backdrop interval
    pub fn record_interval(&mut self, interval: EnvironmentInterval) {
        self.intervals.push(interval);
    }

    /// Number of spawned generations recorded
    pub fn len(&self) -> usize {
        self.composition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composition.is_empty()
    }

    /// Light count over generations
    pub fn light_series(&self) -> Vec<(usize, usize)> {
        self.composition
            .iter()
            .enumerate()
            .map(|(i, &count)| (i + 1, count))
            .collect()
    }

    /// Dark count over generations
    pub fn dark_series(&self) -> Vec<(usize, usize)> {
        self.composition
            .iter()
            .enumerate()
            .map(|(i, &count)| (i + 1, self.population_size.saturating_sub(count)))
            .collect()
    }

    /// Backdrop bands for chart shading, including the still-open interval
    /// from the last change up to `current_generation`
    pub fn bands(&self, current_generation: usize, current: Backdrop) -> Vec<EnvironmentInterval> {
        let mut bands = self.intervals.clone();
        let start = self.intervals.last().map_or(0, |i| i.end_generation);
        if current_generation > start {
            bands.push(EnvironmentInterval {
                start_generation: start,
                end_generation: current_generation,
                backdrop: current,
            });
        }
        bands
    }

    /// Render the composition series as CSV
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("generation,light,dark\n");
        for ((generation, light), (_, dark)) in self.light_series().into_iter().zip(self.dark_series()) {
            csv.push_str(&format!("{},{},{}\n", generation, light, dark));
        }
        csv
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Phenotype::{Dark, Light};

    #[test]
    fn test_stats_update() {
        let mut pop = Population::from_phenotypes(&[Light, Light, Dark, Dark, Dark], Backdrop::Dark);
        pop.members_mut()[2].alive = false;

        let mut stats = Stats::new();
        stats.update(&pop, Backdrop::Dark);

        assert_eq!(stats.population_size, 5);
        assert_eq!(stats.alive, 4);
        assert_eq!(stats.dead(), 1);
        assert_eq!(stats.light_alive, 2);
        assert_eq!(stats.dark_alive, 2);
        assert!(stats.summary().contains("Backdrop:dark"));
    }

    #[test]
    fn test_series() {
        let mut history = CompositionHistory::new(20);
        for count in [10, 12, 15] {
            history.record_generation(count);
        }

        assert_eq!(history.light_series(), vec![(1, 10), (2, 12), (3, 15)]);
        assert_eq!(history.dark_series(), vec![(1, 10), (2, 8), (3, 5)]);
    }

    #[test]
    fn test_bands_include_open_interval() {
        let mut history = CompositionHistory::new(20);
        history.record_interval(EnvironmentInterval {
            start_generation: 0,
            end_generation: 3,
            backdrop: Backdrop::Light,
        });

        let bands = history.bands(7, Backdrop::Dark);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[1].start_generation, 3);
        assert_eq!(bands[1].end_generation, 7);
        assert_eq!(bands[1].backdrop, Backdrop::Dark);

        // Nothing open when the change just happened
        assert_eq!(history.bands(3, Backdrop::Dark).len(), 1);
    }

    #[test]
    fn test_bands_without_changes() {
        let history = CompositionHistory::new(20);
        let bands = history.bands(4, Backdrop::Light);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].start_generation, 0);
        assert!(history.bands(0, Backdrop::Light).is_empty());
    }

    #[test]
    fn test_csv() {
        let mut history = CompositionHistory::new(4);
        history.record_generation(1);
        history.record_generation(3);

        let csv = history.to_csv();
        assert!(csv.starts_with("generation,light,dark\n"));
        assert!(csv.contains("1,1,3\n"));
        assert!(csv.contains("2,3,1\n"));
    }

    #[test]
    fn test_history_roundtrip() {
        let mut history = CompositionHistory::new(20);
        history.record_generation(11);
        history.record_interval(EnvironmentInterval {
            start_generation: 0,
            end_generation: 1,
            backdrop: Backdrop::Light,
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let path = path.to_str().unwrap();

        history.save(path).unwrap();
        let loaded = CompositionHistory::load(path).unwrap();
        assert_eq!(loaded, history);
    }
}
