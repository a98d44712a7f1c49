//! Data export for analysis in external tools.

use crate::chart::{self, ChartData};
use crate::simulation::Simulation;
use crate::stats::CompositionHistory;
use serde::Serialize;
use std::fs::File;
use std::io::{Result, Write};
use std::path::Path;

/// Export system for saving run data
pub struct ExportSystem;

impl ExportSystem {
    /// Export the light/dark counts per generation to CSV
    pub fn export_composition_csv<P: AsRef<Path>>(
        history: &CompositionHistory,
        path: P,
    ) -> Result<()> {
        let mut file = File::create(path)?;
        write!(file, "{}", history.to_csv())?;
        Ok(())
    }

    /// Export every specimen of every generation with its parent index
    pub fn export_lineage_csv<P: AsRef<Path>>(sim: &Simulation, path: P) -> Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "generation,index,parent,phenotype,alive,backdrop")?;

        for population in &sim.populations {
            let parents = population.parent_of();
            for (index, specimen) in population.members().iter().enumerate() {
                let parent = parents.map_or(String::new(), |p| p[index].to_string());
                writeln!(
                    file,
                    "{},{},{},{},{},{}",
                    population.generation(),
                    index,
                    parent,
                    specimen.phenotype.name(),
                    specimen.alive,
                    population.backdrop.name(),
                )?;
            }
        }

        Ok(())
    }

    /// Export composition history and run metadata to JSON
    pub fn export_history_json<P: AsRef<Path>>(sim: &Simulation, path: P) -> Result<()> {
        let snapshot = RunSnapshot {
            seed: sim.seed(),
            generations: sim.generation_count(),
            commands: sim.stats.commands,
            backdrop: sim.environment.state().name().to_string(),
            history: &sim.history,
            latest: sim
                .latest()
                .members()
                .iter()
                .map(|s| SpecimenSnapshot {
                    phenotype: s.phenotype.name(),
                    alive: s.alive,
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)?;

        Ok(())
    }

    /// Export summary statistics
    pub fn export_summary<P: AsRef<Path>>(sim: &Simulation, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        let stats = &sim.stats;

        writeln!(file, "=== Peppered Run Summary ===")?;
        writeln!(file, "Seed: {}", sim.seed())?;
        writeln!(file, "Commands: {}", stats.commands)?;
        writeln!(file, "Generations: {}", sim.generation_count())?;
        writeln!(file, "Population size: {}", stats.population_size)?;
        writeln!(file, "Backdrop: {}", sim.environment.state().name())?;
        writeln!(file)?;

        writeln!(file, "=== Latest Generation ===")?;
        writeln!(file, "Alive: {}", stats.alive)?;
        writeln!(file, "Eliminated: {}", stats.dead())?;
        writeln!(file, "Light alive: {}", stats.light_alive)?;
        writeln!(file, "Dark alive: {}", stats.dark_alive)?;
        writeln!(file)?;

        writeln!(file, "=== Backdrop Intervals ===")?;
        for band in sim.bands() {
            writeln!(
                file,
                "{:>4} - {:<4} {}",
                band.start_generation,
                band.end_generation,
                band.backdrop.name()
            )?;
        }

        if let (Some(first), Some(last)) = (
            sim.history.composition.first(),
            sim.history.composition.last(),
        ) {
            writeln!(file)?;
            writeln!(file, "Light share: {} -> {} of {}", first, last, stats.population_size)?;
        }

        Ok(())
    }

    /// Export everything a run produces into one directory
    pub fn export_all<P: AsRef<Path>>(sim: &Simulation, base_path: P) -> Result<ExportManifest> {
        let base = base_path.as_ref();
        std::fs::create_dir_all(base)?;

        let composition_path = base.join("composition.csv");
        let lineage_path = base.join("lineage.csv");
        let history_path = base.join("history.json");
        let summary_path = base.join("summary.txt");
        let chart_path = base.join("composition.png");

        Self::export_composition_csv(&sim.history, &composition_path)?;
        Self::export_lineage_csv(sim, &lineage_path)?;
        Self::export_history_json(sim, &history_path)?;
        Self::export_summary(sim, &summary_path)?;

        let chart_file = match chart::render_png(&ChartData::new(&sim.history, sim.bands()), &chart_path) {
            Ok(()) => Some(chart_path.to_string_lossy().to_string()),
            Err(e) => {
                log::warn!("Chart not written: {}", e);
                None
            }
        };

        Ok(ExportManifest {
            generations: sim.generation_count(),
            composition_file: composition_path.to_string_lossy().to_string(),
            lineage_file: lineage_path.to_string_lossy().to_string(),
            history_file: history_path.to_string_lossy().to_string(),
            summary_file: summary_path.to_string_lossy().to_string(),
            chart_file,
        })
    }
}

/// Manifest of exported files
#[derive(Debug)]
pub struct ExportManifest {
    pub generations: usize,
    pub composition_file: String,
    pub lineage_file: String,
    pub history_file: String,
    pub summary_file: String,
    /// `None` when the chart could not be drawn
    pub chart_file: Option<String>,
}

#[derive(Serialize)]
struct SpecimenSnapshot {
    phenotype: &'static str,
    alive: bool,
}

/// Run snapshot for JSON export
#[derive(Serialize)]
struct RunSnapshot<'a> {
    seed: u64,
    generations: usize,
    commands: u64,
    backdrop: String,
    history: &'a CompositionHistory,
    latest: Vec<SpecimenSnapshot>,
}
