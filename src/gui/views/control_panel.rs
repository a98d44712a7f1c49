//! Control panel mirroring the keyboard commands.

use egui::Ui;
use std::time::{Duration, Instant};

use crate::commands::{Command, Input, ViewCommand};
use crate::simulation::Outcome;

const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Command buttons plus a short-lived status message
#[derive(Default)]
pub struct ControlPanel {
    status_message: Option<(String, Instant)>,
}

impl ControlPanel {
    /// Create a new control panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe the last outcome in the status line
    pub fn report(&mut self, outcome: &Outcome) {
        let msg = match outcome {
            Outcome::Eliminated { newly_dead } => format!("Eliminated {}", newly_dead),
            Outcome::Mutated { mutated } => format!("Mutated {}", mutated),
            Outcome::Spawned {
                generation,
                light_count,
            } => format!("Generation {}: {} light", generation, light_count),
            Outcome::EnvironmentChanged { now, .. } => format!("Backdrop now {}", now.name()),
            Outcome::Extinct { generation } => {
                format!("Generation {} is extinct, nothing to spawn", generation)
            }
        };
        self.status_message = Some((msg, Instant::now()));
    }

    /// Render the control panel and return clicked inputs
    pub fn show(&mut self, ui: &mut Ui, help: &str) -> Vec<Input> {
        let mut inputs = Vec::new();

        // Clear old status messages
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }

        ui.horizontal(|ui| {
            if ui.button("Eliminate").clicked() {
                inputs.push(Input::Sim(Command::Eliminate));
            }
            if ui.button("Mutate").clicked() {
                inputs.push(Input::Sim(Command::Mutate));
            }
            if ui.button("Spawn").clicked() {
                inputs.push(Input::Sim(Command::SpawnGeneration));
            }
            if ui.button("Change backdrop").clicked() {
                inputs.push(Input::Sim(Command::ChangeEnvironment));
            }

            ui.separator();

            if ui.button("◀ Older").clicked() {
                inputs.push(Input::View(ViewCommand::ScrollBack));
            }
            if ui.button("Newer ▶").clicked() {
                inputs.push(Input::View(ViewCommand::ScrollForward));
            }

            if let Some((msg, _)) = &self.status_message {
                ui.separator();
                ui.label(egui::RichText::new(msg).italics());
            }
        });

        ui.label(egui::RichText::new(help).small());

        inputs
    }
}
