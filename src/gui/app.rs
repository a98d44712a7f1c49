//! Main GUI application.

use eframe::egui;
use std::time::Instant;

use crate::commands::{Input, TickInput};
use crate::config::Config;
use crate::simulation::{Outcome, Simulation};
use crate::viewport::Viewport;

use super::input;
use super::views::{ControlPanel, HistoryView, StatsPanel};

/// Main application state
pub struct PepperedApp {
    /// The run being displayed
    sim: Simulation,
    /// Scroll state and post-spawn pause
    viewport: Viewport,
    /// Button clicks from the previous frame
    pending: Vec<Input>,
    history_view: HistoryView,
    control_panel: ControlPanel,
    stats_panel: StatsPanel,
    help: String,
}

impl PepperedApp {
    /// Create a new application with the given configuration
    pub fn new(config: Config) -> Self {
        Self::with_simulation(Simulation::new(config))
    }

    pub fn with_simulation(sim: Simulation) -> Self {
        let display = &sim.config.display;

        Self {
            viewport: Viewport::from_config(display),
            history_view: HistoryView::new(display.row_height()),
            pending: Vec::new(),
            control_panel: ControlPanel::new(),
            stats_panel: StatsPanel::new(),
            help: input::help_text(),
            sim,
        }
    }

    /// Process one frame of input. Returns false when the window should close.
    pub fn handle_tick(&mut self, tick: TickInput, now: Instant) -> bool {
        if tick.quit {
            log::info!("Quit requested after {} commands", self.sim.stats.commands);
            return false;
        }

        if let Some(command) = tick.command {
            let outcome = self.sim.apply(command);
            if let Outcome::Spawned { generation, .. } = outcome {
                self.viewport.on_spawn(generation, now);
            }
            self.control_panel.report(&outcome);
        }

        if tick.scroll_rows != 0 {
            self.viewport.scroll(tick.scroll_rows);
        }
        self.viewport.tick(now);

        true
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl eframe::App for PepperedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let tick = input::collect_tick(ctx, std::mem::take(&mut self.pending));

        if !self.handle_tick(tick, now) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Wake up when the view should follow the new row
        if let Some(remaining) = self.viewport.remaining(now) {
            ctx.request_repaint_after(remaining);
        }

        let snapshot = self.sim.snapshot();

        // Top panel with controls
        egui::TopBottomPanel::top("control_panel").show(ctx, |ui| {
            let clicked = self.control_panel.show(ui, &self.help);
            if !clicked.is_empty() {
                self.pending.extend(clicked);
                ctx.request_repaint();
            }
        });

        // Right panel with stats and chart
        egui::SidePanel::right("stats_panel")
            .min_width(300.0)
            .default_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.stats_panel.show(ui, &self.sim.stats, &snapshot);
                });
            });

        // Bottom status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.sim.stats.summary());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Peppered {}", crate::VERSION));
                });
            });
        });

        // Central panel with the generation rows
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.history_view.show(ui, &snapshot, &self.viewport);
            });
    }
}

/// Run the GUI application
pub fn run_gui(config: Config) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.display.width, config.display.height])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Peppered - Natural Selection Demo"),
        ..Default::default()
    };

    eframe::run_native(
        "Peppered",
        native_options,
        Box::new(|_cc| Box::new(PepperedApp::new(config))),
    )
}
