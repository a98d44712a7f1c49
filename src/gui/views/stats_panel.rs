//! Statistics panel with the live composition chart.

use egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::chart::ChartData;
use crate::snapshot::HistorySnapshot;
use crate::stats::Stats;

/// Stats panel showing the latest generation and the composition chart
pub struct StatsPanel {
    /// Chart height in pixels
    chart_height: f32,
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self { chart_height: 260.0 }
    }
}

impl StatsPanel {
    /// Create a new stats panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the stats panel
    pub fn show(&mut self, ui: &mut Ui, stats: &Stats, snapshot: &HistorySnapshot) {
        egui::CollapsingHeader::new("Statistics")
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("stats_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Generation:");
                        ui.label(format!("{}", stats.generation));
                        ui.end_row();

                        ui.label("Alive:");
                        ui.label(format!("{} / {}", stats.alive, stats.population_size));
                        ui.end_row();

                        ui.label("Light alive:");
                        ui.label(format!("{}", stats.light_alive));
                        ui.end_row();

                        ui.label("Dark alive:");
                        ui.label(format!("{}", stats.dark_alive));
                        ui.end_row();

                        ui.label("Backdrop:");
                        ui.label(stats.backdrop.map_or("-", |b| b.name()));
                        ui.end_row();

                        ui.label("Commands:");
                        ui.label(format!("{}", stats.commands));
                        ui.end_row();
                    });
            });

        ui.separator();

        egui::CollapsingHeader::new("Composition")
            .default_open(true)
            .show(ui, |ui| {
                let data = ChartData::from_snapshot(snapshot);
                self.show_chart(ui, &data);
            });
    }

    fn show_chart(&self, ui: &mut Ui, data: &ChartData) {
        let x_range = data.x_range();
        let y_range = data.y_range();

        let bands: Vec<Polygon> = data
            .band_rects()
            .into_iter()
            .map(|([(x0, y0), (x1, y1)], (r, g, b))| {
                let corners = vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]];
                Polygon::new(PlotPoints::new(corners)).fill_color(Color32::from_rgb(r, g, b))
            })
            .collect();

        let to_plot = |series: &[(f64, f64)]| -> Vec<[f64; 2]> {
            series.iter().map(|&(x, y)| [x, y]).collect()
        };
        let light = to_plot(&data.light);
        let dark = to_plot(&data.dark);

        Plot::new("composition_plot")
            .height(self.chart_height)
            .legend(Legend::default())
            .x_axis_label("Generation")
            .y_axis_label("Population size")
            .include_x(x_range.start)
            .include_x(x_range.end)
            .include_y(y_range.start)
            .include_y(y_range.end)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for band in bands {
                    plot_ui.polygon(band);
                }
                plot_ui.line(
                    Line::new(PlotPoints::new(light.clone()))
                        .color(Color32::BLUE)
                        .name("light"),
                );
                plot_ui.points(Points::new(light).color(Color32::BLUE).radius(3.0));
                plot_ui.line(
                    Line::new(PlotPoints::new(dark.clone()))
                        .color(Color32::RED)
                        .name("dark"),
                );
                plot_ui.points(Points::new(dark).color(Color32::RED).radius(3.0));
            });
    }
}
