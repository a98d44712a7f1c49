//! Scrolling generation rows with lineage connectors.

use egui::{Color32, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::snapshot::{marker_x, HistorySnapshot, RowView, LINEAGE_COLOR};
use crate::viewport::Viewport;

fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// History view: one horizontal band per generation, newest at the bottom
pub struct HistoryView {
    row_height: f32,
    /// Draw lines from children to parents
    show_lineage: bool,
}

impl HistoryView {
    pub fn new(row_height: f32) -> Self {
        Self {
            row_height,
            show_lineage: true,
        }
    }

    pub fn show(&mut self, ui: &mut Ui, snapshot: &HistorySnapshot, viewport: &Viewport) {
        let controls_height = 24.0;
        let available = ui.available_size() - Vec2::new(0.0, controls_height);

        let (response, painter) = ui.allocate_painter(available, Sense::hover());
        let rect = response.rect;

        // Window background follows the current backdrop
        painter.rect_filled(rect, 0.0, rgb(snapshot.backdrop.color()));

        let n = snapshot.population_size;
        let x_of = |index: usize| rect.left() + marker_x(index, n, rect.width());
        let y_of = |generation: usize| {
            rect.top() + viewport.row_center_y(generation, self.row_height, rect.height())
        };

        let visible = viewport.visible_generations();
        let rows = snapshot
            .rows
            .iter()
            .filter(|row| visible.contains(&row.generation));

        let painter = painter.with_clip_rect(rect);
        for row in rows.clone() {
            let center = y_of(row.generation);
            let row_rect = Rect::from_center_size(
                Pos2::new(rect.center().x, center),
                Vec2::new(rect.width(), self.row_height),
            );
            self.draw_row(&painter, row, row_rect, &x_of);
        }

        if self.show_lineage {
            let stroke = Stroke::new(1.0, rgb(LINEAGE_COLOR));
            for row in rows.filter(|row| row.generation > 0) {
                let child_y = y_of(row.generation);
                let parent_y = y_of(row.generation - 1);
                for link in &row.links {
                    painter.line_segment(
                        [
                            Pos2::new(x_of(link.child), child_y),
                            Pos2::new(x_of(link.parent), parent_y),
                        ],
                        stroke,
                    );
                }
            }
        }

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_lineage, "Lineage");
            ui.label(format!(
                "Showing generation {} of {}",
                viewport.focus(),
                snapshot.latest_generation()
            ));
        });
    }

    fn draw_row(
        &self,
        painter: &egui::Painter,
        row: &RowView,
        row_rect: Rect,
        x_of: &impl Fn(usize) -> f32,
    ) {
        painter.rect_filled(row_rect, 0.0, rgb(row.backdrop.color()));

        let radius = self.row_height / 8.0;
        for marker in row.visible_markers() {
            painter.circle_filled(
                Pos2::new(x_of(marker.index), row_rect.center().y),
                radius,
                rgb(marker.phenotype.color()),
            );
        }
    }
}
