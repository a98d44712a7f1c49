//! GUI view components.

mod control_panel;
mod history_view;
mod stats_panel;

pub use control_panel::ControlPanel;
pub use history_view::HistoryView;
pub use stats_panel::StatsPanel;
