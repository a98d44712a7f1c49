//! GUI module for Peppered.
//!
//! Provides an interactive frontend using egui + eframe.
//!
//! ## Architecture
//!
//! Everything runs on the UI thread. Each frame:
//! - keyboard events and button clicks become one `TickInput` (the last
//!   simulation command wins, scroll steps add up)
//! - the command is applied to the `Simulation`
//! - the `Viewport` timer decides whether the view follows the newest row
//! - a `HistorySnapshot` is drawn by the history view and the chart panel
//!
//! ## Usage
//!
//! ```no_run
//! use peppered::Config;
//! use peppered::gui::run_gui;
//!
//! let config = Config::default();
//! run_gui(config).unwrap();
//! ```

mod app;
mod input;
mod views;

pub use app::{run_gui, PepperedApp};
pub use input::{help_text, input_for_key, KEY_BINDINGS};
