//! Discrete commands driving the simulation and the history view.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Commands that change simulation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Remove a batch of specimens from the latest generation
    Eliminate,
    /// Flip phenotypes in the latest generation
    Mutate,
    /// Breed the next generation from the survivors
    SpawnGeneration,
    /// Rotate the backdrop
    ChangeEnvironment,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Eliminate,
        Command::Mutate,
        Command::SpawnGeneration,
        Command::ChangeEnvironment,
    ];

    /// Short script token
    pub fn token(&self) -> &'static str {
        match self {
            Command::Eliminate => "e",
            Command::Mutate => "m",
            Command::SpawnGeneration => "s",
            Command::ChangeEnvironment => "b",
        }
    }

    /// Parse a whitespace- or comma-separated command script
    pub fn parse_script(script: &str) -> Result<Vec<Command>, ParseCommandError> {
        script
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "e" | "eliminate" => Ok(Command::Eliminate),
            "m" | "mutate" => Ok(Command::Mutate),
            "s" | "spawn" => Ok(Command::SpawnGeneration),
            "b" | "env" | "environment" => Ok(Command::ChangeEnvironment),
            _ => Err(ParseCommandError(s.to_string())),
        }
    }
}

/// Unknown command token in a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(pub String);

impl std::fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown command '{}' (expected eliminate/e, mutate/m, spawn/s, env/b)",
            self.0
        )
    }
}

impl std::error::Error for ParseCommandError {}

/// Commands that only move the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Show older generations
    ScrollBack,
    /// Show newer generations
    ScrollForward,
}

/// Any user input the front end understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Sim(Command),
    View(ViewCommand),
    Quit,
}

/// Inputs gathered during one frame.
///
/// Only one simulation command runs per frame: the last one wins. Scroll
/// inputs accumulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub command: Option<Command>,
    /// Net scroll in rows, positive towards older generations
    pub scroll_rows: i64,
    pub quit: bool,
}

impl TickInput {
    pub fn collect<I: IntoIterator<Item = Input>>(inputs: I) -> Self {
        let mut tick = Self::default();
        for input in inputs {
            match input {
                Input::Sim(command) => tick.command = Some(command),
                Input::View(ViewCommand::ScrollBack) => tick.scroll_rows += 1,
                Input::View(ViewCommand::ScrollForward) => tick.scroll_rows -= 1,
                Input::Quit => tick.quit = true,
            }
        }
        tick
    }
}
