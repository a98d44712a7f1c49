//! Keyboard bindings.

use eframe::egui;

use crate::commands::{Command, Input, TickInput, ViewCommand};

/// Key → input table, also shown in the help line
pub const KEY_BINDINGS: [(egui::Key, Input, &str); 8] = [
    (egui::Key::Space, Input::Sim(Command::Eliminate), "Space: eliminate"),
    (egui::Key::ArrowDown, Input::Sim(Command::SpawnGeneration), "Down: spawn"),
    (egui::Key::B, Input::Sim(Command::ChangeEnvironment), "B: backdrop"),
    (egui::Key::M, Input::Sim(Command::Mutate), "M: mutate"),
    (egui::Key::ArrowLeft, Input::View(ViewCommand::ScrollBack), "Left: older"),
    (egui::Key::ArrowRight, Input::View(ViewCommand::ScrollForward), "Right: newer"),
    (egui::Key::Escape, Input::Quit, "Esc/Q: quit"),
    (egui::Key::Q, Input::Quit, ""),
];

pub fn input_for_key(key: egui::Key) -> Option<Input> {
    KEY_BINDINGS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, input, _)| *input)
}

/// Inputs pressed during this frame, in event order
pub fn read_inputs(ctx: &egui::Context) -> Vec<Input> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => input_for_key(*key),
                _ => None,
            })
            .collect()
    })
}

/// Help line listing the bindings
pub fn help_text() -> String {
    KEY_BINDINGS
        .iter()
        .map(|(_, _, label)| *label)
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Keyboard plus any clicked buttons for this frame
pub fn collect_tick(ctx: &egui::Context, clicked: Vec<Input>) -> TickInput {
    TickInput::collect(read_inputs(ctx).into_iter().chain(clicked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(
            input_for_key(egui::Key::Space),
            Some(Input::Sim(Command::Eliminate))
        );
        assert_eq!(
            input_for_key(egui::Key::ArrowDown),
            Some(Input::Sim(Command::SpawnGeneration))
        );
        assert_eq!(input_for_key(egui::Key::Q), Some(Input::Quit));
        assert_eq!(input_for_key(egui::Key::Z), None);
    }

    #[test]
    fn test_help_text() {
        let help = help_text();
        assert!(help.starts_with("Space: eliminate"));
        assert!(!help.ends_with(" | "));
    }
}
