use egui::{Context, Key, KeyboardShortcut, Modifiers};

use crate::command::Command;

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

/// Undo/redo keyboard shortcuts.
///
/// Skipped while a text field has focus so its own editing shortcuts win.
pub fn shortcut_command(ctx: &Context) -> Option<Command> {
    if ctx.wants_keyboard_input() {
        return None;
    }

    ctx.input_mut(|input| {
        // Shift+Z first: the plain undo shortcut also matches with shift held
        if input.consume_shortcut(&REDO) || input.consume_shortcut(&REDO_ALT) {
            Some(Command::Redo)
        } else if input.consume_shortcut(&UNDO) {
            Some(Command::Undo)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            command: true,
            ..Default::default()
        }
    }

    fn key_press(key: Key, modifiers: Modifiers) -> egui::RawInput {
        egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        }
    }

    /// Run one frame with `input` and return the shortcut it maps to.
    fn command_for(input: egui::RawInput) -> Option<Command> {
        let ctx = Context::default();
        let mut command = None;
        let _ = ctx.run(input, |ctx| {
            command = shortcut_command(ctx);
        });
        command
    }

    #[test]
    fn test_ctrl_z_undoes() {
        assert_eq!(command_for(key_press(Key::Z, ctrl())), Some(Command::Undo));
    }

    #[test]
    fn test_ctrl_shift_z_redoes() {
        let modifiers = ctrl().plus(Modifiers::SHIFT);
        assert_eq!(command_for(key_press(Key::Z, modifiers)), Some(Command::Redo));
    }

    #[test]
    fn test_ctrl_y_redoes() {
        assert_eq!(command_for(key_press(Key::Y, ctrl())), Some(Command::Redo));
    }

    #[test]
    fn test_plain_keys_are_ignored() {
        assert_eq!(command_for(key_press(Key::Z, Modifiers::NONE)), None);
        assert_eq!(command_for(egui::RawInput::default()), None);
    }

    #[test]
    fn test_focused_text_field_keeps_its_shortcuts() {
        let ctx = Context::default();
        let mut command = None;
        let _ = ctx.run(key_press(Key::Z, ctrl()), |ctx| {
            ctx.memory_mut(|memory| memory.request_focus(egui::Id::new("text_field")));
            command = shortcut_command(ctx);
        });
        assert_eq!(command, None);
    }
}
