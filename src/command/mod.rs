mod history;

use egui::{Pos2, Vec2};
use thiserror::Error;

use crate::text_box::{FieldChange, StyleFlag, TextBoxId, TextBoxPatch, TextBoxTemplate};

pub use history::{History, DEFAULT_HISTORY_LIMIT};

/// Everything that can change an editor session.
///
/// Commands are dispatched through [`crate::EditorSession::dispatch`], the
/// single place where history snapshots are taken.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a text box built from the given template (or the session's
    /// default template) and select it
    AddTextBox(Option<TextBoxTemplate>),
    /// Change the selection without touching the document
    Select(Option<TextBoxId>),
    /// Start dragging a text box; `grab_offset` is pointer minus box position
    BeginDrag { id: TextBoxId, grab_offset: Vec2 },
    /// Pointer moved while dragging
    Drag { pointer: Pos2 },
    /// Gesture finished (release or pointer left the canvas)
    EndDrag,
    /// Attribute edit on the selected text box
    SetField(FieldChange),
    /// Flip one style flag on the selected text box
    ToggleStyle(StyleFlag),
    /// Partial update of an arbitrary text box
    UpdateTextBox { id: TextBoxId, patch: TextBoxPatch },
    Undo,
    Redo,
}

impl Command {
    /// Short label for logs and the history readout.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddTextBox(_) => "Add Text Box",
            Command::Select(_) => "Select",
            Command::BeginDrag { .. } => "Begin Drag",
            Command::Drag { .. } => "Drag",
            Command::EndDrag => "End Drag",
            Command::SetField(FieldChange::Text(_)) => "Edit Text",
            Command::SetField(FieldChange::FontSize(_)) => "Font Size",
            Command::SetField(FieldChange::Color(_)) => "Text Color",
            Command::SetField(FieldChange::Font(_)) => "Font",
            Command::ToggleStyle(StyleFlag::Bold) => "Toggle Bold",
            Command::ToggleStyle(StyleFlag::Italic) => "Toggle Italic",
            Command::ToggleStyle(StyleFlag::Underline) => "Toggle Underline",
            Command::UpdateTextBox { .. } => "Update Text Box",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
        }
    }
}

/// What a successfully dispatched command did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Document, selection or interaction state changed
    Changed,
    /// Nothing to do: no selection, empty stack, unknown id, same value
    Unchanged,
}

impl Outcome {
    pub fn changed(self) -> bool {
        matches!(self, Outcome::Changed)
    }
}

/// Result type for command dispatch
pub type CommandResult = Result<Outcome, CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("font size {0} is outside 1..={max}", max = crate::text_box::MAX_FONT_SIZE)]
    InvalidFontSize(u32),

    #[error("text box {0} does not exist")]
    UnknownTextBox(TextBoxId),
}
