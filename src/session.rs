//! The editor session: document, selection, history and pointer state, plus
//! the single reducer every change goes through.
//!
//! # Pointer state machine
//!
//! ```text
//!               press on a text box
//!   ┌────────┐ ────────────────────► ┌────────────┐
//!   │  Idle  │                       │  Dragging  │ ◄──┐ move: reposition
//!   └────────┘ ◄──────────────────── └────────────┘ ───┘
//!      ▲  │     release / leave
//!      └──┘ press on empty space, release, leave: nothing happens
//! ```
//!
//! # History rule
//!
//! Every command that changes the document pushes exactly one snapshot of
//! the pre-change state before mutating. A drag gesture pushes its snapshot
//! right before its first move, so a whole gesture is one undo step and a
//! press/release without movement leaves no trace in the history.

use egui::Pos2;

use crate::command::{Command, CommandError, CommandResult, History, Outcome};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::input::{route_event, InputEvent, InteractionState};
use crate::renderer::TextMeasurer;
use crate::text_box::{
    FieldChange, StyleFlag, TextBox, TextBoxId, TextBoxPatch, TextBoxTemplate, MAX_FONT_SIZE,
};

/// All editor state, owned in one place.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: Document,
    selected: Option<TextBoxId>,
    history: History,
    interaction: InteractionState,
    template: TextBoxTemplate,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(TextBoxTemplate::default(), History::default())
    }
}

impl EditorSession {
    pub fn new(template: TextBoxTemplate, history: History) -> Self {
        Self {
            document: Document::new(),
            selected: None,
            history,
            interaction: InteractionState::Idle,
            template,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.text_box.clone(), History::new(config.history_limit))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Template used by `AddTextBox(None)` and shown by the attribute
    /// editors when nothing is selected.
    pub fn template(&self) -> &TextBoxTemplate {
        &self.template
    }

    pub fn selected_id(&self) -> Option<TextBoxId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&TextBox> {
        self.selected.and_then(|id| self.document.get(id))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Route a pointer event through the interaction controller and apply
    /// the resulting command, if any.
    pub fn handle_input<M: TextMeasurer + ?Sized>(&mut self, event: &InputEvent, measurer: &M) -> CommandResult {
        match route_event(event, self, measurer) {
            Some(command) => self.dispatch(command),
            None => Ok(Outcome::Unchanged),
        }
    }

    /// Apply one command. The only entry point that mutates the session.
    pub fn dispatch(&mut self, command: Command) -> CommandResult {
        let name = command.name();
        let outcome = match command {
            Command::AddTextBox(template) => self.add_text_box(template),
            Command::Select(id) => self.select(id),
            Command::BeginDrag { id, grab_offset } => self.begin_drag(id, grab_offset),
            Command::Drag { pointer } => self.drag(pointer),
            Command::EndDrag => self.end_drag(),
            Command::SetField(change) => self.set_field(change),
            Command::ToggleStyle(flag) => self.toggle_style(flag),
            Command::UpdateTextBox { id, patch } => self.update(id, patch),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
        }?;

        // Drag moves are too chatty for info
        if outcome.changed() && !matches!(name, "Drag") {
            log::info!(
                "{}: {} text box(es), undo {} / redo {}",
                name,
                self.document.len(),
                self.history.undo_len(),
                self.history.redo_len()
            );
        }
        Ok(outcome)
    }

    fn add_text_box(&mut self, template: Option<TextBoxTemplate>) -> CommandResult {
        let template = template.unwrap_or_else(|| self.template.clone());
        validate_font_size(template.font_size)?;

        self.history.snapshot_before_change(&self.document);
        let id = self.document.add_text_box(&template);
        self.selected = Some(id);
        Ok(Outcome::Changed)
    }

    fn select(&mut self, id: Option<TextBoxId>) -> CommandResult {
        if let Some(id) = id {
            if !self.document.contains(id) {
                return Err(CommandError::UnknownTextBox(id));
            }
        }
        if self.selected == id {
            return Ok(Outcome::Unchanged);
        }
        self.selected = id;
        Ok(Outcome::Changed)
    }

    fn begin_drag(&mut self, id: TextBoxId, grab_offset: egui::Vec2) -> CommandResult {
        if !self.document.contains(id) {
            return Ok(Outcome::Unchanged);
        }
        self.selected = Some(id);
        self.interaction = InteractionState::Dragging {
            id,
            grab_offset,
            snapshot_taken: false,
        };
        log::debug!("Drag started on text box {}", id);
        Ok(Outcome::Changed)
    }

    fn drag(&mut self, pointer: Pos2) -> CommandResult {
        let InteractionState::Dragging {
            id,
            grab_offset,
            snapshot_taken,
        } = self.interaction
        else {
            return Ok(Outcome::Unchanged);
        };

        let patch = TextBoxPatch::position(pointer - grab_offset);
        match self.document.get(id) {
            Some(text_box) if !text_box.is_unchanged_by(&patch) => {}
            _ => return Ok(Outcome::Unchanged),
        }

        if !snapshot_taken {
            self.history.snapshot_before_change(&self.document);
            self.interaction = InteractionState::Dragging {
                id,
                grab_offset,
                snapshot_taken: true,
            };
        }
        self.document.update(id, &patch);
        Ok(Outcome::Changed)
    }

    fn end_drag(&mut self) -> CommandResult {
        if !self.interaction.is_dragging() {
            return Ok(Outcome::Unchanged);
        }
        log::debug!("Drag ended");
        self.interaction = InteractionState::Idle;
        Ok(Outcome::Changed)
    }

    fn set_field(&mut self, change: FieldChange) -> CommandResult {
        let Some(id) = self.selected else {
            return Ok(Outcome::Unchanged);
        };
        self.update(id, change.into())
    }

    fn toggle_style(&mut self, flag: StyleFlag) -> CommandResult {
        let Some(text_box) = self.selected() else {
            return Ok(Outcome::Unchanged);
        };
        let patch = TextBoxPatch::style(flag, !text_box.style(flag));
        let id = text_box.id();
        self.update(id, patch)
    }

    fn update(&mut self, id: TextBoxId, patch: TextBoxPatch) -> CommandResult {
        if let Some(size) = patch.font_size {
            validate_font_size(size)?;
        }
        match self.document.get(id) {
            Some(text_box) if !text_box.is_unchanged_by(&patch) => {}
            _ => return Ok(Outcome::Unchanged),
        }

        self.history.snapshot_before_change(&self.document);
        self.document.update(id, &patch);
        Ok(Outcome::Changed)
    }

    fn undo(&mut self) -> CommandResult {
        self.interaction = InteractionState::Idle;
        if !self.history.undo(&mut self.document) {
            return Ok(Outcome::Unchanged);
        }
        self.drop_dangling_selection();
        Ok(Outcome::Changed)
    }

    fn redo(&mut self) -> CommandResult {
        self.interaction = InteractionState::Idle;
        if !self.history.redo(&mut self.document) {
            return Ok(Outcome::Unchanged);
        }
        self.drop_dangling_selection();
        Ok(Outcome::Changed)
    }

    fn drop_dangling_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.document.contains(id) {
                log::debug!("Selected text box {} no longer exists, clearing selection", id);
                self.selected = None;
            }
        }
    }
}

fn validate_font_size(size: u32) -> Result<(), CommandError> {
    if (1..=MAX_FONT_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(CommandError::InvalidFontSize(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_unknown_id_is_rejected() {
        let mut session = EditorSession::default();
        let result = session.dispatch(Command::Select(Some(TextBoxId(42))));
        assert_eq!(result, Err(CommandError::UnknownTextBox(TextBoxId(42))));
        assert_eq!(session.selected_id(), None);
    }

    #[test]
    fn test_invalid_font_size_takes_no_snapshot() {
        let mut session = EditorSession::default();
        session.dispatch(Command::AddTextBox(None)).unwrap();

        let result = session.dispatch(Command::SetField(FieldChange::FontSize(0)));
        assert_eq!(result, Err(CommandError::InvalidFontSize(0)));
        assert_eq!(session.history().undo_len(), 1);
        assert_eq!(session.selected().unwrap().font_size, 20);
    }

    #[test]
    fn test_same_value_edit_is_noop() {
        let mut session = EditorSession::default();
        session.dispatch(Command::AddTextBox(None)).unwrap();

        let outcome = session
            .dispatch(Command::SetField(FieldChange::Text("New Text".into())))
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(session.history().undo_len(), 1);
    }

    #[test]
    fn test_drag_without_gesture_is_ignored() {
        let mut session = EditorSession::default();
        session.dispatch(Command::AddTextBox(None)).unwrap();

        let outcome = session
            .dispatch(Command::Drag {
                pointer: Pos2::new(200.0, 200.0),
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(session.selected().unwrap().position, Pos2::new(50.0, 50.0));
    }

    #[test]
    fn test_undo_ends_gesture() {
        let mut session = EditorSession::default();
        session.dispatch(Command::AddTextBox(None)).unwrap();
        let id = session.selected_id().unwrap();
        session
            .dispatch(Command::BeginDrag {
                id,
                grab_offset: egui::Vec2::ZERO,
            })
            .unwrap();

        session.dispatch(Command::Undo).unwrap();
        assert_eq!(session.interaction(), InteractionState::Idle);
        assert_eq!(session.selected_id(), None);
    }
}
