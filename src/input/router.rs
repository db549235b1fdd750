use egui::Vec2;

use crate::command::Command;
use crate::geometry::hit_test;
use crate::renderer::TextMeasurer;
use crate::session::EditorSession;
use crate::text_box::TextBoxId;

use super::InputEvent;

/// Transient pointer state. Never snapshotted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        id: TextBoxId,
        /// Pointer position minus the text box position at press time
        grab_offset: Vec2,
        /// Whether the pre-drag state has already gone onto the undo stack
        snapshot_taken: bool,
    },
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn dragged_id(&self) -> Option<TextBoxId> {
        match self {
            Self::Dragging { id, .. } => Some(*id),
            Self::Idle => None,
        }
    }
}

/// Translate a pointer event into the command it stands for, given the
/// session's current interaction state.
///
/// A press that misses every text box produces nothing: the selection is
/// kept rather than cleared.
pub fn route_event<M: TextMeasurer + ?Sized>(
    event: &InputEvent,
    session: &EditorSession,
    measurer: &M,
) -> Option<Command> {
    match (*event, session.interaction()) {
        (InputEvent::PointerDown { position }, InteractionState::Idle) => {
            let Some(id) = hit_test(session.document().text_boxes(), position, measurer) else {
                log::debug!("Press at {:?} hit nothing", position);
                return None;
            };
            let text_box = session.document().get(id)?;
            log::debug!("Press at {:?} hit text box {}", position, id);
            Some(Command::BeginDrag {
                id,
                grab_offset: position - text_box.position,
            })
        }
        (InputEvent::PointerMove { position }, InteractionState::Dragging { .. }) => {
            Some(Command::Drag { pointer: position })
        }
        (InputEvent::PointerUp { .. } | InputEvent::PointerLeave, InteractionState::Dragging { .. }) => {
            Some(Command::EndDrag)
        }
        _ => None,
    }
}
