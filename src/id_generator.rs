use crate::text_box::TextBoxId;

/// Hands out text box ids. Never rewinds, so ids stay unique even when
/// undo brings back a text box that was removed.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn generate(&mut self) -> TextBoxId {
        let id = TextBoxId(self.next);
        self.next += 1;
        id
    }
}
