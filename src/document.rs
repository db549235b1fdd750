use crate::id_generator::IdGenerator;
use crate::text_box::{TextBox, TextBoxId, TextBoxPatch, TextBoxTemplate};

/// A deep copy of the document's text boxes at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    text_boxes: Vec<TextBox>,
}

impl Snapshot {
    pub fn text_boxes(&self) -> &[TextBox] {
        &self.text_boxes
    }

    pub fn len(&self) -> usize {
        self.text_boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text_boxes.is_empty()
    }
}

/// The ordered collection of text boxes. Order is z-order: later boxes draw
/// on top of earlier ones.
///
/// Mutators are crate-private; outside code changes a document through
/// [`crate::EditorSession::dispatch`], which takes the history snapshot first.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text_boxes: Vec<TextBox>,
    ids: IdGenerator,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_boxes(&self) -> &[TextBox] {
        &self.text_boxes
    }

    pub fn get(&self, id: TextBoxId) -> Option<&TextBox> {
        self.text_boxes.iter().find(|text_box| text_box.id() == id)
    }

    pub fn contains(&self, id: TextBoxId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.text_boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text_boxes.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text_boxes: self.text_boxes.clone(),
        }
    }

    /// Swap in `snapshot` and hand back what was live before.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) -> Snapshot {
        Snapshot {
            text_boxes: std::mem::replace(&mut self.text_boxes, snapshot.text_boxes),
        }
    }

    pub(crate) fn add_text_box(&mut self, template: &TextBoxTemplate) -> TextBoxId {
        let id = self.ids.generate();
        self.text_boxes.push(TextBox::from_template(id, template));
        id
    }

    /// Returns false if `id` is unknown or the patch changed nothing.
    pub(crate) fn update(&mut self, id: TextBoxId, patch: &TextBoxPatch) -> bool {
        match self.text_boxes.iter_mut().find(|text_box| text_box.id() == id) {
            Some(text_box) => text_box.apply(patch),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_fresh_ids_in_order() {
        let mut document = Document::new();
        let a = document.add_text_box(&TextBoxTemplate::default());
        let b = document.add_text_box(&TextBoxTemplate::default());

        assert_ne!(a, b);
        let ids: Vec<_> = document.text_boxes().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_restore_swaps_contents() {
        let mut document = Document::new();
        let empty = document.snapshot();
        document.add_text_box(&TextBoxTemplate::default());

        let replaced = document.restore(empty);
        assert_eq!(replaced.len(), 1);
        assert!(document.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_restore() {
        let mut document = Document::new();
        let empty = document.snapshot();
        let first = document.add_text_box(&TextBoxTemplate::default());
        document.restore(empty);

        let second = document.add_text_box(&TextBoxTemplate::default());
        assert_ne!(first, second);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut document = Document::new();
        document.add_text_box(&TextBoxTemplate::default());
        let before = document.snapshot();

        let changed = document.update(
            TextBoxId(999),
            &TextBoxPatch {
                text: Some("nope".into()),
                ..Default::default()
            },
        );
        assert!(!changed);
        assert_eq!(document.snapshot(), before);
    }
}
