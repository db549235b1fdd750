use egui::{Pos2, Rect};

use crate::renderer::TextMeasurer;
use crate::text_box::{TextBox, TextBoxId};

/// Hit width used when a text box measures as zero wide (e.g. empty text),
/// so it can still be grabbed.
pub const FALLBACK_TEXT_WIDTH: f32 = 100.0;

/// Width of the text box's rendered text in its own font, size and style.
pub fn text_width<M: TextMeasurer + ?Sized>(text_box: &TextBox, measurer: &M) -> f32 {
    let width = measurer.measure_text_width(&text_box.text, &text_box.font_spec());
    if width.is_finite() && width > 0.0 {
        width
    } else {
        FALLBACK_TEXT_WIDTH
    }
}

/// The box a press must land in to grab `text_box`.
///
/// Text is drawn with its baseline at `position.y`, so the box spans
/// `[x, x + width]` horizontally and `[y - font_size, y]` vertically.
pub fn text_box_rect<M: TextMeasurer + ?Sized>(text_box: &TextBox, measurer: &M) -> Rect {
    let Pos2 { x, y } = text_box.position;
    Rect::from_min_max(
        Pos2::new(x, y - text_box.font_size as f32),
        Pos2::new(x + text_width(text_box, measurer), y),
    )
}

/// Bounds are inclusive on every edge.
pub fn hits<M: TextMeasurer + ?Sized>(text_box: &TextBox, point: Pos2, measurer: &M) -> bool {
    let rect = text_box_rect(text_box, measurer);
    point.x >= rect.min.x && point.x <= rect.max.x && point.y >= rect.min.y && point.y <= rect.max.y
}

/// Find the text box under `point`.
///
/// Overlaps resolve to the topmost box: the one inserted last, which is
/// also the one drawn last.
pub fn hit_test<M: TextMeasurer + ?Sized>(
    text_boxes: &[TextBox],
    point: Pos2,
    measurer: &M,
) -> Option<TextBoxId> {
    text_boxes
        .iter()
        .rev()
        .find(|text_box| hits(text_box, point, measurer))
        .map(TextBox::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::ApproximateMeasurer;
    use crate::text_box::TextBoxTemplate;

    fn text_box_at(id: u64, x: f32, y: f32, text: &str) -> TextBox {
        let template = TextBoxTemplate {
            position: Pos2::new(x, y),
            text: text.to_owned(),
            ..Default::default()
        };
        TextBox::from_template(TextBoxId(id), &template)
    }

    #[test]
    fn test_rect_extends_above_baseline() {
        let measurer = ApproximateMeasurer::default();
        let text_box = text_box_at(1, 50.0, 50.0, "Hello");
        let rect = text_box_rect(&text_box, &measurer);

        assert_eq!(rect.min, Pos2::new(50.0, 30.0));
        assert!((rect.max.x - (50.0 + measurer.measure_text_width("Hello", &text_box.font_spec()))).abs() < 0.001);
        assert_eq!(rect.max.y, 50.0);
    }

    #[test]
    fn test_empty_text_uses_fallback_width() {
        let measurer = ApproximateMeasurer::default();
        let text_box = text_box_at(1, 0.0, 20.0, "");

        assert_eq!(text_width(&text_box, &measurer), FALLBACK_TEXT_WIDTH);
        assert!(hits(&text_box, Pos2::new(99.0, 10.0), &measurer));
    }

    #[test]
    fn test_miss_below_baseline() {
        let measurer = ApproximateMeasurer::default();
        let text_box = text_box_at(1, 50.0, 50.0, "Hello");

        assert!(!hits(&text_box, Pos2::new(55.0, 51.0), &measurer));
        assert!(!hits(&text_box, Pos2::new(49.0, 40.0), &measurer));
    }

    #[test]
    fn test_topmost_wins_on_overlap() {
        let measurer = ApproximateMeasurer::default();
        let boxes = vec![
            text_box_at(1, 50.0, 50.0, "Bottom"),
            text_box_at(2, 55.0, 55.0, "Top"),
        ];

        assert_eq!(hit_test(&boxes, Pos2::new(60.0, 45.0), &measurer), Some(TextBoxId(2)));
        // Only the bottom box covers this point
        assert_eq!(hit_test(&boxes, Pos2::new(51.0, 32.0), &measurer), Some(TextBoxId(1)));
        assert_eq!(hit_test(&boxes, Pos2::new(500.0, 500.0), &measurer), None);
    }
}
