use std::sync::Arc;

use egui::{Color32, Galley, Painter, Pos2, Rect, Stroke};
use egui::text::{LayoutJob, TextFormat};

use crate::document::Document;
use crate::geometry::hit_testing;
use crate::text_box::{FontFace, FontSpec, TextBoxId};

/// Distance from the baseline to the top of the underline bar
pub const UNDERLINE_OFFSET: f32 = 2.0;
/// Thickness of the underline bar
pub const UNDERLINE_HEIGHT: f32 = 2.0;
/// egui has no bold weights in its default fonts; bold text is drawn twice,
/// shifted horizontally by this much.
pub const FAUX_BOLD_OFFSET: f32 = 1.0;

const SELECTION_COLOR: Color32 = Color32::from_rgb(33, 150, 243);

/// Measures rendered text. Hit-testing depends on this and nothing else from
/// the rendering backend.
pub trait TextMeasurer {
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32;
}

/// A 2D drawing surface the canvas is projected onto.
///
/// Coordinates are canvas-local, with text positioned by its left edge at
/// the baseline.
pub trait RenderSurface: TextMeasurer {
    /// Wipe the surface to its background
    fn clear(&mut self);

    fn draw_text(&mut self, text: &str, baseline_left: Pos2, font: &FontSpec, color: Color32);

    fn draw_filled_rect(&mut self, rect: Rect, color: Color32);

    /// Thin outline, used for the selection highlight
    fn draw_outline(&mut self, rect: Rect, color: Color32);
}

/// Project the document onto `surface`, from scratch.
///
/// Boxes are drawn in insertion order, so later boxes end up on top. If
/// `highlight` names a text box, its hit box is outlined.
pub fn render_document(document: &Document, surface: &mut dyn RenderSurface, highlight: Option<TextBoxId>) {
    surface.clear();

    for text_box in document.text_boxes() {
        let font = text_box.font_spec();
        surface.draw_text(&text_box.text, text_box.position, &font, text_box.color);

        if text_box.underlined {
            let width = surface.measure_text_width(&text_box.text, &font);
            let bar = Rect::from_min_size(
                Pos2::new(text_box.position.x, text_box.position.y + UNDERLINE_OFFSET),
                egui::vec2(width, UNDERLINE_HEIGHT),
            );
            surface.draw_filled_rect(bar, text_box.color);
        }
    }

    if let Some(text_box) = highlight.and_then(|id| document.get(id)) {
        let rect = hit_testing::text_box_rect(text_box, &*surface).expand(2.0);
        surface.draw_outline(rect, SELECTION_COLOR);
    }
}

/// Deterministic measurer that assumes a fixed average glyph width.
///
/// Good enough wherever real fonts are unavailable, e.g. headless tests.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateMeasurer {
    /// Average glyph width as a fraction of the font size
    pub char_width_factor: f32,
}

impl Default for ApproximateMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.5,
        }
    }
}

impl TextMeasurer for ApproximateMeasurer {
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        let factor = match font.face {
            FontFace::CourierNew => 0.6,
            _ => self.char_width_factor,
        };
        let width = text.chars().count() as f32 * font.size * factor;
        if font.bold && width > 0.0 {
            width + FAUX_BOLD_OFFSET
        } else {
            width
        }
    }
}

fn layout_job(text: &str, font: &FontSpec, color: Color32) -> LayoutJob {
    LayoutJob::single_section(
        text.to_owned(),
        TextFormat {
            font_id: font.font_id(),
            color,
            italics: font.italic,
            ..Default::default()
        },
    )
}

fn galley_width(galley: &Galley, font: &FontSpec) -> f32 {
    let width = galley.size().x;
    if font.bold && width > 0.0 {
        width + FAUX_BOLD_OFFSET
    } else {
        width
    }
}

/// Measures with egui's font system, outside of any painter.
pub struct EguiMeasurer<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiMeasurer<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasurer for EguiMeasurer<'_> {
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        let galley = self.ctx.fonts(|fonts| fonts.layout_job(layout_job(text, font, Color32::BLACK)));
        galley_width(&galley, font)
    }
}

/// Render surface backed by an egui painter clipped to the canvas.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    canvas_rect: Rect,
    background: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, canvas_rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            canvas_rect,
            background,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.canvas_rect.min + pos.to_vec2()
    }

    fn layout(&self, text: &str, font: &FontSpec, color: Color32) -> Arc<Galley> {
        self.painter.layout_job(layout_job(text, font, color))
    }
}

impl TextMeasurer for EguiSurface<'_> {
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        galley_width(&self.layout(text, font, Color32::BLACK), font)
    }
}

impl RenderSurface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.canvas_rect, 0.0, self.background);
    }

    fn draw_text(&mut self, text: &str, baseline_left: Pos2, font: &FontSpec, color: Color32) {
        // Galleys are positioned by their top-left corner
        let top_left = self.to_screen(Pos2::new(baseline_left.x, baseline_left.y - font.size));
        let galley = self.layout(text, font, color);

        if font.bold {
            self.painter.galley(top_left + egui::vec2(FAUX_BOLD_OFFSET, 0.0), galley.clone(), color);
        }
        self.painter.galley(top_left, galley, color);
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color32) {
        let rect = rect.translate(self.canvas_rect.min.to_vec2());
        self.painter.rect_filled(rect, 0.0, color);
    }

    fn draw_outline(&mut self, rect: Rect, color: Color32) {
        let rect = rect.translate(self.canvas_rect.min.to_vec2());
        self.painter.rect_stroke(rect, 2.0, Stroke::new(1.0, color));
    }
}
