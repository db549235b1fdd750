use egui::text::{LayoutJob, TextFormat};

use crate::text_box::StyleFlag;

/// Square toggle button for one of the bold / italic / underline flags,
/// drawn the way the flag looks.
pub struct StyleToggle {
    pub flag: StyleFlag,
    pub selected: bool,
}

impl StyleToggle {
    pub fn new(flag: StyleFlag, selected: bool) -> Self {
        Self { flag, selected }
    }

    fn glyph(&self) -> &'static str {
        match self.flag {
            StyleFlag::Bold => "B",
            StyleFlag::Italic => "I",
            StyleFlag::Underline => "U",
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246) // Light blue when on
            } else if response.hovered() {
                egui::Color32::from_gray(70)
            } else {
                egui::Color32::from_gray(50)
            };
            let text_color = if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };

            ui.painter().rect_filled(rect, 4.0, bg_color);

            let job = LayoutJob::single_section(
                self.glyph().to_owned(),
                TextFormat {
                    font_id: egui::FontId::proportional(20.0),
                    color: text_color,
                    italics: self.flag == StyleFlag::Italic,
                    ..Default::default()
                },
            );
            let galley = ui.painter().layout_job(job);
            let top_left = rect.center() - galley.size() / 2.0;

            if self.flag == StyleFlag::Bold {
                ui.painter().galley(top_left + egui::vec2(1.0, 0.0), galley.clone(), text_color);
            }
            if self.flag == StyleFlag::Underline {
                let y = top_left.y + galley.size().y;
                ui.painter().hline(
                    top_left.x..=top_left.x + galley.size().x,
                    y,
                    egui::Stroke::new(2.0, text_color),
                );
            }
            ui.painter().galley(top_left, galley, text_color);

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response
    }
}
