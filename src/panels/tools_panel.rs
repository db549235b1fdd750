use crate::CanvasApp;
use crate::command::Command;
use crate::components::StyleToggle;
use crate::text_box::{FieldChange, FontFace, StyleFlag, MAX_FONT_SIZE};

pub fn tools_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Text Canvas");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Add Text Box").clicked() {
                    app.execute(Command::AddTextBox(None));
                }
                if ui.button("⬇ Export PNG").clicked() {
                    app.request_export(ctx);
                }
            });

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.session().can_undo();
                let can_redo = app.session().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("⟲ Undo")).clicked() {
                    app.execute(Command::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("⟳ Redo")).clicked() {
                    app.execute(Command::Redo);
                }
            });

            let history = app.session().history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", history.undo_len()));
                ui.label(format!("Redo stack size: {}", history.redo_len()));
            });

            ui.separator();
            for command in attribute_editors(app, ui) {
                app.execute(command);
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}

/// The text, font, size, color and style widgets. Each edit becomes one
/// command against the selected text box; with nothing selected the widgets
/// show the defaults and are disabled.
fn attribute_editors(app: &CanvasApp, ui: &mut egui::Ui) -> Vec<Command> {
    let session = app.session();
    let has_selection = session.selected().is_some();

    let (mut text, mut font_size, mut color, mut font, bold, italic, underlined) = match session.selected() {
        Some(t) => (t.text.clone(), t.font_size, t.color, t.font, t.bold, t.italic, t.underlined),
        None => {
            let template = session.template();
            (String::new(), template.font_size, template.color, template.font, false, false, false)
        }
    };

    let mut commands = Vec::new();
    ui.add_enabled_ui(has_selection, |ui| {
        let current_font = font;
        egui::ComboBox::from_label("Font")
            .selected_text(font.name())
            .show_ui(ui, |ui| {
                for face in FontFace::all() {
                    ui.selectable_value(&mut font, *face, face.name());
                }
            });
        if font != current_font {
            commands.push(Command::SetField(FieldChange::Font(font)));
        }

        ui.label("Edit Text");
        let response = ui.add(egui::TextEdit::singleline(&mut text).hint_text("Edit Text"));
        if response.changed() {
            commands.push(Command::SetField(FieldChange::Text(text.clone())));
        }

        ui.horizontal(|ui| {
            ui.label("Font Size:");
            let response = ui.add(
                egui::DragValue::new(&mut font_size)
                    .range(1..=MAX_FONT_SIZE)
                    .suffix("px"),
            );
            if response.changed() {
                commands.push(Command::SetField(FieldChange::FontSize(font_size)));
            }
        });

        ui.horizontal(|ui| {
            ui.label("Text Color:");
            let response =
                egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque);
            if response.changed() {
                commands.push(Command::SetField(FieldChange::Color(color)));
            }
        });

        ui.horizontal(|ui| {
            for (flag, on) in [
                (StyleFlag::Bold, bold),
                (StyleFlag::Italic, italic),
                (StyleFlag::Underline, underlined),
            ] {
                if StyleToggle::new(flag, on).show(ui).clicked() {
                    commands.push(Command::ToggleStyle(flag));
                }
            }
        });
    });

    commands
}
