use egui::{Color32, Context, Painter, Rect};

use crate::command::Command;
use crate::config::EditorConfig;
use crate::export::Exporter;
use crate::input::{shortcut_command, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::{render_document, EguiMeasurer, EguiSurface};
use crate::session::EditorSession;
use crate::text_box::TextBoxId;

/// Canvas fill, also the background of every export
pub const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

/// The eframe application: an editor session plus the frame-to-frame glue
/// (pointer tracking, pending exports, status line).
pub struct CanvasApp {
    session: EditorSession,
    config: EditorConfig,
    input: InputHandler,
    exporter: Exporter,
    status: Option<String>,
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        Self::with_config(config)
    }

    /// Build the app without a window, e.g. for tests.
    pub fn with_config(config: EditorConfig) -> Self {
        log::info!(
            "Starting editor with a {}x{} canvas, exporting to {}",
            config.canvas_width,
            config.canvas_height,
            config.export_path().display()
        );
        Self {
            session: EditorSession::from_config(&config),
            input: InputHandler::new(Rect::NOTHING),
            exporter: Exporter::new(config.export_path()),
            config,
            status: None,
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Dispatch a command from the UI. Rejected commands are logged and
    /// shown on the status line; they never reach the document. A
    /// successful change clears the status line.
    pub fn execute(&mut self, command: Command) {
        let name = command.name();
        match self.session.dispatch(command) {
            Ok(outcome) if outcome.changed() => self.status = None,
            Ok(_) => {}
            Err(err) => {
                log::warn!("{name} rejected: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn request_export(&mut self, ctx: &Context) {
        self.status = Some("Exporting...".to_owned());
        self.exporter.request(ctx);
    }

    /// Feed this frame's pointer input on the canvas to the session.
    pub fn handle_canvas_input(&mut self, ctx: &Context, canvas_rect: Rect, pointer_blocked: bool) {
        self.input.set_canvas_rect(canvas_rect);
        let measurer = EguiMeasurer::new(ctx);

        for event in self.input.process_input(ctx, pointer_blocked) {
            if let Err(err) = self.session.handle_input(&event, &measurer) {
                log::warn!("Pointer event {event:?} rejected: {err}");
            }
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.is_pending()
    }

    /// The text box to outline on the canvas. None while an export is
    /// waiting for its screenshot, so the outline stays out of the image.
    pub fn highlight(&self) -> Option<TextBoxId> {
        if self.exporter.is_pending() {
            None
        } else {
            self.session.selected_id()
        }
    }

    /// Draw the document with the current highlight.
    pub fn render_canvas(&self, painter: &Painter, canvas_rect: Rect) {
        let mut surface = EguiSurface::new(painter, canvas_rect, CANVAS_BACKGROUND);
        render_document(self.session.document(), &mut surface, self.highlight());
    }

    pub fn poll_export(&mut self, ctx: &Context, canvas_rect: Rect) {
        if !self.exporter.is_pending() {
            return;
        }
        match self.exporter.poll(ctx, canvas_rect) {
            Some(Ok(path)) => self.status = Some(format!("Saved {}", path.display())),
            Some(Err(err)) => {
                log::error!("Export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
            }
            // The screenshot arrives with a later frame
            None => ctx.request_repaint(),
        }
    }
}

impl eframe::App for CanvasApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Some(command) = shortcut_command(ctx) {
            self.execute(command);
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_box::FieldChange;

    #[test]
    fn test_rejected_command_shows_status() {
        let mut app = CanvasApp::with_config(EditorConfig::default());
        app.execute(Command::AddTextBox(None));
        assert!(app.status().is_none());

        app.execute(Command::SetField(FieldChange::FontSize(0)));
        assert_eq!(app.status(), Some("font size 0 is outside 1..=500"));
        assert_eq!(app.session().history().undo_len(), 1);
    }

    #[test]
    fn test_successful_change_clears_status() {
        let mut app = CanvasApp::with_config(EditorConfig::default());
        app.execute(Command::AddTextBox(None));
        app.execute(Command::SetField(FieldChange::FontSize(0)));
        assert!(app.status().is_some());

        // A no-op leaves the message alone
        app.execute(Command::Redo);
        assert!(app.status().is_some());

        app.execute(Command::SetField(FieldChange::FontSize(30)));
        assert_eq!(app.status(), None);
    }

    #[test]
    fn test_pending_export_hides_highlight() {
        let ctx = Context::default();
        let mut app = CanvasApp::with_config(EditorConfig::default());
        app.execute(Command::AddTextBox(None));
        let selected = app.session().selected_id();
        assert!(selected.is_some());
        assert_eq!(app.highlight(), selected);

        app.request_export(&ctx);
        assert!(app.is_exporting());
        assert_eq!(app.highlight(), None);
        // The selection itself is untouched
        assert_eq!(app.session().selected_id(), selected);
    }

    #[test]
    fn test_config_reaches_session() {
        let mut config = EditorConfig::default();
        config.text_box.text = "Label".to_owned();
        let mut app = CanvasApp::with_config(config);

        app.execute(Command::AddTextBox(None));
        assert_eq!(app.session().selected().map(|t| t.text.as_str()), Some("Label"));
    }
}
