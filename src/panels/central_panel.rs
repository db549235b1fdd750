use crate::CanvasApp;

pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let size = egui::vec2(app.config().canvas_width, app.config().canvas_height);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // Handle input
        app.handle_canvas_input(ctx, canvas_rect, !response.hovered() && !response.dragged());

        if app.session().interaction().is_dragging() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Grab);
        }

        // Render the canvas
        app.render_canvas(&painter, canvas_rect);

        app.poll_export(ctx, canvas_rect);
    });
}
