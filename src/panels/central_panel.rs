use crate::CanvasApp;
use crate::renderer::{CANVAS_HEIGHT, CANVAS_WIDTH};

pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let zoom = app.state().zoom;
            let logical = egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(CANVAS_WIDTH, CANVAS_HEIGHT),
            );
            // Zoom scales the on-screen allocation; shapes stay in logical
            // canvas coordinates and the transform does the rest.
            let (response, painter) =
                ui.allocate_painter(logical.size() * zoom, egui::Sense::drag());
            let to_screen = egui::emath::RectTransform::from_to(logical, response.rect);

            app.handle_canvas_input(&response, &to_screen);
            app.renderer().paint(
                &painter,
                to_screen,
                app.document(),
                app.in_progress(),
                app.state(),
            );
        });
    });
}
