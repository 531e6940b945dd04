use egui::Rect;

use crate::FigureApp;

pub fn central_panel(app: &mut FigureApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_area = ui.available_rect_before_wrap();

        // Handle input
        app.handle_input(ctx, canvas_area);

        // Render the canvas at its accepted size
        let canvas_rect = Rect::from_min_size(canvas_area.min, app.config().canvas_size());
        let storage = app.storage().borrow();
        app.renderer().render(ui.painter(), canvas_rect, &storage);
    });
}
