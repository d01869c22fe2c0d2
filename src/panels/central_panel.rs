use crate::CanvasApp;
use crate::surface::EguiSurface;

pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.canvas_mut().resize_surface(canvas_rect.size());
            app.input_mut().set_canvas_rect(canvas_rect);

            // Handle input
            let events = app.input_mut().process_input(ctx, &response);
            for event in events {
                app.canvas_mut().handle_event(event);
            }

            // egui repaints everything each frame
            let background = app.canvas().config().background.clone();
            let mut surface = EguiSurface::new(&painter, canvas_rect, &background);
            app.canvas_mut().render_all(&mut surface);

            if app.canvas().is_gesture_active() {
                ctx.request_repaint();
            }
        });
}
