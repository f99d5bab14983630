use crate::PaintApp;
use crate::input::route_event;
use egui::{Color32, Rect, Sense, pos2};

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if let Some(status) = &app.status {
            ui.label(status);
        }

        let logical_size = app.engine.surface().logical_size();
        let (response, painter) = ui.allocate_painter(logical_size, Sense::click_and_drag());
        let canvas_rect = response.rect;
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

        // Template underneath, drawing on top.
        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
        if let Some(template) = app.textures.template_texture() {
            painter.image(template, canvas_rect, uv, Color32::WHITE);
        }
        match app.textures.surface_texture(ctx, &app.engine) {
            Ok(texture) => {
                painter.image(texture, canvas_rect, uv, Color32::WHITE);
            }
            Err(e) => log::warn!("Canvas texture unavailable: {}", e),
        }

        let events = app.input.process_input(ctx, canvas_rect, logical_size);
        let mut changed = false;
        for event in &events {
            changed |= route_event(event, &mut app.engine);
        }
        if changed {
            ctx.request_repaint();
        }
    });
}
