use crate::PaintApp;
use crate::color::Rgba8;
use crate::tools::Tool;
use egui::{Color32, Slider};

const PALETTE: [Rgba8; 10] = [
    Rgba8::opaque(0x00, 0x00, 0x00),
    Rgba8::opaque(0xFF, 0xFF, 0xFF),
    Rgba8::opaque(0xFF, 0x00, 0x00),
    Rgba8::opaque(0xFF, 0xA5, 0x00),
    Rgba8::opaque(0xFF, 0xFF, 0x00),
    Rgba8::opaque(0x00, 0x80, 0x00),
    Rgba8::opaque(0x00, 0x00, 0xFF),
    Rgba8::opaque(0x80, 0x00, 0x80),
    Rgba8::opaque(0x8B, 0x45, 0x13),
    Rgba8::opaque(0x80, 0x80, 0x80),
];

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            ui.horizontal(|ui| {
                for tool in Tool::ALL {
                    let selected = app.engine.settings().tool == tool;
                    if ui.selectable_label(selected, tool.name()).clicked() {
                        log::info!("Tool selected from UI: {}", tool.name());
                        app.engine.settings_mut().tool = tool;
                    }
                }
            });
            ui.separator();

            // Color
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = Color32::from(app.engine.settings().color);
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.engine.settings_mut().select_color(Rgba8::from(color));
                }
            });
            ui.horizontal_wrapped(|ui| {
                for swatch in PALETTE {
                    let button = egui::Button::new("    ").fill(Color32::from(swatch));
                    if ui.add(button).on_hover_text(swatch.to_hex()).clicked() {
                        app.engine.settings_mut().select_color(swatch);
                    }
                }
            });

            // Brush size
            let (min, max) = (
                app.engine.config().min_brush_size,
                app.engine.config().max_brush_size,
            );
            ui.add_enabled_ui(app.engine.settings().tool != Tool::Fill, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("−").clicked() {
                        app.engine.decrease_brush_size();
                    }
                    let mut size = app.engine.settings().brush_size;
                    if ui.add(Slider::new(&mut size, min..=max).text("px")).changed() {
                        app.engine.set_brush_size(size);
                    }
                    if ui.button("+").clicked() {
                        app.engine.increase_brush_size();
                    }
                });
            });
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                if ui.add_enabled(app.engine.can_undo(), egui::Button::new("Undo")).clicked() {
                    app.engine.undo();
                }
                if ui.add_enabled(app.engine.can_redo(), egui::Button::new("Redo")).clicked() {
                    app.engine.redo();
                }
                if ui.button("Clear").clicked() {
                    app.clear_canvas();
                }
            });

            let history = app.engine.history();
            ui.label(format!(
                "Undo stack: {} / {}   Redo stack: {}",
                history.undo_stack().len(),
                history.max_depth(),
                history.redo_stack().len()
            ));
            egui::Grid::new("history_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Undo Stack");
                    ui.strong("Redo Stack");
                    ui.end_row();

                    let undo_stack = history.undo_stack();
                    let redo_stack = history.redo_stack();
                    for i in 0..undo_stack.len().max(redo_stack.len()) {
                        ui.label(undo_stack.get(i).map_or("", |s| s.command().name()));
                        ui.label(redo_stack.get(i).map_or("", |s| s.command().name()));
                        ui.end_row();
                    }
                });
            ui.separator();

            ui.heading("Publish");
            ui.horizontal(|ui| {
                ui.label("Title:");
                ui.text_edit_singleline(&mut app.title);
            });
            ui.horizontal(|ui| {
                ui.label("Tags:");
                ui.text_edit_singleline(&mut app.tags);
            });
            if ui.button("Export PNG").clicked() {
                app.export();
            }
        });
}
