use egui::Color32;

use crate::CanvasApp;
use crate::color::{parse_css_color, to_hex};
use crate::tools::Mode;

pub fn tools_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let current = app.canvas().mode();
            for mode in Mode::ALL {
                if ui.selectable_label(current == mode, mode.name()).clicked() {
                    log::info!("Mode selected from UI: {}", mode.name());
                    app.canvas_mut().set_mode(mode);
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color");
                let mut color = parse_css_color(app.canvas().current_color()).unwrap_or(Color32::BLACK);
                if ui.color_edit_button_srgba(&mut color).changed() {
                    app.canvas_mut().set_color(&to_hex(color));
                }
            });

            ui.horizontal(|ui| {
                ui.label("Width");
                let mut width = app.canvas().line_width();
                if ui.add(egui::Slider::new(&mut width, 1.0..=20.0)).changed() {
                    app.canvas_mut().set_line_width(width);
                }
            });
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let idle = !app.canvas().is_gesture_active();
                let can_undo = idle && app.canvas().history().can_undo();
                let can_redo = idle && app.canvas().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    app.save();
                }
                if ui.button("Load").clicked() {
                    app.load();
                }
            });
            if let Some(status) = app.status() {
                ui.label(status);
            }
            ui.separator();

            let history = app.canvas().history();
            ui.label(format!("History: {} of {}", history.position(), history.len()));

            egui::Grid::new("command_history_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    for (index, command) in history.entries().iter().enumerate() {
                        ui.label(format!("{}", index + 1));
                        // Entries past the cursor are redoable
                        if index < history.position() {
                            ui.label(command.name());
                        } else {
                            ui.weak(command.name());
                        }
                        ui.end_row();
                    }
                });

            ui.separator();
            let canvas = app.canvas();
            ui.label(format!("Elements: {}", canvas.document().len()));
            ui.label(format!(
                "Offset: ({:.0}, {:.0})",
                canvas.viewport().offset.x,
                canvas.viewport().offset.y
            ));
            if let Some(tool) = canvas.active_tool_name() {
                ui.label(format!("Gesture: {}", tool));
            }
        });
}
