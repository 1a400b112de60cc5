use crate::CanvasApp;
use crate::state::{self, ToolKind, PALETTE};

pub fn tools_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Draw");
            for tool in ToolKind::ALL {
                let selected = app.state().tool == tool;
                if ui.selectable_label(selected, tool.label()).clicked() {
                    app.select_tool(tool);
                }
            }

            ui.separator();
            ui.label("Color");
            for row in PALETTE.chunks(3) {
                ui.horizontal(|ui| {
                    for &color in row {
                        let (rect, response) =
                            ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
                        ui.painter().rect_filled(rect, 3.0, color);
                        if app.state().color == color {
                            ui.painter().rect_stroke(
                                rect,
                                3.0,
                                egui::Stroke::new(2.0, ui.visuals().strong_text_color()),
                            );
                        }
                        if response.clicked() {
                            app.state_mut().color = color;
                        }
                    }
                });
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Width");
                ui.add(
                    egui::DragValue::new(&mut app.state_mut().stroke_width)
                        .range(state::MIN_STROKE_WIDTH..=state::MAX_STROKE_WIDTH),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Zoom");
                if ui.button("\u{2212}").clicked() {
                    app.state_mut().zoom_out();
                }
                ui.label(format!("{:.0}%", app.state().zoom * 100.0));
                if ui.button("+").clicked() {
                    app.state_mut().zoom_in();
                }
            });
            ui.checkbox(&mut app.state_mut().show_grid, "Show grid");

            ui.separator();
            ui.horizontal(|ui| {
                let can_undo = app.history().can_undo();
                let can_redo = app.history().can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });
            if ui
                .add_enabled(!app.document().is_empty(), egui::Button::new("Clear"))
                .clicked()
            {
                app.clear_canvas();
            }

            ui.separator();
            if ui.button("Save to gallery").clicked() {
                app.save_to_gallery(ctx);
            }
            if ui.button("Download PNG").clicked() {
                app.download_png();
            }
            let gallery_label = format!("Gallery ({})", app.gallery().len());
            if ui.button(gallery_label).clicked() {
                app.open_gallery();
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
