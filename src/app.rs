use std::path::PathBuf;

use ab_glyph::FontArc;
use egui::emath::RectTransform;
use egui::Pos2;

use crate::document::Document;
use crate::export;
use crate::gallery::Gallery;
use crate::history::History;
use crate::input::{PointerEvent, Router, TextDraft};
use crate::panels;
use crate::renderer::{Renderer, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::shape::TextAlign;
use crate::state::{EditorState, ToolKind};

/// Top-level controller: owns the engine pieces (document, history, router,
/// renderer) and the UI glue around them (panels, text dialog, gallery,
/// status line). Only the tool settings are persisted across runs; the
/// document is session state.
pub struct CanvasApp {
    document: Document,
    history: History,
    state: EditorState,
    router: Router,
    renderer: Renderer,
    gallery: Gallery,
    /// Draft staged by the text tool, edited in a modal window.
    text_draft: Option<TextDraft>,
    show_gallery: bool,
    /// Outcome of the last save/export, shown in the tools panel.
    status: Option<String>,
    /// Last pointer position forwarded to the router, in logical
    /// coordinates. Used to emit move events only when the pointer actually
    /// moved.
    last_canvas_pos: Option<Pos2>,
    /// Counter for distinct download file names within a session.
    export_count: u32,
    /// Embedded face used by the export rasterizer. `None` if extraction
    /// failed; export then reports an error instead of panicking.
    export_font: Option<FontArc>,
}

impl Default for CanvasApp {
    fn default() -> Self {
        let export_font = match export::embedded_font() {
            Ok(font) => Some(font),
            Err(err) => {
                log::error!("export font unavailable: {err}");
                None
            }
        };
        Self {
            document: Document::new(),
            history: History::new(),
            state: EditorState::default(),
            router: Router::new(),
            renderer: Renderer::new(),
            gallery: Gallery::new(),
            text_draft: None,
            show_gallery: false,
            status: None,
            last_canvas_pos: None,
            export_count: 0,
            export_font,
        }
    }
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        // Restore tool settings from the previous run, if any.
        if let Some(storage) = cc.storage {
            if let Some(state) = eframe::get_value(storage, eframe::APP_KEY) {
                app.state = state;
            }
        }
        app
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn in_progress(&self) -> Option<&crate::shape::Shape> {
        self.router.in_progress()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Switch tools, abandoning any shape in flight.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.router.cancel();
        self.state.set_tool(tool);
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            let shapes = snapshot.to_vec();
            self.document.replace(shapes);
            // The old index may point past the restored store.
            self.state.selected = None;
        }
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            let shapes = snapshot.to_vec();
            self.document.replace(shapes);
            self.state.selected = None;
        }
    }

    /// Wipe the canvas. Recorded as an empty snapshot, so undo brings the
    /// previous drawing back.
    pub fn clear_canvas(&mut self) {
        if self.document.is_empty() {
            return;
        }
        self.document.clear();
        self.history.push(Vec::new());
        self.state.selected = None;
    }

    /// Translate egui's drag lifecycle into pointer events for the router.
    /// Positions are inverse-transformed to logical coordinates first, so
    /// everything downstream is zoom-agnostic.
    pub fn handle_canvas_input(&mut self, response: &egui::Response, to_screen: &RectTransform) {
        let from_screen = to_screen.inverse();
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                let pos = from_screen.transform_pos(pos);
                self.last_canvas_pos = Some(pos);
                self.route(PointerEvent::Down(pos));
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let pos = from_screen.transform_pos(pos);
                // Browsers only fire move events on actual movement; match
                // that so freehand strokes don't accumulate duplicates.
                if self.last_canvas_pos != Some(pos) {
                    self.last_canvas_pos = Some(pos);
                    self.route(PointerEvent::Move(pos));
                }
            }
        }
        if response.drag_stopped() {
            self.last_canvas_pos = None;
            self.route(PointerEvent::Up);
        }
    }

    fn route(&mut self, event: PointerEvent) {
        if let Some(draft) =
            self.router
                .handle(event, &mut self.state, &mut self.document, &mut self.history)
        {
            self.text_draft = Some(draft);
        }
    }

    /// Rasterize the committed shapes at canvas size.
    fn rasterize_canvas(&self) -> Result<image::RgbaImage, crate::error::ExportError> {
        let font = self
            .export_font
            .as_ref()
            .ok_or(crate::error::ExportError::NoFont)?;
        Ok(export::rasterize(
            self.document.shapes(),
            CANVAS_WIDTH as u32,
            CANVAS_HEIGHT as u32,
            self.state.background,
            font,
        ))
    }

    /// Capture the canvas into the in-memory gallery.
    pub fn save_to_gallery(&mut self, ctx: &egui::Context) {
        match self.rasterize_canvas() {
            Ok(img) => {
                let size = [img.width() as usize, img.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                let name = format!("Drawing {}", self.gallery.len() + 1);
                let texture =
                    ctx.load_texture(name.clone(), color_image, egui::TextureOptions::default());
                self.gallery.add(name, texture);
                self.status = Some("Saved to gallery".to_owned());
            }
            Err(err) => {
                log::error!("gallery capture failed: {err}");
                self.status = Some(format!("Save failed: {err}"));
            }
        }
    }

    /// Write the canvas as a PNG into the working directory.
    pub fn download_png(&mut self) {
        self.export_count += 1;
        let path = PathBuf::from(format!("coreverse-drawing-{}.png", self.export_count));
        let result = self
            .rasterize_canvas()
            .and_then(|img| export::save_png(&path, &img));
        match result {
            Ok(()) => self.status = Some(format!("Saved {}", path.display())),
            Err(err) => {
                log::error!("png export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    pub fn open_gallery(&mut self) {
        self.show_gallery = true;
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            let cmd = i.modifiers.command;
            (
                cmd && !i.modifiers.shift && i.key_pressed(egui::Key::Z),
                cmd && (i.key_pressed(egui::Key::Y)
                    || (i.modifiers.shift && i.key_pressed(egui::Key::Z))),
            )
        });
        if undo {
            self.undo();
        }
        if redo {
            self.redo();
        }
    }

    fn text_dialog(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.text_draft.as_mut() else {
            return;
        };
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Add Text")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.text_edit_singleline(&mut draft.content);
                ui.add(egui::Slider::new(&mut draft.font_size, 10.0..=48.0).text("Size"));
                ui.horizontal(|ui| {
                    ui.checkbox(&mut draft.bold, "Bold");
                    ui.checkbox(&mut draft.italic, "Italic");
                    ui.checkbox(&mut draft.underline, "Underline");
                });
                egui::ComboBox::from_label("Align")
                    .selected_text(draft.align.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut draft.align, TextAlign::Left, "Left");
                        ui.selectable_value(&mut draft.align, TextAlign::Center, "Center");
                        ui.selectable_value(&mut draft.align, TextAlign::Right, "Right");
                    });
                ui.horizontal(|ui| {
                    if ui.button("Add").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });
        if confirmed {
            if let Some(draft) = self.text_draft.take() {
                // An empty draft is dropped without a history entry.
                self.router.commit_text(
                    draft,
                    &self.state,
                    &mut self.document,
                    &mut self.history,
                );
            }
        } else if cancelled {
            self.text_draft = None;
        }
    }

    fn gallery_window(&mut self, ctx: &egui::Context) {
        if !self.show_gallery {
            return;
        }
        let mut open = self.show_gallery;
        let mut remove = None;
        egui::Window::new("Saved Drawings")
            .open(&mut open)
            .default_width(220.0)
            .show(ctx, |ui| {
                if self.gallery.is_empty() {
                    ui.label("Nothing saved yet.");
                    return;
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for drawing in self.gallery.drawings() {
                        ui.label(&drawing.name);
                        ui.add(egui::Image::new(&drawing.texture).max_width(200.0));
                        if ui.button("Remove").clicked() {
                            remove = Some(drawing.id);
                        }
                        ui.separator();
                    }
                });
            });
        if let Some(id) = remove {
            self.gallery.remove(id);
        }
        self.show_gallery = open;
    }
}

impl eframe::App for CanvasApp {
    /// Persist the tool settings before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state);
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
        self.text_dialog(ctx);
        self.gallery_window(ctx);
    }
}
