use egui::emath::RectTransform;
use egui::{Color32, Painter, Pos2, Stroke, pos2, vec2};

use crate::document::Document;
use crate::shape::{Shape, TextAlign};
use crate::state::EditorState;

/// Logical canvas size, independent of zoom. Shapes are stored in these
/// coordinates; zooming scales the view transform, never the shapes.
pub const CANVAS_WIDTH: f32 = 880.0;
pub const CANVAS_HEIGHT: f32 = 560.0;

/// Grid cell size in logical units.
pub const GRID_SPACING: f32 = 20.0;

/// How far the dashed selection outline sits outside a shape's bounds, in
/// logical units.
pub const SELECTION_MARGIN: f32 = 6.0;

const GRID_COLOR: Color32 = Color32::from_gray(0xdf);
const SELECTION_COLOR: Color32 = Color32::from_rgb(0x1c, 0x7e, 0xd6);

/// Full clear-and-redraw renderer.
///
/// The painted pixels are a pure function of the committed shapes, the
/// in-progress shape, and the editor state (grid flag, selection,
/// background). Every mutation of any of those repaints the whole surface;
/// no incremental redraw, which is the right trade at a few hundred shapes.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Repaint the canvas. `to_screen` maps logical canvas coordinates to
    /// screen points; zoom lives entirely inside that transform, so the grid
    /// and all shapes are emitted in logical coordinates.
    pub fn paint(
        &self,
        painter: &Painter,
        to_screen: RectTransform,
        document: &Document,
        in_progress: Option<&Shape>,
        state: &EditorState,
    ) {
        painter.rect_filled(*to_screen.to(), 0.0, state.background);
        if state.show_grid {
            self.paint_grid(painter, to_screen);
        }
        for (index, shape) in document.shapes().iter().enumerate() {
            if state.selected == Some(index) {
                self.paint_selection_outline(painter, to_screen, shape);
            }
            self.paint_shape(painter, to_screen, shape, state.background);
        }
        // The shape being drawn goes on top, without a selection outline.
        if let Some(shape) = in_progress {
            self.paint_shape(painter, to_screen, shape, state.background);
        }
    }

    fn paint_grid(&self, painter: &Painter, to_screen: RectTransform) {
        let stroke = Stroke::new(1.0, GRID_COLOR);
        let logical = *to_screen.from();
        let mut x = logical.left();
        while x <= logical.right() {
            painter.line_segment(
                [
                    to_screen.transform_pos(pos2(x, logical.top())),
                    to_screen.transform_pos(pos2(x, logical.bottom())),
                ],
                stroke,
            );
            x += GRID_SPACING;
        }
        let mut y = logical.top();
        while y <= logical.bottom() {
            painter.line_segment(
                [
                    to_screen.transform_pos(pos2(logical.left(), y)),
                    to_screen.transform_pos(pos2(logical.right(), y)),
                ],
                stroke,
            );
            y += GRID_SPACING;
        }
    }

    fn paint_selection_outline(&self, painter: &Painter, to_screen: RectTransform, shape: &Shape) {
        let rect = to_screen.transform_rect(shape.bounding_rect().expand(SELECTION_MARGIN));
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        painter.extend(egui::Shape::dashed_line(
            &corners,
            Stroke::new(1.0, SELECTION_COLOR),
            4.0,
            4.0,
        ));
    }

    fn paint_shape(
        &self,
        painter: &Painter,
        to_screen: RectTransform,
        shape: &Shape,
        background: Color32,
    ) {
        let scale = to_screen.scale().x;
        match shape {
            Shape::Freehand {
                points,
                color,
                width,
                eraser,
            } => {
                // Single-point strokes are retained but render nothing.
                if points.len() < 2 {
                    return;
                }
                // Erasing paints the background color at double width. Over
                // anything that is not the flat background (grid lines
                // included) this leaves a visible patch instead of restoring
                // what was beneath, a known limitation carried over from
                // the original canvas.
                let (color, width) = if *eraser {
                    (background, *width as f32 * 2.0)
                } else {
                    (*color, *width as f32)
                };
                let path: Vec<Pos2> = points.iter().map(|p| to_screen.transform_pos(*p)).collect();
                painter.add(egui::Shape::line(path, Stroke::new(width * scale, color)));
            }
            Shape::Rectangle {
                bounds,
                color,
                width,
            } => {
                painter.rect_stroke(
                    to_screen.transform_rect(bounds.normalized()),
                    0.0,
                    Stroke::new(*width as f32 * scale, *color),
                );
            }
            Shape::Ellipse {
                bounds,
                color,
                width,
            } => {
                painter.circle_stroke(
                    to_screen.transform_pos(bounds.center()),
                    bounds.ellipse_radius() * scale,
                    Stroke::new(*width as f32 * scale, *color),
                );
            }
            Shape::Text {
                pos,
                content,
                color,
                font_size,
                bold,
                italic,
                underline,
                align,
            } => {
                self.paint_text(
                    painter,
                    to_screen.transform_pos(*pos),
                    scale,
                    content,
                    *color,
                    *font_size,
                    *bold,
                    *italic,
                    *underline,
                    *align,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_text(
        &self,
        painter: &Painter,
        anchor: Pos2,
        scale: f32,
        content: &str,
        color: Color32,
        font_size: f32,
        bold: bool,
        italic: bool,
        underline: bool,
        align: TextAlign,
    ) {
        let format = egui::TextFormat {
            font_id: egui::FontId::proportional(font_size * scale),
            color,
            italics: italic,
            ..Default::default()
        };
        let mut job = egui::text::LayoutJob::default();
        job.append(content, 0.0, format);
        let galley = painter.layout_job(job);

        let mut anchor = anchor;
        match align {
            TextAlign::Left => {}
            TextAlign::Center => anchor.x -= galley.size().x / 2.0,
            TextAlign::Right => anchor.x -= galley.size().x,
        }
        painter.galley(anchor, galley.clone(), color);
        if bold {
            // The embedded face has no bold variant; a sub-pixel double
            // strike reads as bold at canvas sizes.
            painter.galley(anchor + vec2(0.5 * scale.max(1.0), 0.0), galley.clone(), color);
        }
        if underline {
            // Drawn by hand just below the baseline (approximated as one
            // font-size below the top of the line).
            let y = anchor.y + font_size * scale + 2.0;
            painter.line_segment(
                [pos2(anchor.x, y), pos2(anchor.x + galley.size().x, y)],
                Stroke::new(1.0 * scale, color),
            );
        }
    }
}
