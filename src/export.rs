//! Canvas-to-raster export.
//!
//! The live renderer paints through egui; export re-draws the same shape
//! model into an RGBA buffer so drawings can leave the process as PNGs (file
//! download, saved-drawings gallery). Geometry (box normalization, the
//! half-diagonal ellipse radius) is shared with the shape module, so
//! exported pixels follow the same rules as the screen, eraser limitation
//! included.
//!
//! Shapes are stamped by coverage testing: a pixel is painted when it lies
//! within half the stroke width of the shape's path. That keeps joins round
//! without a tessellator and is plenty at canvas resolutions.

use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, PxScaleFont, ScaleFont};
use egui::{Color32, Pos2, pos2};
use image::{Rgba, RgbaImage};

use crate::error::ExportError;
use crate::shape::{Shape, TextAlign};

/// Width of the manually drawn underline, and its gap below the baseline.
const UNDERLINE_HALF_WIDTH: f32 = 0.7;
const UNDERLINE_GAP: f32 = 2.0;

/// Horizontal offset of the second strike used to fake a bold face.
const BOLD_STRIKE_OFFSET: f32 = 0.6;

/// Slant applied per pixel of height above the baseline for faux italics.
const ITALIC_SHEAR: f32 = 0.25;

/// Pull egui's embedded proportional face for glyph rasterization, so export
/// ships no font asset of its own.
pub fn embedded_font() -> Result<FontArc, ExportError> {
    let defs = egui::FontDefinitions::default();
    let name = defs
        .families
        .get(&egui::FontFamily::Proportional)
        .and_then(|names| names.first())
        .ok_or(ExportError::NoFont)?;
    let data = defs.font_data.get(name).ok_or(ExportError::NoFont)?;
    Ok(FontArc::try_from_vec(data.font.to_vec())?)
}

/// Rasterize committed shapes onto a background-filled buffer, in store
/// order (z-order).
pub fn rasterize(
    shapes: &[Shape],
    width: u32,
    height: u32,
    background: Color32,
    font: &FontArc,
) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, to_rgba(background));
    for shape in shapes {
        draw_shape(&mut img, shape, background, font);
    }
    img
}

/// Encode `image` as PNG at `path`.
pub fn save_png(path: &Path, image: &RgbaImage) -> Result<(), ExportError> {
    image.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("exported canvas to {}", path.display());
    Ok(())
}

fn draw_shape(img: &mut RgbaImage, shape: &Shape, background: Color32, font: &FontArc) {
    match shape {
        Shape::Freehand {
            points,
            color,
            width,
            eraser,
        } => {
            if points.len() < 2 {
                return;
            }
            // Same substitution as the live renderer: erasing paints the
            // background color at double width, it does not clear pixels.
            let (color, width) = if *eraser {
                (background, *width * 2)
            } else {
                (*color, *width)
            };
            let half = width as f32 / 2.0;
            for pair in points.windows(2) {
                draw_segment(img, pair[0], pair[1], half, color);
            }
        }
        Shape::Rectangle {
            bounds,
            color,
            width,
        } => {
            let rect = bounds.normalized();
            let half = *width as f32 / 2.0;
            let corners = [
                rect.left_top(),
                rect.right_top(),
                rect.right_bottom(),
                rect.left_bottom(),
                rect.left_top(),
            ];
            for pair in corners.windows(2) {
                draw_segment(img, pair[0], pair[1], half, *color);
            }
        }
        Shape::Ellipse {
            bounds,
            color,
            width,
        } => {
            draw_ring(
                img,
                bounds.center(),
                bounds.ellipse_radius(),
                *width as f32 / 2.0,
                *color,
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
            draw_text(
                img, *pos, content, *color, *font_size, *bold, *italic, *underline, *align, font,
            );
        }
    }
}

/// Stamp every pixel within `half_width` of the segment.
fn draw_segment(img: &mut RgbaImage, a: Pos2, b: Pos2, half_width: f32, color: Color32) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let pad = half_width + 1.0;
    let x0 = (a.x.min(b.x) - pad).floor().max(0.0) as u32;
    let y0 = (a.y.min(b.y) - pad).floor().max(0.0) as u32;
    let x1 = ((a.x.max(b.x) + pad).ceil() as u32).min(img.width().saturating_sub(1));
    let y1 = ((a.y.max(b.y) + pad).ceil() as u32).min(img.height().saturating_sub(1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            if segment_distance(pos2(x as f32, y as f32), a, b) <= half_width {
                img.put_pixel(x, y, to_rgba(color));
            }
        }
    }
}

/// Stamp the annulus `|dist(p, center) - radius| <= half_width`.
fn draw_ring(img: &mut RgbaImage, center: Pos2, radius: f32, half_width: f32, color: Color32) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let pad = radius + half_width + 1.0;
    let x0 = (center.x - pad).floor().max(0.0) as u32;
    let y0 = (center.y - pad).floor().max(0.0) as u32;
    let x1 = ((center.x + pad).ceil() as u32).min(img.width().saturating_sub(1));
    let y1 = ((center.y + pad).ceil() as u32).min(img.height().saturating_sub(1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = (pos2(x as f32, y as f32) - center).length();
            if (d - radius).abs() <= half_width {
                img.put_pixel(x, y, to_rgba(color));
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    img: &mut RgbaImage,
    pos: Pos2,
    content: &str,
    color: Color32,
    font_size: f32,
    bold: bool,
    italic: bool,
    underline: bool,
    align: TextAlign,
    font: &FontArc,
) {
    let scaled = font.as_scaled(PxScale::from(font_size));
    let line_width = measure_line(&scaled, content);
    let origin_x = match align {
        TextAlign::Left => pos.x,
        TextAlign::Center => pos.x - line_width / 2.0,
        TextAlign::Right => pos.x - line_width,
    };
    let baseline = pos.y + scaled.ascent();
    let shear = if italic { ITALIC_SHEAR } else { 0.0 };
    let strikes: &[f32] = if bold { &[0.0, BOLD_STRIKE_OFFSET] } else { &[0.0] };

    for &strike in strikes {
        let mut caret = origin_x;
        let mut prev = None;
        for ch in content.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, glyph.id);
            }
            glyph.position = ab_glyph::point(caret + strike, baseline);
            caret += scaled.h_advance(glyph.id);
            prev = Some(glyph.id);
            let Some(outline) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            outline.draw(|gx, gy, coverage| {
                let py = bounds.min.y + gy as f32;
                let px = bounds.min.x + gx as f32 + shear * (baseline - py);
                blend_pixel(img, px, py, color, coverage);
            });
        }
    }

    if underline {
        let y = baseline + UNDERLINE_GAP;
        draw_segment(
            img,
            pos2(origin_x, y),
            pos2(origin_x + line_width, y),
            UNDERLINE_HALF_WIDTH,
            color,
        );
    }
}

fn measure_line(scaled: &PxScaleFont<&FontArc>, content: &str) -> f32 {
    let mut width = 0.0;
    let mut prev = None;
    for ch in content.chars() {
        let id = scaled.scaled_glyph(ch).id;
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Source-over blend of `color` at `coverage` onto the (opaque) buffer.
fn blend_pixel(img: &mut RgbaImage, x: f32, y: f32, color: Color32, coverage: f32) {
    if coverage <= 0.0 || x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    let Rgba(dst) = *img.get_pixel(x, y);
    let mix = |s: u8, d: u8| (s as f32 * coverage + d as f32 * (1.0 - coverage)).round() as u8;
    img.put_pixel(
        x,
        y,
        Rgba([
            mix(color.r(), dst[0]),
            mix(color.g(), dst[1]),
            mix(color.b(), dst[2]),
            0xff,
        ]),
    );
}

fn segment_distance(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 0xff])
}
