use egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};

/// Extra slack around a shape's bounds when hit-testing with the move tool,
/// so thin strokes stay clickable.
pub const HIT_MARGIN: f32 = 4.0;

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

/// Axis-aligned box anchored at the drag origin. `size` goes negative while
/// the pointer sits left of / above the anchor; `normalized` resolves the
/// sign, so the raw fields always encode the drag direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub origin: Pos2,
    pub size: Vec2,
}

impl BoundingBox {
    pub fn new(origin: Pos2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// The box with positive extents, whatever direction it was dragged in.
    pub fn normalized(&self) -> Rect {
        Rect::from_two_pos(self.origin, self.origin + self.size)
    }

    pub fn center(&self) -> Pos2 {
        self.normalized().center()
    }

    /// Radius of the circle drawn for an ellipse box: half the diagonal.
    /// Not a true ellipse fit; the circle overshoots the box on the short
    /// axis. Kept as-is for parity with the canvas this replicates.
    pub fn ellipse_radius(&self) -> f32 {
        let Vec2 { x, y } = self.size;
        (x * x + y * y).sqrt() / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}

/// A drawing primitive. Order in the document is z-order: later shapes draw
/// on top of earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Pencil or eraser stroke through every recorded pointer position.
    /// Erasers are ordinary strokes painted in the canvas background color at
    /// double width; they cover pixels rather than clearing them, so erasing
    /// over anything that is not the flat background leaves a visible patch.
    Freehand {
        points: Vec<Pos2>,
        color: Color32,
        width: u32,
        eraser: bool,
    },
    /// Stroked outline, no fill.
    Rectangle {
        bounds: BoundingBox,
        color: Color32,
        width: u32,
    },
    /// Stroked circle inscribed around the bounding box (see
    /// [`BoundingBox::ellipse_radius`]).
    Ellipse {
        bounds: BoundingBox,
        color: Color32,
        width: u32,
    },
    Text {
        pos: Pos2,
        content: String,
        color: Color32,
        font_size: f32,
        bold: bool,
        italic: bool,
        underline: bool,
        align: TextAlign,
    },
}

impl Shape {
    /// Axis-aligned bounds used for the selection outline and hit-testing.
    ///
    /// Text extents are estimated from the font size rather than laid out;
    /// the renderer shapes text properly, this only needs to anchor the
    /// dashed outline and keep the shape clickable.
    pub fn bounding_rect(&self) -> Rect {
        match self {
            Self::Freehand { points, .. } => {
                let Some(first) = points.first() else {
                    return Rect::ZERO;
                };
                points
                    .iter()
                    .fold(Rect::from_min_max(*first, *first), |rect, p| {
                        rect.union(Rect::from_min_max(*p, *p))
                    })
            }
            Self::Rectangle { bounds, .. } | Self::Ellipse { bounds, .. } => bounds.normalized(),
            Self::Text {
                pos,
                content,
                font_size,
                align,
                ..
            } => {
                let width = estimated_text_width(content, *font_size);
                let left = match align {
                    TextAlign::Left => pos.x,
                    TextAlign::Center => pos.x - width / 2.0,
                    TextAlign::Right => pos.x - width,
                };
                Rect::from_min_size(pos2(left, pos.y), vec2(width, font_size * 1.3))
            }
        }
    }

    /// Whether `pos` lands on this shape, with a little slack for thin
    /// strokes.
    pub fn hit(&self, pos: Pos2) -> bool {
        self.bounding_rect().expand(HIT_MARGIN).contains(pos)
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Self::Freehand { points, .. } => {
                for p in points.iter_mut() {
                    *p += delta;
                }
            }
            Self::Rectangle { bounds, .. } | Self::Ellipse { bounds, .. } => {
                bounds.translate(delta);
            }
            Self::Text { pos, .. } => *pos += delta,
        }
    }
}

/// Rough single-line width estimate for proportional text.
fn estimated_text_width(content: &str, font_size: f32) -> f32 {
    content.chars().count() as f32 * font_size * 0.55
}
