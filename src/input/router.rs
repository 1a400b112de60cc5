use egui::{Pos2, Vec2};

use crate::document::Document;
use crate::history::History;
use crate::shape::{BoundingBox, Shape, TextAlign};
use crate::state::{EditorState, ToolKind};

use super::PointerEvent;

/// A `Text` shape staged at a click point, awaiting confirmation from the
/// text dialog. It never touches the document until committed.
#[derive(Debug, Clone)]
pub struct TextDraft {
    pub pos: Pos2,
    pub content: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: TextAlign,
}

impl TextDraft {
    pub fn new(pos: Pos2) -> Self {
        Self {
            pos,
            content: String::new(),
            font_size: 18.0,
            bold: false,
            italic: false,
            underline: false,
            align: TextAlign::Left,
        }
    }
}

/// Dispatches pointer events to the active tool: shape construction for the
/// drawing tools, translation for the move tool, a staged draft for text.
///
/// At most one shape is in progress at a time; it joins the document only on
/// pointer-up, which also records the history snapshot.
#[derive(Default)]
pub struct Router {
    in_progress: Option<Shape>,
    /// Last pointer position seen by the move tool. Movement applies
    /// frame-to-frame deltas, never absolute positions, so dragging stays
    /// correct under any zoom factor.
    last_pointer: Option<Pos2>,
    /// Set once the move tool has actually translated the selection, so
    /// pointer-up knows a snapshot is due.
    moved: bool,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shape currently being drawn, for the render loop to paint on top.
    pub fn in_progress(&self) -> Option<&Shape> {
        self.in_progress.as_ref()
    }

    /// Convenience dispatch over [`PointerEvent`]. Returns a draft when the
    /// text tool wants the entry dialog opened.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        state: &mut EditorState,
        document: &mut Document,
        history: &mut History,
    ) -> Option<TextDraft> {
        match event {
            PointerEvent::Down(pos) => return self.pointer_down(pos, state, document),
            PointerEvent::Move(pos) => self.pointer_move(pos, state, document),
            PointerEvent::Up => self.pointer_up(state, document, history),
        }
        None
    }

    /// Begin a tool action at `pos`.
    ///
    /// The move tool only acquires a selection here (topmost hit wins) when
    /// none exists; actual movement happens in pointer-move. The text tool
    /// stages a draft and asks the caller to open the entry dialog.
    pub fn pointer_down(
        &mut self,
        pos: Pos2,
        state: &mut EditorState,
        document: &Document,
    ) -> Option<TextDraft> {
        match state.tool {
            ToolKind::Move => {
                if state.selected.is_none() {
                    state.selected = document.hit_test(pos);
                }
                self.last_pointer = Some(pos);
                self.moved = false;
                None
            }
            ToolKind::Text => Some(TextDraft::new(pos)),
            ToolKind::Pencil | ToolKind::Eraser => {
                self.in_progress = Some(Shape::Freehand {
                    points: vec![pos],
                    color: state.color,
                    width: state.stroke_width,
                    eraser: state.tool == ToolKind::Eraser,
                });
                None
            }
            ToolKind::Rectangle => {
                self.in_progress = Some(Shape::Rectangle {
                    bounds: BoundingBox::new(pos, Vec2::ZERO),
                    color: state.color,
                    width: state.stroke_width,
                });
                None
            }
            ToolKind::Ellipse => {
                self.in_progress = Some(Shape::Ellipse {
                    bounds: BoundingBox::new(pos, Vec2::ZERO),
                    color: state.color,
                    width: state.stroke_width,
                });
                None
            }
        }
    }

    /// Continue the active action at `pos`.
    ///
    /// Freehand strokes record every move event, with no decimation. Boxes track
    /// the delta from their anchor, which may go negative. The move tool
    /// translates the selected shape by the frame-to-frame delta.
    pub fn pointer_move(&mut self, pos: Pos2, state: &EditorState, document: &mut Document) {
        if state.tool == ToolKind::Move {
            let (Some(index), Some(last)) = (state.selected, self.last_pointer) else {
                return;
            };
            if let Some(shape) = document.shape_mut(index) {
                shape.translate(pos - last);
                self.moved = true;
            }
            self.last_pointer = Some(pos);
            return;
        }
        if let Some(shape) = &mut self.in_progress {
            match shape {
                Shape::Freehand { points, .. } => points.push(pos),
                Shape::Rectangle { bounds, .. } | Shape::Ellipse { bounds, .. } => {
                    bounds.size = pos - bounds.origin;
                }
                Shape::Text { .. } => {}
            }
        }
    }

    /// Commit whatever is in progress and record a snapshot.
    ///
    /// For the move tool the translation is already applied, so only a
    /// snapshot is recorded (and only if something actually moved). A
    /// pointer-up with nothing in progress is a no-op.
    pub fn pointer_up(
        &mut self,
        state: &EditorState,
        document: &mut Document,
        history: &mut History,
    ) {
        if state.tool == ToolKind::Move {
            self.last_pointer = None;
            if self.moved {
                self.moved = false;
                history.push(document.snapshot());
            }
            return;
        }
        let Some(shape) = self.in_progress.take() else {
            return;
        };
        if discard_on_commit(&shape) {
            log::debug!("discarding zero-size shape");
            return;
        }
        document.add_shape(shape);
        history.push(document.snapshot());
    }

    /// Commit a confirmed text draft. Blank content is rejected: the draft
    /// is discarded and no history entry is made. Returns whether the shape
    /// was committed.
    pub fn commit_text(
        &mut self,
        draft: TextDraft,
        state: &EditorState,
        document: &mut Document,
        history: &mut History,
    ) -> bool {
        if draft.content.trim().is_empty() {
            log::debug!("discarding blank text shape");
            return false;
        }
        document.add_shape(Shape::Text {
            pos: draft.pos,
            content: draft.content,
            color: state.color,
            font_size: draft.font_size,
            bold: draft.bold,
            italic: draft.italic,
            underline: draft.underline,
            align: draft.align,
        });
        history.push(document.snapshot());
        true
    }

    /// Abandon any action in flight (tool switch, focus loss).
    pub fn cancel(&mut self) {
        self.in_progress = None;
        self.last_pointer = None;
        self.moved = false;
    }
}

/// Zero-size boxes (a click with no drag) are dropped rather than committed.
/// Single-point freehand strokes are kept; they render nothing but stay in
/// the store.
fn discard_on_commit(shape: &Shape) -> bool {
    match shape {
        Shape::Rectangle { bounds, .. } | Shape::Ellipse { bounds, .. } => {
            bounds.size == Vec2::ZERO
        }
        _ => false,
    }
}
