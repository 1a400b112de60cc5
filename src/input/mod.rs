use egui::Pos2;

mod router;
pub use router::{Router, TextDraft};

/// A pointer transition on the drawing surface, in canvas-logical
/// coordinates. The central panel inverse-transforms screen positions before
/// events reach the router, so the tools never see zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
}
