use egui::Pos2;

use crate::shape::Shape;

/// Ordered store of committed shapes. Later entries draw on top.
///
/// Undo/redo replaces the whole store from a history snapshot, so the store
/// carries no lifecycle of its own: it is always a view of "the snapshot at
/// the current history cursor" plus whatever was committed since.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shape_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    /// Swap in a full snapshot (undo/redo restore path).
    pub fn replace(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Full copy of the store for the history stack.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Topmost shape under `pos`, if any. Iterates back-to-front so z-order
    /// decides ties.
    pub fn hit_test(&self, pos: Pos2) -> Option<usize> {
        self.shapes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, shape)| shape.hit(pos))
            .map(|(index, _)| index)
    }
}
