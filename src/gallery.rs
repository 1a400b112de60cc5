use egui::TextureHandle;
use uuid::Uuid;

/// A drawing captured from the canvas. Lives only for the session; nothing
/// is written to disk unless the user downloads it.
pub struct SavedDrawing {
    pub id: Uuid,
    pub name: String,
    pub texture: TextureHandle,
}

/// In-memory list of saved drawings, newest last.
#[derive(Default)]
pub struct Gallery {
    drawings: Vec<SavedDrawing>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: String, texture: TextureHandle) -> Uuid {
        let id = Uuid::new_v4();
        log::info!("saved drawing {name:?} to gallery");
        self.drawings.push(SavedDrawing { id, name, texture });
        id
    }

    pub fn remove(&mut self, id: Uuid) {
        self.drawings.retain(|drawing| drawing.id != id);
    }

    pub fn drawings(&self) -> &[SavedDrawing] {
        &self.drawings
    }

    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }
}
