#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod document;
pub mod error;
pub mod export;
pub mod gallery;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod shape;
pub mod state;

pub use app::CanvasApp;
pub use document::Document;
pub use error::ExportError;
pub use history::History;
pub use input::{PointerEvent, Router, TextDraft};
pub use renderer::Renderer;
pub use shape::{BoundingBox, Shape, TextAlign};
pub use state::{EditorState, ToolKind, PALETTE};
