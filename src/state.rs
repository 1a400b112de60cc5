use egui::Color32;
use serde::{Deserialize, Serialize};

/// Fixed palette of nine swatches offered by the tools panel.
pub const PALETTE: [Color32; 9] = [
    Color32::from_rgb(0x1f, 0x1f, 0x1f), // ink
    Color32::from_rgb(0xe0, 0x3c, 0x31), // red
    Color32::from_rgb(0xf5, 0x8a, 0x1f), // orange
    Color32::from_rgb(0xf2, 0xc9, 0x1c), // yellow
    Color32::from_rgb(0x2e, 0x9e, 0x44), // green
    Color32::from_rgb(0x1c, 0x7e, 0xd6), // blue
    Color32::from_rgb(0x6a, 0x4c, 0x93), // purple
    Color32::from_rgb(0xd6, 0x33, 0x84), // pink
    Color32::from_rgb(0x8d, 0x6e, 0x63), // brown
];

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 24;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.1;

/// The drawing tools. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Pencil,
    Eraser,
    Rectangle,
    Ellipse,
    Text,
    Move,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        Self::Pencil,
        Self::Eraser,
        Self::Rectangle,
        Self::Ellipse,
        Self::Text,
        Self::Move,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Eraser => "Eraser",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Text => "Text",
            Self::Move => "Move",
        }
    }
}

/// Tool state parameterizing how new shapes are constructed, passed by
/// reference to the render loop and the input router; no ambient globals.
///
/// The selection index is transient UI state and is not persisted; it also
/// does not survive a tool switch, so the move tool always starts from a
/// fresh hit test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorState {
    pub tool: ToolKind,
    pub color: Color32,
    pub stroke_width: u32,
    pub zoom: f32,
    pub show_grid: bool,
    pub background: Color32,
    #[serde(skip)]
    pub selected: Option<usize>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            tool: ToolKind::Pencil,
            color: PALETTE[0],
            stroke_width: 3,
            zoom: 1.0,
            show_grid: false,
            background: Color32::WHITE,
            selected: None,
        }
    }
}

impl EditorState {
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("tool changed: {:?} -> {:?}", self.tool, tool);
            self.selected = None;
            self.tool = tool;
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = quantize_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = quantize_zoom(self.zoom - ZOOM_STEP);
    }
}

/// Keep the zoom factor on the 0.1 lattice; repeated float steps would drift
/// off the displayed percentages otherwise.
fn quantize_zoom(zoom: f32) -> f32 {
    (zoom.clamp(MIN_ZOOM, MAX_ZOOM) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_steps_stay_clamped_and_quantized() {
        let mut state = EditorState::default();
        for _ in 0..40 {
            state.zoom_in();
        }
        assert_eq!(state.zoom, MAX_ZOOM);
        for _ in 0..40 {
            state.zoom_out();
        }
        assert_eq!(state.zoom, MIN_ZOOM);
        state.zoom_in();
        assert_eq!(state.zoom, 0.6);
    }

    #[test]
    fn switching_tools_drops_selection() {
        let mut state = EditorState::default();
        state.set_tool(ToolKind::Move);
        state.selected = Some(2);
        state.set_tool(ToolKind::Pencil);
        assert_eq!(state.selected, None);
        // Re-selecting the active tool is a no-op.
        state.selected = Some(1);
        state.set_tool(ToolKind::Pencil);
        assert_eq!(state.selected, Some(1));
    }
}
