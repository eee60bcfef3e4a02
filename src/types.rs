// Small shared types used across simulation, rendering and API modules

pub type NodeId = u32;

/// A reply attached to a map observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub text: String,
}

/// One laid-down growth stroke, kept so trails persist across frames.
pub struct TrailSegment {
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
    pub width: f32,
    /// Life fraction of the filament at the moment the stroke was drawn.
    pub intensity: f32,
    pub age: f32,
}
