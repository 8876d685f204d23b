//! Snapshot types handed to whatever draws the hearts.

use serde::{Deserialize, Serialize};

use crate::canvas::Hitbox;
use crate::heart::HeartColor;

/// Hearts are always drawn rotated by -45 degrees in their local frame.
pub const HEART_ROTATION: f64 = -std::f64::consts::FRAC_PI_4;

/// Everything needed to draw one heart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartSprite {
    pub x: f64,
    pub y: f64,
    pub side: f64,
    pub rotation: f64,
    pub color: HeartColor,
    /// Present only when the debug overlay is enabled.
    pub hitbox: Option<Hitbox>,
}

/// Diagnostic text shown in the corner of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub particle_count: usize,
}

/// Per-tick render output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub running: bool,
    pub width: u32,
    pub height: u32,
    pub hearts: Vec<HeartSprite>,
    pub debug: Option<DebugInfo>,
}
