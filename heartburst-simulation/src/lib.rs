//! Physics for a field of drifting hearts that scatter when the canvas is clicked.
//!
//! Each [`Heart`] drifts at a constant ambient velocity, reflects off the
//! canvas edges and carries a transient explosion velocity that decays by its
//! drag until it snaps to zero. [`HeartField`] owns the hearts, advances them
//! once per tick and broadcasts click explosions while it is running.

pub mod canvas;
pub mod error;
pub mod field;
pub mod heart;
pub mod render;
pub mod schedule;

pub use canvas::{Canvas, Explosion, ExplosionParams, Hitbox, MIN_CANVAS_EXTENT};
pub use error::SimulationError;
pub use field::{
    ExplosionReport, FieldSettings, HeartField, DEFAULT_FRAME_RATE, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TICK_PERIOD,
};
pub use heart::{Heart, HeartColor, Impact, MAX_SIDE, MIN_SIDE, SETTLE_THRESHOLD};
pub use render::{DebugInfo, Frame, HeartSprite, HEART_ROTATION};
pub use schedule::TickSchedule;

pub use glam::DVec2;
