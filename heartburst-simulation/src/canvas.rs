//! Canvas bounds, hitboxes and explosion parameters.
//!
//! A [`Canvas`] can only be obtained through [`Canvas::new`], which validates
//! the dimensions. Every heart and field constructor takes one, so nothing can
//! move before the bounds are known.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::heart::MAX_SIDE;

/// Smallest canvas extent that fits the spawn footprint (`3 * side`) of the largest heart.
pub const MIN_CANVAS_EXTENT: u32 = 3 * MAX_SIDE;

/// Validated drawing surface dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, SimulationError> {
        if width < MIN_CANVAS_EXTENT || height < MIN_CANVAS_EXTENT {
            return Err(SimulationError::Precondition(format!(
                "canvas must be at least {MIN_CANVAS_EXTENT}x{MIN_CANVAS_EXTENT}, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width and height in whole pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> f64 {
        self.width as f64
    }

    pub fn height(&self) -> f64 {
        self.height as f64
    }

    /// True when the hitbox lies fully inside `[0, width] x [0, height]`.
    pub fn contains(&self, hitbox: &Hitbox) -> bool {
        hitbox.left >= 0.0
            && hitbox.top >= 0.0
            && hitbox.right <= self.width()
            && hitbox.bottom <= self.height()
    }
}

/// Axis-aligned bounding square around a heart's centre.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hitbox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Hitbox {
    pub fn around(center: DVec2, half_extent: f64) -> Self {
        Self {
            left: center.x - half_extent,
            top: center.y - half_extent,
            right: center.x + half_extent,
            bottom: center.y + half_extent,
        }
    }
}

/// Radius and force applied to every click-triggered explosion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExplosionParams {
    radius: f64,
    force: f64,
}

impl ExplosionParams {
    pub fn new(radius: f64, force: f64) -> Result<Self, SimulationError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimulationError::InvalidExplosion(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        // Positive force pushes hearts away from the centre.
        if !force.is_finite() || force <= 0.0 {
            return Err(SimulationError::InvalidExplosion(format!(
                "force must be positive and finite, got {force}"
            )));
        }
        Ok(Self { radius, force })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn force(&self) -> f64 {
        self.force
    }

    /// Places these parameters at a canvas-local point.
    pub fn at(&self, point: DVec2) -> Result<Explosion, SimulationError> {
        Explosion::new(point, self.radius, self.force)
    }
}

/// A single impulse broadcast to every heart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub point: DVec2,
    pub radius: f64,
    pub force: f64,
}

impl Explosion {
    pub fn new(point: DVec2, radius: f64, force: f64) -> Result<Self, SimulationError> {
        if !point.is_finite() {
            return Err(SimulationError::InvalidExplosion(format!(
                "point must be finite, got ({}, {})",
                point.x, point.y
            )));
        }
        let params = ExplosionParams::new(radius, force)?;
        Ok(Self {
            point,
            radius: params.radius,
            force: params.force,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_and_tiny_dimensions() {
        assert!(matches!(Canvas::new(0, 600), Err(SimulationError::Precondition(_))));
        assert!(matches!(Canvas::new(800, 0), Err(SimulationError::Precondition(_))));
        assert!(Canvas::new(MIN_CANVAS_EXTENT - 1, 600).is_err());
        assert!(Canvas::new(MIN_CANVAS_EXTENT, MIN_CANVAS_EXTENT).is_ok());
    }

    #[test]
    fn hitbox_is_centered() {
        let hitbox = Hitbox::around(DVec2::new(10.0, 20.0), 5.0);
        assert_eq!(hitbox, Hitbox { left: 5.0, top: 15.0, right: 15.0, bottom: 25.0 });

        let canvas = Canvas::new(800, 600).unwrap();
        assert!(canvas.contains(&hitbox));
        assert!(!canvas.contains(&Hitbox::around(DVec2::new(2.0, 20.0), 5.0)));
    }

    #[test]
    fn explosion_params_must_be_positive() {
        assert!(ExplosionParams::new(200.0, 50.0).is_ok());
        assert!(ExplosionParams::new(0.0, 50.0).is_err());
        assert!(ExplosionParams::new(200.0, -1.0).is_err());
        assert!(ExplosionParams::new(f64::NAN, 50.0).is_err());
        assert!(Explosion::new(DVec2::new(f64::INFINITY, 0.0), 200.0, 50.0).is_err());
    }
}
