//! A single heart: its kinematics, boundary handling and explosion response.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, Explosion, Hitbox};
use crate::error::SimulationError;
use crate::render::{HeartSprite, HEART_ROTATION};

/// Smallest side length a heart can spawn with (inclusive).
pub const MIN_SIDE: u32 = 10;
/// Largest side length a heart can spawn with (exclusive).
pub const MAX_SIDE: u32 = 35;

/// Explosion velocity components below this are snapped to zero.
pub const SETTLE_THRESHOLD: f64 = 0.1;

/// Side length that adds one full unit of drag, so bigger hearts lose explosion speed faster.
const DRAG_SIDE_SCALE: f64 = 300.0;

// Sign-flip odds for the ambient drift. Skewed on purpose: hearts drift right and down more often.
const FLIP_X_PROBABILITY: f64 = 0.5;
const FLIP_Y_PROBABILITY: f64 = 0.3;

/// RGBA fill colour. Red is always saturated, which keeps hues in the red/pink range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl HeartColor {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let green: u8 = rng.gen_range(30..255);
        let blue = if green < 225 {
            rng.gen_range(green..225) + 30
        } else {
            u8::MAX
        };
        let alpha = rng.gen_range(25..85) as f64 / 100.0;

        Self {
            red: u8::MAX,
            green,
            blue,
            alpha,
        }
    }
}

/// Outcome of offering an explosion to a heart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// The heart was inside the radius; carries the impulse that was added.
    Pushed(DVec2),
    /// The heart was at or beyond the radius and is unchanged.
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    canvas: Canvas,
    side: f64,
    diagonal: f64,
    drag: f64,
    position: DVec2,
    velocity: DVec2,
    explosion_velocity: DVec2,
    affected_by_explosion: bool,
    hitbox: Hitbox,
    color: HeartColor,
}

impl Heart {
    /// Spawns a heart with random size, drift and colour, fully inside the canvas.
    pub fn new<R: Rng + ?Sized>(canvas: Canvas, rng: &mut R) -> Self {
        let side = rng.gen_range(MIN_SIDE..MAX_SIDE) as f64;

        // The spawn footprint is 3 * side, offset by one side from the origin.
        let x = (rng.gen::<f64>() * (canvas.width() - 3.0 * side)).floor() + side;
        let y = (rng.gen::<f64>() * (canvas.height() - 3.0 * side)).floor() + side;

        let mut dx = rng.gen_range(2..=4) as f64 / 10.0;
        let mut dy = rng.gen_range(2..=4) as f64 / 10.0;
        if rng.gen_bool(FLIP_X_PROBABILITY) {
            dx = -dx;
        }
        if rng.gen_bool(FLIP_Y_PROBABILITY) {
            dy = -dy;
        }

        let color = HeartColor::random(rng);

        Self::assemble(canvas, side, DVec2::new(x, y), DVec2::new(dx, dy), color)
    }

    /// Builds a heart with explicit state instead of random draws.
    pub fn with_kinematics(
        canvas: Canvas,
        side: f64,
        position: DVec2,
        velocity: DVec2,
        color: HeartColor,
    ) -> Result<Self, SimulationError> {
        if !side.is_finite() || side <= 0.0 {
            return Err(SimulationError::Precondition(format!(
                "heart side must be positive, got {side}"
            )));
        }
        if !position.is_finite() || !velocity.is_finite() {
            return Err(SimulationError::Precondition(
                "heart position and velocity must be finite".to_string(),
            ));
        }
        Ok(Self::assemble(canvas, side, position, velocity, color))
    }

    fn assemble(
        canvas: Canvas,
        side: f64,
        position: DVec2,
        velocity: DVec2,
        color: HeartColor,
    ) -> Self {
        let diagonal = side * std::f64::consts::SQRT_2;
        Self {
            canvas,
            side,
            diagonal,
            drag: 1.0 + side / DRAG_SIDE_SCALE,
            position,
            velocity,
            explosion_velocity: DVec2::ZERO,
            affected_by_explosion: false,
            hitbox: Hitbox::around(position, diagonal / 2.0),
            color,
        }
    }

    /// Advances the heart by one step.
    pub fn tick(&mut self) {
        self.position += self.velocity + self.explosion_velocity;
        self.hitbox = Hitbox::around(self.position, self.half_extent());
        self.resolve_bounds();
        self.damp_explosion();
    }

    /// Reflects off the canvas edges, one axis at a time.
    fn resolve_bounds(&mut self) {
        let half = self.half_extent();
        let width = self.canvas.width();
        let height = self.canvas.height();

        if self.hitbox.left < 0.0 || self.hitbox.right > width {
            self.velocity.x = -self.velocity.x;
            self.explosion_velocity.x = -self.explosion_velocity.x;
            self.position.x = if self.hitbox.left < 0.0 { half } else { width - half };
        }

        if self.hitbox.top < 0.0 || self.hitbox.bottom > height {
            self.velocity.y = -self.velocity.y;
            self.explosion_velocity.y = -self.explosion_velocity.y;
            self.position.y = if self.hitbox.top < 0.0 { half } else { height - half };
        }

        // Recompute from the clamped centre; the min/max absorbs rounding at the far edges.
        let hitbox = Hitbox::around(self.position, half);
        self.hitbox = Hitbox {
            left: hitbox.left.max(0.0),
            top: hitbox.top.max(0.0),
            right: hitbox.right.min(width),
            bottom: hitbox.bottom.min(height),
        };
    }

    fn damp_explosion(&mut self) {
        if !self.affected_by_explosion {
            return;
        }

        self.explosion_velocity /= self.drag;

        if self.explosion_velocity.x.abs() < SETTLE_THRESHOLD
            && self.explosion_velocity.y.abs() < SETTLE_THRESHOLD
        {
            self.explosion_velocity = DVec2::ZERO;
            self.affected_by_explosion = false;
        }
    }

    /// Adds the explosion's push to this heart's explosion velocity.
    ///
    /// The push points from the explosion centre through the heart centre and
    /// falls off linearly to zero at the radius. Hearts at or beyond the radius
    /// (distance rounded up) are left untouched. A heart sitting exactly on the
    /// centre has no direction to be pushed in; it is left untouched and
    /// [`SimulationError::DegenerateExplosion`] is returned.
    pub fn apply_explosion(&mut self, explosion: &Explosion) -> Result<Impact, SimulationError> {
        let offset = explosion.point - self.position;
        let distance = offset.length().ceil();

        if distance >= explosion.radius {
            return Ok(Impact::OutOfRange);
        }
        if distance == 0.0 {
            return Err(SimulationError::DegenerateExplosion {
                x: explosion.point.x,
                y: explosion.point.y,
            });
        }

        let falloff = 1.0 - distance / explosion.radius;
        let impulse = DVec2::new(
            -explosion.force * (offset.x / distance) * falloff,
            -explosion.force * (offset.y / distance) * falloff,
        );

        self.explosion_velocity += impulse;
        self.affected_by_explosion = true;

        Ok(Impact::Pushed(impulse))
    }

    /// Render description handed to the drawing collaborator.
    pub fn sprite(&self, with_hitbox: bool) -> HeartSprite {
        HeartSprite {
            x: self.position.x,
            y: self.position.y,
            side: self.side,
            rotation: HEART_ROTATION,
            color: self.color,
            hitbox: with_hitbox.then_some(self.hitbox),
        }
    }

    fn half_extent(&self) -> f64 {
        self.diagonal / 2.0
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn explosion_velocity(&self) -> DVec2 {
        self.explosion_velocity
    }

    pub fn is_affected_by_explosion(&self) -> bool {
        self.affected_by_explosion
    }

    pub fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }

    pub fn color(&self) -> &HeartColor {
        &self.color
    }
}
