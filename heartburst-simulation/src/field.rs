//! The heart field: owns every heart, advances them each tick and
//! broadcasts click explosions.

use std::time::{Duration, Instant};

use glam::DVec2;
use log::{debug, info, trace, warn};
use rand::Rng;
use rayon::prelude::*;

use crate::canvas::{Canvas, Explosion, ExplosionParams};
use crate::error::SimulationError;
use crate::heart::{Heart, Impact};
use crate::render::{DebugInfo, Frame};
use crate::schedule::TickSchedule;

/// Ticks per second in the reference setup.
pub const DEFAULT_FRAME_RATE: u32 = 25;
/// 40ms at the default frame rate.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(1000 / DEFAULT_FRAME_RATE as u64);
/// Fields with at least this many hearts are ticked on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Typed settings for a [`HeartField`]. Every default lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    pub particle_count: usize,
    pub explosion: ExplosionParams,
    pub debug_overlay: bool,
    pub tick_period: Duration,
    pub parallel_threshold: usize,
}

impl FieldSettings {
    pub fn new(particle_count: usize, explosion: ExplosionParams) -> Self {
        Self {
            particle_count,
            explosion,
            debug_overlay: false,
            tick_period: DEFAULT_TICK_PERIOD,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.debug_overlay = enabled;
        self
    }

    /// Sets the tick period from a frame rate in ticks per second.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Result<Self, SimulationError> {
        if frame_rate == 0 {
            return Err(SimulationError::Precondition(
                "frame rate must be greater than 0".to_string(),
            ));
        }
        self.tick_period = Duration::from_nanos(1_000_000_000 / frame_rate as u64);
        Ok(self)
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

/// Tally of one broadcast explosion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplosionReport {
    /// False when the field was stopped and the click was ignored.
    pub fired: bool,
    pub pushed: usize,
    pub out_of_range: usize,
    /// Hearts sitting exactly on the explosion centre; skipped.
    pub degenerate: usize,
}

pub struct HeartField {
    canvas: Canvas,
    settings: FieldSettings,
    hearts: Vec<Heart>,
    schedule: Option<TickSchedule>,
    tick: u64,
}

impl HeartField {
    /// Creates `settings.particle_count` random hearts on the canvas. The field starts stopped.
    pub fn new<R: Rng + ?Sized>(canvas: Canvas, settings: FieldSettings, rng: &mut R) -> Self {
        let hearts = (0..settings.particle_count)
            .map(|_| Heart::new(canvas, rng))
            .collect();

        let (width, height) = canvas.dimensions();
        info!(
            "Heart field ready: {} hearts on a {}x{} canvas",
            settings.particle_count, width, height
        );

        Self {
            canvas,
            settings,
            hearts,
            schedule: None,
            tick: 0,
        }
    }

    /// Creates a field from prebuilt hearts, which must share the field's canvas.
    pub fn with_hearts(
        canvas: Canvas,
        mut settings: FieldSettings,
        hearts: Vec<Heart>,
    ) -> Result<Self, SimulationError> {
        if let Some(stray) = hearts.iter().find(|heart| *heart.canvas() != canvas) {
            return Err(SimulationError::Precondition(format!(
                "heart built for canvas {:?} cannot join a field on {:?}",
                stray.canvas().dimensions(),
                canvas.dimensions()
            )));
        }
        settings.particle_count = hearts.len();

        Ok(Self {
            canvas,
            settings,
            hearts,
            schedule: None,
            tick: 0,
        })
    }

    /// Advances every heart by one tick.
    pub fn advance(&mut self) {
        if self.hearts.len() >= self.settings.parallel_threshold {
            self.hearts.par_iter_mut().for_each(Heart::tick);
        } else {
            self.hearts.iter_mut().for_each(Heart::tick);
        }
        self.tick += 1;

        if let Some(first) = self.hearts.first() {
            trace!(
                "tick {}: first heart at ({:.2}, {:.2})",
                self.tick,
                first.position().x,
                first.position().y
            );
        }
    }

    /// Broadcasts an explosion to every heart. Ignored while the field is stopped.
    ///
    /// Hearts that sit exactly on `point` are skipped and counted in
    /// [`ExplosionReport::degenerate`]; the rest of the broadcast still happens.
    pub fn trigger_explosion(
        &mut self,
        point: DVec2,
        radius: f64,
        force: f64,
    ) -> Result<ExplosionReport, SimulationError> {
        if !self.is_running() {
            debug!("Ignoring explosion at ({:.1}, {:.1}): field is stopped", point.x, point.y);
            return Ok(ExplosionReport::default());
        }
        let explosion = Explosion::new(point, radius, force)?;
        Ok(self.broadcast(&explosion))
    }

    /// Explodes at `point` with the configured radius and force.
    pub fn explode_at(&mut self, point: DVec2) -> Result<ExplosionReport, SimulationError> {
        if !self.is_running() {
            debug!("Ignoring explosion at ({:.1}, {:.1}): field is stopped", point.x, point.y);
            return Ok(ExplosionReport::default());
        }
        let explosion = self.settings.explosion.at(point)?;
        Ok(self.broadcast(&explosion))
    }

    fn broadcast(&mut self, explosion: &Explosion) -> ExplosionReport {
        let point = explosion.point;
        let mut report = ExplosionReport {
            fired: true,
            ..ExplosionReport::default()
        };

        for (index, heart) in self.hearts.iter_mut().enumerate() {
            match heart.apply_explosion(explosion) {
                Ok(Impact::Pushed(_)) => report.pushed += 1,
                Ok(Impact::OutOfRange) => report.out_of_range += 1,
                Err(err) => {
                    warn!("Skipping heart {}: {}", index, err);
                    report.degenerate += 1;
                }
            }
        }

        debug!(
            "Explosion at ({:.1}, {:.1}) pushed {} hearts ({} out of range, {} skipped)",
            point.x, point.y, report.pushed, report.out_of_range, report.degenerate
        );
        report
    }

    /// Arms the tick schedule. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.schedule.is_some() {
            return false;
        }
        self.schedule = Some(TickSchedule::new(self.settings.tick_period, now));
        info!("Heart field started ({:?} per tick)", self.settings.tick_period);
        true
    }

    /// Withdraws the tick schedule. Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        if self.schedule.take().is_none() {
            return false;
        }
        info!("Heart field stopped after {} ticks", self.tick);
        true
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// Claims every tick that has come due by `now` without advancing.
    ///
    /// The caller is expected to [`advance`](Self::advance) once per claimed
    /// tick. Always zero while stopped.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        self.schedule
            .as_mut()
            .map_or(0, |schedule| schedule.take_due(now))
    }

    /// Advances once for every tick that has come due by `now`.
    ///
    /// Returns the number of ticks taken; always zero while stopped.
    pub fn run_due(&mut self, now: Instant) -> u32 {
        let due = self.take_due(now);
        for _ in 0..due {
            self.advance();
        }
        due
    }

    /// Time until the next tick comes due, or `None` while stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.schedule.as_ref().map(|schedule| schedule.time_until_due(now))
    }

    /// Snapshot of every heart for drawing.
    pub fn frame(&self) -> Frame {
        let overlay = self.settings.debug_overlay;
        let (width, height) = self.canvas.dimensions();

        Frame {
            tick: self.tick,
            running: self.is_running(),
            width,
            height,
            hearts: self.hearts.iter().map(|heart| heart.sprite(overlay)).collect(),
            debug: overlay.then(|| DebugInfo {
                canvas_width: width,
                canvas_height: height,
                particle_count: self.hearts.len(),
            }),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
