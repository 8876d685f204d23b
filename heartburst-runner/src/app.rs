//! The timer loop that drives the heart field, reacts to input and ships frames.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};
use heartburst_config::Config;
use heartburst_simulation::HeartField;
use heartburst_transport::TransportController;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::input::InputEvent;
use crate::stats::TickStats;
use crate::RunnerError;

/// Longest the loop sleeps before looking at the input channel again.
const INPUT_POLL: Duration = Duration::from_millis(5);

/// Log a timing summary after this many seconds' worth of ticks.
const SUMMARY_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    field: HeartField,
    transport: TransportController,
    stats: TickStats,
    frame_limit: Option<u64>,
    summary_every: u64,
}

impl App {
    pub fn new(config: &Config, transport: TransportController, frame_limit: Option<u64>) -> Result<Self, RunnerError> {
        let canvas = config.simulation.canvas()?;
        let settings = config.simulation.field_settings()?;

        let mut rng = match config.simulation.seed {
            Some(seed) => {
                info!("Using fixed seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let field = HeartField::new(canvas, settings, &mut rng);
        let stats = TickStats::new().map_err(|err| RunnerError::Stats(err.to_string()))?;

        Ok(Self {
            field,
            transport,
            stats,
            frame_limit,
            summary_every: config.simulation.frame_rate as u64 * SUMMARY_INTERVAL_SECS,
        })
    }

    pub fn field(&self) -> &HeartField {
        &self.field
    }

    /// Applies one input event to the field.
    pub fn handle(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Start => {
                if !self.field.start() {
                    debug!("Start ignored: already running");
                }
            }
            InputEvent::Stop => {
                if !self.field.stop() {
                    debug!("Stop ignored: already stopped");
                }
            }
            InputEvent::Click { point, params } => {
                let result = match params {
                    Some((radius, force)) => self.field.trigger_explosion(point, radius, force),
                    None => self.field.explode_at(point),
                };
                match result {
                    Ok(report) if report.fired => info!(
                        "Boom at ({:.0}, {:.0}): {} hearts scattered",
                        point.x, point.y, report.pushed
                    ),
                    Ok(_) => debug!("Click at ({:.0}, {:.0}) ignored while stopped", point.x, point.y),
                    Err(err) => warn!("Rejected click: {}", err),
                }
            }
            InputEvent::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Runs every tick due by `now`, publishing one frame per tick.
    pub fn step(&mut self, now: Instant) -> Result<Control, RunnerError> {
        let due = self.field.take_due(now);
        if due > 1 {
            warn!("Frame lag detected: catching up {} ticks", due);
        }

        let budget = self.field.settings().tick_period;
        for _ in 0..due {
            let started = Instant::now();
            self.field.advance();
            self.stats.record(started.elapsed(), budget);

            if let Err(err) = self.transport.publish(&self.field.frame()) {
                error!("Failed to send frame {}: {}", self.field.tick(), err);
            }

            if self.stats.count() % self.summary_every.max(1) == 0 {
                self.stats.log_summary("Tick timing");
            }

            if let Some(limit) = self.frame_limit {
                if self.field.tick() >= limit {
                    info!("Reached frame limit of {}", limit);
                    return Ok(Control::Quit);
                }
            }
        }
        Ok(Control::Continue)
    }

    /// Starts the field and loops until a `Quit` event or the frame limit.
    pub fn run(&mut self, events: Receiver<InputEvent>) -> Result<(), RunnerError> {
        self.field.start();

        'frames: loop {
            loop {
                match events.try_recv() {
                    Ok(event) => {
                        if self.handle(event) == Control::Quit {
                            break 'frames;
                        }
                    }
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }

            if self.step(Instant::now())? == Control::Quit {
                break;
            }

            let wait = self
                .field
                .time_until_due(Instant::now())
                .map_or(INPUT_POLL, |until_due| until_due.min(INPUT_POLL));
            spin_sleep::sleep(wait);
        }

        self.field.stop();
        self.transport.flush()?;
        self.stats.log_summary("Final tick timing");
        info!("Sent {} frames", self.transport.frames_sent());
        Ok(())
    }
}
