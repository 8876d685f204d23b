//! Input events from the outside world, one command per line.
//!
//! ```text
//! click 120 80          explode at (120, 80) with the configured radius and force
//! click 120 80 150 30   explode with radius 150 and force 30
//! start | stop | quit
//! ```

use std::io::{self, BufRead};
use std::str::FromStr;
use std::thread;

use crossbeam_channel::Sender;
use heartburst_simulation::DVec2;
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A click at a canvas-local point, optionally overriding radius and force.
    Click {
        point: DVec2,
        params: Option<(f64, f64)>,
    },
    Start,
    Stop,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{0}' is not a number")]
    BadNumber(String),

    #[error("click takes 2 or 4 numbers, got {0}")]
    BadArity(usize),
}

impl FromStr for InputEvent {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(InputError::Empty)?;

        match command.to_ascii_lowercase().as_str() {
            "start" => Ok(InputEvent::Start),
            "stop" => Ok(InputEvent::Stop),
            "quit" | "exit" => Ok(InputEvent::Quit),
            "click" => {
                let numbers = words
                    .map(|word| word.parse::<f64>().map_err(|_| InputError::BadNumber(word.to_string())))
                    .collect::<Result<Vec<_>, _>>()?;

                match numbers.as_slice() {
                    [x, y] => Ok(InputEvent::Click {
                        point: DVec2::new(*x, *y),
                        params: None,
                    }),
                    [x, y, radius, force] => Ok(InputEvent::Click {
                        point: DVec2::new(*x, *y),
                        params: Some((*radius, *force)),
                    }),
                    other => Err(InputError::BadArity(other.len())),
                }
            }
            other => Err(InputError::UnknownCommand(other.to_string())),
        }
    }
}

/// Reads commands from stdin on a background thread until EOF or the receiver hangs up.
///
/// EOF is not turned into `Quit`, so a run fed from `/dev/null` keeps animating.
pub fn spawn_stdin_reader(events: Sender<InputEvent>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("Stopped reading input: {}", err);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<InputEvent>() {
                    Ok(event) => {
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!("Ignoring input '{}': {}", line.trim(), err),
                }
            }
            debug!("Input reader finished");
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clicks() {
        assert_eq!(
            "click 120 80".parse(),
            Ok(InputEvent::Click {
                point: DVec2::new(120.0, 80.0),
                params: None,
            })
        );
        assert_eq!(
            "  CLICK 1.5 2.5 150 30 ".parse(),
            Ok(InputEvent::Click {
                point: DVec2::new(1.5, 2.5),
                params: Some((150.0, 30.0)),
            })
        );
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!("start".parse(), Ok(InputEvent::Start));
        assert_eq!("stop".parse(), Ok(InputEvent::Stop));
        assert_eq!("quit".parse(), Ok(InputEvent::Quit));
        assert_eq!("exit".parse(), Ok(InputEvent::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!("".parse::<InputEvent>(), Err(InputError::Empty));
        assert_eq!("jump".parse::<InputEvent>(), Err(InputError::UnknownCommand("jump".to_string())));
        assert_eq!("click 1".parse::<InputEvent>(), Err(InputError::BadArity(1)));
        assert_eq!("click 1 2 3".parse::<InputEvent>(), Err(InputError::BadArity(3)));
        assert_eq!(
            "click one 2".parse::<InputEvent>(),
            Err(InputError::BadNumber("one".to_string()))
        );
    }
}
