//! # playback
//!
//! Paces the tour for a viewer. The controller asks the tour for one move
//! at a time and, between moves, shows the result, reads the keyboard and
//! waits. Nothing here decides where the knight goes.
//!
//! Model
//!
//! ```text
//!  run(session)
//!   |-- show the start square
//!   `-- loop
//!        |-- wait(speed)      speed as it stood when the wait began
//!        |-- poll input, apply controls
//!        |-- while paused: wait(pause_poll); poll input; show the same move
//!        |-- quit seen?       -> cancel the tour, stop
//!        |-- tour.step()
//!        `-- show the move    (or stop when complete / stuck)
//! ```
//!
//! Input is read after every wait and before every move, so a key pressed
//! during a wait is acted on before the knight moves again. A move that has
//! been made is never undone.
use crate::config::{PlaybackConfig, TourConfig};
use crate::display::{Renderer, Scene};
use crate::error::TourError;
use crate::input::{Control, InputSource};
use crate::session::Session;
use crate::timing::Pacer;
use crate::tour::{Step, StepResult, TourOutcome, TourStatus};
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The viewer-controlled side of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// delay between moves
    pub speed: Duration,
    pub paused: bool,
    pub cancelled: bool,
}

impl PlaybackState {
    pub fn new(config: &PlaybackConfig) -> Self {
        PlaybackState {
            speed: config.initial_speed,
            paused: false,
            cancelled: false,
        }
    }

    pub fn apply(&mut self, control: Control, config: &PlaybackConfig) {
        match control {
            Control::Quit => self.cancelled = true,
            Control::TogglePause => self.paused = !self.paused,
            Control::SpeedUp => {
                self.speed = self
                    .speed
                    .saturating_sub(config.speed_step)
                    .max(config.min_speed)
            }
            Control::SpeedDown => self.speed = self.speed.saturating_add(config.speed_step),
        }
    }
}

/// what the viewer chose once a tour has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linger {
    Restart,
    Exit,
}

pub struct PlaybackController<'a> {
    renderer: &'a mut dyn Renderer,
    input: &'a mut dyn InputSource,
    pacer: &'a mut dyn Pacer,
    config: PlaybackConfig,
}

impl<'a> PlaybackController<'a> {
    pub fn new(
        renderer: &'a mut dyn Renderer,
        input: &'a mut dyn InputSource,
        pacer: &'a mut dyn Pacer,
        config: PlaybackConfig,
    ) -> PlaybackController<'a> {
        PlaybackController {
            renderer,
            input,
            pacer,
            config,
        }
    }

    /// Play the session's tour until it completes, gets stuck or the viewer
    /// quits. Only input failures are errors.
    pub fn run(&mut self, session: &mut Session) -> Result<TourOutcome, io::Error> {
        let mut current = session.tour.snapshot();
        self.show(&current, session);
        loop {
            if let Some(outcome) = session.tour.outcome() {
                return Ok(outcome);
            }

            if self.pace(session, &current)? {
                session.tour.cancel();
                continue;
            }

            match session.tour.step() {
                Step::Moved(result) | Step::Complete(result) => {
                    current = result;
                    self.show(&current, session);
                }
                Step::Stuck | Step::Finished(_) => {}
            }
        }
    }

    /// Play tours back to back until the viewer leaves, restarting from the
    /// configured start whenever they ask to. Returns the outcome of every
    /// tour played, oldest first.
    pub fn play(
        &mut self,
        config: &TourConfig,
        mut session: Session,
    ) -> Result<Vec<TourOutcome>, TourError> {
        let mut outcomes = Vec::new();
        loop {
            outcomes.push(self.run(&mut session)?);
            match self.linger(&mut session)? {
                Linger::Restart => session = session.restart(config)?,
                Linger::Exit => return Ok(outcomes),
            }
        }
    }

    /// Keep the finished tour on screen until the viewer restarts (the pause
    /// key) or quits. Speed keys still work so the panel stays live.
    pub fn linger(&mut self, session: &mut Session) -> Result<Linger, io::Error> {
        if session.tour.status() == TourStatus::Cancelled {
            return Ok(Linger::Exit);
        }
        let last = session.tour.snapshot();
        loop {
            self.pacer.wait(self.config.pause_poll);
            for control in self.input.poll_events()? {
                match control {
                    Control::Quit => return Ok(Linger::Exit),
                    Control::TogglePause => {
                        info!("restarting tour");
                        return Ok(Linger::Restart);
                    }
                    other => session.playback.apply(other, &self.config),
                }
            }
            self.show(&last, session);
        }
    }

    /// Everything between two moves. Returns true when the viewer quit.
    fn pace(&mut self, session: &mut Session, current: &StepResult) -> Result<bool, io::Error> {
        self.pacer.wait(session.playback.speed);
        self.poll(session)?;
        while session.playback.paused && !session.playback.cancelled {
            self.pacer.wait(self.config.pause_poll);
            self.poll(session)?;
            if session.playback.cancelled {
                break;
            }
            // redraw so speed changes show while paused
            self.show(current, session);
        }
        Ok(session.playback.cancelled)
    }

    fn poll(&mut self, session: &mut Session) -> Result<(), io::Error> {
        for control in self.input.poll_events()? {
            let was_paused = session.playback.paused;
            session.playback.apply(control, &self.config);
            debug!(?control, speed_ms = session.playback.speed.as_millis() as u64, "control");
            match (was_paused, session.playback.paused) {
                (false, true) => info!(step = session.tour.path().len() - 1, "paused"),
                (true, false) => info!("resumed"),
                _ => {}
            }
        }
        Ok(())
    }

    fn show(&mut self, result: &StepResult, session: &Session) {
        let scene = Scene {
            board: &result.board,
            path: &result.path,
            knight: result.position,
            step: result.step,
            status: session.tour.status(),
            playback: &session.playback,
        };
        if let Err(e) = self.renderer.draw(&scene) {
            warn!(error = %e, step = result.step, "draw failed");
        }
    }
}
