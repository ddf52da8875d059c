use crate::board::{Position, BOARD_SIZE};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// name of the environment variable that switches logging on, and where to
pub const LOG_FILE_ENV: &str = "KNIGHTS_TOUR_LOG";

/// delay between moves when a tour starts
const DEFAULT_SPEED_MS: u64 = 1000;
/// how much one speed key press changes the delay
const SPEED_STEP_MS: u64 = 100;
/// the delay never drops below this
const MIN_SPEED_MS: u64 = 100;
/// how often input is polled while paused, regardless of speed
const PAUSE_POLL_MS: u64 = 100;

/// Pacing knobs for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub initial_speed: Duration,
    pub speed_step: Duration,
    pub min_speed: Duration,
    pub pause_poll: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            initial_speed: Duration::from_millis(DEFAULT_SPEED_MS),
            speed_step: Duration::from_millis(SPEED_STEP_MS),
            min_speed: Duration::from_millis(MIN_SPEED_MS),
            pause_poll: Duration::from_millis(PAUSE_POLL_MS),
        }
    }
}

/// Everything needed to run the program once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourConfig {
    pub board_size: usize,
    pub start: Position,
    pub playback: PlaybackConfig,
    /// log destination; no logging at all when unset
    pub log_file: Option<PathBuf>,
}

impl Default for TourConfig {
    fn default() -> Self {
        TourConfig {
            board_size: BOARD_SIZE,
            start: Position::new(0, 0),
            playback: PlaybackConfig::default(),
            log_file: None,
        }
    }
}

impl TourConfig {
    /// defaults, with the start square given and the log file taken from
    /// `KNIGHTS_TOUR_LOG`
    pub fn new(start: Option<Position>) -> Self {
        TourConfig {
            start: start.unwrap_or_default(),
            log_file: env::var_os(LOG_FILE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            ..TourConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_defaults() {
        let c = PlaybackConfig::default();
        assert_eq!(c.initial_speed, Duration::from_millis(1000));
        assert_eq!(c.speed_step, Duration::from_millis(100));
        assert_eq!(c.min_speed, Duration::from_millis(100));
        assert_eq!(c.pause_poll, Duration::from_millis(100));
        assert!(c.min_speed > Duration::ZERO);
    }

    #[test]
    fn test_default_start_is_a8() {
        let c = TourConfig::new(None);
        assert_eq!(c.start.algebraic(), "A8");
        assert_eq!(c.board_size, 8);
    }

    #[test]
    fn test_start_override() {
        let c = TourConfig::new(Some(Position::new(2, 4)));
        assert_eq!(c.start, Position::new(2, 4));
        assert_eq!(c.playback, PlaybackConfig::default());
    }
}
