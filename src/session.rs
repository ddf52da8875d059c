use crate::config::TourConfig;
use crate::error::TourError;
use crate::playback::PlaybackState;
use crate::tour::TourBuilder;

/// One run of the tour: the tour itself plus the playback settings that
/// the viewer can change while it plays. Created when a tour starts and
/// dropped when it ends; playback borrows it for the duration.
#[derive(Debug, Clone)]
pub struct Session {
    pub tour: TourBuilder,
    pub playback: PlaybackState,
}

impl Session {
    pub fn start(config: &TourConfig) -> Result<Session, TourError> {
        Ok(Session {
            tour: TourBuilder::new(config.board_size, config.start)?,
            playback: PlaybackState::new(&config.playback),
        })
    }

    /// A fresh tour from the configured start. The viewer's speed carries
    /// over; pause and quit do not.
    pub fn restart(&self, config: &TourConfig) -> Result<Session, TourError> {
        let mut next = Session::start(config)?;
        next.playback.speed = self.playback.speed;
        Ok(next)
    }
}
