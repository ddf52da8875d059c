use std::time::Duration;

/// Where playback gives up time between moves. A wait runs to the end of
/// the interval it was given; nothing cuts it short.
pub trait Pacer {
    fn wait(&mut self, interval: Duration);
}

/// wall-clock pacing; spin_sleep keeps the short pause-poll waits accurate
pub struct SpinPacer {
    sleeper: spin_sleep::SpinSleeper,
}

impl SpinPacer {
    pub fn new() -> Self {
        SpinPacer {
            sleeper: spin_sleep::SpinSleeper::default(),
        }
    }
}

impl Default for SpinPacer {
    fn default() -> Self {
        SpinPacer::new()
    }
}

impl Pacer for SpinPacer {
    fn wait(&mut self, interval: Duration) {
        self.sleeper.sleep(interval);
    }
}

/// useful for testing playback: remembers every wait without sleeping
#[derive(Default)]
pub struct DummyPacer {
    pub waits: Vec<Duration>,
}

impl DummyPacer {
    pub fn new() -> Self {
        DummyPacer { waits: Vec::new() }
    }
}

impl Pacer for DummyPacer {
    fn wait(&mut self, interval: Duration) {
        self.waits.push(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_dummy_pacer_records() {
        let mut p = DummyPacer::new();
        p.wait(Duration::from_millis(300));
        p.wait(Duration::from_millis(100));
        assert_eq!(
            p.waits,
            vec![Duration::from_millis(300), Duration::from_millis(100)]
        );
    }

    #[test]
    fn test_spin_pacer_waits_at_least_interval() {
        let mut p = SpinPacer::new();
        let started = Instant::now();
        p.wait(Duration::from_millis(5));
        assert!(started.elapsed() >= Duration::from_millis(5));
    }
}
