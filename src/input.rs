use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;
use tracing::{trace, warn};

/// The things a viewer can ask playback to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Quit,
    TogglePause,
    /// shorter delay between moves
    SpeedUp,
    /// longer delay between moves
    SpeedDown,
}

/// keys the keyboard source understands
const KEYMAP: [(KeyCode, Control); 5] = [
    (KeyCode::Char(' '), Control::TogglePause),
    (KeyCode::Up, Control::SpeedUp),
    (KeyCode::Down, Control::SpeedDown),
    (KeyCode::Char('q'), Control::Quit),
    (KeyCode::Esc, Control::Quit),
];

/// reads control events
pub trait InputSource {
    /// every control event that has arrived since the last poll, oldest
    /// first; never blocks
    fn poll_events(&mut self) -> Result<Vec<Control>, io::Error>;
}

/// keyboard input via crossterm; holds the terminal in raw mode while alive
pub struct KeyboardInput {
    keymap: HashMap<KeyCode, Control>,
}

impl KeyboardInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(KeyboardInput {
            keymap: HashMap::from(KEYMAP),
        })
    }

    fn translate(&self, key: KeyEvent) -> Option<Control> {
        // raw mode swallows SIGINT, so ctrl-c arrives as a key
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Control::Quit);
        }
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.keymap.get(&code).copied()
    }
}

impl Drop for KeyboardInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(error = %e, "could not leave raw mode");
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll_events(&mut self) -> Result<Vec<Control>, io::Error> {
        let mut events = Vec::new();
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(key) => match self.translate(key) {
                    Some(control) => events.push(control),
                    None => warn!(?key, "no control mapped to key"),
                },
                other => trace!(event = ?other, "ignoring terminal event"),
            }
        }
        Ok(events)
    }
}

/// scripted Input for testing: each poll hands back the next batch
pub struct DummyInput {
    batches: VecDeque<Vec<Control>>,
    pub polls: usize,
}

impl DummyInput {
    pub fn new(batches: Vec<Vec<Control>>) -> Self {
        DummyInput {
            batches: VecDeque::from(batches),
            polls: 0,
        }
    }

    /// an input that never produces anything
    pub fn silent() -> Self {
        DummyInput::new(Vec::new())
    }
}

impl InputSource for DummyInput {
    fn poll_events(&mut self) -> Result<Vec<Control>, io::Error> {
        self.polls += 1;
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_input_replays_batches() -> Result<(), io::Error> {
        let mut input = DummyInput::new(vec![
            vec![Control::SpeedUp, Control::SpeedUp],
            vec![],
            vec![Control::Quit],
        ]);
        assert_eq!(input.poll_events()?, vec![Control::SpeedUp, Control::SpeedUp]);
        assert!(input.poll_events()?.is_empty());
        assert_eq!(input.poll_events()?, vec![Control::Quit]);
        assert!(input.poll_events()?.is_empty());
        assert_eq!(input.polls, 4);
        Ok(())
    }

    #[test]
    fn test_keymap_covers_every_control() {
        let keymap: HashMap<KeyCode, Control> = HashMap::from(KEYMAP);
        for control in [
            Control::Quit,
            Control::TogglePause,
            Control::SpeedUp,
            Control::SpeedDown,
        ] {
            assert!(keymap.values().any(|c| *c == control), "{:?} unmapped", control);
        }
    }

    #[test]
    #[ignore]
    // NB. needs a real tty for raw mode
    fn test_keyboard_translates_keys() -> Result<(), io::Error> {
        let input = KeyboardInput::new()?;
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(input.translate(key(KeyCode::Char(' '))), Some(Control::TogglePause));
        assert_eq!(input.translate(key(KeyCode::Char('Q'))), Some(Control::Quit));
        assert_eq!(input.translate(key(KeyCode::Up)), Some(Control::SpeedUp));
        assert_eq!(input.translate(key(KeyCode::Char('x'))), None);
        assert_eq!(
            input.translate(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Control::Quit)
        );
        Ok(())
    }
}
