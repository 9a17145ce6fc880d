use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Terminal input the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

/// Waits up to `timeout` for a key press or resize; other events are skipped.
pub fn next_input(timeout: Duration) -> color_eyre::Result<Option<Input>> {
    loop {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(Input::Key(key))),
            Event::Resize(width, height) => return Ok(Some(Input::Resize { width, height })),
            _ => continue,
        }
    }
}
