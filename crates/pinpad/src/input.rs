//! Terminal key input mapped onto the keypad
//!
//! Keys are read on a plain OS thread: a blocked `read()` must not keep the
//! runtime alive after the screen closes.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pinpad_core::{Digit, KeypadKey};
use std::io::BufRead;
use tokio::sync::mpsc;

use crate::terminal::InputMode;

/// One user action on the pin screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeypadKey),
    Quit,
}

/// Map a raw-mode key event
pub fn map_key_event(event: &KeyEvent) -> Option<Input> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char(c) => map_char(c),
        KeyCode::Backspace | KeyCode::Delete => Some(Input::Key(KeypadKey::Delete)),
        KeyCode::Enter => Some(Input::Key(KeypadKey::Connect)),
        KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

/// Map a typed character (also used for piped, line-buffered input)
pub fn map_char(c: char) -> Option<Input> {
    match c {
        'd' | 'D' => Some(Input::Key(KeypadKey::Delete)),
        'c' | 'C' => Some(Input::Key(KeypadKey::Connect)),
        'q' | 'Q' => Some(Input::Quit),
        _ => Digit::from_char(c).ok().map(|d| Input::Key(KeypadKey::Digit(d))),
    }
}

/// Spawn the reader thread
///
/// In raw mode keys arrive one event at a time; otherwise each line of
/// stdin is split into characters. The channel closes on EOF or error.
pub fn spawn_reader(mode: InputMode) -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel(32);

    std::thread::spawn(move || {
        if mode == InputMode::Raw {
            loop {
                let input = match event::read() {
                    Ok(Event::Key(key)) => map_key_event(&key),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::debug!("Key reader stopped: {}", e);
                        break;
                    }
                };
                if let Some(input) = input {
                    if tx.blocking_send(input).is_err() {
                        break;
                    }
                }
            }
        } else {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                for input in line.chars().filter_map(map_char) {
                    if tx.blocking_send(input).is_err() {
                        return;
                    }
                }
            }
        }
    });

    rx
}
