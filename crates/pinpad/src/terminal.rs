//! Terminal setup and drawing for the pin screen

use anyhow::Result;
use crossterm::{cursor, execute, terminal};
use std::io::{self, IsTerminal, Write};

/// How keys are read and frames are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Interactive keypad: raw keys, redrawn screen
    Raw,
    /// Piped input: stdin read line by line, frames printed as plain text
    Lines,
}

impl InputMode {
    /// Mode for the current process, based on stdin
    pub fn detect() -> Self {
        Self::for_stdin(io::stdin().is_terminal())
    }

    /// Raw mode only when keys come from a terminal on stdin.
    ///
    /// crossterm reads `/dev/tty` when stdin is redirected, so a piped run
    /// inside a terminal session must not enter raw mode.
    pub fn for_stdin(stdin_is_terminal: bool) -> Self {
        if stdin_is_terminal {
            InputMode::Raw
        } else {
            InputMode::Lines
        }
    }
}

/// Puts the terminal in keypad mode: raw input, alternate screen, hidden cursor.
///
/// Everything is restored when the guard is dropped, including on early return.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort restore
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Draw `frame`: replace the screen in raw mode, append plain text otherwise
pub fn draw(frame: &str, mode: InputMode) -> Result<()> {
    let mut stdout = io::stdout();
    match mode {
        InputMode::Raw => {
            execute!(
                stdout,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
            stdout.write_all(frame.as_bytes())?;
        }
        InputMode::Lines => {
            writeln!(stdout, "{}", plain(frame))?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Frame with raw-mode `\r\n` endings turned into plain newlines
pub fn plain(frame: &str) -> String {
    frame.replace("\r\n", "\n")
}
