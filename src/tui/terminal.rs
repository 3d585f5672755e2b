use std::io::{self, stdout};
use std::panic;
use std::thread::{self, ThreadId};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{DefaultTerminal, Terminal};

use crate::error::PanelError;

/// Owns the terminal while the panel is up.
///
/// Entering switches to the alternate screen in raw mode; dropping restores
/// the original state, so every exit path from the event loop leaves the
/// shell usable.
///
/// The panic hook only tears the screen down for panics on the thread that
/// entered. Backend calls run on runtime workers and a panic there settles
/// as an internal error while the panel keeps drawing, so those are logged
/// instead.
pub struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self, PanelError> {
        enable_raw_mode()?;
        let terminal = execute!(stdout(), EnterAlternateScreen)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout())));
        let terminal = match terminal {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = restore();
                return Err(e.into());
            }
        };
        install_panic_hook(thread::current().id());
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, crossterm::cursor::Show)
}

fn install_panic_hook(owner: ThreadId) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if owns_screen(owner, thread::current().id()) {
            let _ = restore();
            previous(info);
        } else {
            // stderr would land on the alternate screen
            tracing::error!(panic = %info, "Background task panicked");
        }
    }));
}

fn owns_screen(owner: ThreadId, current: ThreadId) -> bool {
    owner == current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_entering_thread_owns_the_screen() {
        let owner = thread::current().id();
        let worker = thread::spawn(|| thread::current().id()).join().unwrap();
        assert!(owns_screen(owner, owner));
        assert!(!owns_screen(owner, worker));
    }
}
