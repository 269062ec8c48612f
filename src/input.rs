// Copyright (c) 2026 rezky_nightky

//! Non-blocking keystrokes and the raw terminal mode they need.
//!
//! Raw mode is process-wide. [`InputPoller`] owns it for its lifetime and
//! releases it on drop; [`install_exit_fallback`] covers paths where drop
//! never runs (signals, panics with `panic = "abort"`). Release is idempotent,
//! so both firing is harmless.

use std::io::{self, stdout, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, ResetColor, SetAttribute},
    terminal, ExecutableCommand,
};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Raw mode swallows SIGINT, so Ctrl-C comes back as this character.
pub const CTRL_C: char = '\u{3}';

static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);
static FALLBACK: Once = Once::new();

/// Source of single keystrokes that never blocks.
pub trait KeySource {
    /// The next character pressed since the last call, if any.
    fn poll_key(&mut self) -> io::Result<Option<char>>;
}

/// Holds the terminal in raw mode and polls it for keys.
pub struct InputPoller {
    released: bool,
}

impl InputPoller {
    /// Enters raw mode (no line buffering, no echo). Fails when stdout is not
    /// a terminal, or when neither stdin nor the controlling tty is.
    pub fn acquire() -> io::Result<Self> {
        require_terminal_output(stdout().is_terminal())?;
        install_exit_fallback();
        terminal::enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        log::debug!("raw mode entered");
        Ok(Self { released: false })
    }

    /// Leaves raw mode. Safe to call more than once.
    pub fn release(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        release_raw_mode()
    }
}

impl Drop for InputPoller {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

impl KeySource for InputPoller {
    fn poll_key(&mut self) -> io::Result<Option<char>> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(k) = event::read()? else {
                continue;
            };
            if k.kind != KeyEventKind::Press {
                continue;
            }
            let ch = match (k.code, k.modifiers) {
                (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => CTRL_C,
                (KeyCode::Char(c), _) => c,
                (KeyCode::Enter, _) => '\n',
                (KeyCode::Tab, _) => '\t',
                (KeyCode::Esc, _) => '\u{1b}',
                _ => continue,
            };
            return Ok(Some(ch));
        }
        Ok(None)
    }
}

/// Frames written to a file or pipe are escape-code noise, so the animation
/// needs stdout itself to be a terminal, not just a reachable tty.
fn require_terminal_output(stdout_is_terminal: bool) -> io::Result<()> {
    if stdout_is_terminal {
        Ok(())
    } else {
        Err(io::Error::other("stdout is not a terminal"))
    }
}

fn release_raw_mode() -> io::Result<()> {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        log::debug!("raw mode released");
        terminal::disable_raw_mode()?;
    }
    Ok(())
}

/// Puts the terminal back the way the user had it: cursor visible, default
/// attributes, cooked input. Does nothing unless raw mode is held. Errors are
/// ignored.
pub fn restore_terminal_best_effort() {
    restore_onto(&mut stdout());
}

fn restore_onto<W: Write>(out: &mut W) {
    if !RAW_MODE_ACTIVE.load(Ordering::SeqCst) {
        return;
    }
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.flush();
    let _ = release_raw_mode();
}

/// Installs, once per process, a panic hook and termination-signal handlers
/// that restore the terminal before the process goes down.
pub fn install_exit_fallback() {
    FALLBACK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal_best_effort();
            previous(info);
        }));

        #[cfg(unix)]
        {
            match Signals::new([SIGINT, SIGTERM, SIGHUP]) {
                Ok(mut signals) => {
                    std::thread::spawn(move || {
                        if let Some(sig) = signals.forever().next() {
                            restore_terminal_best_effort();
                            std::process::exit(128 + sig);
                        }
                    });
                }
                Err(e) => log::warn!("failed to install signal handlers: {}", e),
            }
        }

        #[cfg(windows)]
        {
            if let Err(e) = ctrlc::set_handler(|| {
                restore_terminal_best_effort();
                std::process::exit(130);
            }) {
                log::warn!("failed to install Ctrl-C handler: {}", e);
            }
        }
    });
}
