#![forbid(unsafe_code)]

//! Terminal I/O: raw mode, size query, ANSI primitives, signal watching.
//!
//! The framework owns the terminal for the lifetime of the event loop, and
//! this crate is where that ownership is enforced:
//!
//! - [`RawModeGuard`] enters raw mode on `/dev/tty` and restores the saved
//!   termios on drop, on every exit path including panic unwind
//! - [`terminal_size`] queries columns x rows, with the caller falling back
//!   to 80x24 on failure
//! - [`SignalWatcher`] turns SIGWINCH/SIGINT/SIGTERM into flags the event
//!   loop observes between input reads; the handler thread never touches
//!   the terminal itself
//! - the write primitives emit 1-indexed ANSI cursor addressing from the
//!   0-indexed cell coordinates used everywhere else
//!
//! ## Escape Sequence Reference
//!
//! | Feature          | Sequence        |
//! |------------------|-----------------|
//! | Cursor to (r, c) | `CSI r ; c H`   |
//! | Clear screen     | `CSI 2 J`       |
//! | Cursor home      | `CSI H`         |
//! | Show cursor      | `CSI ? 25 h`    |
//! | Hide cursor      | `CSI ? 25 l`    |
//! | Reset style      | `CSI 0 m`       |

use std::io::{self, Write};

pub mod style;

pub use style::{
    BOLD, CLEAR, CURSOR_HOME, FG_CYAN, FG_GREEN, FG_WHITE, FG_YELLOW, HIDE_CURSOR, RESET, REVERSE,
    SHOW_CURSOR,
};

/// Columns x rows reported when the terminal size cannot be queried.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

// ── Write primitives ─────────────────────────────────────────────────────

/// Write `content` with the cursor positioned at 0-indexed cell (x, y).
pub fn write_at<W: Write>(out: &mut W, x: u16, y: u16, content: &str) -> io::Result<()> {
    write!(out, "\x1b[{};{}H{}", y + 1, x + 1, content)
}

/// Move the cursor to 0-indexed cell (x, y) without writing.
pub fn move_cursor<W: Write>(out: &mut W, x: u16, y: u16) -> io::Result<()> {
    write!(out, "\x1b[{};{}H", y + 1, x + 1)
}

/// Clear the screen and home the cursor.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(CLEAR.as_bytes())?;
    out.write_all(CURSOR_HOME.as_bytes())
}

/// Make the cursor visible.
pub fn show_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(SHOW_CURSOR.as_bytes())
}

/// Hide the cursor.
pub fn hide_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(HIDE_CURSOR.as_bytes())
}

// ── Size query ───────────────────────────────────────────────────────────

/// Query the controlling terminal's size as (columns, rows).
///
/// # Errors
///
/// Fails when `/dev/tty` cannot be opened or the ioctl is refused (no
/// controlling terminal, e.g. under a test runner). Callers log the error
/// and proceed with [`DEFAULT_SIZE`].
#[cfg(unix)]
pub fn terminal_size() -> io::Result<(u16, u16)> {
    let tty = std::fs::File::open("/dev/tty")?;
    let ws = rustix::termios::tcgetwinsize(&tty).map_err(io::Error::other)?;
    if ws.ws_col == 0 || ws.ws_row == 0 {
        return Err(io::Error::other("terminal reported a zero dimension"));
    }
    Ok((ws.ws_col, ws.ws_row))
}

#[cfg(not(unix))]
pub fn terminal_size() -> io::Result<(u16, u16)> {
    Err(io::Error::other("terminal size query requires a unix tty"))
}

// ── Raw mode ─────────────────────────────────────────────────────────────

/// RAII guard that owns raw mode on the controlling terminal.
///
/// Entering saves the original termios (the opaque restore token) and
/// applies `cfmakeraw`; dropping restores the saved settings. Because the
/// restore lives in [`Drop`], it runs on normal return, `?`, and panic
/// unwind. A process-wide panic hook additionally restores cursor
/// visibility so panic messages stay readable.
///
/// Only one guard should exist at a time.
#[cfg(unix)]
pub struct RawModeGuard {
    original: nix::sys::termios::Termios,
    tty: std::fs::File,
}

#[cfg(unix)]
impl RawModeGuard {
    /// Enter raw mode, returning the guard that restores it.
    ///
    /// # Errors
    ///
    /// Fails when `/dev/tty` cannot be opened or termios calls are refused.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        let tty = std::fs::File::open("/dev/tty")?;
        let original = nix::sys::termios::tcgetattr(&tty).map_err(io::Error::other)?;

        let mut raw = original.clone();
        nix::sys::termios::cfmakeraw(&mut raw);
        nix::sys::termios::tcsetattr(&tty, nix::sys::termios::SetArg::TCSAFLUSH, &raw)
            .map_err(io::Error::other)?;

        tracing::info!("terminal raw mode enabled");
        Ok(Self { original, tty })
    }
}

#[cfg(unix)]
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best-effort restore; nothing useful can be done with an error here.
        let _ = nix::sys::termios::tcsetattr(
            &self.tty,
            nix::sys::termios::SetArg::TCSAFLUSH,
            &self.original,
        );
        tracing::info!("terminal raw mode restored");
    }
}

/// Restore cursor visibility and style before the panic message prints.
///
/// The raw-mode restore itself is carried by [`RawModeGuard`]'s `Drop`,
/// which runs during unwinding; the hook only covers the write-side state
/// that no guard owns.
#[cfg(unix)]
fn install_panic_hook() {
    use std::sync::OnceLock;
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(SHOW_CURSOR.as_bytes());
            let _ = stdout.write_all(RESET.as_bytes());
            let _ = stdout.write_all(b"\r\n");
            let _ = stdout.flush();
            previous(info);
        }));
    });
}

// ── Signal watching ──────────────────────────────────────────────────────

/// Flags deposited by the signal thread and observed by the event loop.
///
/// Handlers only set flags; cleanup stays with the owning scope guards.
#[cfg(unix)]
#[derive(Debug)]
pub struct SignalWatcher {
    resize: std::sync::Arc<std::sync::atomic::AtomicBool>,
    terminate: std::sync::Arc<std::sync::atomic::AtomicBool>,
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalWatcher {
    /// Spawn the watcher thread for SIGWINCH, SIGINT, and SIGTERM.
    ///
    /// # Errors
    ///
    /// Fails if the signal iterator cannot be registered.
    pub fn spawn() -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGWINCH};
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let resize = Arc::new(AtomicBool::new(false));
        let terminate = Arc::new(AtomicBool::new(false));

        let mut signals = signal_hook::iterator::Signals::new([SIGWINCH, SIGINT, SIGTERM])?;
        let handle = signals.handle();
        let thread_resize = Arc::clone(&resize);
        let thread_terminate = Arc::clone(&terminate);
        let thread = std::thread::spawn(move || {
            for signal in signals.forever() {
                match signal {
                    SIGWINCH => {
                        tracing::debug!("SIGWINCH received");
                        thread_resize.store(true, Ordering::SeqCst);
                    }
                    _ => {
                        tracing::info!(signal, "termination signal received");
                        thread_terminate.store(true, Ordering::SeqCst);
                    }
                }
            }
        });

        Ok(Self {
            resize,
            terminate,
            handle,
            thread: Some(thread),
        })
    }

    /// Take the pending-resize flag, clearing it. Resize storms coalesce
    /// into a single observation because the authoritative size is queried
    /// when the flag is handled.
    pub fn take_resize(&self) -> bool {
        self.resize.swap(false, std::sync::atomic::Ordering::SeqCst)
    }

    /// Whether SIGINT or SIGTERM has been received.
    pub fn should_terminate(&self) -> bool {
        self.terminate.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(unix)]
impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_at_converts_to_one_indexed() {
        let mut out = Vec::new();
        write_at(&mut out, 0, 0, "x").unwrap();
        assert_eq!(out, b"\x1b[1;1Hx");

        out.clear();
        write_at(&mut out, 10, 4, "hi").unwrap();
        assert_eq!(out, b"\x1b[5;11Hhi");
    }

    #[test]
    fn move_cursor_writes_nothing_else() {
        let mut out = Vec::new();
        move_cursor(&mut out, 3, 7).unwrap();
        assert_eq!(out, b"\x1b[8;4H");
    }

    #[test]
    fn clear_screen_clears_and_homes() {
        let mut out = Vec::new();
        clear_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[H");
    }

    #[cfg(unix)]
    #[test]
    fn signal_watcher_starts_idle() {
        // May fail in exotic sandboxes; when it spawns, flags start clear.
        if let Ok(watcher) = SignalWatcher::spawn() {
            assert!(!watcher.take_resize());
            assert!(!watcher.should_terminate());
        }
    }
}
