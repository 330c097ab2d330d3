#![forbid(unsafe_code)]

//! The trellis event loop.
//!
//! [`App`] owns the terminal for its lifetime: it enters raw mode, watches
//! signals, reads and parses input, routes each message to the active
//! panel (and to the [`GlobalHandler`] when the panel declines), and
//! redraws through the diff renderer. Everything a panel author sees runs
//! on one thread; the only background work is the signal watcher, which
//! deposits flags the loop observes between reads.

mod app;
mod handler;

pub use app::App;
pub use handler::{default_global_update, DefaultGlobalHandler, GlobalHandler, DEFAULT_STATUS};
