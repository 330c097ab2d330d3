#![forbid(unsafe_code)]

//! Trellis public facade crate.
//!
//! Trellis is a small framework for interactive, multi-panel, keyboard
//! driven terminal applications: a polymorphic [`Panel`] contract, a
//! weighted recursive [`Layout`] tree, an escape-sequence input parser,
//! and a diff-based renderer, tied together by the [`App`] event loop.
//!
//! This crate re-exports the surface applications use so they do not need
//! to wire each internal crate individually:
//!
//! - Input layer: `trellis-core`
//! - Text metrics: `trellis-text`
//! - Terminal I/O: `trellis-tty`
//! - Layout tree: `trellis-layout`
//! - Panels and frame: `trellis-panels`
//! - Renderer: `trellis-render`
//! - Event loop: `trellis-runtime`
//!
//! If you depend on one trellis crate, it should be this one.
//!
//! # Example
//!
//! ```no_run
//! use trellis::{handle, App, Child, InfoPanel, Layout, ListPanel, PanelBase};
//!
//! let list = handle(ListPanel::new(
//!     PanelBase::titled("Items").with_border(true),
//!     vec!["one".to_string(), "two".to_string()],
//! ));
//! let help = handle(InfoPanel::new(
//!     PanelBase::titled("Help").with_border(true),
//!     vec!["j/k or arrows move the selection".to_string()],
//! ));
//!
//! let layout = Layout::hsplit(vec![
//!     Child::weighted(Layout::leaf(list), 2),
//!     Child::new(Layout::leaf(help)),
//! ]);
//!
//! App::new(layout, None).run()?;
//! # Ok::<(), std::io::Error>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use trellis_core::{InputKind, InputMessage, InputReader, Key, Modifiers, Rect};

// --- Text re-exports -------------------------------------------------------

pub use trellis_text::{display_width, pad_to_width, truncate_to_width};

// --- Terminal re-exports ---------------------------------------------------

#[cfg(unix)]
pub use trellis_tty::{RawModeGuard, SignalWatcher};
pub use trellis_tty::{style, terminal_size, DEFAULT_SIZE};

// --- Layout re-exports -----------------------------------------------------

pub use trellis_layout::{Child, Layout};

// --- Panel re-exports ------------------------------------------------------

pub use trellis_panels::{
    handle, wrap_frame, InfoPanel, ListPanel, Panel, PanelBase, PanelHandle, TextPanel,
};

// --- Render re-exports -----------------------------------------------------

pub use trellis_render::{DrawBuffer, DrawOp, Renderer};

// --- Runtime re-exports ----------------------------------------------------

pub use trellis_runtime::{
    default_global_update, App, DefaultGlobalHandler, GlobalHandler, DEFAULT_STATUS,
};

/// Commonly used items for application code.
pub mod prelude {
    pub use crate::{
        handle, App, Child, DefaultGlobalHandler, GlobalHandler, InfoPanel, InputMessage, Key,
        Layout, ListPanel, Modifiers, Panel, PanelBase, PanelHandle, TextPanel,
    };
}
