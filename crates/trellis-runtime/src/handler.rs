#![forbid(unsafe_code)]

//! Global input handling.
//!
//! When the active panel declines a message the App forwards it here.
//! The default handler carries the framework-wide bindings: Tab and
//! Shift+Tab cycle focus, 'q'/'Q'/Ctrl+C stop the App. Applications
//! substitute their own handler to extend or override any of it, usually
//! by delegating unmatched messages to [`default_global_update`].

use trellis_core::{InputMessage, Key, Modifiers};

use crate::app::App;

/// Status line shown by the default handler.
pub const DEFAULT_STATUS: &str =
    " Tab: switch  •  ↑/↓: navigate  •  ←/→: move cursor  •  Enter: confirm  •  q/Ctrl-C: quit ";

/// Application-wide input handling and the status line.
pub trait GlobalHandler {
    /// Handle a message the active panel declined.
    ///
    /// Returns whether the display changed. Stopping the App needs no
    /// redraw; the loop exits before the next frame.
    fn update_global(&mut self, app: &mut App, msg: &InputMessage) -> bool {
        default_global_update(app, msg)
    }

    /// Called on each focus change with the new panel's title, or its
    /// index when untitled.
    fn on_panel_switch(&mut self, _app: &mut App, _panel: &str) {}

    /// The status line for the bottom row.
    fn status(&self) -> String {
        DEFAULT_STATUS.to_string()
    }
}

/// The framework's stock bindings and status line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGlobalHandler;

impl GlobalHandler for DefaultGlobalHandler {}

/// The default binding table, callable from custom handlers that want to
/// layer on top of it.
pub fn default_global_update(app: &mut App, msg: &InputMessage) -> bool {
    if msg.is_key(Key::Tab) && msg.has_modifier(Modifiers::SHIFT) {
        app.switch_panel(-1);
        true
    } else if msg.is_plain_key(Key::Tab) {
        app.switch_panel(1);
        true
    } else if msg.is_plain_char('q')
        || msg.is_plain_char('Q')
        || (msg.is_char('c') && msg.has_modifier(Modifiers::CTRL))
    {
        tracing::info!("quit binding pressed");
        app.stop();
        false
    } else {
        false
    }
}
