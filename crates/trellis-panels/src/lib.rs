#![forbid(unsafe_code)]

//! The panel contract and the built-in panels.
//!
//! A panel is anything that can consume input, draw itself as styled text,
//! and expose a shared [`PanelBase`] carrying its geometry, title, border
//! flag, and stop request. Applications implement [`Panel`] for their own
//! types and compose them with the built-ins:
//!
//! - [`ListPanel`] - ordered items with a selection
//! - [`TextPanel`] - single-line text input with a caret
//! - [`InfoPanel`] - read-only multiline display
//!
//! Panels are held as [`PanelHandle`]s (`Rc<RefCell<dyn Panel>>`) so the
//! layout tree, the event loop, and the application can all retain handles
//! to the same panel. Access is serialised by the single-threaded event
//! loop; panels must still tolerate their shared state being mutated by
//! sibling panels between frames.

pub mod frame;
mod info;
mod list;
mod panel;
mod text_input;

pub use frame::wrap_frame;
pub use info::InfoPanel;
pub use list::ListPanel;
pub use panel::{handle, Panel, PanelBase, PanelHandle};
pub use text_input::TextPanel;
