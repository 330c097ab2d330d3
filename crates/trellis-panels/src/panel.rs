#![forbid(unsafe_code)]

//! The polymorphic panel contract.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::{InputMessage, Rect};

/// A shared, mutable handle to a panel.
///
/// The layout tree stores leaves as handles and `position` returns them in
/// depth-first order, so application code can keep its own clone of a
/// handle and mutate the panel between frames.
pub type PanelHandle = Rc<RefCell<dyn Panel>>;

/// Wrap a panel into a [`PanelHandle`].
pub fn handle<P: Panel + 'static>(panel: P) -> PanelHandle {
    Rc::new(RefCell::new(panel))
}

/// Shared fields every panel exposes.
///
/// Embed one of these in a custom panel struct and return it from
/// [`Panel::base`]/[`Panel::base_mut`]. Geometry is written exclusively by
/// the layout pass; panels treat it as read-only while drawing.
#[derive(Debug, Clone, Default)]
pub struct PanelBase {
    /// Title shown in the border frame (or on row 0 without a border).
    pub title: String,
    /// Whether to draw the border frame.
    pub border: bool,
    rect: Rect,
    stopping: bool,
}

impl PanelBase {
    /// An untitled, borderless base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A titled base.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Enable or disable the border frame.
    #[must_use]
    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// The geometry assigned by the last layout pass.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Assign geometry. Called by the layout pass only.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Request orderly shutdown at the next event-loop iteration.
    ///
    /// Any panel may call this; the App polls every panel's flag once per
    /// iteration.
    pub fn stop(&mut self) {
        self.stopping = true;
    }

    /// Whether this panel has requested shutdown.
    #[must_use]
    pub fn is_stopping(&self) -> bool {
        self.stopping
    }
}

/// The contract every panel satisfies.
///
/// `update` and `draw` are never called concurrently; the event loop
/// serialises all panel access.
pub trait Panel {
    /// Borrow the shared base.
    fn base(&self) -> &PanelBase;

    /// Mutably borrow the shared base.
    fn base_mut(&mut self) -> &mut PanelBase;

    /// Consume an input message.
    ///
    /// Returns `(handled, redraw)`: whether the event was consumed, and
    /// whether the visible output changed. Returning `redraw = false`
    /// after a visible change is a bug; the reverse is merely wasteful.
    fn update(&mut self, _msg: &InputMessage) -> (bool, bool) {
        (false, false)
    }

    /// Render the panel's content as newline-separated styled text sized
    /// no larger than the inner content area. `active` is true iff this
    /// panel holds focus.
    fn draw(&self, _active: bool) -> String {
        String::new()
    }

    /// Absolute cell for a text-input caret, or `None` to keep the cursor
    /// hidden. Most panels keep the default.
    fn cursor_position(&self, _active: bool) -> Option<(u16, u16)> {
        None
    }
}

/// A bare base is itself a panel: it ignores input and draws nothing.
/// Useful as a spacer leaf and in layout tests.
impl Panel for PanelBase {
    fn base(&self) -> &PanelBase {
        self
    }

    fn base_mut(&mut self) -> &mut PanelBase {
        self
    }
}
