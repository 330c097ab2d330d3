#![forbid(unsafe_code)]

//! Frame composition and double-buffered terminal output.
//!
//! Each frame the renderer asks every panel to draw, wraps the result in
//! its border/title frame, and turns the lines into [`DrawOp`]s - styled
//! strings pinned to absolute cells. Ops are diffed against the previous
//! frame keyed by `(x, y)`, so only changed rows reach the terminal; rows
//! that vanish are erased explicitly. The first frame (and the first frame
//! after [`Renderer::invalidate`]) clears the screen and writes everything.

mod buffer;

pub use buffer::{DrawBuffer, DrawOp};

use std::io::{self, Write};

use trellis_panels::{wrap_frame, PanelHandle};
use trellis_text::pad_to_width;
use trellis_tty::{hide_cursor, move_cursor, show_cursor, RESET};

/// Composes panels into draw operations and flushes them as diffs.
#[derive(Debug, Default)]
pub struct Renderer {
    buffer: DrawBuffer,
}

impl Renderer {
    /// A renderer with an empty history: its first frame is a full draw.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame so the next one clears and redraws fully.
    /// Called after a resize or a layout-root swap.
    pub fn invalidate(&mut self) {
        self.buffer.clear_history();
    }

    /// The ops of the most recently drawn frame, for inspection.
    #[must_use]
    pub fn last_frame(&self) -> &[DrawOp] {
        self.buffer.previous_frame()
    }

    /// Draw one complete frame.
    ///
    /// `panels` must already be positioned for the current size; `active`
    /// indexes the focused panel; `status` is the global handler's status
    /// line, padded or truncated to the full width on row `rows - 1`.
    ///
    /// # Errors
    ///
    /// Propagates write failures to the caller.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        panels: &[PanelHandle],
        active: usize,
        status: &str,
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        for (i, panel) in panels.iter().enumerate() {
            let panel = panel.borrow();
            let content = panel.draw(i == active);
            // Empty content still gets its frame: a blank bordered box, so
            // clearing a panel never erases its border.
            let framed = wrap_frame(panel.base(), &content, i == active);
            if framed.is_empty() {
                continue;
            }
            let rect = panel.base().rect();
            for (row, line) in framed.split('\n').enumerate() {
                if row >= rect.height as usize {
                    break;
                }
                self.buffer.push(rect.x, rect.y + row as u16, line);
            }
        }
        if rows > 0 {
            self.buffer
                .push(0, rows - 1, &pad_to_width(status, cols as usize));
        }

        self.buffer.flush(out)?;
        self.position_cursor(out, panels, active)?;
        out.write_all(RESET.as_bytes())?;
        out.flush()
    }

    /// Place or hide the terminal cursor from the active panel's caret.
    fn position_cursor<W: Write>(
        &self,
        out: &mut W,
        panels: &[PanelHandle],
        active: usize,
    ) -> io::Result<()> {
        let caret = panels
            .get(active)
            .and_then(|panel| panel.borrow().cursor_position(true));
        match caret {
            Some((x, y)) => {
                move_cursor(out, x, y)?;
                show_cursor(out)
            }
            None => hide_cursor(out),
        }
    }
}
