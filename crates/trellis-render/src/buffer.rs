#![forbid(unsafe_code)]

//! Draw operations and the double buffer.

use std::collections::HashMap;
use std::io::{self, Write};

use trellis_tty::{clear_screen, write_at};

/// One write of pre-styled, pre-sized content at an absolute cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOp {
    /// Column of the first cell.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Fully styled content, already sized to fit at this coordinate.
    /// Empty content erases the op that previously lived here.
    pub content: String,
}

/// Accumulates a frame's [`DrawOp`]s and diffs them against the previous
/// frame, keyed by `(x, y)`.
#[derive(Debug, Default)]
pub struct DrawBuffer {
    ops: Vec<DrawOp>,
    previous: Vec<DrawOp>,
}

impl DrawBuffer {
    /// An empty buffer with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue content at a cell for the current frame.
    pub fn push(&mut self, x: u16, y: u16, content: &str) {
        self.ops.push(DrawOp {
            x,
            y,
            content: content.to_string(),
        });
    }

    /// Whether any frame has been flushed since the last reset.
    #[must_use]
    pub fn has_history(&self) -> bool {
        !self.previous.is_empty()
    }

    /// Forget the previous frame, forcing the next flush to clear the
    /// screen and write every op.
    pub fn clear_history(&mut self) {
        self.previous.clear();
    }

    /// The ops of the most recently flushed frame.
    #[must_use]
    pub fn previous_frame(&self) -> &[DrawOp] {
        &self.previous
    }

    /// Ops that differ from the previous frame, plus erase ops (empty
    /// content) for cells the previous frame wrote and this one did not.
    #[must_use]
    pub fn diff(&self) -> Vec<DrawOp> {
        let mut stale: HashMap<(u16, u16), &DrawOp> = self
            .previous
            .iter()
            .map(|op| ((op.x, op.y), op))
            .collect();

        let mut changed = Vec::with_capacity(self.ops.len());
        for op in &self.ops {
            match stale.remove(&(op.x, op.y)) {
                Some(prev) if prev.content == op.content => {}
                _ => changed.push(op.clone()),
            }
        }
        for (&(x, y), _) in &stale {
            changed.push(DrawOp {
                x,
                y,
                content: String::new(),
            });
        }
        changed
    }

    /// Write the frame: clear the screen on the very first flush, then emit
    /// only the diff. The current ops become the new history.
    ///
    /// # Errors
    ///
    /// Propagates write failures; the pending frame is kept so the caller
    /// can retry.
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if !self.has_history() {
            clear_screen(out)?;
        }
        let diff = self.diff();
        tracing::trace!(ops = self.ops.len(), changed = diff.len(), "flushing frame");
        for op in &diff {
            write_at(out, op.x, op.y, &op.content)?;
        }
        self.previous = std::mem::take(&mut self.ops);
        Ok(())
    }
}
