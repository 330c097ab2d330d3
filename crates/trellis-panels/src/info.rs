#![forbid(unsafe_code)]

//! Info panel: read-only multiline display.

use trellis_core::InputMessage;

use crate::panel::{Panel, PanelBase};

/// A read-only panel showing an ordered sequence of lines.
///
/// Input is never consumed. Long content should be pre-truncated or
/// pre-paginated by the producer; the frame layer appends an ellipsis line
/// when content exceeds the available rows.
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    /// Shared panel fields.
    pub base: PanelBase,
    /// Lines in display order.
    pub lines: Vec<String>,
}

impl InfoPanel {
    /// Create an info panel with initial lines.
    #[must_use]
    pub fn new(base: PanelBase, lines: Vec<String>) -> Self {
        Self { base, lines }
    }

    /// Append a line.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Panel for InfoPanel {
    fn base(&self) -> &PanelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PanelBase {
        &mut self.base
    }

    fn update(&mut self, _msg: &InputMessage) -> (bool, bool) {
        (false, false)
    }

    fn draw(&self, _active: bool) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{Key, Modifiers};

    #[test]
    fn never_consumes_input() {
        let mut info = InfoPanel::new(PanelBase::titled("I"), vec!["a".into()]);
        let msg = InputMessage::key(Key::Enter, Default::default());
        assert_eq!(info.update(&msg), (false, false));
        let msg = InputMessage::char('q', Default::default()).with_modifiers(Modifiers::CTRL);
        assert_eq!(info.update(&msg), (false, false));
    }

    #[test]
    fn draw_joins_lines() {
        let mut info = InfoPanel::default();
        info.push_line("first");
        info.push_line("second");
        assert_eq!(info.draw(false), "first\nsecond");
        info.clear();
        assert_eq!(info.draw(false), "");
    }
}
