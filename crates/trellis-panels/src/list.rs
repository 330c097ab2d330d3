#![forbid(unsafe_code)]

//! List panel: ordered items with a selection.

use std::fmt::Display;

use trellis_core::{InputMessage, Key};
use trellis_tty::{FG_YELLOW, RESET, REVERSE};

use crate::panel::{Panel, PanelBase};

/// A panel displaying one item per line with a movable selection.
///
/// Up/'k' move the selection up, Down/'j' move it down. The selected item
/// is drawn in reverse video while the panel is active and in yellow
/// otherwise. Items only need a string rendering (`Display`).
#[derive(Debug, Clone)]
pub struct ListPanel<T> {
    /// Shared panel fields.
    pub base: PanelBase,
    /// Items in display order.
    pub items: Vec<T>,
    /// Index of the selected item. Meaningless when `items` is empty.
    pub selected: usize,
}

impl<T: Display> ListPanel<T> {
    /// Create a list over `items` with the selection at the top.
    #[must_use]
    pub fn new(base: PanelBase, items: Vec<T>) -> Self {
        Self {
            base,
            items,
            selected: 0,
        }
    }

    /// The selected item, if the list is non-empty.
    #[must_use]
    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    fn move_selection(&mut self, delta: i64) -> bool {
        let target = self.selected as i64 + delta;
        if target < 0 || target >= self.items.len() as i64 {
            return false;
        }
        self.selected = target as usize;
        true
    }
}

impl<T: Display> Panel for ListPanel<T> {
    fn base(&self) -> &PanelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PanelBase {
        &mut self.base
    }

    fn update(&mut self, msg: &InputMessage) -> (bool, bool) {
        if msg.is_plain_key(Key::Up) || msg.is_plain_char('k') {
            (true, self.move_selection(-1))
        } else if msg.is_plain_key(Key::Down) || msg.is_plain_char('j') {
            (true, self.move_selection(1))
        } else {
            (false, false)
        }
    }

    fn draw(&self, active: bool) -> String {
        let mut lines = Vec::with_capacity(self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            let line = if i == self.selected && active {
                format!("{REVERSE}> {item}{RESET}")
            } else if i == self.selected {
                format!("{FG_YELLOW}• {item}{RESET}")
            } else {
                format!("  {item}")
            };
            lines.push(line);
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::Modifiers;

    fn list() -> ListPanel<&'static str> {
        ListPanel::new(PanelBase::titled("L"), vec!["alpha", "beta", "gamma"])
    }

    fn key(k: Key) -> InputMessage {
        InputMessage::key(k, Default::default())
    }

    fn ch(c: char) -> InputMessage {
        InputMessage::char(c, Default::default())
    }

    #[test]
    fn down_and_up_move_within_bounds() {
        let mut lp = list();
        assert_eq!(lp.update(&key(Key::Down)), (true, true));
        assert_eq!(lp.selected, 1);
        assert_eq!(lp.update(&ch('j')), (true, true));
        assert_eq!(lp.selected, 2);
        // Bottom: consumed but nothing moved.
        assert_eq!(lp.update(&key(Key::Down)), (true, false));
        assert_eq!(lp.selected, 2);

        assert_eq!(lp.update(&ch('k')), (true, true));
        assert_eq!(lp.update(&key(Key::Up)), (true, true));
        assert_eq!(lp.selected, 0);
        assert_eq!(lp.update(&key(Key::Up)), (true, false));
    }

    #[test]
    fn other_keys_are_not_handled() {
        let mut lp = list();
        assert_eq!(lp.update(&key(Key::Enter)), (false, false));
        assert_eq!(lp.update(&ch('x')), (false, false));
        // Modified navigation is not list navigation.
        let ctrl_k = ch('k').with_modifiers(Modifiers::CTRL);
        assert_eq!(lp.update(&ctrl_k), (false, false));
    }

    #[test]
    fn empty_list_consumes_navigation_quietly() {
        let mut lp: ListPanel<&str> = ListPanel::new(PanelBase::new(), Vec::new());
        assert_eq!(lp.update(&key(Key::Down)), (true, false));
        assert_eq!(lp.selected_item(), None);
    }

    #[test]
    fn selection_styles_depend_on_focus() {
        let lp = list();
        let active = lp.draw(true);
        assert!(active.starts_with(&format!("{REVERSE}> alpha{RESET}")));
        assert!(active.contains("  beta"));

        let inactive = lp.draw(false);
        assert!(inactive.starts_with(&format!("{FG_YELLOW}• alpha{RESET}")));
    }

    #[test]
    fn one_item_per_line() {
        let lp = list();
        assert_eq!(lp.draw(false).split('\n').count(), 3);
    }
}
