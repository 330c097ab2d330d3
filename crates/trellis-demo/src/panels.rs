#![forbid(unsafe_code)]

//! The demo's panels: a selector and a detail view sharing a selection
//! slot, and a note input wrapping the built-in text panel.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use trellis::prelude::*;

/// One inventory row.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    pub detail: String,
}

impl Item {
    pub fn new(name: &str, quantity: u32, detail: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.quantity)
    }
}

/// A note attached to an item by index.
pub type Notes = Rc<RefCell<Vec<(usize, String)>>>;

/// List panel that mirrors its selection into the shared slot, so the
/// detail panel can follow along without any observer machinery.
pub struct SelectorPanel {
    list: ListPanel<Item>,
    selection: Rc<Cell<usize>>,
}

impl SelectorPanel {
    pub fn new(base: PanelBase, items: Vec<Item>, selection: Rc<Cell<usize>>) -> Self {
        Self {
            list: ListPanel::new(base, items),
            selection,
        }
    }
}

impl Panel for SelectorPanel {
    fn base(&self) -> &PanelBase {
        &self.list.base
    }

    fn base_mut(&mut self) -> &mut PanelBase {
        &mut self.list.base
    }

    fn update(&mut self, msg: &InputMessage) -> (bool, bool) {
        let (handled, redraw) = self.list.update(msg);
        self.selection.set(self.list.selected);
        (handled, redraw)
    }

    fn draw(&self, active: bool) -> String {
        self.list.draw(active)
    }
}

/// Read-only view of the selected item and its notes. Reads the shared
/// slot on every draw; it never handles input itself.
pub struct DetailPanel {
    base: PanelBase,
    items: Vec<Item>,
    selection: Rc<Cell<usize>>,
    notes: Notes,
}

impl DetailPanel {
    pub fn new(
        base: PanelBase,
        items: Vec<Item>,
        selection: Rc<Cell<usize>>,
        notes: Notes,
    ) -> Self {
        Self {
            base,
            items,
            selection,
            notes,
        }
    }
}

impl Panel for DetailPanel {
    fn base(&self) -> &PanelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PanelBase {
        &mut self.base
    }

    fn draw(&self, _active: bool) -> String {
        let index = self.selection.get();
        let Some(item) = self.items.get(index) else {
            return "nothing selected".to_string();
        };
        let mut lines = vec![
            item.name.clone(),
            format!("quantity: {}", item.quantity),
            item.detail.clone(),
        ];
        let notes = self.notes.borrow();
        let attached: Vec<&(usize, String)> =
            notes.iter().filter(|(i, _)| *i == index).collect();
        if !attached.is_empty() {
            lines.push(String::new());
            for (_, note) in attached {
                lines.push(format!("- {note}"));
            }
        }
        lines.join("\n")
    }
}

/// Text input that attaches its contents to the selected item on Enter,
/// then lets the inner panel clear itself.
pub struct NoteInput {
    text: TextPanel,
    notes: Notes,
    selection: Rc<Cell<usize>>,
}

impl NoteInput {
    pub fn new(base: PanelBase, notes: Notes) -> Self {
        Self {
            text: TextPanel::new(base),
            notes,
            selection: Rc::new(Cell::new(0)),
        }
    }

    /// Share the selector's slot so notes land on the selected item.
    pub fn with_selection(mut self, selection: Rc<Cell<usize>>) -> Self {
        self.selection = selection;
        self
    }
}

impl Panel for NoteInput {
    fn base(&self) -> &PanelBase {
        &self.text.base
    }

    fn base_mut(&mut self) -> &mut PanelBase {
        &mut self.text.base
    }

    fn update(&mut self, msg: &InputMessage) -> (bool, bool) {
        if msg.is_plain_key(Key::Enter) {
            let note = self.text.text();
            if !note.trim().is_empty() {
                tracing::debug!(note = %note, "attaching note");
                self.notes
                    .borrow_mut()
                    .push((self.selection.get(), note));
            }
        }
        self.text.update(msg)
    }

    fn draw(&self, active: bool) -> String {
        self.text.draw(active)
    }

    fn cursor_position(&self, active: bool) -> Option<(u16, u16)> {
        self.text.cursor_position(active)
    }
}
