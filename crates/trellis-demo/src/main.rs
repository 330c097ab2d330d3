#![forbid(unsafe_code)]

//! Inventory browser showcase.
//!
//! Composes the framework end to end: two panels sharing a selection
//! slot, a wrapped text input, a toggleable log panel (layout subtree
//! swap on 't'), and a custom global handler layered over the default
//! bindings.
//!
//! Because the renderer owns stdout, logging goes to a file. Set
//! `TRELLIS_LOG` (an `env_filter` spec, e.g. `debug` or `trellis=trace`)
//! to write `trellis-demo.log` in the working directory.

mod panels;

use std::process::ExitCode;
use std::rc::Rc;

use trellis::prelude::*;
use trellis::default_global_update;

use panels::{DetailPanel, Item, NoteInput, SelectorPanel};

/// Panel handles kept by the handler so 't' can rebuild the layout.
struct Panes {
    selector: PanelHandle,
    detail: PanelHandle,
    input: PanelHandle,
    log: PanelHandle,
}

impl Panes {
    /// Selector and detail on top, the note input below; the log pane on
    /// the right when visible.
    fn layout(&self, show_log: bool) -> Layout {
        let main = Layout::vsplit(vec![
            Child::weighted(
                Layout::hsplit(vec![
                    Child::new(Layout::leaf(self.selector.clone())),
                    Child::weighted(Layout::leaf(self.detail.clone()), 2),
                ]),
                5,
            ),
            Child::new(Layout::leaf(self.input.clone())),
        ]);
        if show_log {
            Layout::hsplit(vec![
                Child::weighted(main, 3),
                Child::new(Layout::leaf(self.log.clone())),
            ])
        } else {
            main
        }
    }
}

/// The demo's bindings on top of the defaults: 't' toggles the log pane.
struct DemoHandler {
    panes: Panes,
    show_log: bool,
}

impl GlobalHandler for DemoHandler {
    fn update_global(&mut self, app: &mut App, msg: &InputMessage) -> bool {
        if msg.is_plain_char('t') {
            self.show_log = !self.show_log;
            tracing::debug!(show_log = self.show_log, "toggling log pane");
            app.set_layout(self.panes.layout(self.show_log));
            return true;
        }
        default_global_update(app, msg)
    }

    fn on_panel_switch(&mut self, _app: &mut App, panel: &str) {
        tracing::debug!(panel, "focus changed");
    }

    fn status(&self) -> String {
        " Tab: switch  •  j/k: select  •  Enter: add note  •  t: toggle log  •  q: quit "
            .to_string()
    }
}

fn mock_items() -> Vec<Item> {
    vec![
        Item::new("copper wire", 120, "spool, 0.8mm"),
        Item::new("hinges", 48, "brass, 40mm"),
        Item::new("wood screws", 500, "countersunk"),
        Item::new("lattice panels", 12, "cedar, 180x60"),
        Item::new("wire mesh", 7, "galvanised roll"),
        Item::new("turnbuckles", 24, "M6"),
    ]
}

fn init_logging() {
    let Ok(filter) = std::env::var("TRELLIS_LOG") else {
        return;
    };
    let Ok(file) = std::fs::File::create("trellis-demo.log") else {
        eprintln!("trellis-demo: could not create trellis-demo.log");
        return;
    };
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
}

#[cfg(unix)]
fn run() -> std::io::Result<()> {
    let items = mock_items();
    let selection = Rc::new(std::cell::Cell::new(0usize));
    let notes = Rc::new(std::cell::RefCell::new(Vec::new()));

    let panes = Panes {
        selector: handle(SelectorPanel::new(
            PanelBase::titled("Inventory").with_border(true),
            items.clone(),
            Rc::clone(&selection),
        )),
        detail: handle(DetailPanel::new(
            PanelBase::titled("Detail").with_border(true),
            items,
            Rc::clone(&selection),
            Rc::clone(&notes),
        )),
        input: handle(
            NoteInput::new(PanelBase::titled("Note").with_border(true), Rc::clone(&notes))
                .with_selection(Rc::clone(&selection)),
        ),
        log: handle(InfoPanel::new(
            PanelBase::titled("Keys").with_border(true),
            vec![
                "Tab      next panel".to_string(),
                "S-Tab    previous panel".to_string(),
                "j / k    move selection".to_string(),
                "Enter    attach note".to_string(),
                "t        hide this pane".to_string(),
                "q        quit".to_string(),
            ],
        )),
    };

    let layout = panes.layout(true);
    let handler = DemoHandler {
        panes,
        show_log: true,
    };
    App::new(layout, Some(Box::new(handler))).run()
}

#[cfg(unix)]
fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("trellis-demo: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(unix))]
fn main() -> ExitCode {
    eprintln!("trellis-demo needs a POSIX terminal");
    ExitCode::FAILURE
}
