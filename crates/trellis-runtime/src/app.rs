#![forbid(unsafe_code)]

//! The App: terminal ownership, panel dispatch, and the main loop.

use std::io::{self, Read, Write};
use std::time::Duration;

use trellis_core::{InputMessage, InputReader};
use trellis_layout::Layout;
use trellis_panels::PanelHandle;
use trellis_render::Renderer;
use trellis_tty::{
    clear_screen, hide_cursor, show_cursor, terminal_size, DEFAULT_SIZE, RESET,
};

use crate::handler::{DefaultGlobalHandler, GlobalHandler};

/// Pause before retrying a failed input read.
const READ_RETRY_DELAY: Duration = Duration::from_millis(10);

/// An interactive panel application.
///
/// Construction positions the panels; [`App::run`] takes over the
/// terminal until a quit binding, a panel's stop request, or a
/// termination signal ends the loop. The terminal is restored on every
/// exit path, including panics, by the raw-mode guard's destructor.
///
/// For tests and tooling, [`App::headless`] plus [`App::run_script`]
/// drive the same dispatch pipeline from a byte script with drawing
/// suppressed.
pub struct App {
    layout: Layout,
    panels: Vec<PanelHandle>,
    active_idx: usize,
    running: bool,
    handler: Option<Box<dyn GlobalHandler>>,
    /// Focus-change hook deferred while the handler is checked out.
    pending_switch: Option<String>,
    renderer: Renderer,
    cols: u16,
    rows: u16,
    headless: bool,
}

impl App {
    /// Create an app on the real terminal.
    ///
    /// The terminal size is queried up front; on failure the documented
    /// 80x24 default is used and the error logged. `handler` defaults to
    /// [`DefaultGlobalHandler`].
    pub fn new(layout: Layout, handler: Option<Box<dyn GlobalHandler>>) -> Self {
        let (cols, rows) = terminal_size().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "terminal size query failed, using 80x24");
            DEFAULT_SIZE
        });
        Self::build(layout, handler, cols, rows, false)
    }

    /// Create an app with a fixed size that never touches the terminal.
    pub fn headless(
        layout: Layout,
        handler: Option<Box<dyn GlobalHandler>>,
        cols: u16,
        rows: u16,
    ) -> Self {
        Self::build(layout, handler, cols, rows, true)
    }

    fn build(
        layout: Layout,
        handler: Option<Box<dyn GlobalHandler>>,
        cols: u16,
        rows: u16,
        headless: bool,
    ) -> Self {
        let mut app = Self {
            layout,
            panels: Vec::new(),
            active_idx: 0,
            running: true,
            handler: Some(handler.unwrap_or_else(|| Box::new(DefaultGlobalHandler))),
            pending_switch: None,
            renderer: Renderer::new(),
            cols,
            rows,
            headless,
        };
        app.layout_panels();
        app
    }

    /// Reposition all panels for the current size. The status line keeps
    /// the last row.
    fn layout_panels(&mut self) {
        self.panels = self
            .layout
            .position(0, 0, self.cols, self.rows.saturating_sub(1));
        if self.active_idx >= self.panels.len() {
            self.active_idx = self.panels.len().saturating_sub(1);
        }
    }

    /// Replace the layout tree, e.g. to toggle a side panel. Panels keep
    /// their identity through the handles; the next frame redraws fully.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.layout_panels();
        self.renderer.invalidate();
    }

    /// The positioned panels in depth-first layout order.
    #[must_use]
    pub fn panels(&self) -> &[PanelHandle] {
        &self.panels
    }

    /// Index of the focused panel.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_idx
    }

    /// Current size as (columns, rows).
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Whether the loop will keep running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop at the next iteration boundary.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Cycle focus by `direction` leaves with wrap-around. Positive is
    /// forward, negative is backward, zero does nothing.
    pub fn switch_panel(&mut self, direction: isize) {
        if direction == 0 || self.panels.is_empty() {
            return;
        }
        let len = self.panels.len() as isize;
        self.active_idx = (self.active_idx as isize + direction).rem_euclid(len) as usize;
        self.queue_panel_switch_hook();
    }

    /// Focus the panel whose title or decimal index matches `name`.
    /// Returns whether a panel matched.
    pub fn focus_panel(&mut self, name: &str) -> bool {
        for (i, panel) in self.panels.iter().enumerate() {
            if panel.borrow().base().title == name || i.to_string() == name {
                self.active_idx = i;
                self.queue_panel_switch_hook();
                return true;
            }
        }
        false
    }

    /// Record the focus change and fire the hook if the handler is home.
    fn queue_panel_switch_hook(&mut self) {
        let name = {
            let panel = self.panels[self.active_idx].borrow();
            let title = &panel.base().title;
            if title.is_empty() {
                self.active_idx.to_string()
            } else {
                title.clone()
            }
        };
        tracing::trace!(panel = %name, "focus switched");
        self.pending_switch = Some(name);
        self.flush_panel_switch_hook();
    }

    /// Deliver a deferred focus-change hook once the handler is back.
    fn flush_panel_switch_hook(&mut self) {
        if self.pending_switch.is_none() {
            return;
        }
        if let Some(mut handler) = self.handler.take() {
            if let Some(name) = self.pending_switch.take() {
                handler.on_panel_switch(self, &name);
            }
            self.handler = Some(handler);
        }
    }

    /// Whether any panel has requested shutdown.
    fn any_panel_stopping(&self) -> bool {
        self.panels
            .iter()
            .any(|panel| panel.borrow().base().is_stopping())
    }

    /// Deliver the one permissible non-event message so panels can
    /// pre-activate before the first frame.
    fn pre_activate(&mut self) {
        for panel in &self.panels {
            let _ = panel.borrow_mut().update(&InputMessage::EMPTY);
        }
    }

    /// Route one message: active panel first, then the global handler.
    fn dispatch(&mut self, msg: &InputMessage) -> io::Result<()> {
        let active = self.panels.get(self.active_idx).cloned();
        let (handled, redraw) = match active {
            Some(panel) => panel.borrow_mut().update(msg),
            None => (false, false),
        };
        if redraw {
            // Redraw everything: sibling panels may share the state that
            // just changed.
            self.draw()?;
        }
        if handled {
            return Ok(());
        }

        if let Some(mut handler) = self.handler.take() {
            let redraw = handler.update_global(self, msg);
            self.handler = Some(handler);
            self.flush_panel_switch_hook();
            if redraw {
                self.draw()?;
            }
        }
        Ok(())
    }

    /// Draw one frame. Headless apps skip output entirely.
    fn draw(&mut self) -> io::Result<()> {
        if self.headless {
            return Ok(());
        }
        self.layout_panels();
        let status = self
            .handler
            .as_ref()
            .map(|handler| handler.status())
            .unwrap_or_default();
        self.renderer.render(
            &mut io::stdout().lock(),
            &self.panels,
            self.active_idx,
            &status,
            self.cols,
            self.rows,
        )
    }

    /// Re-query the size after SIGWINCH and redraw from scratch.
    fn handle_resize(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal_size().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "resize size query failed, keeping current size");
            (self.cols, self.rows)
        });
        tracing::debug!(cols, rows, "terminal resized");
        self.cols = cols;
        self.rows = rows;
        self.layout_panels();
        self.renderer.invalidate();
        self.draw()
    }

    /// Run the interactive loop on the real terminal.
    ///
    /// Raw mode and the signal watcher are acquired up front; failures are
    /// logged and the loop proceeds degraded rather than aborting. On any
    /// exit path the cursor is shown, the screen cleared, and raw mode
    /// restored by the guard's drop.
    ///
    /// # Errors
    ///
    /// Propagates terminal write failures.
    #[cfg(unix)]
    pub fn run(&mut self) -> io::Result<()> {
        let raw_guard = match trellis_tty::RawModeGuard::enter() {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::warn!(error = %e, "could not enable raw mode");
                None
            }
        };
        let watcher = match trellis_tty::SignalWatcher::spawn() {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!(error = %e, "could not watch signals");
                None
            }
        };

        let stdin = io::stdin().lock();
        let mut input = InputReader::new(stdin);
        let result = self.event_loop(&mut input, watcher.as_ref());

        // Cleanup runs on success and failure alike; raw mode is restored
        // when the guard drops.
        let mut out = io::stdout().lock();
        let _ = show_cursor(&mut out);
        let _ = clear_screen(&mut out);
        let _ = out.write_all(RESET.as_bytes());
        let _ = out.flush();
        drop(watcher);
        drop(raw_guard);

        result
    }

    #[cfg(unix)]
    fn event_loop<R: Read>(
        &mut self,
        input: &mut InputReader<R>,
        watcher: Option<&trellis_tty::SignalWatcher>,
    ) -> io::Result<()> {
        {
            let mut out = io::stdout().lock();
            hide_cursor(&mut out)?;
            out.flush()?;
        }
        self.pre_activate();
        self.draw()?;

        while self.running {
            if self.any_panel_stopping() {
                tracing::debug!("panel requested stop");
                break;
            }
            if let Some(watcher) = watcher {
                if watcher.should_terminate() {
                    tracing::info!("terminating on signal");
                    break;
                }
                if watcher.take_resize() {
                    self.handle_resize()?;
                }
            }
            match input.next_message() {
                Ok(msg) => self.dispatch(&msg)?,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::info!("input stream closed");
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed, retrying");
                    std::thread::sleep(READ_RETRY_DELAY);
                }
            }
        }
        Ok(())
    }

    /// Drive the dispatch pipeline from a byte script until the script
    /// runs out or the app stops. Pre-activation and the initial draw
    /// happen exactly as in [`App::run`]; with a headless app nothing is
    /// written anywhere.
    ///
    /// # Errors
    ///
    /// Propagates draw failures (none in headless mode).
    pub fn run_script(&mut self, script: &[u8]) -> io::Result<()> {
        let mut input = InputReader::new(io::Cursor::new(script.to_vec()));
        self.pre_activate();
        self.draw()?;

        while self.running {
            if self.any_panel_stopping() {
                break;
            }
            match input.next_message() {
                Ok(msg) => self.dispatch(&msg)?,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(_) => break,
            }
        }
        Ok(())
    }

    /// Dispatch a single already-parsed message, as the loop would.
    ///
    /// # Errors
    ///
    /// Propagates draw failures (none in headless mode).
    pub fn feed_message(&mut self, msg: &InputMessage) -> io::Result<()> {
        self.dispatch(msg)
    }
}
