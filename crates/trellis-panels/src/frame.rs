#![forbid(unsafe_code)]

//! The border and title frame.
//!
//! [`wrap_frame`] takes a panel's drawn content and produces the full
//! `width x height` block the renderer emits: border glyphs, inlined
//! title, per-line truncation and padding. All measurement is
//! display-width based, so styled content and wide glyphs stay aligned.

use trellis_text::{display_width, pad_to_width, truncate_to_width};
use trellis_tty::{FG_CYAN, FG_WHITE, RESET};

use crate::panel::PanelBase;

/// Wrap `content` in the panel's frame.
///
/// Returns the newline-separated block of exactly `height` lines, each
/// `width` cells wide, or an empty string when either dimension is 2 or
/// less (the panel is unrenderable).
///
/// With a border the inner area is `(width-2) x (height-2)`; the title is
/// inlined as ` [Title] ` at column 1 of the top border when it fits in
/// `width-2` cells. Without a border the title, if any, occupies row 0 and
/// content begins below it. Content overflowing the inner height is
/// truncated with a final `...` line; lines overflowing the inner width
/// are truncated with a trailing `..`.
#[must_use]
pub fn wrap_frame(base: &PanelBase, content: &str, active: bool) -> String {
    let rect = base.rect();
    let (w, h) = (rect.width as usize, rect.height as usize);
    if w <= 2 || h <= 2 {
        return String::new();
    }

    if !base.border {
        return wrap_borderless(base, content, w, h);
    }

    let color = if active { FG_CYAN } else { FG_WHITE };
    let inner = w - 2;
    let content_lines = clip_lines(content, h - 2);

    let mut lines = Vec::with_capacity(h);
    lines.push(top_border(&base.title, color, inner));
    for line in &content_lines {
        lines.push(format!(
            "{color}│{RESET}{FG_WHITE}{}{RESET}{color}│{RESET}",
            pad_to_width(line, inner)
        ));
    }
    while lines.len() < h - 1 {
        lines.push(format!(
            "{color}│{RESET}{FG_WHITE}{}{RESET}{color}│{RESET}",
            " ".repeat(inner)
        ));
    }
    lines.push(format!("{color}└{}┘{RESET}", "─".repeat(inner)));

    lines.join("\n")
}

/// Top border with the title inlined when it fits.
fn top_border(title: &str, color: &str, inner: usize) -> String {
    if !title.is_empty() {
        let label = format!(" [{title}] ");
        let label_width = display_width(&label);
        if label_width <= inner {
            return format!("{color}┌{label}{}┐{RESET}", "─".repeat(inner - label_width));
        }
    }
    format!("{color}┌{}┐{RESET}", "─".repeat(inner))
}

/// The borderless variant: optional title row, then content rows.
fn wrap_borderless(base: &PanelBase, content: &str, w: usize, h: usize) -> String {
    let mut lines = Vec::with_capacity(h);
    if !base.title.is_empty() {
        lines.push(pad_to_width(&base.title, w));
    }
    let content_lines = clip_lines(content, h - lines.len());
    for line in &content_lines {
        lines.push(pad_to_width(line, w));
    }
    while lines.len() < h {
        lines.push(" ".repeat(w));
    }
    lines.join("\n")
}

/// Split content into lines clipped to `max` rows; when clipping happens
/// the last visible row becomes an ellipsis.
fn clip_lines(content: &str, max: usize) -> Vec<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    if lines.len() > max {
        lines.truncate(max);
        if let Some(last) = lines.last_mut() {
            *last = "...".to_string();
        }
    }
    lines
}
