#![forbid(unsafe_code)]

//! ANSI style and screen-control sequences used by the renderer and panels.

/// Clear the whole screen: `CSI 2 J`.
pub const CLEAR: &str = "\x1b[2J";
/// Move the cursor to the top-left: `CSI H`.
pub const CURSOR_HOME: &str = "\x1b[H";
/// Hide the cursor: `CSI ? 25 l`.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Show the cursor: `CSI ? 25 h`.
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Reset all attributes: `CSI 0 m`.
pub const RESET: &str = "\x1b[0m";
/// Bold.
pub const BOLD: &str = "\x1b[1m";
/// Reverse video.
pub const REVERSE: &str = "\x1b[7m";

/// White foreground.
pub const FG_WHITE: &str = "\x1b[37m";
/// Cyan foreground (active borders).
pub const FG_CYAN: &str = "\x1b[36m";
/// Yellow foreground (inactive highlight).
pub const FG_YELLOW: &str = "\x1b[33m";
/// Green foreground.
pub const FG_GREEN: &str = "\x1b[32m";
