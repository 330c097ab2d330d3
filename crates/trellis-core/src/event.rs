#![forbid(unsafe_code)]

//! Input message types.
//!
//! An [`InputMessage`] is exactly one of a printable character or a named
//! key, plus an optional modifier set and the raw bytes that produced it.
//! Modifiers never change a message's identity: Ctrl+'a' and plain 'a' are
//! distinct messages that share the identity 'a'.

use bitflags::bitflags;
use smallvec::SmallVec;

/// Raw byte sequence attached to a message.
///
/// Escape sequences are short; eight inline bytes covers everything the
/// parser produces without a heap allocation.
pub type RawBytes = SmallVec<[u8; 8]>;

/// Named keys recognised by the input parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Insert key.
    Insert,
    /// Delete key.
    Delete,
    /// Enter/Return key.
    Enter,
    /// Tab key. Shift+Tab arrives as `Tab` with the SHIFT modifier.
    Tab,
    /// Space bar.
    Space,
    /// Backspace key.
    Backspace,
    /// Escape key. Also the fallback identity for unrecognised sequences.
    Escape,
    /// Function key (F1-F12).
    F(u8),
}

bitflags! {
    /// Modifier keys held during an input event.
    ///
    /// Bit layout follows the xterm CSI modifier mask: bit 0 Shift,
    /// bit 1 Alt, bit 2 Ctrl (the wire value is mask + 1).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b000;
        /// Shift key.
        const SHIFT = 0b001;
        /// Alt/Option key.
        const ALT   = 0b010;
        /// Control key.
        const CTRL  = 0b100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Modifiers {
    /// Decode the xterm CSI modifier parameter (wire value = mask + 1).
    ///
    /// Unknown high bits are dropped.
    #[must_use]
    pub fn from_csi_param(value: u32) -> Self {
        Self::from_bits_truncate(value.saturating_sub(1) as u8)
    }
}

/// The identity of an input message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The pre-activation placeholder delivered once per panel before the
    /// event loop starts. Matches no `is_char`/`is_key` query.
    None,
    /// A printable character.
    Char(char),
    /// A named key.
    Key(Key),
}

/// A structured input event: one character or one named key, with modifiers
/// and the raw bytes that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMessage {
    /// Exactly one variant: character or named key.
    pub kind: InputKind,
    /// Modifier keys held for this event.
    pub modifiers: Modifiers,
    /// Original bytes, kept for debugging and pass-through.
    pub raw: RawBytes,
}

impl InputMessage {
    /// The empty pre-activation message.
    pub const EMPTY: Self = Self {
        kind: InputKind::None,
        modifiers: Modifiers::NONE,
        raw: SmallVec::new_const(),
    };

    /// Create a character message with no modifiers.
    #[must_use]
    pub fn char(c: char, raw: RawBytes) -> Self {
        Self {
            kind: InputKind::Char(c),
            modifiers: Modifiers::NONE,
            raw,
        }
    }

    /// Create a named-key message with no modifiers.
    #[must_use]
    pub fn key(key: Key, raw: RawBytes) -> Self {
        Self {
            kind: InputKind::Key(key),
            modifiers: Modifiers::NONE,
            raw,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check for a specific character, regardless of modifiers.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.kind, InputKind::Char(ch) if ch == c)
    }

    /// Check for a specific named key, regardless of modifiers.
    #[must_use]
    pub fn is_key(&self, key: Key) -> bool {
        matches!(self.kind, InputKind::Key(k) if k == key)
    }

    /// Check for a character with no modifiers held.
    #[must_use]
    pub fn is_plain_char(&self, c: char) -> bool {
        self.is_char(c) && self.modifiers.is_empty()
    }

    /// Check for a named key with no modifiers held.
    #[must_use]
    pub fn is_plain_key(&self, key: Key) -> bool {
        self.is_key(key) && self.modifiers.is_empty()
    }

    /// Check whether a modifier is held.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifiers) -> bool {
        self.modifiers.contains(modifier)
    }

    /// The printable character, if this is a character message.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self.kind {
            InputKind::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl Default for InputMessage {
    fn default() -> Self {
        Self::EMPTY
    }
}
