#![forbid(unsafe_code)]

//! Terminal input parsing.
//!
//! [`InputReader`] wraps a blocking byte source (normally stdin) and decodes
//! one [`InputMessage`] at a time:
//!
//! - printable ASCII and multi-byte UTF-8 become character messages
//! - `0x09`/`0x0D`/`0x20`/`0x7F` become Tab/Enter/Space/Backspace
//! - other control bytes become Ctrl+letter (`0x03` is Ctrl+'c')
//! - `ESC [` starts a CSI sequence; parameters are split on `;`, with the
//!   trailing parameter decoded as the xterm modifier mask
//! - `ESC O P`..`ESC O S` (and the bare `ESC P`..`ESC S` spelling) are F1-F4
//!
//! Anything that starts with ESC but does not match the grammar degrades to
//! a bare Escape message carrying the raw bytes, so applications can log or
//! pass unknown sequences through. Once a sequence has begun, read failures
//! end it with the same fallback; only the failure to read the *first* byte
//! of a message propagates to the caller.

use std::io::{self, Read};

use smallvec::smallvec;

use crate::event::{InputMessage, Key, Modifiers, RawBytes};

/// Upper bound on CSI parameter bytes, so a hostile stream cannot grow the
/// buffer without limit.
const MAX_CSI_LEN: usize = 256;

/// Decodes a byte stream into [`InputMessage`] values.
#[derive(Debug)]
pub struct InputReader<R> {
    inner: R,
}

impl<R: Read> InputReader<R> {
    /// Wrap a blocking byte source.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Consume the reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Block until the next complete message.
    ///
    /// # Errors
    ///
    /// Propagates the error from reading the first byte of a message. The
    /// event loop treats `UnexpectedEof` as end of input and retries
    /// everything else after a short sleep.
    pub fn next_message(&mut self) -> io::Result<InputMessage> {
        loop {
            let byte = self.read_byte()?;
            if let Some(msg) = self.decode(byte) {
                return Ok(msg);
            }
        }
    }

    /// Read exactly one byte, mapping a closed stream to `UnexpectedEof`.
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
                Ok(_) => return Ok(buf[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Read a continuation byte mid-sequence. Errors end the sequence.
    fn try_byte(&mut self) -> Option<u8> {
        self.read_byte().ok()
    }

    /// Decode a message starting from `byte`. Returns `None` for bytes that
    /// produce no message (stray continuation bytes, malformed UTF-8).
    fn decode(&mut self, byte: u8) -> Option<InputMessage> {
        match byte {
            0x1B => Some(self.decode_escape()),
            0x09 => Some(InputMessage::key(Key::Tab, smallvec![byte])),
            0x0D => Some(InputMessage::key(Key::Enter, smallvec![byte])),
            0x20 => Some(InputMessage::key(Key::Space, smallvec![byte])),
            0x7F => Some(InputMessage::key(Key::Backspace, smallvec![byte])),
            0x21..=0x7E => Some(InputMessage::char(byte as char, smallvec![byte])),
            // Remaining control bytes: Ctrl+letter, 0x03 -> Ctrl+'c'.
            0x00..=0x1F => Some(
                InputMessage::char((byte + 0x60) as char, smallvec![byte])
                    .with_modifiers(Modifiers::CTRL),
            ),
            0xC2..=0xF4 => self.decode_utf8(byte),
            // Stray continuation or invalid lead bytes.
            _ => None,
        }
    }

    /// Decode the bytes after a leading ESC.
    fn decode_escape(&mut self) -> InputMessage {
        let mut raw: RawBytes = smallvec![0x1B];
        let Some(byte) = self.try_byte() else {
            return InputMessage::key(Key::Escape, raw);
        };
        raw.push(byte);

        match byte {
            b'[' => self.decode_csi(raw),
            b'O' => match self.try_byte() {
                Some(b @ b'P'..=b'S') => {
                    raw.push(b);
                    InputMessage::key(Key::F(b - b'P' + 1), raw)
                }
                b => {
                    if let Some(b) = b {
                        raw.push(b);
                    }
                    fallback(raw)
                }
            },
            b'P'..=b'S' => InputMessage::key(Key::F(byte - b'P' + 1), raw),
            _ => fallback(raw),
        }
    }

    /// Decode a CSI sequence: parameter bytes up to a final in `A..Z` or `~`.
    fn decode_csi(&mut self, mut raw: RawBytes) -> InputMessage {
        let mut params = Vec::new();
        let final_byte = loop {
            let Some(byte) = self.try_byte() else {
                return fallback(raw);
            };
            raw.push(byte);
            match byte {
                b'A'..=b'Z' | b'~' => break byte,
                _ if params.len() >= MAX_CSI_LEN => return fallback(raw),
                _ => params.push(byte),
            }
        };

        let Some(mut fields) = parse_params(&params) else {
            return fallback(raw);
        };

        // With two or more fields the last one is the xterm modifier mask.
        let mut modifiers = Modifiers::NONE;
        if fields.len() >= 2 {
            modifiers = Modifiers::from_csi_param(fields.pop().unwrap_or(1));
        }

        let key = match final_byte {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            b'H' => Key::Home,
            b'F' => Key::End,
            b'Z' => {
                modifiers |= Modifiers::SHIFT;
                Key::Tab
            }
            b'~' => match fields.first().copied() {
                Some(1) => Key::Home,
                Some(2) => Key::Insert,
                Some(3) => Key::Delete,
                Some(4) => Key::End,
                Some(5) => Key::PageUp,
                Some(6) => Key::PageDown,
                Some(9) => Key::Tab,
                _ => return fallback(raw),
            },
            _ => return fallback(raw),
        };

        InputMessage::key(key, raw).with_modifiers(modifiers)
    }

    /// Decode a UTF-8 sequence from its lead byte. Malformed sequences are
    /// dropped rather than surfaced as mojibake.
    fn decode_utf8(&mut self, lead: u8) -> Option<InputMessage> {
        let len = match lead {
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            _ => 4,
        };
        let mut buf: RawBytes = smallvec![lead];
        for _ in 1..len {
            let byte = self.try_byte()?;
            if byte & 0xC0 != 0x80 {
                tracing::debug!(byte, "malformed utf-8 continuation, dropping sequence");
                return None;
            }
            buf.push(byte);
        }
        let c = std::str::from_utf8(&buf).ok()?.chars().next()?;
        Some(InputMessage::char(c, buf))
    }
}

/// Split CSI parameter bytes on `;` into numeric fields.
///
/// An empty buffer is a valid zero-field list; any non-numeric field makes
/// the whole sequence unrecognised.
fn parse_params(params: &[u8]) -> Option<Vec<u32>> {
    if params.is_empty() {
        return Some(Vec::new());
    }
    let text = std::str::from_utf8(params).ok()?;
    text.split(';').map(|field| field.parse().ok()).collect()
}

/// Degrade an unrecognised sequence to a bare Escape carrying its bytes.
fn fallback(raw: RawBytes) -> InputMessage {
    tracing::debug!(raw = ?raw.as_slice(), "unrecognised escape sequence");
    InputMessage::key(Key::Escape, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InputKind;
    use std::io::Cursor;

    fn parse_all(bytes: &[u8]) -> Vec<InputMessage> {
        let mut reader = InputReader::new(Cursor::new(bytes.to_vec()));
        let mut out = Vec::new();
        while let Ok(msg) = reader.next_message() {
            out.push(msg);
        }
        out
    }

    fn parse_one(bytes: &[u8]) -> InputMessage {
        let msgs = parse_all(bytes);
        assert_eq!(msgs.len(), 1, "expected one message from {bytes:?}");
        msgs.into_iter().next().unwrap()
    }

    #[test]
    fn printable_ascii_is_a_char_message() {
        let msg = parse_one(b"x");
        assert!(msg.is_plain_char('x'));
        assert_eq!(msg.raw.as_slice(), b"x");
    }

    #[test]
    fn named_single_bytes() {
        assert!(parse_one(b"\t").is_plain_key(Key::Tab));
        assert!(parse_one(b"\r").is_plain_key(Key::Enter));
        assert!(parse_one(b" ").is_plain_key(Key::Space));
        assert!(parse_one(b"\x7f").is_plain_key(Key::Backspace));
    }

    #[test]
    fn control_bytes_become_ctrl_letters() {
        let msg = parse_one(b"\x03");
        assert!(msg.is_char('c'));
        assert_eq!(msg.modifiers, Modifiers::CTRL);

        let msg = parse_one(b"\x01");
        assert!(msg.is_char('a'));
        assert_eq!(msg.modifiers, Modifiers::CTRL);

        // 0x0A is not Enter; it maps like any other control byte.
        let msg = parse_one(b"\x0a");
        assert!(msg.is_char('j'));
        assert_eq!(msg.modifiers, Modifiers::CTRL);
    }

    #[test]
    fn arrow_keys() {
        assert!(parse_one(b"\x1b[A").is_plain_key(Key::Up));
        assert!(parse_one(b"\x1b[B").is_plain_key(Key::Down));
        assert!(parse_one(b"\x1b[C").is_plain_key(Key::Right));
        assert!(parse_one(b"\x1b[D").is_plain_key(Key::Left));
    }

    #[test]
    fn home_end_variants() {
        assert!(parse_one(b"\x1b[H").is_plain_key(Key::Home));
        assert!(parse_one(b"\x1b[F").is_plain_key(Key::End));
        assert!(parse_one(b"\x1b[1~").is_plain_key(Key::Home));
        assert!(parse_one(b"\x1b[4~").is_plain_key(Key::End));
    }

    #[test]
    fn tilde_navigation_keys() {
        assert!(parse_one(b"\x1b[2~").is_plain_key(Key::Insert));
        assert!(parse_one(b"\x1b[3~").is_plain_key(Key::Delete));
        assert!(parse_one(b"\x1b[5~").is_plain_key(Key::PageUp));
        assert!(parse_one(b"\x1b[6~").is_plain_key(Key::PageDown));
        assert!(parse_one(b"\x1b[9~").is_plain_key(Key::Tab));
    }

    #[test]
    fn back_tab_is_shift_tab() {
        let msg = parse_one(b"\x1b[Z");
        assert!(msg.is_key(Key::Tab));
        assert!(msg.has_modifier(Modifiers::SHIFT));

        let msg = parse_one(b"\x1b[1;2Z");
        assert!(msg.is_key(Key::Tab));
        assert!(msg.has_modifier(Modifiers::SHIFT));
    }

    #[test]
    fn modified_arrows_carry_the_mask() {
        // ESC [ 1 ; 5 C = Ctrl+Right (xterm value 5 = mask 4).
        let msg = parse_one(b"\x1b[1;5C");
        assert!(msg.is_key(Key::Right));
        assert_eq!(msg.modifiers, Modifiers::CTRL);

        // ESC [ 3 ; 2 ~ = Shift+Delete.
        let msg = parse_one(b"\x1b[3;2~");
        assert!(msg.is_key(Key::Delete));
        assert_eq!(msg.modifiers, Modifiers::SHIFT);
    }

    #[test]
    fn function_keys_both_spellings() {
        assert!(parse_one(b"\x1bOP").is_plain_key(Key::F(1)));
        assert!(parse_one(b"\x1bOQ").is_plain_key(Key::F(2)));
        assert!(parse_one(b"\x1bOR").is_plain_key(Key::F(3)));
        assert!(parse_one(b"\x1bOS").is_plain_key(Key::F(4)));
        assert!(parse_one(b"\x1bP").is_plain_key(Key::F(1)));
        assert!(parse_one(b"\x1bS").is_plain_key(Key::F(4)));
    }

    #[test]
    fn unknown_sequences_fall_back_to_escape_with_raw() {
        let msg = parse_one(b"\x1b[10~");
        assert!(msg.is_key(Key::Escape));
        assert_eq!(msg.raw.as_slice(), b"\x1b[10~");

        let msg = parse_one(b"\x1b[G");
        assert!(msg.is_key(Key::Escape));
        assert_eq!(msg.raw.as_slice(), b"\x1b[G");

        let msg = parse_one(b"\x1bx");
        assert!(msg.is_key(Key::Escape));
        assert_eq!(msg.raw.as_slice(), b"\x1bx");
    }

    #[test]
    fn bare_escape_at_end_of_stream() {
        let msg = parse_one(b"\x1b");
        assert!(msg.is_key(Key::Escape));
        assert_eq!(msg.raw.as_slice(), b"\x1b");
    }

    #[test]
    fn non_numeric_csi_params_fall_back() {
        let msg = parse_one(b"\x1b[<0;3;4M");
        assert!(msg.is_key(Key::Escape));
    }

    #[test]
    fn utf8_characters_round_trip() {
        let msg = parse_one("é".as_bytes());
        assert!(msg.is_plain_char('é'));
        let msg = parse_one("日".as_bytes());
        assert!(msg.is_plain_char('日'));
        let msg = parse_one("🦀".as_bytes());
        assert!(msg.is_plain_char('🦀'));
    }

    #[test]
    fn malformed_utf8_is_dropped() {
        // Lead byte followed by a printable instead of a continuation: the
        // sequence is dropped, the stream does not desync.
        let msgs = parse_all(&[0xC3, b'a', b'b']);
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].is_plain_char('b'));
    }

    #[test]
    fn interleaved_stream_keeps_ordering() {
        let msgs = parse_all(b"a\x1b[Bq");
        assert_eq!(msgs.len(), 3);
        assert!(msgs[0].is_plain_char('a'));
        assert!(msgs[1].is_plain_key(Key::Down));
        assert!(msgs[2].is_plain_char('q'));
    }

    #[test]
    fn eof_on_first_byte_is_unexpected_eof() {
        let mut reader = InputReader::new(Cursor::new(Vec::new()));
        let err = reader.next_message().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn oversized_csi_parameter_buffer_falls_back() {
        let mut bytes = b"\x1b[".to_vec();
        bytes.extend(std::iter::repeat(b'1').take(MAX_CSI_LEN + 8));
        bytes.push(b'A');
        let mut reader = InputReader::new(Cursor::new(bytes));
        let msg = reader.next_message().unwrap();
        assert!(msg.is_key(Key::Escape));
        assert_eq!(msg.kind, InputKind::Key(Key::Escape));
    }
}
