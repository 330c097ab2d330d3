#![forbid(unsafe_code)]

//! Core input and geometry types for trellis.
//!
//! This crate holds the pieces every other trellis crate builds on:
//!
//! - [`event`] - the [`InputMessage`](event::InputMessage) type, named keys,
//!   and the modifier set
//! - [`input_parser`] - a blocking byte-stream reader that decodes terminal
//!   escape sequences into messages
//! - [`geometry`] - the [`Rect`](geometry::Rect) cell rectangle assigned to
//!   panels by the layout pass

pub mod event;
pub mod geometry;
pub mod input_parser;

pub use event::{InputKind, InputMessage, Key, Modifiers};
pub use geometry::Rect;
pub use input_parser::InputReader;
