//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s and keeps the
//! grid cursor used to pick tiles from the keyboard. Independent of any
//! rendering code.

pub mod cursor;
pub mod map;

pub use verbos_types as types;

pub use cursor::GridCursor;
pub use map::{map_key, should_quit};
