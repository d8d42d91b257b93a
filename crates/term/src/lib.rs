//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal play. It
//! renders into a simple framebuffer that is diffed and flushed to the
//! terminal, avoiding any widget/layout framework.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Share one layout between drawing and mouse hit-testing
//! - Redraw only what changed

pub mod fb;
pub mod renderer;
pub mod session_view;
pub mod throttle;

pub use verbos_core as core;
pub use verbos_types as types;

pub use fb::{wrap_text, Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use session_view::{SessionView, TileRect, Viewport};
pub use throttle::{frame_fingerprint, RenderThrottle};
