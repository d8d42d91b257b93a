//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the vocabulary-matching rules and session state. It has
//! **zero dependencies** on UI or terminal I/O, making it:
//!
//! - **Deterministic**: Same seed deals identical rounds
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Can be driven by a terminal, a GUI, or a test harness
//!
//! # Module Structure
//!
//! - [`corpus`]: Built-in reflexive verb list and validated custom lists
//! - [`session`]: The matching state machine (deal, select, resolve, finish)
//! - [`snapshot`]: Render-facing copy of the session
//! - [`rng`]: Seeded LCG with an unbiased Fisher–Yates shuffle
//! - [`error`]: [`CoreError`]
//!
//! # Game Rules
//!
//! - **Deal**: 8 distinct entries are drawn per round, each becoming a source
//!   tile (the Spanish verb) and a target tile (its English gloss), shuffled
//! - **Pick**: the first tile waits; the second resolves the pair
//! - **Match**: same pair, different sides; the pair is solved for the round
//! - **Mistake**: anything else; counted, and the pair stays highlighted for
//!   1000ms before it is deselected
//! - **Finish**: the round ends when every pair is solved
//!
//! # Example
//!
//! ```
//! use verbos_core::{Corpus, Selection, Session};
//! use verbos_types::{Phase, Side};
//!
//! let mut session = Session::with_seed(Corpus::builtin(), 12345);
//! session.start_round().unwrap();
//! assert_eq!(session.tiles().len(), 16);
//!
//! let key = session.tiles()[0].pair_key.clone();
//! let src = session.find_tile(&key, Side::Source).unwrap().id;
//! let tgt = session.find_tile(&key, Side::Target).unwrap().id;
//!
//! assert_eq!(session.select_tile(src), Selection::Pending);
//! assert!(matches!(session.select_tile(tgt), Selection::Matched { .. }));
//! assert!(session.is_matched(&key));
//! assert_eq!(session.phase(), Phase::Playing);
//! ```
//!
//! # Timing
//!
//! The engine never sleeps. Call [`Session::tick`](session::Session::tick)
//! every frame with elapsed time, or fire clears from your own scheduler with
//! [`Session::expire_clear`](session::Session::expire_clear).

pub mod corpus;
pub mod error;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use verbos_types as types;

pub use corpus::Corpus;
pub use error::CoreError;
pub use rng::SimpleRng;
pub use session::{ClearTicket, Selection, Session, SessionConfig};
pub use snapshot::{SessionSnapshot, TileSnapshot};
