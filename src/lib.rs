//! Verbos Reflexivos (workspace facade crate).
//!
//! Re-exports the engine, input, and terminal crates under
//! `verbos_reflexivos::{core,input,term,types}` and hosts the pieces that tie
//! them together: the [`App`] controller, configuration, and logging setup.

pub use verbos_core as core;
pub use verbos_input as input;
pub use verbos_term as term;
pub use verbos_types as types;

pub mod app;
pub mod config;
pub mod logging;

pub use app::App;
pub use config::{AppConfig, ConfigError};
