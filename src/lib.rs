//! Tetrion (workspace facade crate).
//!
//! Re-exports the engine crates under one roof as
//! `tetrion::{types, core, engine}` so hosts and integration tests depend on
//! a single package.

pub use tetrion_core as core;
pub use tetrion_engine as engine;
pub use tetrion_types as types;
