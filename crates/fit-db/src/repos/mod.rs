//! Repository modules for fitgen entities.
//!
//! Each module adds methods to `FitDb` via `impl FitDb` blocks.

pub mod catalog;
pub mod routine;
pub mod user;
