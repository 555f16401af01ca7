//! # fit-routine
//!
//! AI-assisted workout routine generation.
//!
//! [`RoutineGenerator::generate_routine`] loads the user's profile and the
//! exercise catalog, composes a prompt, asks a [`fit_model::GenerativeModel`]
//! for a routine, validates every exercise it names against the catalog, and
//! persists the survivors as one routine in a single transaction.
//!
//! Each stage lives in its own module and can be used alone:
//!
//! - [`context`]: user + catalog loading
//! - [`prompt`]: deterministic prompt rendering
//! - [`validate`]: parsing and whitelist normalization of the model's reply
//! - [`guard`]: one in-flight generation per user

pub mod context;
pub mod error;
pub mod generator;
pub mod guard;
pub mod prompt;
pub mod validate;

pub use error::{GenerationError, Stage};
pub use generator::RoutineGenerator;
