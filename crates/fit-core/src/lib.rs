//! # fit-core
//!
//! Core types and error types for fitgen.
//!
//! This crate provides the foundational types shared across all fitgen crates:
//! - Entity structs for users, the exercise catalog, and persisted routines
//! - The validated exercise record that is the only shape allowed into the store
//! - Experience and difficulty enums with the experience → difficulty mapping
//! - Outbound response types for the generation trigger
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
