//! Shared types and models for the Pour Risk Assessment service
//!
//! This crate contains the pure domain core: weather aggregation, risk
//! classification, assessment records and request validation. It performs
//! no I/O and exposes no async surface, so every function here is directly
//! testable.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
