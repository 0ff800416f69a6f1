//! HTTP handlers for the Pour Risk Assessment service

pub mod assess;
pub mod health;

pub use assess::*;
pub use health::*;
