//! Domain models for the Pour Risk Assessment service

pub mod assessment;
pub mod risk;
pub mod weather;

pub use assessment::*;
pub use risk::*;
pub use weather::*;
