//! Business logic services for the Pour Risk Assessment service

pub mod assessment;
pub mod dispatch;
pub mod narrative;

pub use assessment::AssessmentService;
pub use dispatch::{AssessmentDispatcher, DispatchReport, DispatchStatus};
pub use narrative::{NarrativeComposer, NarrativeContext};
