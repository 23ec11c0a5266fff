//! Label generation services.

pub mod batch;
pub mod generator;

pub use batch::{BatchSummary, ItemFailure, run_batch};
pub use generator::{GenerateError, LabelGenerator};
