//! Report module - stdout inspection and static insight text

mod insights;
mod inspector;

pub use insights::Reporter;
pub use inspector::Inspector;
