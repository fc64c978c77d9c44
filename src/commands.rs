pub mod analyze;
pub mod batch;
pub mod common;
pub mod reverse;
