//! Backend test support utilities
//!
//! Shared by the backend's integration tests: problem-details assertions,
//! unique test data, and unified logging initialization.

pub mod problem_details;
pub mod test_logging;
pub mod unique_helpers;
