//! Shared helpers for backend integration tests: idempotent logging setup,
//! Problem Details assertions and unique test data.

pub mod problem_details;
pub mod test_logging;
pub mod unique_helpers;
