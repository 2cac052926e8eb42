//! Unique test data so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Unique address under the reserved `.test` TLD.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let a = unique_email("alice");
/// let b = unique_email("alice");
/// assert_ne!(a, b);
/// assert!(a.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_str(prefix).to_lowercase())
}
