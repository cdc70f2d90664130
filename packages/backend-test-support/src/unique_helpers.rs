//! Unique test values backed by ULIDs.

use ulid::Ulid;

/// `{prefix}-{ulid}`; suitable for usernames and other unique text columns.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("ash");
/// let b = unique_username("ash");
/// assert_ne!(a, b);
/// assert!(a.starts_with("ash-"));
/// ```
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("misty");
/// assert!(email.starts_with("misty-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}
