//! Test helpers for generating unique test data
//!
//! ULID suffixes keep rows created by different tests from colliding on
//! unique columns such as `players.email`.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use courtside_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// let b = unique_str("player");
/// assert_ne!(a, b);
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address in the format `{prefix}-{ulid}@example.test`.
///
/// ULIDs are uppercase; the result is lowercased so it survives email
/// normalization unchanged.
///
/// ```
/// use courtside_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("alice");
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
