//! Shared helpers for the sevens integration tests.
//!
//! - `logging::init()` installs a test-writer subscriber exactly once
//! - `unique_str()` produces collision-free names for fixtures on disk

pub mod logging;

use ulid::Ulid;

/// Unique string in the form `{prefix}-{ulid}`.
///
/// ```
/// use sevens_test_support::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
