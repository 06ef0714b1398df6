//! Shared test support for the daifugo workspace.
//!
//! Integration test binaries cannot reach the crate's `#[cfg(test)]` modules,
//! so the logging bootstrap and unique-name helpers live here.

pub mod test_logging;

use ulid::Ulid;

/// Generate a unique string with the given prefix, e.g. `lobby-01HV...`.
///
/// Room names are not unique keys in the store, but unique names keep
/// test output readable when several tests share one process.
///
/// ```
/// use daifugo_test_support::unique_str;
///
/// let a = unique_str("room");
/// let b = unique_str("room");
/// assert_ne!(a, b);
/// assert!(a.starts_with("room-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
