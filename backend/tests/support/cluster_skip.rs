//! Skip policy for suites that need the embedded PostgreSQL cluster.
//!
//! Set `SKIP_TEST_CLUSTER` to `1`, `true` or `yes` on machines that cannot
//! start PostgreSQL; anywhere else a failed bootstrap fails the test.

/// Whether `SKIP_TEST_CLUSTER` asks for cluster-backed tests to be skipped.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster setup failure.
///
/// Returns `None` after printing a skip marker when skipping is enabled.
///
/// # Panics
///
/// Panics with `reason` when skipping is not enabled, so CI breakage is not
/// masked.
#[allow(clippy::print_stderr, reason = "skip marker is grepped from test logs")]
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
