//! Embedded PostgreSQL databases for adapter tests.
//!
//! All tests in a binary share one cluster started by
//! `pg-embed-setup-unpriv`. Each test gets its own temporary database,
//! dropped with its handle, so suites can run in parallel without seeing
//! each other's rows. Schema setup goes through the crate's own migration
//! runner.

use std::thread;
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

const CLUSTER_RETRIES: usize = 5;
const CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Process-wide cluster, retrying transient bootstrap failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= CLUSTER_RETRIES => {
                return Err(format!(
                    "start cluster: attempt {attempt}/{CLUSTER_RETRIES}: {error:?}"
                ));
            }
            Err(_) => {
                thread::sleep(CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Fresh empty database on the shared cluster.
pub fn temporary_database() -> Result<TemporaryDatabase, String> {
    let name = format!("test_{}", Uuid::new_v4().simple());
    shared_cluster()?
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))
}
