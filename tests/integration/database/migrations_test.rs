//! Migration tests

use serial_test::serial;

use crate::common::{create_test_pool, run_migrations};

#[tokio::test]
#[serial]
#[ignore]
async fn migrations_apply_cleanly_and_rerun() {
    let pool = create_test_pool().await;

    run_migrations(&pool).await.expect("first run");
    // Reapplying must be a no-op, not a failure.
    run_migrations(&pool).await.expect("second run");
}
