//! Connection pool integration tests
//!
//! A pool bounded to one connection makes any leaked connection visible: the
//! next operation would wait out the acquire timeout and fail.

mod helpers;

use std::time::Duration;

use kahoot_store::database::schema::tables;
use kahoot_store::database::DatabaseService;
use kahoot_store::{ErrorKind, StoreError};
use serial_test::serial;

use helpers::*;

#[tokio::test]
#[serial]
async fn test_connections_are_released_after_failures() {
    let test_db = TestDatabase::new().await;
    let lookups = create_lookups(&test_db.db).await;

    let pool = test_db.pool_with_max(1, Duration::from_secs(2)).await;
    let db = DatabaseService::new(pool.clone());

    db.users.create(user_request("ann", lookups)).await.expect("create ann");
    for _ in 0..5 {
        assert!(db.users.get(999).await.unwrap_err().is_not_found());
        assert_eq!(
            db.users.create(user_request("ann", lookups)).await.unwrap_err().kind(),
            ErrorKind::UniquenessViolation
        );
        assert_eq!(
            db.kahoots
                .create(kahoot_request("Capitals", 99))
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::ReferenceViolation
        );
    }

    let users = db.users.list().await.expect("pool still has its connection");
    assert_eq!(users.len(), 1);
    assert!(pool.status().size <= 1);
    pool.close().await;
}

#[tokio::test]
#[serial]
async fn test_exhausted_pool_times_out_as_storage_fault() {
    let test_db = TestDatabase::new().await;

    let pool = test_db.pool_with_max(1, Duration::from_millis(500)).await;
    let db = DatabaseService::new(pool.clone());

    let held = pool.acquire().await.expect("acquire");
    assert_eq!(pool.status().in_use(), 1);

    let error = db.groups.list().await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::StorageFault);
    assert!(matches!(error, StoreError::StorageFault(sqlx::Error::PoolTimedOut)));

    // release reports the pool as it stood while the connection was held
    let before = pool.release(held);
    assert_eq!(before.in_use(), 1);
    assert_eq!(before.max_connections, 1);
    assert!(db.groups.list().await.expect("released").is_empty());
    pool.close().await;
}

#[tokio::test]
#[serial]
async fn test_concurrent_operations_share_a_small_pool() {
    let test_db = TestDatabase::new().await;
    let lookups = create_lookups(&test_db.db).await;

    let pool = test_db.pool_with_max(2, Duration::from_secs(10)).await;
    let db = DatabaseService::new(pool.clone());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let db = db.clone();
        let request = fake_user_request(lookups);
        handles.push(tokio::spawn(async move { db.users.create(request).await }));
    }
    for handle in handles {
        handle.await.expect("task").expect("create");
    }

    assert_eq!(test_db.count_records(tables::USERS).await, 8);
    assert!(pool.status().size <= 2);
    pool.close().await;
}

#[tokio::test]
#[serial]
async fn test_health_check_and_reset() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    db.health_check().await.expect("healthy");
    let status = db.pool_status();
    assert_eq!(status.max_connections, 5);
    assert!(status.size >= 1);

    db.languages.create("English").await.expect("language");
    db.languages.create("Swedish").await.expect("language");
    db.reset().await.expect("reset");
    assert_eq!(test_db.count_records(tables::LANGUAGES).await, 0);

    // identities restart after a reset
    assert_eq!(db.languages.create("sv-SE").await.expect("language").id, 1);

    // setup is idempotent and records the migration once
    db.setup().await.expect("second setup");
    assert_eq!(test_db.count_records("_sqlx_migrations").await, 1);
    assert_eq!(test_db.count_records(tables::LANGUAGES).await, 1);
}
