//! Repository integration tests against a disposable PostgreSQL container
//!
//! These verify the persistence guarantees of the operation layer: identifier
//! assignment, round-trips, constraint surfacing, and explicit absence.
//! They need a local Docker daemon:
//!
//! ```bash
//! cargo test -p infra_db --features db-tests
//! ```

#![cfg(feature = "db-tests")]

use infra_db::repositories::{records, stocks};
use infra_db::DatabaseError;
use test_utils::{seed_stock, stock_record, trading_day, TestDatabase};

#[tokio::test]
async fn insert_assigns_a_fresh_identifier() {
    let db = TestDatabase::new().await.expect("test database");
    let mut conn = db.pool.acquire().await.expect("session");

    let first = records::insert(&mut conn, &stock_record("GTCO", trading_day(2024, 1, 2)))
        .await
        .expect("first insert");
    let second = records::insert(&mut conn, &stock_record("GTCO", trading_day(2024, 1, 3)))
        .await
        .expect("second insert");

    assert!(first.id > 0);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn concurrent_inserts_never_share_an_identifier() {
    let db = TestDatabase::new().await.expect("test database");

    let pool_a = db.pool.clone();
    let pool_b = db.pool.clone();

    let (a, b) = tokio::join!(
        async move {
            let mut conn = pool_a.acquire().await.expect("session a");
            records::insert(&mut conn, &stock_record("GTCO", trading_day(2024, 1, 2)))
                .await
                .expect("insert a")
        },
        async move {
            let mut conn = pool_b.acquire().await.expect("session b");
            records::insert(&mut conn, &stock_record("DANGCEM", trading_day(2024, 1, 2)))
                .await
                .expect("insert b")
        },
    );

    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn create_then_read_round_trips_all_fields() {
    let db = TestDatabase::new().await.expect("test database");
    let mut conn = db.pool.acquire().await.expect("session");

    let input = stock_record("ZENITHBANK", trading_day(2024, 1, 2));
    let created = records::insert(&mut conn, &input).await.expect("insert");

    let fetched = records::get(&mut conn, created.id)
        .await
        .expect("get")
        .expect("record exists");

    assert_eq!(fetched, created);
    assert_eq!(fetched.symbol, input.symbol);
    assert_eq!(fetched.date, input.date);
    assert_eq!(fetched.open, input.open);
    assert_eq!(fetched.high, input.high);
    assert_eq!(fetched.low, input.low);
    assert_eq!(fetched.close, input.close);
    assert_eq!(fetched.volume, input.volume);
}

#[tokio::test]
async fn duplicate_symbol_and_date_surfaces_as_duplicate_entry() {
    let db = TestDatabase::new().await.expect("test database");
    let mut conn = db.pool.acquire().await.expect("session");

    let input = stock_record("GTCO", trading_day(2024, 1, 2));
    records::insert(&mut conn, &input).await.expect("first insert");

    let err = records::insert(&mut conn, &input)
        .await
        .expect_err("second insert must fail");

    assert!(matches!(err, DatabaseError::DuplicateEntry(_)));
    assert!(err.is_constraint_violation());

    // The failed insert persisted nothing
    let rows = records::daily_for_symbol(&mut conn, "GTCO").await.expect("query");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn read_of_unknown_identifier_is_none() {
    let db = TestDatabase::new().await.expect("test database");
    let mut conn = db.pool.acquire().await.expect("session");

    let absent = records::get(&mut conn, 999_999).await.expect("get");
    assert!(absent.is_none());
}

#[tokio::test]
async fn related_matches_sector_and_excludes_self() {
    let db = TestDatabase::new().await.expect("test database");

    let banks_a = seed_stock(&db.pool, "GTCO", Some("Financials")).await.expect("seed");
    let banks_b = seed_stock(&db.pool, "ZENITHBANK", Some("Financials")).await.expect("seed");
    seed_stock(&db.pool, "DANGCEM", Some("Industrials")).await.expect("seed");

    let mut conn = db.pool.acquire().await.expect("session");
    let related = stocks::related(&mut conn, Some("Financials"), banks_a, 10)
        .await
        .expect("related");

    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, banks_b);
}

#[tokio::test]
async fn ensure_symbol_is_idempotent() {
    let db = TestDatabase::new().await.expect("test database");
    let mut conn = db.pool.acquire().await.expect("session");

    let first = stocks::ensure_symbol(&mut conn, "GTCO").await.expect("first");
    let second = stocks::ensure_symbol(&mut conn, "GTCO").await.expect("second");

    assert_eq!(first.id, second.id);
}
