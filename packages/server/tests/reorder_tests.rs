//! Integration tests for the ordered-collection reconciler.
//!
//! Pins the chosen persistence strategy: writes are applied one at a time in
//! batch order, the remaining batch is abandoned on the first failure, and
//! already-applied writes are never rolled back.

mod common;

use common::{create_download, create_news, fetch_display_order, TestHarness};
use marsul_core::domains::content::{
    apply_reorder, parse_reorder_payload, ContentError, OrderedCollection,
};
use serde_json::json;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn reorder_persists_submitted_ranks(ctx: &TestHarness) {
    create_news(&ctx.db_pool, "ro-a", "Artigo A", "", true, 1)
        .await
        .unwrap();
    create_news(&ctx.db_pool, "ro-b", "Artigo B", "", true, 2)
        .await
        .unwrap();

    let payload = json!({"items": [
        {"id": "ro-a", "display_order": 2},
        {"id": "ro-b", "display_order": 1},
    ]});
    let updates = parse_reorder_payload(&payload).unwrap();
    apply_reorder(OrderedCollection::News, &updates, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-a").await.unwrap(), 2);
    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-b").await.unwrap(), 1);

    // A listing ordered by rank now yields b before a
    let items = marsul_core::domains::content::models::NewsItem::list_published(&ctx.db_pool)
        .await
        .unwrap();
    let pos_a = items.iter().position(|i| i.id == "ro-a").unwrap();
    let pos_b = items.iter().position(|i| i.id == "ro-b").unwrap();
    assert!(pos_b < pos_a);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_id_last_write_wins(ctx: &TestHarness) {
    create_news(&ctx.db_pool, "ro-dup", "Artigo", "", true, 0)
        .await
        .unwrap();

    let payload = json!({"items": [
        {"id": "ro-dup", "display_order": 5},
        {"id": "ro-dup", "display_order": 1},
    ]});
    let updates = parse_reorder_payload(&payload).unwrap();
    apply_reorder(OrderedCollection::News, &updates, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-dup").await.unwrap(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn malformed_element_does_not_block_batch(ctx: &TestHarness) {
    create_news(&ctx.db_pool, "ro-m1", "Artigo 1", "", true, 1)
        .await
        .unwrap();
    create_news(&ctx.db_pool, "ro-m2", "Artigo 2", "", true, 2)
        .await
        .unwrap();

    let payload = json!({"items": [
        {"id": "ro-m1", "display_order": 10},
        {"display_order": 11},
        {"id": "ro-m2", "display_order": "top"},
        {"id": "ro-m2", "display_order": 12},
    ]});
    let updates = parse_reorder_payload(&payload).unwrap();
    apply_reorder(OrderedCollection::News, &updates, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-m1").await.unwrap(), 10);
    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-m2").await.unwrap(), 12);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn non_sequence_payload_is_rejected_before_any_write(ctx: &TestHarness) {
    create_news(&ctx.db_pool, "ro-ns", "Artigo", "", true, 7)
        .await
        .unwrap();

    let payload = json!({"items": {"id": "ro-ns", "display_order": 1}});
    let result = parse_reorder_payload(&payload);
    assert!(matches!(result, Err(ContentError::InvalidPayload(_))));

    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-ns").await.unwrap(), 7);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_id_is_not_an_error(ctx: &TestHarness) {
    create_news(&ctx.db_pool, "ro-u1", "Artigo", "", true, 1)
        .await
        .unwrap();

    let payload = json!({"updates": [
        {"id": "ro-no-such-row", "display_order": 3},
        {"id": "ro-u1", "display_order": 4},
    ]});
    let updates = parse_reorder_payload(&payload).unwrap();
    apply_reorder(OrderedCollection::News, &updates, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-u1").await.unwrap(), 4);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reorder_works_for_downloads_collection(ctx: &TestHarness) {
    create_download(&ctx.db_pool, "ro-d1", "Estatuto", true, 1)
        .await
        .unwrap();
    create_download(&ctx.db_pool, "ro-d2", "Ata de março", true, 2)
        .await
        .unwrap();

    let payload = json!({"items": [
        {"id": "ro-d1", "display_order": 9},
        {"id": "ro-d2", "display_order": 8},
    ]});
    let updates = parse_reorder_payload(&payload).unwrap();
    apply_reorder(OrderedCollection::Downloads, &updates, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(fetch_display_order(&ctx.db_pool, "downloads", "ro-d1").await.unwrap(), 9);
    assert_eq!(fetch_display_order(&ctx.db_pool, "downloads", "ro-d2").await.unwrap(), 8);
}

/// A failing write aborts the remaining batch and keeps the writes already
/// applied. The failure is induced by a trigger that rejects a sentinel rank.
#[test_context(TestHarness)]
#[tokio::test]
async fn failure_aborts_remaining_batch_without_rollback(ctx: &TestHarness) {
    create_news(&ctx.db_pool, "ro-f1", "Artigo 1", "", true, 1)
        .await
        .unwrap();
    create_news(&ctx.db_pool, "ro-f2", "Artigo 2", "", true, 2)
        .await
        .unwrap();
    create_news(&ctx.db_pool, "ro-f3", "Artigo 3", "", true, 3)
        .await
        .unwrap();

    sqlx::query(
        "CREATE OR REPLACE FUNCTION reject_sentinel_rank() RETURNS trigger AS $$
         BEGIN
             IF NEW.display_order = 999999 THEN
                 RAISE EXCEPTION 'sentinel rank rejected';
             END IF;
             RETURN NEW;
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(&ctx.db_pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER reorder_sentinel BEFORE UPDATE ON news
         FOR EACH ROW EXECUTE FUNCTION reject_sentinel_rank()",
    )
    .execute(&ctx.db_pool)
    .await
    .unwrap();

    let payload = json!({"items": [
        {"id": "ro-f1", "display_order": 10},
        {"id": "ro-f2", "display_order": 999999},
        {"id": "ro-f3", "display_order": 30},
    ]});
    let updates = parse_reorder_payload(&payload).unwrap();
    let result = apply_reorder(OrderedCollection::News, &updates, &ctx.db_pool).await;

    sqlx::query("DROP TRIGGER reorder_sentinel ON news")
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    // The failing id is reported
    match result {
        Err(ContentError::WriteFailed { id, .. }) => assert_eq!(id, "ro-f2"),
        other => panic!("expected WriteFailed, got {:?}", other),
    }

    // First write applied and kept, remaining batch never attempted
    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-f1").await.unwrap(), 10);
    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-f2").await.unwrap(), 2);
    assert_eq!(fetch_display_order(&ctx.db_pool, "news", "ro-f3").await.unwrap(), 3);
}
