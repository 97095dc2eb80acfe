//! PostgreSQL document store tests.
//!
//! Run with `DATABASE_URL` pointing at a disposable server and
//! `cargo test -- --ignored`.

use serde_json::json;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tourdesk_backend::database::{
    Collection, DatabaseError, DocumentQuery, DocumentStore, PgDocumentStore,
};
use tourdesk_backend::models::{ApprovalStatus, Hotel};
use tourdesk_backend::repositories::HotelRepository;
use uuid::Uuid;

// ============================================================================
// Connection & Migration Tests
// ============================================================================

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_connection_pool(pool: PgPool) {
    let row = sqlx::query("SELECT 1 as test")
        .fetch_one(&pool)
        .await
        .unwrap();
    let value: i32 = row.get("test");
    assert_eq!(value, 1);

    let store = PgDocumentStore::new(pool);
    assert!(store.ping().await.is_ok());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_migrations_created_every_collection(pool: PgPool) {
    for collection in Collection::ALL {
        let exists: bool = sqlx::query(
            "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(collection.as_str())
        .fetch_one(&pool)
        .await
        .unwrap()
        .get(0);

        assert!(exists, "table {} missing", collection);
    }
}

// ============================================================================
// Document Store Tests
// ============================================================================

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_insert_get_replace_delete(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let doc = store
        .insert(Collection::Destinations, json!({"name": "Crete", "slug": "crete"}))
        .await
        .unwrap();
    assert_eq!(doc.data["name"], "Crete");

    let fetched = store.get(Collection::Destinations, doc.id).await.unwrap().unwrap();
    assert_eq!(fetched, doc);

    let replaced = store
        .replace(Collection::Destinations, doc.id, json!({"name": "Kriti", "slug": "kriti"}))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.data["name"], "Kriti");
    assert_eq!(replaced.created_at, doc.created_at);
    assert!(replaced.updated_at >= doc.updated_at);

    assert!(store.delete(Collection::Destinations, doc.id).await.unwrap());
    assert!(!store.delete(Collection::Destinations, doc.id).await.unwrap());
    assert!(store
        .replace(Collection::Destinations, doc.id, json!({}))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_containment_filters_and_paging(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    for (name, status) in [("A", "approved"), ("B", "pending_approval"), ("C", "approved")] {
        store
            .insert(
                Collection::Hotels,
                json!({"name": name, "destination": "Naxos", "approval": {"status": status}}),
            )
            .await
            .unwrap();
    }

    let approved = DocumentQuery::new().eq("approval.status", "approved");
    assert_eq!(
        store.count(Collection::Hotels, &approved.filter_value()).await.unwrap(),
        2
    );

    let page = store
        .find(Collection::Hotels, &approved.clone().paginate(1, 1))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);

    let everything = store
        .find(Collection::Hotels, &DocumentQuery::new())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
    assert!(everything
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_admin_email_unique(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    store
        .insert(Collection::AdminUsers, json!({"email": "ops@tourdesk.test"}))
        .await
        .unwrap();
    let err = store
        .insert(Collection::AdminUsers, json!({"email": "OPS@tourdesk.test"}))
        .await
        .unwrap_err();

    assert!(matches!(err, DatabaseError::Duplicate(_)));
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_slug_unique_index(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    store
        .insert(Collection::Trips, json!({"title": "Naxos Escape", "slug": "naxos-escape"}))
        .await
        .unwrap();
    let err = store
        .insert(Collection::Trips, json!({"title": "Naxos Escape II", "slug": "naxos-escape"}))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Duplicate(_)));

    // Same slug in another collection is fine
    assert!(store
        .insert(Collection::Blogs, json!({"title": "Naxos Escape", "slug": "naxos-escape"}))
        .await
        .is_ok());
}

#[sqlx::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_repository_over_postgres(pool: PgPool) {
    let repo = HotelRepository::new(Arc::new(PgDocumentStore::new(pool)));

    let hotel: Hotel = serde_json::from_value(json!({
        "name": "Caldera View",
        "destination": "Santorini",
        "pricing": {"price": "99.99", "discount_percent": "33"}
    }))
    .unwrap();

    let record = repo.create(hotel).await.unwrap();
    assert_eq!(record.data.approval.status, ApprovalStatus::PendingApproval);
    assert_eq!(record.data.pricing.final_price.to_string(), "66.99");

    let updated = repo
        .patch(record.id, json!({"star_rating": 5}))
        .await
        .unwrap();
    assert_eq!(updated.data.star_rating, Some(5));

    assert!(repo.get(Uuid::new_v4()).await.unwrap_err().is_not_found());
}
