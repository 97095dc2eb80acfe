use super::store::{json_contains, Collection, DocumentQuery, DocumentStore, RawDocument};
use super::DatabaseError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local document store with the same filter semantics as
/// [`PgDocumentStore`](super::PgDocumentStore). Backs the test suite and
/// `STORAGE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<RawDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: Collection, data: Value) -> Result<RawDocument, DatabaseError> {
        let now = Utc::now();
        let doc = RawDocument {
            id: Uuid::new_v4(),
            data,
            created_at: now,
            updated_at: now,
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if collection == Collection::AdminUsers {
            let email = doc.data.get("email").and_then(Value::as_str).map(str::to_lowercase);
            let taken = docs.iter().any(|existing| {
                existing.data.get("email").and_then(Value::as_str).map(str::to_lowercase) == email
            });
            if taken {
                return Err(DatabaseError::Duplicate("admin user email already exists".to_string()));
            }
        }

        docs.push(doc.clone());
        Ok(doc)
    }

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<RawDocument>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn find(
        &self,
        collection: Collection,
        query: &DocumentQuery,
    ) -> Result<Vec<RawDocument>, DatabaseError> {
        let filter = query.filter_value();
        let collections = self.collections.read().await;

        let mut matches: Vec<RawDocument> = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| json_contains(&d.data, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Newest first, insertion order breaks ties
        matches.reverse();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = query.offset.max(0) as usize;
        let page = matches.into_iter().skip(offset);
        Ok(match query.limit {
            Some(limit) => page.take(limit.max(0) as usize).collect(),
            None => page.collect(),
        })
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        data: Value,
    ) -> Result<Option<RawDocument>, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };

        doc.data = data;
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn count(&self, collection: Collection, filter: &Value) -> Result<i64, DatabaseError> {
        let collections = self.collections.read().await;
        let count = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| json_contains(&d.data, filter)).count())
            .unwrap_or(0);
        Ok(count as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_get_delete() {
        let store = MemoryDocumentStore::new();
        let doc = store
            .insert(Collection::Destinations, json!({"name": "Crete"}))
            .await
            .unwrap();

        let fetched = store.get(Collection::Destinations, doc.id).await.unwrap();
        assert_eq!(fetched, Some(doc.clone()));

        // Collections are isolated from each other
        assert!(store.get(Collection::Trips, doc.id).await.unwrap().is_none());

        assert!(store.delete(Collection::Destinations, doc.id).await.unwrap());
        assert!(!store.delete(Collection::Destinations, doc.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_filters_and_pages() {
        let store = MemoryDocumentStore::new();
        for i in 0..5 {
            let destination = if i % 2 == 0 { "Crete" } else { "Rhodes" };
            store
                .insert(Collection::Hotels, json!({"name": format!("Hotel {}", i), "destination": destination}))
                .await
                .unwrap();
        }

        let crete = store
            .find(Collection::Hotels, &DocumentQuery::new().eq("destination", "Crete"))
            .await
            .unwrap();
        assert_eq!(crete.len(), 3);
        // Newest first
        assert_eq!(crete[0].data["name"], "Hotel 4");

        let page = store
            .find(Collection::Hotels, &DocumentQuery::new().paginate(2, 2))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].data["name"], "Hotel 2");

        let count = store
            .count(Collection::Hotels, &json!({"destination": "Rhodes"}))
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_replace_updates_timestamp() {
        let store = MemoryDocumentStore::new();
        let doc = store.insert(Collection::Leads, json!({"name": "Ana"})).await.unwrap();

        let updated = store
            .replace(Collection::Leads, doc.id, json!({"name": "Ana", "status": "reviewed"}))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.data["status"], "reviewed");
        assert!(updated.updated_at >= doc.updated_at);
        assert_eq!(updated.created_at, doc.created_at);

        let missing = store
            .replace(Collection::Leads, Uuid::new_v4(), json!({}))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_admin_email_rejected() {
        let store = MemoryDocumentStore::new();
        store
            .insert(Collection::AdminUsers, json!({"email": "ops@tourdesk.test"}))
            .await
            .unwrap();

        let result = store
            .insert(Collection::AdminUsers, json!({"email": "OPS@tourdesk.test"}))
            .await;
        assert!(matches!(result, Err(DatabaseError::Duplicate(_))));
    }
}
