//! Document store abstraction.
//!
//! Every collection holds JSON documents keyed by a store-generated UUID.
//! Filters are equality matches expressed as a JSON object that the stored
//! document must contain (PostgreSQL `@>` semantics).

use super::DatabaseError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Default page size for list queries
pub const DEFAULT_LIMIT: i64 = 20;

/// Upper bound for a single page
pub const MAX_LIMIT: i64 = 100;

/// The collections owned by the platform. Each maps to one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Destinations,
    Trips,
    Hotels,
    Transfers,
    Activities,
    Blogs,
    Reviews,
    Leads,
    CustomTourRequests,
    Collaborators,
    DistributionListings,
    AdminUsers,
}

impl Collection {
    pub const ALL: [Collection; 12] = [
        Collection::Destinations,
        Collection::Trips,
        Collection::Hotels,
        Collection::Transfers,
        Collection::Activities,
        Collection::Blogs,
        Collection::Reviews,
        Collection::Leads,
        Collection::CustomTourRequests,
        Collection::Collaborators,
        Collection::DistributionListings,
        Collection::AdminUsers,
    ];

    /// Table name. Only ever produced from this fixed list, so it is safe to
    /// interpolate into SQL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Destinations => "destinations",
            Collection::Trips => "trips",
            Collection::Hotels => "hotels",
            Collection::Transfers => "transfers",
            Collection::Activities => "activities",
            Collection::Blogs => "blogs",
            Collection::Reviews => "reviews",
            Collection::Leads => "leads",
            Collection::CustomTourRequests => "custom_tour_requests",
            Collection::Collaborators => "collaborators",
            Collection::DistributionListings => "distribution_listings",
            Collection::AdminUsers => "admin_users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document as it sits in the store
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RawDocument {
    pub id: Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equality filter plus paging, newest documents first
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub filter: Map<String, Value>,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `data[key] == value`. Dotted keys address nested objects.
    pub fn eq(mut self, key: &str, value: impl Into<Value>) -> Self {
        insert_path(&mut self.filter, key, value.into());
        self
    }

    pub fn paginate(mut self, page: i64, limit: i64) -> Self {
        let limit = limit.clamp(1, MAX_LIMIT);
        let page = page.max(1);
        self.limit = Some(limit);
        // Pages past the end saturate instead of overflowing
        self.offset = (page - 1).saturating_mul(limit);
        self
    }

    pub fn filter_value(&self) -> Value {
        Value::Object(self.filter.clone())
    }
}

fn insert_path(target: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        Some((head, rest)) => {
            let entry = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
        None => {
            target.insert(key.to_string(), value);
        }
    }
}

/// JSON containment: every key of `filter` is present in `doc` with a
/// containing value. Arrays match when every filter element is contained in
/// some element of the document array.
pub fn json_contains(doc: &Value, filter: &Value) -> bool {
    match (doc, filter) {
        (Value::Object(d), Value::Object(f)) => f
            .iter()
            .all(|(k, fv)| d.get(k).map_or(false, |dv| json_contains(dv, fv))),
        (Value::Array(d), Value::Array(f)) => {
            f.iter().all(|fv| d.iter().any(|dv| json_contains(dv, fv)))
        }
        (Value::Array(d), scalar) if !scalar.is_object() => d.iter().any(|dv| dv == scalar),
        _ => doc == filter,
    }
}

/// Storage backend for document collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: Collection, data: Value) -> Result<RawDocument, DatabaseError>;

    async fn get(&self, collection: Collection, id: Uuid) -> Result<Option<RawDocument>, DatabaseError>;

    async fn find(
        &self,
        collection: Collection,
        query: &DocumentQuery,
    ) -> Result<Vec<RawDocument>, DatabaseError>;

    /// Replace the body of an existing document. Returns `None` when absent.
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        data: Value,
    ) -> Result<Option<RawDocument>, DatabaseError>;

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, DatabaseError>;

    async fn count(&self, collection: Collection, filter: &Value) -> Result<i64, DatabaseError>;

    /// Cheap liveness probe
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_contains_nested() {
        let doc = json!({"name": "Crete", "approval": {"status": "approved"}, "tags": ["beach", "food"]});

        assert!(json_contains(&doc, &json!({})));
        assert!(json_contains(&doc, &json!({"approval": {"status": "approved"}})));
        assert!(json_contains(&doc, &json!({"tags": ["food"]})));
        assert!(!json_contains(&doc, &json!({"approval": {"status": "rejected"}})));
        assert!(!json_contains(&doc, &json!({"missing": 1})));
    }

    #[test]
    fn test_query_dotted_keys() {
        let query = DocumentQuery::new()
            .eq("approval.status", "approved")
            .eq("destination", "Crete");

        assert_eq!(
            query.filter_value(),
            json!({"approval": {"status": "approved"}, "destination": "Crete"})
        );
    }

    #[test]
    fn test_paginate_clamps() {
        let query = DocumentQuery::new().paginate(0, 500);
        assert_eq!(query.limit, Some(MAX_LIMIT));
        assert_eq!(query.offset, 0);

        let query = DocumentQuery::new().paginate(3, 10);
        assert_eq!(query.offset, 20);

        let query = DocumentQuery::new().paginate(i64::MAX, MAX_LIMIT);
        assert_eq!(query.offset, i64::MAX);
    }

    #[test]
    fn test_collection_names_unique() {
        let mut names: Vec<_> = Collection::ALL.iter().map(|c| c.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Collection::ALL.len());
    }
}
