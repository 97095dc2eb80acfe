use crate::database::{DocumentQuery, DocumentStore};
use crate::error::{AppError, AppResult};
use crate::models::{Document, Record};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Typed access to one document collection.
///
/// Every write runs the model's `normalize` and `validate` hooks before it
/// reaches the store.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    /// Create a new Repository
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Insert a new record. Workflow fields are reset to their initial state.
    pub async fn create(&self, mut data: T) -> AppResult<Record<T>> {
        data.prepare_new();
        data.normalize();
        data.validate()?;
        self.ensure_unique_slug(&data, None).await?;

        let raw = self
            .store
            .insert(T::COLLECTION, serde_json::to_value(&data)?)
            .await?;

        Record::from_raw(raw)
    }

    /// Find a record by UUID
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Record<T>>> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(Record::from_raw)
            .transpose()
    }

    /// Find a record by UUID, 404 when absent
    pub async fn get(&self, id: Uuid) -> AppResult<Record<T>> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", T::LABEL)))
    }

    /// Find records matching the query, newest first
    pub async fn find(&self, query: &DocumentQuery) -> AppResult<Vec<Record<T>>> {
        self.store
            .find(T::COLLECTION, query)
            .await?
            .into_iter()
            .map(Record::from_raw)
            .collect()
    }

    pub async fn find_one(&self, query: DocumentQuery) -> AppResult<Option<Record<T>>> {
        let query = DocumentQuery {
            limit: Some(1),
            offset: 0,
            ..query
        };
        Ok(self.find(&query).await?.into_iter().next())
    }

    pub async fn count(&self, query: &DocumentQuery) -> AppResult<i64> {
        Ok(self.store.count(T::COLLECTION, &query.filter_value()).await?)
    }

    /// Replace the body of an existing record
    pub async fn save(&self, id: Uuid, mut data: T) -> AppResult<Record<T>> {
        data.normalize();
        data.validate()?;
        self.ensure_unique_slug(&data, Some(id)).await?;

        let raw = self
            .store
            .replace(T::COLLECTION, id, serde_json::to_value(&data)?)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", T::LABEL)))?;

        Record::from_raw(raw)
    }

    /// 409 when another record of the collection already uses the slug
    async fn ensure_unique_slug(&self, data: &T, own_id: Option<Uuid>) -> AppResult<()> {
        let Some(slug) = data.slug() else {
            return Ok(());
        };

        let clash = self
            .find(&DocumentQuery::new().eq("slug", slug))
            .await?
            .into_iter()
            .any(|existing| Some(existing.id) != own_id);

        if clash {
            return Err(AppError::Conflict(format!(
                "A {} with slug '{}' already exists",
                T::LABEL.to_lowercase(),
                slug
            )));
        }
        Ok(())
    }

    /// Merge the top-level fields of `patch` into the stored record and
    /// re-validate. Protected fields in the patch are ignored.
    pub async fn patch(&self, id: Uuid, patch: Value) -> AppResult<Record<T>> {
        let Value::Object(fields) = patch else {
            return Err(AppError::Validation("Request body must be a JSON object".into()));
        };

        let record = self.get(id).await?;
        let mut current = serde_json::to_value(&record.data)?;

        if let Value::Object(target) = &mut current {
            for (key, value) in fields {
                if T::PROTECTED_FIELDS.contains(&key.as_str()) || is_metadata(&key) {
                    continue;
                }
                target.insert(key, value);
            }
        }

        let data: T = serde_json::from_value(current)
            .map_err(|e| AppError::Validation(format!("Invalid {}: {}", T::LABEL, e)))?;

        self.save(id, data).await
    }

    /// Delete a record. Returns false when nothing was deleted.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.store.delete(T::COLLECTION, id).await?)
    }
}

/// Store-managed fields a client may echo back in an update body
fn is_metadata(key: &str) -> bool {
    matches!(key, "id" | "created_at" | "updated_at")
}
