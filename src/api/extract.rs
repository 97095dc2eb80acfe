//! Extractors that reject with the JSON error envelope instead of axum's
//! plain-text rejections.

use crate::api::response::PageMeta;
use crate::database::store::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::database::DocumentQuery;
use crate::error::{AppError, AppResult};
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

/// JSON request body; malformed or mistyped bodies are a 400
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Query string parameters; unparsable values are a 400
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| AppError::Validation(rejection.body_text()))
    }
}

/// Paging and filter parameters shared by list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub destination: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub tag: Option<String>,
    pub status: Option<String>,
}

impl ListParams {
    /// 1-based page number
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn paginate(&self, query: DocumentQuery) -> DocumentQuery {
        query.paginate(self.page(), self.limit())
    }

    pub fn meta(&self, total: i64) -> PageMeta {
        PageMeta {
            page: self.page(),
            limit: self.limit(),
            total,
        }
    }
}

/// Parse a record id from a path segment
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Ok(Uuid::parse_str(raw.trim())?)
}
