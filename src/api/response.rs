use crate::api::extract::ListParams;
use crate::database::DocumentQuery;
use crate::error::AppResult;
use crate::models::{Document, Record};
use crate::repositories::Repository;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Paging details attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<PageMeta>,
}

/// Successful JSON response: `{ "success": true, "data": ... }`
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
    meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            meta: None,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
            meta: None,
        }
    }

    pub fn page(data: T, meta: PageMeta) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            success: true,
            data: self.data,
            meta: self.meta,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Run `query` as one page plus a total count
pub async fn paged<T: Document>(
    repo: &Repository<T>,
    query: DocumentQuery,
    params: &ListParams,
) -> AppResult<ApiResponse<Vec<Record<T>>>> {
    let total = repo.count(&query).await?;
    let items = repo.find(&params.paginate(query)).await?;

    Ok(ApiResponse::page(items, params.meta(total)))
}
