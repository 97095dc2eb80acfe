//! Public storefront writes. Workflow fields are reset on every submission.

use crate::api::extract::JsonBody;
use crate::api::response::ApiResponse;
use crate::error::AppResult;
use crate::models::{CustomTourRequest, Lead, Record, Review};
use crate::SharedState;
use axum::extract::State;
use tracing::info;

pub async fn create_lead(
    State(state): State<SharedState>,
    JsonBody(lead): JsonBody<Lead>,
) -> AppResult<ApiResponse<Record<Lead>>> {
    let record = state.repository::<Lead>().create(lead).await?;

    info!(
        "New lead {} (source: {})",
        record.id,
        record.data.source.as_deref().unwrap_or("unknown")
    );
    Ok(ApiResponse::created(record))
}

pub async fn create_custom_tour(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<CustomTourRequest>,
) -> AppResult<ApiResponse<Record<CustomTourRequest>>> {
    let record = state.repository::<CustomTourRequest>().create(request).await?;

    info!(
        "New custom tour request {} for {} traveller(s)",
        record.id, record.data.travellers
    );
    Ok(ApiResponse::created(record))
}

pub async fn create_review(
    State(state): State<SharedState>,
    JsonBody(review): JsonBody<Review>,
) -> AppResult<ApiResponse<Record<Review>>> {
    let record = state.repository::<Review>().create(review).await?;

    info!("New review {} awaiting moderation", record.id);
    Ok(ApiResponse::created(record))
}
