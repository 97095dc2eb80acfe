//! Public storefront reads. Only published and approved records are visible.

use crate::api::extract::{parse_id, ListParams, QueryParams};
use crate::api::response::{paged, ApiResponse};
use crate::database::DocumentQuery;
use crate::error::{AppError, AppResult};
use crate::models::{
    ApprovalStatus, BlogPost, Destination, Listing, PublishStatus, Record, Review, Trip,
};
use crate::SharedState;
use axum::extract::{Path, State};
use serde_json::json;

fn published() -> DocumentQuery {
    DocumentQuery::new().eq("publication.status", PublishStatus::Published.as_str())
}

fn approved() -> DocumentQuery {
    DocumentQuery::new().eq("approval.status", ApprovalStatus::Approved.as_str())
}

/// Trips must be both published and approved to be shown
fn live_trips() -> DocumentQuery {
    published().eq("approval.status", ApprovalStatus::Approved.as_str())
}

fn not_found(label: &str) -> AppError {
    AppError::NotFound(format!("{} not found", label))
}

pub async fn list_destinations(
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<ApiResponse<Vec<Record<Destination>>>> {
    let mut query = published();
    if let Some(featured) = params.featured {
        query = query.eq("featured", featured);
    }

    paged(&state.repository(), query, &params).await
}

pub async fn get_destination(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<Record<Destination>>> {
    let record = state
        .repository::<Destination>()
        .find_one(published().eq("slug", slug))
        .await?
        .ok_or_else(|| not_found("Destination"))?;

    Ok(ApiResponse::ok(record))
}

pub async fn list_trips(
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<ApiResponse<Vec<Record<Trip>>>> {
    let mut query = live_trips();
    if let Some(destination) = &params.destination {
        query = query.eq("destination", destination.as_str());
    }
    if let Some(category) = &params.category {
        query = query.eq("category", category.as_str());
    }
    if let Some(featured) = params.featured {
        query = query.eq("featured", featured);
    }

    paged(&state.repository(), query, &params).await
}

pub async fn get_trip(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<Record<Trip>>> {
    let record = state
        .repository::<Trip>()
        .find_one(live_trips().eq("slug", slug))
        .await?
        .ok_or_else(|| not_found("Trip"))?;

    Ok(ApiResponse::ok(record))
}

/// Approved reviews of a live trip, addressed by slug or id
pub async fn list_trip_reviews(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<ApiResponse<Vec<Record<Review>>>> {
    let trips = state.repository::<Trip>();

    let trip = match trips.find_one(live_trips().eq("slug", key.as_str())).await? {
        Some(trip) => Some(trip),
        None => match parse_id(&key) {
            Ok(id) => trips.find_by_id(id).await?.filter(|t| t.data.is_live()),
            Err(_) => None,
        },
    }
    .ok_or_else(|| not_found("Trip"))?;

    let query = approved().eq("trip_id", trip.id.to_string());
    paged(&state.repository(), query, &params).await
}

/// Approved hotels, transfers or activities, optionally for one destination
pub async fn list_approved<T: Listing>(
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<ApiResponse<Vec<Record<T>>>> {
    let mut query = approved();
    if let Some(destination) = &params.destination {
        query = query.eq("destination", destination.as_str());
    }

    paged(&state.repository::<T>(), query, &params).await
}

/// A single approved listing; anything else is reported as missing
pub async fn get_approved<T: Listing>(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Record<T>>> {
    let id = parse_id(&id)?;
    let record = state
        .repository::<T>()
        .find_by_id(id)
        .await?
        .filter(|r| r.data.approval().is_approved())
        .ok_or_else(|| not_found(T::LABEL))?;

    Ok(ApiResponse::ok(record))
}

pub async fn list_blogs(
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<ApiResponse<Vec<Record<BlogPost>>>> {
    let mut query = published();
    if let Some(tag) = &params.tag {
        query = query.eq("tags", json!([tag.trim().to_lowercase()]));
    }

    paged(&state.repository(), query, &params).await
}

pub async fn get_blog(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<Record<BlogPost>>> {
    let record = state
        .repository::<BlogPost>()
        .find_one(published().eq("slug", slug))
        .await?
        .ok_or_else(|| not_found("Blog post"))?;

    Ok(ApiResponse::ok(record))
}
