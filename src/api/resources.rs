//! Generic back-office CRUD over the document collections.

use crate::api::extract::{parse_id, JsonBody, ListParams, QueryParams};
use crate::api::response::{paged, ApiResponse};
use crate::auth::{AdminSession, Permission};
use crate::database::DocumentQuery;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::SharedState;
use axum::extract::{Path, State};
use serde_json::{json, Value};
use tracing::info;

/// A collection managed through the back office
pub trait AdminResource: Document {
    /// Permission required for every operation on the collection
    const PERMISSION: Permission;

    /// Field matched by the `?status=` list filter
    const STATUS_FIELD: Option<&'static str> = None;
}

impl AdminResource for Destination {
    const PERMISSION: Permission = Permission::ManageDestinations;
    const STATUS_FIELD: Option<&'static str> = Some("publication.status");
}

impl AdminResource for Trip {
    const PERMISSION: Permission = Permission::ManageTrips;
    const STATUS_FIELD: Option<&'static str> = Some("approval.status");
}

impl AdminResource for Hotel {
    const PERMISSION: Permission = Permission::ManageHotels;
    const STATUS_FIELD: Option<&'static str> = Some("approval.status");
}

impl AdminResource for Transfer {
    const PERMISSION: Permission = Permission::ManageTransfers;
    const STATUS_FIELD: Option<&'static str> = Some("approval.status");
}

impl AdminResource for Activity {
    const PERMISSION: Permission = Permission::ManageActivities;
    const STATUS_FIELD: Option<&'static str> = Some("approval.status");
}

impl AdminResource for BlogPost {
    const PERMISSION: Permission = Permission::ManageBlogs;
    const STATUS_FIELD: Option<&'static str> = Some("publication.status");
}

impl AdminResource for Review {
    const PERMISSION: Permission = Permission::ModerateReviews;
    const STATUS_FIELD: Option<&'static str> = Some("approval.status");
}

impl AdminResource for Lead {
    const PERMISSION: Permission = Permission::ManageLeads;
    const STATUS_FIELD: Option<&'static str> = Some("status");
}

impl AdminResource for CustomTourRequest {
    const PERMISSION: Permission = Permission::ManageCustomRequests;
    const STATUS_FIELD: Option<&'static str> = Some("status");
}

impl AdminResource for Collaborator {
    const PERMISSION: Permission = Permission::ManageCollaborators;
}

impl AdminResource for DistributionListing {
    const PERMISSION: Permission = Permission::ManageDistribution;
    const STATUS_FIELD: Option<&'static str> = Some("approval.status");
}

/// All records of any status, newest first
pub async fn list<T: AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<ApiResponse<Vec<Record<T>>>> {
    session.require(T::PERMISSION)?;

    let mut query = DocumentQuery::new();
    if let (Some(field), Some(status)) = (T::STATUS_FIELD, params.status.as_deref()) {
        query = query.eq(field, status);
    }

    paged(&state.repository::<T>(), query, &params).await
}

pub async fn get<T: AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Record<T>>> {
    session.require(T::PERMISSION)?;

    let record = state.repository::<T>().get(parse_id(&id)?).await?;
    Ok(ApiResponse::ok(record))
}

pub async fn create<T: AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    JsonBody(data): JsonBody<T>,
) -> AppResult<ApiResponse<Record<T>>> {
    session.require(T::PERMISSION)?;

    let record = state.repository::<T>().create(data).await?;

    info!("{} {} created by {}", T::LABEL, record.id, session.user_id());
    Ok(ApiResponse::created(record))
}

/// Merge the body's top-level fields into the record
pub async fn update<T: AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> AppResult<ApiResponse<Record<T>>> {
    session.require(T::PERMISSION)?;

    let id = parse_id(&id)?;
    let record = state.repository::<T>().patch(id, patch).await?;

    info!("{} {} updated by {}", T::LABEL, id, session.user_id());
    Ok(ApiResponse::ok(record))
}

pub async fn delete<T: AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Value>> {
    session.require(T::PERMISSION)?;

    let id = parse_id(&id)?;
    if !state.repository::<T>().delete(id).await? {
        return Err(AppError::NotFound(format!("{} not found", T::LABEL)));
    }

    info!("{} {} deleted by {}", T::LABEL, id, session.user_id());
    state.audit.log_deletion(T::COLLECTION, id, &session).await?;

    Ok(ApiResponse::ok(json!({ "id": id, "deleted": true })))
}
