//! Status-changing endpoints: approvals, publication and inquiry follow-up.

use crate::api::extract::{parse_id, JsonBody};
use crate::api::resources::AdminResource;
use crate::api::response::ApiResponse;
use crate::auth::{AdminSession, Permission};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::{ApprovalKind, Decision, DashboardStats, PendingSummary};
use crate::{AppState, SharedState};
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct RejectBody {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
    pub notes: Option<String>,
}

async fn decide(
    state: &AppState,
    session: &AdminSession,
    kind: &str,
    id: &str,
    decision: Decision,
) -> AppResult<Value> {
    let kind = ApprovalKind::from_str(kind).map_err(AppError::Validation)?;
    session.require_any(kind.permissions())?;

    let id: Uuid = parse_id(id)?;
    let approvals = &state.approvals;

    let record = match kind {
        ApprovalKind::Hotels => {
            serde_json::to_value(approvals.decide::<Hotel>(id, decision, session).await?)?
        }
        ApprovalKind::Transfers => {
            serde_json::to_value(approvals.decide::<Transfer>(id, decision, session).await?)?
        }
        ApprovalKind::Trips => {
            serde_json::to_value(approvals.decide::<Trip>(id, decision, session).await?)?
        }
        ApprovalKind::Activities => {
            serde_json::to_value(approvals.decide::<Activity>(id, decision, session).await?)?
        }
        ApprovalKind::Reviews => {
            serde_json::to_value(approvals.decide::<Review>(id, decision, session).await?)?
        }
        ApprovalKind::Distribution => serde_json::to_value(
            approvals
                .decide::<DistributionListing>(id, decision, session)
                .await?,
        )?,
    };

    Ok(record)
}

pub async fn approve(
    session: AdminSession,
    State(state): State<SharedState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Value>> {
    let record = decide(&state, &session, &kind, &id, Decision::Approve).await?;
    Ok(ApiResponse::ok(record))
}

/// The body is optional; a missing or unreadable body means no reason
pub async fn reject(
    session: AdminSession,
    State(state): State<SharedState>,
    Path((kind, id)): Path<(String, String)>,
    body: Option<JsonBody<RejectBody>>,
) -> AppResult<ApiResponse<Value>> {
    let reason = body.and_then(|JsonBody(b)| b.reason);
    let record = decide(&state, &session, &kind, &id, Decision::Reject { reason }).await?;
    Ok(ApiResponse::ok(record))
}

pub async fn pending(
    session: AdminSession,
    State(state): State<SharedState>,
) -> AppResult<ApiResponse<PendingSummary>> {
    session.require_any(&[Permission::ApproveListings, Permission::ModerateReviews])?;

    Ok(ApiResponse::ok(state.approvals.pending_summary().await?))
}

pub async fn publish<T: Publishable + AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Record<T>>> {
    session.require(T::PERMISSION)?;

    let record = state
        .approvals
        .set_published::<T>(parse_id(&id)?, true, &session)
        .await?;
    Ok(ApiResponse::ok(record))
}

pub async fn unpublish<T: Publishable + AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Record<T>>> {
    session.require(T::PERMISSION)?;

    let record = state
        .approvals
        .set_published::<T>(parse_id(&id)?, false, &session)
        .await?;
    Ok(ApiResponse::ok(record))
}

/// Move a lead or custom tour request to another follow-up status
pub async fn update_status<T: FollowUp + AdminResource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<StatusBody>,
) -> AppResult<ApiResponse<Record<T>>> {
    session.require(T::PERMISSION)?;

    let status = RequestStatus::from_str(&body.status).map_err(AppError::Validation)?;
    let id = parse_id(&id)?;

    let repo = state.repository::<T>();
    let mut record = repo.get(id).await?;
    let previous = record.data.status();

    record.data.set_status(status);
    if body.notes.is_some() {
        record.data.set_notes(body.notes);
    }
    let record = repo.save(id, record.data).await?;

    info!(
        "{} {} moved from {} to {} by {}",
        T::LABEL,
        id,
        previous.as_str(),
        status.as_str(),
        session.user_id()
    );
    Ok(ApiResponse::ok(record))
}

pub async fn dashboard(
    session: AdminSession,
    State(state): State<SharedState>,
) -> AppResult<ApiResponse<DashboardStats>> {
    session.require(Permission::ViewDashboard)?;

    Ok(ApiResponse::ok(state.dashboard.stats().await?))
}
