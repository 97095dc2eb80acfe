use crate::auth::{AdminSession, Permission};
use crate::database::{Collection, DocumentQuery, DocumentStore};
use crate::error::{AppError, AppResult};
use crate::models::{ApprovalStatus, Listing, Publishable, Record};
use crate::repositories::Repository;
use crate::services::AuditTrailService;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Record types reachable through `/approvals/{kind}/...`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalKind {
    Hotels,
    Transfers,
    Trips,
    Activities,
    Reviews,
    Distribution,
}

impl ApprovalKind {
    pub const ALL: [ApprovalKind; 6] = [
        ApprovalKind::Hotels,
        ApprovalKind::Transfers,
        ApprovalKind::Trips,
        ApprovalKind::Activities,
        ApprovalKind::Reviews,
        ApprovalKind::Distribution,
    ];

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "hotels" => Ok(ApprovalKind::Hotels),
            "transfers" => Ok(ApprovalKind::Transfers),
            "trips" => Ok(ApprovalKind::Trips),
            "activities" => Ok(ApprovalKind::Activities),
            "reviews" => Ok(ApprovalKind::Reviews),
            "distribution" => Ok(ApprovalKind::Distribution),
            _ => Err(format!("Unknown approval kind: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalKind::Hotels => "hotels",
            ApprovalKind::Transfers => "transfers",
            ApprovalKind::Trips => "trips",
            ApprovalKind::Activities => "activities",
            ApprovalKind::Reviews => "reviews",
            ApprovalKind::Distribution => "distribution",
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            ApprovalKind::Hotels => Collection::Hotels,
            ApprovalKind::Transfers => Collection::Transfers,
            ApprovalKind::Trips => Collection::Trips,
            ApprovalKind::Activities => Collection::Activities,
            ApprovalKind::Reviews => Collection::Reviews,
            ApprovalKind::Distribution => Collection::DistributionListings,
        }
    }

    /// Any one of these grants the decision
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            ApprovalKind::Reviews => &[Permission::ApproveListings, Permission::ModerateReviews],
            _ => &[Permission::ApproveListings],
        }
    }
}

/// Approve/reject decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject { reason: Option<String> },
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingCount {
    pub kind: ApprovalKind,
    pub pending: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingSummary {
    pub total: i64,
    pub kinds: Vec<PendingCount>,
}

/// Approval and publication workflow over any listing type
pub struct ApprovalService {
    store: Arc<dyn DocumentStore>,
    audit: Arc<AuditTrailService>,
}

impl ApprovalService {
    pub fn new(store: Arc<dyn DocumentStore>, audit: Arc<AuditTrailService>) -> Self {
        Self { store, audit }
    }

    /// Apply a decision. Repeating the current decision returns the record
    /// untouched and writes nothing.
    pub async fn decide<T: Listing>(
        &self,
        id: Uuid,
        decision: Decision,
        actor: &AdminSession,
    ) -> AppResult<Record<T>> {
        let repo = Repository::<T>::new(self.store.clone());
        let mut record = repo.get(id).await?;

        let changed = match &decision {
            Decision::Approve => record.data.approval_mut().approve(actor.user_id()),
            Decision::Reject { reason } => record
                .data
                .approval_mut()
                .reject(actor.user_id(), reason.clone()),
        };

        if !changed {
            info!("{} {} already {}", T::LABEL, id, record.data.approval().status.as_str());
            return Ok(record);
        }

        let record = repo.save(id, record.data).await?;
        let approval = record.data.approval();

        info!(
            "{} {} {} by {}",
            T::LABEL,
            id,
            approval.status.as_str(),
            actor.user_id()
        );

        self.audit
            .log_approval_decision(
                T::COLLECTION,
                id,
                approval.status.as_str(),
                approval.rejection_reason.as_deref(),
                actor,
            )
            .await?;

        Ok(record)
    }

    pub async fn approve<T: Listing>(&self, id: Uuid, actor: &AdminSession) -> AppResult<Record<T>> {
        self.decide(id, Decision::Approve, actor).await
    }

    pub async fn reject<T: Listing>(
        &self,
        id: Uuid,
        reason: Option<String>,
        actor: &AdminSession,
    ) -> AppResult<Record<T>> {
        self.decide(id, Decision::Reject { reason }, actor).await
    }

    /// Publish or unpublish. Repeats are no-ops.
    pub async fn set_published<T: Publishable>(
        &self,
        id: Uuid,
        published: bool,
        actor: &AdminSession,
    ) -> AppResult<Record<T>> {
        let repo = Repository::<T>::new(self.store.clone());
        let mut record = repo.get(id).await?;

        let publication = record.data.publication_mut();
        let changed = if published {
            publication.publish()
        } else {
            publication.unpublish()
        };

        if !changed {
            return Ok(record);
        }

        let record = repo.save(id, record.data).await?;
        let status = record.data.publication().status.as_str();

        info!("{} {} is now {}", T::LABEL, id, status);
        self.audit
            .log_publication(T::COLLECTION, id, status, actor)
            .await?;

        Ok(record)
    }

    pub async fn pending_count(&self, kind: ApprovalKind) -> AppResult<i64> {
        let filter = DocumentQuery::new()
            .eq("approval.status", ApprovalStatus::PendingApproval.as_str())
            .filter_value();

        self.store
            .count(kind.collection(), &filter)
            .await
            .map_err(AppError::from)
    }

    /// Pending approval counts per kind
    pub async fn pending_summary(&self) -> AppResult<PendingSummary> {
        let mut kinds = Vec::with_capacity(ApprovalKind::ALL.len());
        for kind in ApprovalKind::ALL {
            kinds.push(PendingCount {
                kind,
                pending: self.pending_count(kind).await?,
            });
        }

        Ok(PendingSummary {
            total: kinds.iter().map(|k| k.pending).sum(),
            kinds,
        })
    }
}
