use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval state of a listing, review or distribution listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    PendingApproval,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending_approval" => Ok(ApprovalStatus::PendingApproval),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(format!("Invalid approval status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::PendingApproval => "pending_approval",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// Approval block embedded in every listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub reviewed_by: Option<Uuid>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

impl Approval {
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    /// Mark approved. Returns false (and changes nothing) when already approved.
    pub fn approve(&mut self, reviewer: Uuid) -> bool {
        if self.status == ApprovalStatus::Approved {
            return false;
        }

        self.status = ApprovalStatus::Approved;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(Utc::now());
        self.rejection_reason = None;
        true
    }

    /// Mark rejected. Repeating a rejection with the same reason is a no-op.
    pub fn reject(&mut self, reviewer: Uuid, reason: Option<String>) -> bool {
        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        if self.status == ApprovalStatus::Rejected && self.rejection_reason == reason {
            return false;
        }

        self.status = ApprovalStatus::Rejected;
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(Utc::now());
        self.rejection_reason = reason;
        true
    }
}

/// Draft/published flag for storefront content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default)]
    pub status: PublishStatus,
    /// Set on first publish and kept afterwards
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Publication {
    pub fn is_published(&self) -> bool {
        self.status == PublishStatus::Published
    }

    pub fn publish(&mut self) -> bool {
        if self.is_published() {
            return false;
        }
        self.status = PublishStatus::Published;
        self.published_at.get_or_insert_with(Utc::now);
        true
    }

    pub fn unpublish(&mut self) -> bool {
        if !self.is_published() {
            return false;
        }
        self.status = PublishStatus::Draft;
        true
    }

    /// Keep `published_at` consistent for records created as published
    pub fn normalize(&mut self) {
        if self.is_published() {
            self.published_at.get_or_insert_with(Utc::now);
        }
    }
}

/// Follow-up state of leads and custom tour requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Reviewed,
    Converted,
    Rejected,
}

impl RequestStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "reviewed" => Ok(RequestStatus::Reviewed),
            "converted" => Ok(RequestStatus::Converted),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Reviewed => "reviewed",
            RequestStatus::Converted => "converted",
            RequestStatus::Rejected => "rejected",
        }
    }
}
