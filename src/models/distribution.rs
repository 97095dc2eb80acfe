use crate::database::Collection;
use crate::error::AppResult;
use crate::models::document::{Document, Listing};
use crate::models::pricing::validate_percent;
use crate::models::Approval;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which collection a distributed listing lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Hotel,
    Transfer,
    Trip,
    Activity,
}

impl ListingKind {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "hotel" => Ok(ListingKind::Hotel),
            "transfer" => Ok(ListingKind::Transfer),
            "trip" => Ok(ListingKind::Trip),
            "activity" => Ok(ListingKind::Activity),
            _ => Err(format!("Invalid listing kind: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Hotel => "hotel",
            ListingKind::Transfer => "transfer",
            ListingKind::Trip => "trip",
            ListingKind::Activity => "activity",
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            ListingKind::Hotel => Collection::Hotels,
            ListingKind::Transfer => Collection::Transfers,
            ListingKind::Trip => Collection::Trips,
            ListingKind::Activity => Collection::Activities,
        }
    }
}

/// Request to let a collaborator resell one listing, subject to approval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionListing {
    pub collaborator_id: Uuid,
    pub listing_kind: ListingKind,
    pub listing_id: Uuid,
    #[serde(default)]
    pub markup_percent: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub approval: Approval,
}

impl Document for DistributionListing {
    const COLLECTION: Collection = Collection::DistributionListings;
    const LABEL: &'static str = "Distribution listing";
    const PROTECTED_FIELDS: &'static [&'static str] = &["approval"];

    fn prepare_new(&mut self) {
        self.approval = Approval::default();
    }

    fn validate(&self) -> AppResult<()> {
        if let Some(markup) = self.markup_percent {
            validate_percent("markup_percent", markup)?;
        }
        Ok(())
    }
}

impl Listing for DistributionListing {
    fn approval(&self) -> &Approval {
        &self.approval
    }

    fn approval_mut(&mut self) -> &mut Approval {
        &mut self.approval
    }
}
