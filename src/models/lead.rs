use crate::database::Collection;
use crate::error::AppResult;
use crate::models::document::{require_text, validate_email, Document, FollowUp};
use crate::models::RequestStatus;
use serde::{Deserialize, Serialize};

/// Contact-form enquiry from the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Where the lead came from, e.g. "contact_form" or "trip_page"
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    /// Internal follow-up notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl Document for Lead {
    const COLLECTION: Collection = Collection::Leads;
    const LABEL: &'static str = "Lead";
    const PROTECTED_FIELDS: &'static [&'static str] = &["status"];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
    }

    fn prepare_new(&mut self) {
        self.status = RequestStatus::Pending;
        self.notes = None;
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        validate_email(&self.email)
    }
}

impl FollowUp for Lead {
    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }

    fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    }
}
