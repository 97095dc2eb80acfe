use crate::database::Collection;
use crate::error::{AppError, AppResult};
use crate::models::document::{require_text, Document, Listing};
use crate::models::{Approval, Pricing};
use serde::{Deserialize, Serialize};

fn default_capacity() -> u32 {
    1
}

/// Point-to-point ground transport (airport pickups, ferry connections)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub pricing: Pricing,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub approval: Approval,
}

impl Document for Transfer {
    const COLLECTION: Collection = Collection::Transfers;
    const LABEL: &'static str = "Transfer";
    const PROTECTED_FIELDS: &'static [&'static str] = &["approval"];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.origin = self.origin.trim().to_string();
        self.destination = self.destination.trim().to_string();
        self.pricing.normalize();
    }

    fn prepare_new(&mut self) {
        self.approval = Approval::default();
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        require_text("origin", &self.origin)?;
        require_text("destination", &self.destination)?;

        if self.capacity == 0 {
            return Err(AppError::Validation("capacity must be at least 1".into()));
        }

        self.pricing.validate()
    }
}

impl Listing for Transfer {
    fn approval(&self) -> &Approval {
        &self.approval
    }

    fn approval_mut(&mut self) -> &mut Approval {
        &mut self.approval
    }
}
