use crate::database::Collection;
use crate::error::{AppError, AppResult};
use crate::models::document::{require_text, Document, Listing};
use crate::models::{Approval, Pricing};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bookable excursion or experience at a destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub destination: String,
    pub pricing: Pricing,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub duration_hours: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub approval: Approval,
}

impl Document for Activity {
    const COLLECTION: Collection = Collection::Activities;
    const LABEL: &'static str = "Activity";
    const PROTECTED_FIELDS: &'static [&'static str] = &["approval"];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.destination = self.destination.trim().to_string();
        self.pricing.normalize();
    }

    fn prepare_new(&mut self) {
        self.approval = Approval::default();
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        require_text("destination", &self.destination)?;

        if matches!(self.duration_hours, Some(hours) if hours <= Decimal::ZERO) {
            return Err(AppError::Validation("duration_hours must be positive".into()));
        }

        self.pricing.validate()
    }
}

impl Listing for Activity {
    fn approval(&self) -> &Approval {
        &self.approval
    }

    fn approval_mut(&mut self) -> &mut Approval {
        &mut self.approval
    }
}
