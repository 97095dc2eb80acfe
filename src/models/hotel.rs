use crate::database::Collection;
use crate::error::{AppError, AppResult};
use crate::models::document::{require_text, Document, Listing};
use crate::models::{Approval, Pricing};
use serde::{Deserialize, Serialize};

/// Accommodation listing. Pricing is per night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub destination: String,
    pub pricing: Pricing,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub star_rating: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub approval: Approval,
}

impl Document for Hotel {
    const COLLECTION: Collection = Collection::Hotels;
    const LABEL: &'static str = "Hotel";
    const PROTECTED_FIELDS: &'static [&'static str] = &["approval"];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.destination = self.destination.trim().to_string();
        self.amenities.retain(|a| !a.trim().is_empty());
        self.pricing.normalize();
    }

    fn prepare_new(&mut self) {
        self.approval = Approval::default();
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        require_text("destination", &self.destination)?;

        if matches!(self.star_rating, Some(stars) if stars > 5) {
            return Err(AppError::Validation("star_rating must be between 0 and 5".into()));
        }

        self.pricing.validate()
    }
}

impl Listing for Hotel {
    fn approval(&self) -> &Approval {
        &self.approval
    }

    fn approval_mut(&mut self) -> &mut Approval {
        &mut self.approval
    }
}
