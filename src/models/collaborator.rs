use crate::database::Collection;
use crate::error::AppResult;
use crate::models::document::{require_text, validate_email, Document};
use crate::models::pricing::validate_percent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Distribution partner that resells agency listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub commission_percent: Option<Decimal>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Document for Collaborator {
    const COLLECTION: Collection = Collection::Collaborators;
    const LABEL: &'static str = "Collaborator";

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        validate_email(&self.email)?;

        if let Some(commission) = self.commission_percent {
            validate_percent("commission_percent", commission)?;
        }

        Ok(())
    }
}
