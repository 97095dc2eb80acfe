use crate::database::Collection;
use crate::error::{AppError, AppResult};
use crate::models::document::{require_text, validate_email, Document, FollowUp};
use crate::models::RequestStatus;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_travellers() -> u32 {
    1
}

/// Tailor-made tour enquiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomTourRequest {
    pub name: String,
    pub email: String,
    pub destinations: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_travellers")]
    pub travellers: u32,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

impl Document for CustomTourRequest {
    const COLLECTION: Collection = Collection::CustomTourRequests;
    const LABEL: &'static str = "Custom tour request";
    const PROTECTED_FIELDS: &'static [&'static str] = &["status"];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.destinations = self
            .destinations
            .iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
    }

    fn prepare_new(&mut self) {
        self.status = RequestStatus::Pending;
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        validate_email(&self.email)?;

        if self.destinations.is_empty() {
            return Err(AppError::Validation("at least one destination is required".into()));
        }
        if self.travellers == 0 {
            return Err(AppError::Validation("travellers must be at least 1".into()));
        }
        if matches!(self.budget, Some(budget) if budget.is_sign_negative()) {
            return Err(AppError::Validation("budget must not be negative".into()));
        }
        if self.duration_days == Some(0) {
            return Err(AppError::Validation("duration_days must be at least 1".into()));
        }

        Ok(())
    }
}

impl FollowUp for CustomTourRequest {
    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }
}
