use crate::database::Collection;
use crate::error::{AppError, AppResult};
use crate::models::document::{require_text, Document, Listing};
use crate::models::Approval;
use serde::{Deserialize, Serialize};

/// Guest review of a trip, shown once moderated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Trip id as a plain string; not checked against the trips collection
    pub trip_id: String,
    pub name: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub approval: Approval,
}

impl Document for Review {
    const COLLECTION: Collection = Collection::Reviews;
    const LABEL: &'static str = "Review";
    const PROTECTED_FIELDS: &'static [&'static str] = &["approval"];

    fn normalize(&mut self) {
        self.trip_id = self.trip_id.trim().to_string();
        self.name = self.name.trim().to_string();
        self.comment = self.comment.trim().to_string();
    }

    fn prepare_new(&mut self) {
        self.approval = Approval::default();
    }

    fn validate(&self) -> AppResult<()> {
        require_text("trip_id", &self.trip_id)?;
        require_text("name", &self.name)?;
        require_text("comment", &self.comment)?;

        if !(1..=5).contains(&self.rating) {
            return Err(AppError::Validation("rating must be between 1 and 5".into()));
        }

        Ok(())
    }
}

impl Listing for Review {
    fn approval(&self) -> &Approval {
        &self.approval
    }

    fn approval_mut(&mut self) -> &mut Approval {
        &mut self.approval
    }
}
