use crate::database::Collection;
use crate::error::{AppError, AppResult};
use crate::models::document::{ensure_slug, require_text, Document, Listing, Publishable};
use crate::models::{Approval, Pricing, Publication};
use serde::{Deserialize, Serialize};

/// One day of a trip itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A packaged tour. `destination` is the destination name, matched as a
/// plain string at query time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub destination: String,
    pub duration_days: u32,
    pub pricing: Pricing,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub publication: Publication,
    #[serde(default)]
    pub approval: Approval,
}

impl Trip {
    /// Visible on the storefront
    pub fn is_live(&self) -> bool {
        self.publication.is_published() && self.approval.is_approved()
    }
}

impl Document for Trip {
    const COLLECTION: Collection = Collection::Trips;
    const LABEL: &'static str = "Trip";
    const PROTECTED_FIELDS: &'static [&'static str] = &["approval", "publication"];

    fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.destination = self.destination.trim().to_string();
        ensure_slug(&mut self.slug, &self.title);
        self.pricing.normalize();
        self.publication.normalize();
        self.itinerary.sort_by_key(|day| day.day);
    }

    fn prepare_new(&mut self) {
        self.approval = Approval::default();
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        require_text("destination", &self.destination)?;
        require_text("slug", &self.slug)?;

        if self.duration_days == 0 {
            return Err(AppError::Validation("duration_days must be at least 1".into()));
        }

        if let Some(day) = self
            .itinerary
            .iter()
            .find(|d| d.day == 0 || d.day > self.duration_days)
        {
            return Err(AppError::Validation(format!(
                "itinerary day {} is outside the trip duration",
                day.day
            )));
        }

        self.pricing.validate()
    }
}

impl Listing for Trip {
    fn approval(&self) -> &Approval {
        &self.approval
    }

    fn approval_mut(&mut self) -> &mut Approval {
        &mut self.approval
    }
}

impl Publishable for Trip {
    fn publication(&self) -> &Publication {
        &self.publication
    }

    fn publication_mut(&mut self) -> &mut Publication {
        &mut self.publication
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApprovalStatus;
    use serde_json::json;

    fn trip_json() -> serde_json::Value {
        json!({
            "title": "Cretan Highlights",
            "destination": " Crete ",
            "duration_days": 5,
            "pricing": {"price": "900", "discount_percent": "10"},
            "itinerary": [
                {"day": 2, "title": "Knossos"},
                {"day": 1, "title": "Arrival in Heraklion"}
            ],
            "approval": {"status": "approved"}
        })
    }

    #[test]
    fn test_normalize_derives_fields() {
        let mut trip: Trip = serde_json::from_value(trip_json()).unwrap();
        trip.prepare_new();
        trip.normalize();

        assert_eq!(trip.slug, "cretan-highlights");
        assert_eq!(trip.destination, "Crete");
        assert_eq!(trip.pricing.final_price.to_string(), "810.00");
        assert_eq!(trip.itinerary[0].day, 1);
        // Clients cannot self-approve
        assert_eq!(trip.approval.status, ApprovalStatus::PendingApproval);
        assert!(trip.validate().is_ok());
        assert!(!trip.is_live());
    }

    #[test]
    fn test_validation_errors() {
        let mut trip: Trip = serde_json::from_value(trip_json()).unwrap();
        trip.duration_days = 0;
        assert!(trip.validate().is_err());

        let mut trip: Trip = serde_json::from_value(trip_json()).unwrap();
        trip.itinerary.push(ItineraryDay { day: 9, title: "Extra".into(), description: None });
        assert!(trip.validate().is_err());
    }

    #[test]
    fn test_missing_required_field_fails_to_parse() {
        let mut value = trip_json();
        value.as_object_mut().unwrap().remove("pricing");
        assert!(serde_json::from_value::<Trip>(value).is_err());
    }
}
