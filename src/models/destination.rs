use crate::database::Collection;
use crate::error::AppResult;
use crate::models::document::{ensure_slug, require_text, Document, Publishable};
use crate::models::Publication;
use serde::{Deserialize, Serialize};

/// A place the agency sells trips to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub publication: Publication,
}

impl Document for Destination {
    const COLLECTION: Collection = Collection::Destinations;
    const LABEL: &'static str = "Destination";
    const PROTECTED_FIELDS: &'static [&'static str] = &["publication"];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        ensure_slug(&mut self.slug, &self.name);
        self.publication.normalize();
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        require_text("slug", &self.slug)
    }
}

impl Publishable for Destination {
    fn publication(&self) -> &Publication {
        &self.publication
    }

    fn publication_mut(&mut self) -> &mut Publication {
        &mut self.publication
    }
}
