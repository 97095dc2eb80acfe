use crate::database::{Collection, RawDocument};
use crate::error::{AppError, AppResult};
use crate::models::{Approval, Publication, RequestStatus};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record type stored in one collection
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    /// Singular name for messages ("Trip not found")
    const LABEL: &'static str;

    /// Top-level fields a generic update may not touch. They change only
    /// through their dedicated workflow endpoints.
    const PROTECTED_FIELDS: &'static [&'static str] = &[];

    /// Fill defaulted and derived fields (slugs, final prices)
    fn normalize(&mut self) {}

    /// Storefront address, unique within the collection
    fn slug(&self) -> Option<&str> {
        None
    }

    /// Reset fields a client must not choose on creation
    fn prepare_new(&mut self) {}

    fn validate(&self) -> AppResult<()>;
}

/// Records that go through the approval workflow
pub trait Listing: Document {
    fn approval(&self) -> &Approval;
    fn approval_mut(&mut self) -> &mut Approval;
}

/// Records with a draft/published flag
pub trait Publishable: Document {
    fn publication(&self) -> &Publication;
    fn publication_mut(&mut self) -> &mut Publication;
}

/// Inquiries worked through by the sales team
pub trait FollowUp: Document {
    fn status(&self) -> RequestStatus;
    fn set_status(&mut self, status: RequestStatus);

    /// Internal follow-up notes, for types that keep them
    fn set_notes(&mut self, _notes: Option<String>) {}
}

/// A stored document with its identity and timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: Document> Record<T> {
    pub fn from_raw(raw: RawDocument) -> AppResult<Self> {
        let data = serde_json::from_value(raw.data).map_err(|e| {
            AppError::Message(format!("Corrupt {} document {}: {}", T::COLLECTION, raw.id, e))
        })?;

        Ok(Self {
            id: raw.id,
            data,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

/// URL slug: lowercase ASCII alphanumerics separated by single hyphens
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Fill an empty slug from `source`, or re-normalize a client-supplied one
pub fn ensure_slug(slug: &mut String, source: &str) {
    let base = if slug.trim().is_empty() { source } else { slug.as_str() };
    *slug = slugify(base);
}

pub fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> AppResult<()> {
    let email = email.trim();
    require_text("email", email)?;

    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::Validation("Invalid email address".into()));
    };

    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.len() > 254
    {
        return Err(AppError::Validation("Invalid email address".into()));
    }

    Ok(())
}
