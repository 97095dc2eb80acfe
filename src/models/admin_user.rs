use crate::auth::Role;
use crate::database::Collection;
use crate::error::AppResult;
use crate::models::document::{require_text, validate_email, Document, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_active() -> bool {
    true
}

/// Back-office account. Stored with its bcrypt hash; never returned as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Document for AdminUser {
    const COLLECTION: Collection = Collection::AdminUsers;
    const LABEL: &'static str = "User";
    const PROTECTED_FIELDS: &'static [&'static str] = &["password_hash", "last_login_at"];

    fn normalize(&mut self) {
        self.email = self.email.trim().to_lowercase();
        self.name = self.name.trim().to_string();
    }

    fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        require_text("name", &self.name)?;
        require_text("password_hash", &self.password_hash)
    }
}

/// Client-facing projection of an admin user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUserView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub permissions: Vec<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Record<AdminUser>> for AdminUserView {
    fn from(record: Record<AdminUser>) -> Self {
        Self {
            id: record.id,
            permissions: record.data.role.permission_names(),
            email: record.data.email,
            name: record.data.name,
            role: record.data.role,
            active: record.data.active,
            last_login_at: record.data.last_login_at,
            created_at: record.created_at,
        }
    }
}
