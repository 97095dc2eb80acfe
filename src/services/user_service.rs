use crate::auth::{self, AdminSession, Role, TokenService};
use crate::database::DocumentQuery;
use crate::error::{AppError, AppResult};
use crate::models::{AdminUser, AdminUserView, Record};
use crate::repositories::AdminUserRepository;
use crate::services::AuditTrailService;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Compared against when the email is unknown, so every failed login pays
/// the same bcrypt cost
const DUMMY_PASSWORD: &str = "tourdesk-no-such-account";

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AdminUserView,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminUserUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
    pub password: Option<String>,
}

/// Service for admin accounts and login
pub struct UserService {
    users: AdminUserRepository,
    tokens: TokenService,
    audit: Arc<AuditTrailService>,
    bcrypt_cost: u32,
    dummy_hash: String,
}

impl UserService {
    pub fn new(
        users: AdminUserRepository,
        tokens: TokenService,
        audit: Arc<AuditTrailService>,
        bcrypt_cost: u32,
    ) -> Self {
        let dummy_hash = auth::hash_password(DUMMY_PASSWORD, bcrypt_cost).unwrap_or_else(|e| {
            warn!("Failed to prepare dummy password hash: {}", e);
            String::new()
        });

        Self {
            users,
            tokens,
            audit,
            bcrypt_cost,
            dummy_hash,
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Record<AdminUser>>> {
        let email = email.trim().to_lowercase();
        self.users
            .find_one(DocumentQuery::new().eq("email", email))
            .await
    }

    /// Check credentials and issue a token.
    /// Unknown, inactive and wrong-password accounts all get the same 401.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let Some(mut record) = self.find_by_email(email).await? else {
            auth::verify_password(password, &self.dummy_hash);
            warn!("Login failed: unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        let password_ok = auth::verify_password(password, &record.data.password_hash);
        if !record.data.active || !password_ok {
            warn!("Login failed for user {}", record.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = self
            .tokens
            .issue(record.id, &record.data.email, record.data.role)?;
        let expires_at = Utc::now() + self.tokens.ttl();

        record.data.last_login_at = Some(Utc::now());
        let record = self.users.save(record.id, record.data).await?;

        info!("User {} logged in as {}", record.id, record.data.role.as_str());

        Ok(LoginResponse {
            token,
            expires_at,
            user: record.into(),
        })
    }

    /// Current user's profile. A deleted or deactivated account is treated as signed out.
    pub async fn me(&self, session: &AdminSession) -> AppResult<AdminUserView> {
        match self.users.find_by_id(session.user_id()).await? {
            Some(record) if record.data.active => Ok(record.into()),
            _ => Err(AppError::Unauthorized("Account no longer active".into())),
        }
    }

    pub async fn list(&self, query: &DocumentQuery) -> AppResult<(Vec<AdminUserView>, i64)> {
        let total = self.users.count(query).await?;
        let users = self
            .users
            .find(query)
            .await?
            .into_iter()
            .map(AdminUserView::from)
            .collect();
        Ok((users, total))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<AdminUserView> {
        Ok(self.users.get(id).await?.into())
    }

    async fn insert(&self, input: NewAdminUser) -> AppResult<Record<AdminUser>> {
        if self.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("A user with this email already exists".into()));
        }

        let password_hash = auth::hash_password(&input.password, self.bcrypt_cost)?;

        self.users
            .create(AdminUser {
                email: input.email,
                name: input.name,
                password_hash,
                role: input.role,
                active: input.active.unwrap_or(true),
                last_login_at: None,
            })
            .await
    }

    /// Create an admin account (password >= 8 chars, unique email)
    pub async fn create_user(
        &self,
        input: NewAdminUser,
        actor: &AdminSession,
    ) -> AppResult<AdminUserView> {
        let record = self.insert(input).await?;

        info!("User {} created by {}", record.id, actor.user_id());
        self.audit
            .log_user_change(
                "user_created",
                record.id,
                actor,
                serde_json::json!({ "role": record.data.role.as_str() }),
            )
            .await?;

        Ok(record.into())
    }

    /// Change name, role, active flag or password
    pub async fn update_user(
        &self,
        id: Uuid,
        update: AdminUserUpdate,
        actor: &AdminSession,
    ) -> AppResult<AdminUserView> {
        let mut record = self.users.get(id).await?;

        if id == actor.user_id() && update.active == Some(false) {
            return Err(AppError::Validation("You cannot deactivate your own account".into()));
        }

        if let Some(name) = update.name {
            record.data.name = name;
        }
        if let Some(role) = update.role {
            record.data.role = role;
        }
        if let Some(active) = update.active {
            record.data.active = active;
        }
        let password_changed = update.password.is_some();
        if let Some(password) = update.password {
            record.data.password_hash = auth::hash_password(&password, self.bcrypt_cost)?;
        }

        let record = self.users.save(id, record.data).await?;

        self.audit
            .log_user_change(
                "user_updated",
                id,
                actor,
                serde_json::json!({
                    "role": record.data.role.as_str(),
                    "active": record.data.active,
                    "password_changed": password_changed,
                }),
            )
            .await?;

        Ok(record.into())
    }

    /// Delete an account. Users cannot delete themselves.
    pub async fn delete_user(&self, id: Uuid, actor: &AdminSession) -> AppResult<()> {
        if id == actor.user_id() {
            return Err(AppError::Validation("You cannot delete your own account".into()));
        }

        if !self.users.delete(id).await? {
            return Err(AppError::NotFound("User not found".into()));
        }

        info!("User {} deleted by {}", id, actor.user_id());
        self.audit
            .log_user_change("user_deleted", id, actor, serde_json::Value::Null)
            .await
    }

    /// Create the first super admin if the configured email is not taken yet
    pub async fn bootstrap_super_admin(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<Option<AdminUserView>> {
        if self.find_by_email(email).await?.is_some() {
            info!("Bootstrap admin already exists");
            return Ok(None);
        }

        let record = self
            .insert(NewAdminUser {
                email: email.to_string(),
                name: "Super Admin".to_string(),
                password: password.to_string(),
                role: Role::SuperAdmin,
                active: Some(true),
            })
            .await?;

        info!("Bootstrapped super admin {}", record.data.email);
        Ok(Some(record.into()))
    }
}
