//! Tourdesk Backend Library
//!
//! Storefront and back-office HTTP API for a travel agency. This module
//! exposes the backend components for use by the binary and the tests.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use auth::TokenService;
use database::DocumentStore;
use models::Document;
use repositories::{AdminUserRepository, Repository};
use services::{ApprovalService, AuditTrailService, DashboardService, UserService};
use std::sync::Arc;

/// Application state shared by every request handler
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenService,
    pub audit: Arc<AuditTrailService>,
    pub users: UserService,
    pub approvals: Arc<ApprovalService>,
    pub dashboard: DashboardService,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire services on top of a document store
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> AppResult<Self> {
        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);
        let audit = Arc::new(AuditTrailService::new(config.audit_log_dir.clone())?);

        let users = UserService::new(
            AdminUserRepository::new(store.clone()),
            tokens.clone(),
            audit.clone(),
            config.auth.bcrypt_cost,
        );
        let approvals = Arc::new(ApprovalService::new(store.clone(), audit.clone()));
        let dashboard = DashboardService::new(store.clone(), approvals.clone());

        Ok(Self {
            config,
            store,
            tokens,
            audit,
            users,
            approvals,
            dashboard,
        })
    }

    /// Typed repository over the shared store
    pub fn repository<T: Document>(&self) -> Repository<T> {
        Repository::new(self.store.clone())
    }
}
