pub mod approval;
pub mod audit;
pub mod dashboard;
pub mod user_service;

pub use approval::{ApprovalKind, ApprovalService, Decision, PendingSummary};
pub use audit::{AuditLogEntry, AuditTrailService};
pub use dashboard::{DashboardService, DashboardStats};
pub use user_service::{AdminUserUpdate, LoginResponse, NewAdminUser, UserService};
