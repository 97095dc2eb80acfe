use crate::auth::AdminSession;
use crate::database::Collection;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Audit log entry, one JSON object per line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: i64,
    pub action: String, // "listing_approved", "record_deleted", "user_created", ...
    pub collection: Option<Collection>,
    pub record_id: Option<Uuid>,
    pub actor_id: Option<Uuid>,
    pub actor_email: Option<String>,
    pub details: serde_json::Value,
}

/// Append-only trail of back-office decisions
pub struct AuditTrailService {
    log_file: PathBuf,
    file_handle: Arc<Mutex<std::fs::File>>,
}

impl AuditTrailService {
    /// Create a new audit trail service writing to a dated file in `log_directory`
    pub fn new(log_directory: PathBuf) -> AppResult<Self> {
        std::fs::create_dir_all(&log_directory)
            .map_err(|e| AppError::Message(format!("Failed to create log directory: {}", e)))?;

        let date = chrono::Utc::now().format("%Y-%m-%d");
        let log_file = log_directory.join(format!("audit_{}.log", date));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| AppError::Message(format!("Failed to open audit log file: {}", e)))?;

        info!("Audit trail initialized: {:?}", log_file);

        Ok(Self {
            log_file,
            file_handle: Arc::new(Mutex::new(file)),
        })
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Log an audit entry
    pub async fn log(&self, entry: AuditLogEntry) -> AppResult<()> {
        let json = serde_json::to_string(&entry)?;

        let mut file = self.file_handle.lock().await;
        writeln!(file, "{}", json)
            .map_err(|e| AppError::Message(format!("Failed to write audit log: {}", e)))?;

        file.flush()
            .map_err(|e| AppError::Message(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    fn entry(
        action: &str,
        collection: Collection,
        record_id: Uuid,
        actor: &AdminSession,
        details: serde_json::Value,
    ) -> AuditLogEntry {
        AuditLogEntry {
            timestamp: chrono::Utc::now().timestamp(),
            action: action.to_string(),
            collection: Some(collection),
            record_id: Some(record_id),
            actor_id: Some(actor.user_id()),
            actor_email: Some(actor.claims.email.clone()),
            details,
        }
    }

    /// Log an approve/reject decision
    pub async fn log_approval_decision(
        &self,
        collection: Collection,
        record_id: Uuid,
        status: &str,
        reason: Option<&str>,
        actor: &AdminSession,
    ) -> AppResult<()> {
        let action = format!("listing_{}", status);
        let entry = Self::entry(
            &action,
            collection,
            record_id,
            actor,
            serde_json::json!({
                "status": status,
                "reason": reason,
            }),
        );

        self.log(entry).await
    }

    /// Log a publish/unpublish toggle
    pub async fn log_publication(
        &self,
        collection: Collection,
        record_id: Uuid,
        status: &str,
        actor: &AdminSession,
    ) -> AppResult<()> {
        let entry = Self::entry(
            "publication_changed",
            collection,
            record_id,
            actor,
            serde_json::json!({ "status": status }),
        );

        self.log(entry).await
    }

    /// Log a hard delete
    pub async fn log_deletion(
        &self,
        collection: Collection,
        record_id: Uuid,
        actor: &AdminSession,
    ) -> AppResult<()> {
        let entry = Self::entry(
            "record_deleted",
            collection,
            record_id,
            actor,
            serde_json::Value::Null,
        );

        self.log(entry).await
    }

    /// Log admin account changes
    pub async fn log_user_change(
        &self,
        action: &str,
        user_id: Uuid,
        actor: &AdminSession,
        details: serde_json::Value,
    ) -> AppResult<()> {
        let entry = Self::entry(action, Collection::AdminUsers, user_id, actor, details);
        self.log(entry).await
    }
}
