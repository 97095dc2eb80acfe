use crate::database::{Collection, DocumentQuery, DocumentStore};
use crate::error::AppResult;
use crate::models::RequestStatus;
use crate::services::approval::{ApprovalService, PendingSummary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Back-office landing page numbers
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub totals: BTreeMap<&'static str, i64>,
    pub pending_approvals: PendingSummary,
    pub pending_leads: i64,
    pub pending_custom_requests: i64,
}

pub struct DashboardService {
    store: Arc<dyn DocumentStore>,
    approvals: Arc<ApprovalService>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn DocumentStore>, approvals: Arc<ApprovalService>) -> Self {
        Self { store, approvals }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let everything = DocumentQuery::new().filter_value();
        let pending = DocumentQuery::new()
            .eq("status", RequestStatus::Pending.as_str())
            .filter_value();

        let mut totals = BTreeMap::new();
        for collection in Collection::ALL {
            totals.insert(collection.as_str(), self.store.count(collection, &everything).await?);
        }

        Ok(DashboardStats {
            totals,
            pending_approvals: self.approvals.pending_summary().await?,
            pending_leads: self.store.count(Collection::Leads, &pending).await?,
            pending_custom_requests: self
                .store
                .count(Collection::CustomTourRequests, &pending)
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDocumentStore;
    use crate::models::Lead;
    use crate::repositories::Repository;
    use crate::services::AuditTrailService;

    #[tokio::test]
    async fn test_stats_count_pending_leads() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let audit = Arc::new(AuditTrailService::new(dir.path().to_path_buf()).unwrap());
        let approvals = Arc::new(ApprovalService::new(store.clone(), audit));
        let dashboard = DashboardService::new(store.clone(), approvals);

        let leads: Repository<Lead> = Repository::new(store.clone());
        let lead = leads
            .create(serde_json::from_value(serde_json::json!({
                "name": "Ana",
                "email": "ana@example.com"
            })).unwrap())
            .await
            .unwrap();
        leads
            .create(serde_json::from_value(serde_json::json!({
                "name": "Ben",
                "email": "ben@example.com"
            })).unwrap())
            .await
            .unwrap();

        let mut converted = lead.data.clone();
        converted.status = RequestStatus::Converted;
        leads.save(lead.id, converted).await.unwrap();

        let stats = dashboard.stats().await.unwrap();
        assert_eq!(stats.totals["leads"], 2);
        assert_eq!(stats.totals["trips"], 0);
        assert_eq!(stats.totals.len(), Collection::ALL.len());
        assert_eq!(stats.pending_leads, 1);
        assert_eq!(stats.pending_custom_requests, 0);
        assert_eq!(stats.pending_approvals.total, 0);
    }
}
