use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use models::localization::{Localization, LocalizationUpdate};

use crate::errors::ServiceError;
use crate::storage::LocalizationStore;

/// Outcome of a bulk update. The batch itself always succeeds; entries that
/// matched no row or hit a storage failure are reported here by id only.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateOutcome {
    pub success_count: u32,
    pub failed_ids: Vec<Uuid>,
}

/// Application service for localization records: validates payload shape,
/// serializes to storage rows, and forwards one call per operation to the
/// storage collaborator.
pub struct LocalizationService {
    store: Arc<dyn LocalizationStore>,
}

impl LocalizationService {
    pub fn new(store: Arc<dyn LocalizationStore>) -> Self {
        Self { store }
    }

    /// Fetch all records. Zero rows is reported as `NotFound`, mirroring the
    /// contract existing consumers rely on.
    pub async fn list(&self) -> Result<Vec<Value>, ServiceError> {
        let rows = self.store.select_all().await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound("No localizations found".into()));
        }
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> Result<Value, ServiceError> {
        self.store
            .select_one(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Localization not found".into()))
    }

    pub async fn create(&self, input: &Localization) -> Result<Vec<Value>, ServiceError> {
        input.validate()?;
        let rows = self.store.insert(input.to_row()?).await?;
        info!(key = %input.key, "created localization");
        Ok(rows)
    }

    /// Full-document replace of the row matching `id`. An id that matches no
    /// row is not an error here; the backend's empty result passes through.
    pub async fn update(
        &self,
        id: &str,
        input: &LocalizationUpdate,
    ) -> Result<Vec<Value>, ServiceError> {
        input.validate()?;
        let rows = self.store.update(id, input.to_row()?).await?;
        info!(%id, matched = rows.len(), "updated localization");
        Ok(rows)
    }

    pub async fn delete(&self, id: &str) -> Result<Vec<Value>, ServiceError> {
        let rows = self.store.delete(id).await?;
        info!(%id, matched = rows.len(), "deleted localization");
        Ok(rows)
    }

    /// Apply a batch of independent updates strictly in order, continuing
    /// past individual failures. An entry fails when validation or the
    /// storage call fails, or when the backend reports no affected rows;
    /// only the entry's id is retained, not the reason.
    pub async fn bulk_update(&self, entries: &[LocalizationUpdate]) -> BulkUpdateOutcome {
        let mut outcome = BulkUpdateOutcome::default();
        for entry in entries {
            match self.update(&entry.id.to_string(), entry).await {
                Ok(rows) if !rows.is_empty() => outcome.success_count += 1,
                Ok(_) => {
                    warn!(id = %entry.id, "bulk update entry matched no rows");
                    outcome.failed_ids.push(entry.id);
                }
                Err(e) => {
                    warn!(id = %entry.id, error = %e, "bulk update entry failed");
                    outcome.failed_ids.push(entry.id);
                }
            }
        }
        info!(
            total = entries.len(),
            succeeded = outcome.success_count,
            failed = outcome.failed_ids.len(),
            "bulk update finished"
        );
        outcome
    }
}
