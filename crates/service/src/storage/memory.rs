use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::LocalizationStore;

/// In-memory row store with the same contract as the hosted backend:
/// ids assigned on insert, equality-filtered mutations reporting affected
/// rows. Used by the test suites and handy for running the service locally
/// without a Supabase project.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn row_id(row: &Value) -> Option<&str> {
        row.get("id").and_then(Value::as_str)
    }
}

#[async_trait]
impl LocalizationStore for MemoryStore {
    async fn select_all(&self) -> Result<Vec<Value>, ServiceError> {
        Ok(self.rows.read().await.clone())
    }

    async fn select_one(&self, id: &str) -> Result<Option<Value>, ServiceError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| Self::row_id(r) == Some(id)).cloned())
    }

    async fn insert(&self, mut row: Value) -> Result<Vec<Value>, ServiceError> {
        let obj = row
            .as_object_mut()
            .ok_or_else(|| ServiceError::Storage("row must be a JSON object".into()))?;
        obj.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        self.rows.write().await.push(row.clone());
        Ok(vec![row])
    }

    async fn update(&self, id: &str, row: Value) -> Result<Vec<Value>, ServiceError> {
        if !row.is_object() {
            return Err(ServiceError::Storage("row must be a JSON object".into()));
        }
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| Self::row_id(r) == Some(id)) {
            Some(existing) => {
                *existing = row;
                Ok(vec![existing.clone()])
            }
            None => Ok(Vec::new()),
        }
    }

    async fn delete(&self, id: &str) -> Result<Vec<Value>, ServiceError> {
        let mut rows = self.rows.write().await;
        match rows.iter().position(|r| Self::row_id(r) == Some(id)) {
            Some(pos) => Ok(vec![rows.remove(pos)]),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_id_and_select_round_trips() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let inserted = store.insert(json!({ "key": "_hi_", "translations": {} })).await?;
        let id = inserted[0]["id"].as_str().unwrap().to_string();

        let found = store.select_one(&id).await?.expect("row present");
        assert_eq!(found["key"], "_hi_");

        assert_eq!(store.select_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_report_empty_for_missing_ids() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        assert!(store.update("missing", json!({})).await?.is_empty());
        assert!(store.delete("missing").await?.is_empty());
        Ok(())
    }
}
