use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ServiceError;

pub mod memory;
pub mod supabase;

/// The storage collaborator: a hosted row store holding the localization
/// table. Every operation returns the matching/affected rows as reported by
/// the backend. Identifiers are forwarded as opaque strings; a malformed id
/// is the backend's to reject, not ours.
#[async_trait]
pub trait LocalizationStore: Send + Sync {
    /// Fetch every row, unfiltered.
    async fn select_all(&self) -> Result<Vec<Value>, ServiceError>;

    /// Fetch the row whose id equals `id`, expecting at most one match.
    async fn select_one(&self, id: &str) -> Result<Option<Value>, ServiceError>;

    /// Insert a new row; the backend assigns the id. Returns the inserted
    /// row(s) as stored.
    async fn insert(&self, row: Value) -> Result<Vec<Value>, ServiceError>;

    /// Replace the mutable fields of the row whose id equals `id`. An empty
    /// result means no row matched.
    async fn update(&self, id: &str, row: Value) -> Result<Vec<Value>, ServiceError>;

    /// Delete the row whose id equals `id`. An empty result means no row
    /// matched.
    async fn delete(&self, id: &str) -> Result<Vec<Value>, ServiceError>;
}
