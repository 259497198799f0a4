//! Service layer for the localization API.
//! - Owns the CRUD and bulk-update flows on top of the storage collaborator.
//! - Reuses payload validation and row serialization from the `models` crate.
//! - Exposes clear error types for the HTTP layer to map onto responses.

pub mod errors;
pub mod localizations;
pub mod storage;
