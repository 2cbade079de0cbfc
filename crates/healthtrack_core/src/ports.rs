//! crates/healthtrack_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's external
//! collaborators. The core never implements these itself; adapters in the
//! service crate do.

use async_trait::async_trait;

use crate::domain::FacilityRecord;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external sources (files, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait FacilityDataSource: Send + Sync {
    /// Every facility the source knows about, in source order.
    async fn list_facilities(&self) -> PortResult<Vec<FacilityRecord>>;

    async fn get_facility(&self, id: &str) -> PortResult<FacilityRecord>;
}
