//! # contract: interface between the sync pipeline and the remote APIs
//!
//! This module defines a single trait ([`PostmanSync`]) covering the four
//! remote operations the replace protocol needs: fetching a module's
//! OpenAPI document, listing a workspace's collections by name, deleting a
//! collection, and importing a document as a new collection.
//!
//! ## Interface & Extensibility
//! - Implement the [`PostmanSync`] trait to create new clients (HTTP, test
//!   double, recording proxy).
//! - All methods are async and return [`SyncError`] on failure.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests. Mocks are exported
//!   behind the `test-export-mocks` feature (enabled by default).

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::SyncError;

/// The remote operations of the per-module replace protocol.
///
/// Implementors own transport, authentication, and serialization details;
/// the pipeline only sees canonical document text and opaque collection ids.
///
/// The trait is `Send` + `Sync` and intended for async/await usage.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PostmanSync: Send + Sync {
    /// Fetch one module's OpenAPI document from its documentation endpoint,
    /// returning the canonical JSON text (sorted keys, fixed indentation).
    async fn fetch_document(&self, url: &str) -> Result<String, SyncError>;

    /// List ids of all collections in the workspace whose name matches
    /// exactly. Zero matches is an empty list, not an error.
    async fn collections_by_name(
        &self,
        name: &str,
        workspace_id: &str,
    ) -> Result<Vec<String>, SyncError>;

    /// Delete a single collection by id.
    async fn delete_collection(&self, collection_id: &str) -> Result<(), SyncError>;

    /// Import a canonical OpenAPI document into the workspace as a new
    /// collection.
    async fn import_document(
        &self,
        document: &str,
        workspace_id: &str,
    ) -> Result<(), SyncError>;
}
