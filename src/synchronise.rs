//! Per-module replace protocol and the orchestrator that fans it out.
//!
//! For each configured module the pipeline fetches the current OpenAPI
//! document, deletes every collection already bearing the module's
//! collection name, and imports the fresh document. [`sync_all`] runs the
//! protocol for all modules concurrently and waits for every attempt to
//! finish before reporting.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{error, info};

use crate::contract::PostmanSync;
use crate::error::SyncError;

/// Static table of module key → Postman collection display name.
///
/// Constructed once at startup and read-only thereafter; adding a module is
/// a data change here, not a control-flow change.
pub struct ModuleSet {
    modules: HashMap<String, String>,
}

impl ModuleSet {
    /// The deployed module set.
    pub fn new() -> Self {
        Self::from_entries([
            ("members".to_string(), "Members Module API".to_string()),
            ("brands".to_string(), "Brands Module API".to_string()),
            ("classes".to_string(), "Classes Module API".to_string()),
            ("vivapay".to_string(), "Payments Module API".to_string()),
        ])
    }

    /// Builds a set from explicit (module, collection name) pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            modules: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterates (module, collection name) pairs. Order is not significant.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.modules.iter().map(|(m, c)| (m.as_str(), c.as_str()))
    }
}

impl Default for ModuleSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Documentation endpoint for one module's OpenAPI document.
fn doc_endpoint(module: &str) -> String {
    format!("https://api.{module}.vivalabs-dev.link/v1/internal-docs")
}

/// Replaces one module's collection: fetch the current document, delete any
/// existing collections bearing the module's collection name, import fresh.
///
/// Fetch, list and import failures abort the module. Deletion failures are
/// logged and tolerated: a stale duplicate must not block getting fresh
/// content live. A module that fails at import after deletions ends up with
/// no collection of that name until the next successful round.
pub async fn sync_module<A>(
    api: &A,
    module: &str,
    collection_name: &str,
    workspace_id: &str,
) -> Result<(), SyncError>
where
    A: PostmanSync,
{
    info!(module, "Processing module");

    let url = doc_endpoint(module);
    let document = match api.fetch_document(&url).await {
        Ok(doc) => doc,
        Err(e) => {
            error!(module, error = %e, "Failed to fetch documentation");
            return Err(e);
        }
    };

    let existing = match api.collections_by_name(collection_name, workspace_id).await {
        Ok(ids) => ids,
        Err(e) => {
            error!(module, error = %e, "Failed to check existing collections");
            return Err(e);
        }
    };

    for id in &existing {
        info!(module, collection_id = %id, "Found existing collection, deleting");
        if let Err(e) = api.delete_collection(id).await {
            error!(module, collection_id = %id, error = %e, "Failed to delete collection");
        }
    }

    if let Err(e) = api.import_document(&document, workspace_id).await {
        error!(module, error = %e, "Postman import failed");
        return Err(e);
    }

    info!(module, "Processed module");
    Ok(())
}

/// Synchronises every module in the set concurrently.
///
/// All attempts are launched before any is awaited and all run to
/// completion (full join, no cancellation); one module's failure never
/// interrupts another's in-flight attempt. Every failure is logged; the
/// first collected error is returned. Which of several concurrent failures
/// surfaces is not specified.
pub async fn sync_all<A>(
    api: &A,
    modules: &ModuleSet,
    workspace_id: &str,
) -> Result<(), SyncError>
where
    A: PostmanSync,
{
    info!(
        modules = modules.len(),
        workspace_id, "Starting synchronisation round"
    );

    let attempts = modules
        .iter()
        .map(|(module, collection_name)| sync_module(api, module, collection_name, workspace_id));
    let results = join_all(attempts).await;

    let total = results.len();
    let mut errors: Vec<SyncError> = results.into_iter().filter_map(Result::err).collect();
    if !errors.is_empty() {
        error!(
            failed = errors.len(),
            total, "Synchronisation round finished with failures"
        );
        return Err(errors.remove(0));
    }

    info!(total, "Synchronisation round complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_endpoint_is_parameterised_by_module_key() {
        assert_eq!(
            doc_endpoint("members"),
            "https://api.members.vivalabs-dev.link/v1/internal-docs"
        );
    }

    #[test]
    fn deployed_module_set_maps_keys_to_collection_names() {
        let modules = ModuleSet::new();
        assert_eq!(modules.len(), 4);
        let pairs: HashMap<&str, &str> = modules.iter().collect();
        assert_eq!(pairs["members"], "Members Module API");
        assert_eq!(pairs["brands"], "Brands Module API");
        assert_eq!(pairs["classes"], "Classes Module API");
        assert_eq!(pairs["vivapay"], "Payments Module API");
    }
}
