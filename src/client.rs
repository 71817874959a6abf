//! Production [`PostmanSync`] client over HTTP.
//!
//! One [`ApiClient`] serves both remote services: the internal documentation
//! endpoints (read with the documentation key) and the Postman API (list,
//! delete, import with the Postman key). All requests share a single
//! connection pool with a 30-second timeout covering connection and full
//! response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::contract::PostmanSync;
use crate::error::SyncError;

/// Base URL of the Postman collection-management API.
const POSTMAN_BASE_URL: &str = "https://api.getpostman.com";

/// Credential header used by both remote services.
const API_KEY_HEADER: &str = "X-API-Key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client holding the documentation-service key and the Postman key.
pub struct ApiClient {
    http: reqwest::Client,
    doc_api_key: String,
    pm_api_key: String,
}

impl ApiClient {
    pub fn new(doc_api_key: String, pm_api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("building HTTP client");
        Self {
            http,
            doc_api_key,
            pm_api_key,
        }
    }
}

/// Import payload understood by the Postman OpenAPI import endpoint: the
/// document travels as one JSON string, not as nested structure.
#[derive(Serialize)]
struct ImportPayload<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    input: &'a str,
}

fn collections_url(workspace_id: &str) -> String {
    format!("{POSTMAN_BASE_URL}/collections?workspace={workspace_id}")
}

fn collection_url(collection_id: &str) -> String {
    format!("{POSTMAN_BASE_URL}/collections/{collection_id}")
}

fn import_url(workspace_id: &str) -> String {
    format!("{POSTMAN_BASE_URL}/import/openapi?workspace={workspace_id}")
}

/// Re-serializes a decoded JSON document into its canonical text form:
/// object keys sorted, two-space indentation. Two fetches of identical
/// remote content yield byte-identical text regardless of source field
/// order.
fn canonicalise(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("serializing canonical JSON")
}

/// Extracts ids of collections whose name matches exactly (case-sensitive).
/// Entries missing a name or id, or of the wrong shape, are skipped; an
/// absent or ill-typed `collections` field yields no matches.
fn matching_collection_ids(body: &Value, name: &str) -> Vec<String> {
    let Some(collections) = body.get("collections").and_then(Value::as_array) else {
        return Vec::new();
    };
    collections
        .iter()
        .filter(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
        .filter_map(|entry| entry.get("id").and_then(Value::as_str))
        .map(str::to_owned)
        .collect()
}

/// The Postman API answers deletes with 200 or, on some deployments, 204.
fn delete_succeeded(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::NO_CONTENT
}

#[async_trait]
impl PostmanSync for ApiClient {
    async fn fetch_document(&self, url: &str) -> Result<String, SyncError> {
        info!(url, "Fetching module documentation");
        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.doc_api_key)
            .send()
            .await
            .map_err(|e| SyncError::from_send(url, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::from_send(url, e))?;
        if !status.is_success() {
            error!(%status, url, "Documentation endpoint returned an error");
            return Err(SyncError::UnexpectedStatus {
                url: url.to_string(),
                status,
                body,
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| SyncError::Decode {
            url: url.to_string(),
            source: e,
        })?;
        Ok(canonicalise(&value))
    }

    async fn collections_by_name(
        &self,
        name: &str,
        workspace_id: &str,
    ) -> Result<Vec<String>, SyncError> {
        let url = collections_url(workspace_id);
        info!(name, workspace_id, "Listing workspace collections");
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.pm_api_key)
            .send()
            .await
            .map_err(|e| SyncError::from_send(&url, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::from_send(&url, e))?;
        if !status.is_success() {
            error!(%status, %url, "Failed to list collections");
            return Err(SyncError::UnexpectedStatus { url, status, body });
        }
        debug!(body = %body, "Collections response");

        let value: Value = serde_json::from_str(&body).map_err(|e| SyncError::Decode {
            url: url.clone(),
            source: e,
        })?;
        Ok(matching_collection_ids(&value, name))
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<(), SyncError> {
        let url = collection_url(collection_id);
        info!(collection_id, "Deleting collection");
        let resp = self
            .http
            .delete(&url)
            .header(API_KEY_HEADER, &self.pm_api_key)
            .send()
            .await
            .map_err(|e| SyncError::from_send(&url, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::from_send(&url, e))?;
        debug!(%status, body = %body, "Delete response");
        if !delete_succeeded(status) {
            error!(%status, collection_id, "Failed to delete collection");
            return Err(SyncError::UnexpectedStatus { url, status, body });
        }

        info!(collection_id, "Deleted collection");
        Ok(())
    }

    async fn import_document(
        &self,
        document: &str,
        workspace_id: &str,
    ) -> Result<(), SyncError> {
        let url = import_url(workspace_id);
        info!(workspace_id, "Importing OpenAPI document");
        let payload = ImportPayload {
            kind: "string",
            input: document,
        };
        let resp = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.pm_api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SyncError::from_send(&url, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::from_send(&url, e))?;
        if !status.is_success() {
            error!(%status, %url, "Import failed");
            return Err(SyncError::UnexpectedStatus { url, status, body });
        }

        info!(response = %body, "Import successful");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_form_sorts_keys_and_indents() {
        let doc: Value = serde_json::from_str(
            r#"{"openapi":"3.0.0","info":{"version":"1.0.0","title":"Test API"}}"#,
        )
        .unwrap();
        let expected = "{\n  \"info\": {\n    \"title\": \"Test API\",\n    \"version\": \"1.0.0\"\n  },\n  \"openapi\": \"3.0.0\"\n}";
        assert_eq!(canonicalise(&doc), expected);
    }

    #[test]
    fn canonical_form_is_independent_of_source_field_order() {
        let a: Value = serde_json::from_str(r#"{"b":1,"a":{"y":true,"x":null}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"a":{"x":null,"y":true},"b":1}"#).unwrap();
        assert_eq!(canonicalise(&a), canonicalise(&b));
    }

    #[test]
    fn matching_ids_filters_by_exact_name() {
        let body = json!({
            "collections": [
                {"id": "abc", "name": "Members Module API"},
                {"id": "def", "name": "Other"},
            ]
        });
        assert_eq!(
            matching_collection_ids(&body, "Members Module API"),
            vec!["abc".to_string()]
        );
    }

    #[test]
    fn matching_ids_is_case_sensitive() {
        let body = json!({"collections": [{"id": "abc", "name": "Members Module API"}]});
        assert!(matching_collection_ids(&body, "members module api").is_empty());
    }

    #[test]
    fn matching_ids_skips_malformed_entries() {
        let body = json!({
            "collections": [
                {"id": "no-name"},
                {"name": "Members Module API"},
                {"id": 42, "name": "Members Module API"},
                "not-an-object",
                {"id": "ok", "name": "Members Module API"},
            ]
        });
        assert_eq!(
            matching_collection_ids(&body, "Members Module API"),
            vec!["ok".to_string()]
        );
    }

    #[test]
    fn matching_ids_is_empty_without_a_collections_field() {
        assert!(matching_collection_ids(&json!({}), "Members Module API").is_empty());
        assert!(matching_collection_ids(&json!({"collections": 3}), "Members Module API").is_empty());
    }

    #[test]
    fn delete_accepts_ok_and_no_content() {
        assert!(delete_succeeded(StatusCode::OK));
        assert!(delete_succeeded(StatusCode::NO_CONTENT));
        assert!(!delete_succeeded(StatusCode::NOT_FOUND));
        assert!(!delete_succeeded(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn postman_urls_carry_workspace_and_collection_ids() {
        assert_eq!(
            collections_url("ws-1"),
            "https://api.getpostman.com/collections?workspace=ws-1"
        );
        assert_eq!(
            collection_url("abc"),
            "https://api.getpostman.com/collections/abc"
        );
        assert_eq!(
            import_url("ws-1"),
            "https://api.getpostman.com/import/openapi?workspace=ws-1"
        );
    }
}
