//! Runtime parameters for a synchronisation run.
//!
//! Three values are required: one key per remote service and the target
//! workspace id. Each can come from a CLI flag or from the matching
//! environment variable; the flag wins when both are set.

use anyhow::Result;
use tracing::error;

/// Resolved credentials and target workspace for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub doc_api_key: String,
    pub pm_api_key: String,
    pub pm_workspace_id: String,
}

impl Params {
    /// Resolves each parameter from an explicit flag value, falling back to
    /// the matching environment variable. Empty values count as missing.
    pub fn resolve(
        doc_api_key: Option<String>,
        pm_api_key: Option<String>,
        pm_workspace_id: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            doc_api_key: required("doc-api-key", "DOC_API_KEY", doc_api_key)?,
            pm_api_key: required("pm-api-key", "PM_API_KEY", pm_api_key)?,
            pm_workspace_id: required("pm-workspace-id", "PM_WORKSPACE_ID", pm_workspace_id)?,
        })
    }
}

fn required(flag: &str, env_var: &str, value: Option<String>) -> Result<String> {
    let resolved = value
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var(env_var).ok())
        .filter(|v| !v.is_empty());
    match resolved {
        Some(v) => Ok(v),
        None => {
            error!(flag, env_var, "Missing required parameter");
            anyhow::bail!("{flag} is required")
        }
    }
}
