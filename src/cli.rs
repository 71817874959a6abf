//! Command-line interface for api-sync: argument exposure and the async
//! entrypoint.
//!
//! All business logic lives in [`crate::synchronise`] and [`crate::client`];
//! this module is strictly glue. [`run`] is extracted from `main` so
//! integration tests can invoke the CLI logic programmatically.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use crate::client::ApiClient;
use crate::config::Params;
use crate::synchronise::{sync_all, ModuleSet};

/// CLI for api-sync: import internal OpenAPI documentation into Postman.
#[derive(Parser)]
#[clap(
    name = "api-sync",
    version,
    about = "Imports each module's OpenAPI documentation into Postman, replacing existing collections"
)]
pub struct Cli {
    /// API key for the internal documentation endpoints (default: DOC_API_KEY)
    #[clap(long)]
    pub doc_api_key: Option<String>,

    /// Postman API key (default: PM_API_KEY)
    #[clap(long)]
    pub pm_api_key: Option<String>,

    /// Postman workspace to sync collections into (default: PM_WORKSPACE_ID)
    #[clap(long)]
    pub pm_workspace_id: Option<String>,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    let params = Params::resolve(cli.doc_api_key, cli.pm_api_key, cli.pm_workspace_id)?;

    let client = ApiClient::new(params.doc_api_key, params.pm_api_key);
    let modules = ModuleSet::new();

    match sync_all(&client, &modules, &params.pm_workspace_id).await {
        Ok(()) => {
            info!("All modules synchronised");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Synchronisation failed");
            Err(anyhow::Error::new(e))
        }
    }
}
