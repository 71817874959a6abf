#![doc = "api-sync: replaces Postman workspace collections with freshly fetched OpenAPI documents."]

//! This crate fetches each configured module's internal OpenAPI document and
//! re-imports it into a Postman workspace, deleting any previously imported
//! collection of the same name first. One invocation synchronises all modules
//! concurrently.
//!
//! # Usage
//! The `api-sync` binary is the intended entrypoint; library consumers can
//! drive [`synchronise::sync_all`] directly with any [`contract::PostmanSync`]
//! implementation.

pub mod cli;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod synchronise;
