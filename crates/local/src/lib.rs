//! Local collaborator adapters: plain-text ingestion and a config-backed
//! sign-in that needs no network.

pub mod auth;
pub mod ingest;

pub use auth::LocalProfileAuthenticator;
pub use ingest::{PlainTextIngestor, read_files};
