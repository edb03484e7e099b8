//! Subcommand implementations and the wiring they share.

pub mod chat;
pub mod docs;
pub mod doctor;
pub mod notebook;
pub mod onboard;
pub mod status;
pub mod tool;
pub mod whoami;

use std::sync::Arc;

use syllabus_agent::{ContextAssembler, ContextPolicy, GenerationGateway};
use syllabus_config::AppConfig;
use syllabus_core::notebook::Notebook;
use syllabus_store::{FileSnapshotBackend, WorkspaceStore};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

pub(crate) fn open_store(config: &AppConfig) -> Result<WorkspaceStore, Box<dyn std::error::Error>> {
    let backend = Arc::new(FileSnapshotBackend::new(config.data_dir()));
    Ok(WorkspaceStore::load(backend).map_err(|e| format!("Failed to open workspace: {e}"))?)
}

pub(crate) fn assembler(config: &AppConfig) -> ContextAssembler {
    ContextAssembler::new(ContextPolicy::from(&config.context))
}

/// Gateway over the configured default provider. Fails early, with setup
/// hints, when no API key is available for a hosted provider.
pub(crate) fn gateway(config: &AppConfig) -> Result<GenerationGateway, Box<dyn std::error::Error>> {
    if !config.has_api_key() && config.default_provider != "ollama" {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    SYLLABUS_API_KEY=...   (generic)");
        eprintln!("    GEMINI_API_KEY=...     (Gemini)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let router = syllabus_providers::build_from_config(config);
    let provider = router.default().ok_or("No default provider configured")?;
    Ok(GenerationGateway::new(provider))
}

/// Resolve a notebook by full id or unique id prefix.
pub(crate) fn resolve_notebook<'a>(
    store: &'a WorkspaceStore,
    needle: &str,
) -> Result<&'a Notebook, Box<dyn std::error::Error>> {
    if let Some(exact) = store.get(needle) {
        return Ok(exact);
    }
    let matches: Vec<&Notebook> = store.list().iter().filter(|n| n.id.starts_with(needle)).collect();
    match matches.as_slice() {
        [one] => Ok(*one),
        [] => Err(format!("No notebook with id '{needle}' (see `syllabus notebook list`)").into()),
        _ => Err(format!("Id prefix '{needle}' matches {} notebooks, use more characters", matches.len()).into()),
    }
}

/// First 8 characters of an id, for listings.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
