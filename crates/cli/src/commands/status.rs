//! `syllabus status` — Show configuration and workspace summary.

use syllabus_config::AppConfig;

use super::{CmdResult, load_config, open_store};

pub async fn run() -> CmdResult {
    let config = load_config()?;
    let store = open_store(&config)?;

    let bound = |v: Option<usize>| v.map_or_else(|| "unbounded".to_string(), |n| n.to_string());
    let documents: usize = store.list().iter().map(|n| n.documents.len()).sum();

    println!("📚 Syllabus Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Data dir:     {}", config.data_dir().display());
    println!("  Provider:     {}", config.default_provider);
    println!("  Model:        {}", config.active_model());
    println!("  API key:      {}", if config.has_api_key() { "configured" } else { "missing" });
    println!("  History:      {}", bound(config.context.max_history_turns));
    println!("  Doc chars:    {}", bound(config.context.max_document_chars));
    println!("  Notebooks:    {}", store.list().len());
    println!("  Documents:    {documents}");

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `syllabus onboard` first");
    }

    Ok(())
}
