//! `syllabus doctor` — Diagnose setup problems.

use std::sync::Arc;

use syllabus_config::AppConfig;
use syllabus_core::provider::Provider;
use syllabus_store::{FileSnapshotBackend, WorkspaceStore};

use super::CmdResult;

pub async fn run() -> CmdResult {
    println!("🩺 Syllabus Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file — run `syllabus onboard` (defaults in use)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 blocking issue found. Fix the config and re-run.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key — set GEMINI_API_KEY or api_key in config.toml");
        issues += 1;
    }

    let backend = Arc::new(FileSnapshotBackend::new(config.data_dir()));
    match WorkspaceStore::load(backend) {
        Ok(store) => println!("  ✅ Workspace readable ({} notebooks)", store.list().len()),
        Err(e) => {
            println!("  ❌ Workspace unreadable: {e}");
            issues += 1;
        }
    }

    if config.has_api_key() {
        let router = syllabus_providers::build_from_config(&config);
        println!("  ℹ️  Providers configured: {}", router.list().join(", "));
        if let Some(provider) = router.default() {
            match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
                Ok(false) => {
                    println!("  ⚠️  Provider '{}' rejected the health check", provider.name());
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Provider '{}' unreachable: {e}", provider.name());
                    issues += 1;
                }
            }
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
