//! `syllabus onboard` — First-time setup.

use syllabus_config::AppConfig;

use super::CmdResult;

pub async fn run() -> CmdResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("📚 Syllabus — First-Time Setup");
    println!("==============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    let config = AppConfig::load_from(&config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let data_dir = config.data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        println!("✅ Created data directory: {}", data_dir.display());
    }

    println!("\n📝 Next steps:");
    println!("   1. Set GEMINI_API_KEY or add api_key to {}", config_path.display());
    println!("   2. Run: syllabus notebook create --subject DBMS \"Unit 1\"");
    println!("   3. Run: syllabus docs add --notebook <id> syllabus.md");
    println!("   4. Run: syllabus chat --notebook <id>\n");

    Ok(())
}
