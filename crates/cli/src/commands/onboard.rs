//! `summit onboard` — First-time setup.

use summit_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("Summit — First-Time Setup");
    println!("=========================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {}", config_dir.display());
    } else {
        println!("Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("Config file already exists: {}", config_path.display());
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("Created config file: {}", config_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. Set your API key:  export ANTHROPIC_API_KEY=sk-ant-...");
    println!("  2. Start the server:  summit serve");
    println!("  3. Or chat directly:  summit chat");

    Ok(())
}
