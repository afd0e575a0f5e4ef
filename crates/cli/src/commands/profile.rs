//! `summit profile` — Inspect a stored user profile.

use summit_config::AppConfig;
use summit_memory::ProfileStore;

pub fn run(user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = ProfileStore::new(config.memory.dir.clone());

    let (profile, exists) = store.inspect(user);
    if !exists {
        println!("No stored profile for '{user}' (showing the empty default)");
    }
    println!("{}", serde_json::to_string_pretty(&profile)?);

    Ok(())
}
