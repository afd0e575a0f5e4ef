//! `summit serve` — Start the HTTP gateway.

use summit_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("Summit Gateway");
    println!("  Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("  Model:     {} (upgrade: {})", config.model, config.upgrade_model);
    println!("  Strict:    {}", config.strict);

    let engine = super::build_engine(&config)?;
    summit_gateway::serve(config, engine).await?;

    Ok(())
}
