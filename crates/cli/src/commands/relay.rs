//! `redpen relay` — Start the HTTP relay server.

use redpen_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.relay.port = port;
    }

    println!("✒️  Redpen Relay");
    println!("   Listening:    {}:{}", config.relay.host, config.relay.port);
    println!("   Model:        {}", config.model);
    println!("   Context cap:  {} chars", config.max_context_chars);

    redpen_relay::start(config).await?;

    Ok(())
}
