//! `redpen status` — Show configuration and provider health.

use redpen_config::AppConfig;
use redpen_core::Provider;
use redpen_provider::OpenAiCompatProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("✒️  Redpen Status");
    println!("================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  API base:     {}", config.api_base_url);
    println!("  Model:        {}", config.model);
    println!("  Context cap:  {} chars", config.max_context_chars);
    println!("  Relay:        {}:{}", config.relay.host, config.relay.port);
    println!(
        "  Proxy:        {}",
        config.proxy_url.as_deref().unwrap_or("none")
    );
    println!(
        "  API key:      {}",
        if config.require_api_key().is_ok() {
            "set"
        } else {
            "missing"
        }
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `redpen onboard` first");
    }

    if config.require_api_key().is_ok() {
        let provider = OpenAiCompatProvider::from_config(&config)?;
        match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider reachable"),
            Ok(false) => println!("  ⚠️  Provider responded with an error"),
            Err(e) => println!("  ❌ Provider unreachable: {e}"),
        }
    }

    Ok(())
}
