use anyhow::Context;
use otd_config::OtdConfig;

/// Load `.env`, TOML files, and `OTD_*` env into one config.
pub fn load_config() -> anyhow::Result<OtdConfig> {
    let config = OtdConfig::load_with_dotenv().context("failed to load otd configuration")?;
    tracing::debug!(
        endpoint = %config.catalog.endpoint,
        page_size = config.catalog.page_size,
        model = %config.caption.model,
        caption_key = config.caption.is_configured(),
        "configuration loaded"
    );
    Ok(config)
}
