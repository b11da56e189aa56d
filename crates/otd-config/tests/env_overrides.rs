use figment::Jail;
use otd_config::OtdConfig;
use pretty_assertions::assert_eq;

#[test]
fn prefixed_env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("OTD_CATALOG__PAGE_SIZE", "100");
        jail.set_env("OTD_CAPTION__MODEL", "gemini-test");

        let config = OtdConfig::load().expect("config loads");
        assert_eq!(config.catalog.page_size, 100);
        assert_eq!(config.caption.model, "gemini-test");
        Ok(())
    });
}

#[test]
fn unprefixed_api_key_fills_empty_caption_key() {
    Jail::expect_with(|jail| {
        jail.set_env("API_KEY", "from-plain-env");

        let config = OtdConfig::load().expect("config loads");
        assert_eq!(config.caption.api_key, "from-plain-env");
        assert!(config.caption.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_api_key_beats_unprefixed() {
    Jail::expect_with(|jail| {
        jail.set_env("API_KEY", "plain");
        jail.set_env("OTD_CAPTION__API_KEY", "prefixed");

        let config = OtdConfig::load().expect("config loads");
        assert_eq!(config.caption.api_key, "prefixed");
        Ok(())
    });
}
