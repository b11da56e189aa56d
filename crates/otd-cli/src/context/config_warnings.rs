use otd_config::{ENV_PREFIX, OtdConfig};

/// Config sections reachable through `OTD_<SECTION>__<KEY>`.
const SECTIONS: [&str; 3] = ["CATALOG", "CAPTION", "GENERAL"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &OtdConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &OtdConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for section in SECTIONS {
        let single = format!("{ENV_PREFIX}{section}_");
        let double = format!("{ENV_PREFIX}{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{key} is ignored. Use double underscores between section and key (example: {double}{}).",
                example_key(section)
            ));
        }
    }

    if !config.caption.is_configured() && env_keys.iter().any(|key| key == "OTD_API_KEY") {
        warnings.push(
            "OTD_API_KEY is ignored. Use OTD_CAPTION__API_KEY, API_KEY, or GEMINI_API_KEY."
                .to_string(),
        );
    }

    warnings
}

fn example_key(section: &str) -> &'static str {
    match section {
        "CATALOG" => "PAGE_SIZE",
        "CAPTION" => "API_KEY",
        _ => "DEFAULT_FORMAT",
    }
}
