//! Config file loading.

use std::path::Path;

use anyhow::{Context, Result};
use sportgear_commerce::config::StoreConfig;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["sportgear.toml", ".sportgear.toml", "sportgear.json"];

/// Load a store config, choosing the format from the file extension.
pub fn load(path: &Path) -> Result<StoreConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if path.extension().map_or(false, |e| e == "json") {
        StoreConfig::from_json_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
    } else {
        StoreConfig::from_toml_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}

/// Render a config in the format matching `path`.
pub fn render(config: &StoreConfig, path: &Path) -> Result<String> {
    if path.extension().map_or(false, |e| e == "json") {
        Ok(serde_json::to_string_pretty(config)?)
    } else {
        let body = config.to_toml_string()?;
        Ok(format!("# SportGear storefront configuration\n\n{}", body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_then_load_toml() {
        let dir = std::env::temp_dir().join(format!("sportgear-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sportgear.toml");

        let mut config = StoreConfig::default();
        config.pricing.tax_rate_bps = 725;
        std::fs::write(&path, render(&config, &path).unwrap()).unwrap();

        assert_eq!(load(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load(Path::new("/nonexistent/sportgear.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
