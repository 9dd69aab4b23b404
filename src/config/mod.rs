mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./placepug.toml",
        "./config.toml",
        "~/.config/placepug/config.toml",
        "/etc/placepug/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.server.render_timeout_secs == 0 {
        anyhow::bail!("server.render_timeout_secs must be at least 1");
    }

    if config.images.max_dimension == 0 {
        anyhow::bail!("images.max_dimension must be at least 1");
    }

    if !(1..=100).contains(&config.images.jpeg_quality) {
        anyhow::bail!(
            "images.jpeg_quality must be between 1 and 100, got {}",
            config.images.jpeg_quality
        );
    }

    if config.images.catalogue_file.is_empty() {
        anyhow::bail!("images.catalogue_file cannot be empty");
    }

    if !config.images.dir.exists() {
        tracing::warn!("Images directory does not exist: {:?}", config.images.dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8482);
        assert_eq!(config.server.render_timeout_secs, 30);
        assert_eq!(config.images.dir, PathBuf::from("images"));
        assert_eq!(config.images.mode, ImageMode::Catalogue);
        assert_eq!(config.images.catalogue_file, "catalogue.json");
        assert_eq!(config.images.max_dimension, 2000);
        assert_eq!(config.images.jpeg_quality, 75);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.port, 8482);
        assert_eq!(config.images.mode, ImageMode::Catalogue);
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            render_timeout_secs = 5

            [images]
            dir = "/srv/pugs"
            mode = "directory"
            max_dimension = 1000
            jpeg_quality = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.render_timeout_secs, 5);
        assert_eq!(config.images.dir, PathBuf::from("/srv/pugs"));
        assert_eq!(config.images.mode, ImageMode::Directory);
        assert_eq!(config.images.catalogue_file, "catalogue.json");
        assert_eq!(config.images.max_dimension, 1000);
        assert_eq!(config.images.jpeg_quality, 90);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse_config("[server]\nport = 0").is_err());
        assert!(parse_config("[server]\nrender_timeout_secs = 0").is_err());
        assert!(parse_config("[images]\nmax_dimension = 0").is_err());
        assert!(parse_config("[images]\njpeg_quality = 0").is_err());
        assert!(parse_config("[images]\njpeg_quality = 101").is_err());
        assert!(parse_config("[images]\nmode = \"random\"").is_err());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("placepug.toml");
        std::fs::write(&path, "[server]\nport = 8500\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server.port, 8500);

        let config = load_config_or_default(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8500);
    }

    #[test]
    fn test_load_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
