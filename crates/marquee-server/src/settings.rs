//! Server configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `marquee.toml` in the working directory, then `MARQUEE_*` environment
//! variables (`MARQUEE_BIND_ADDRESS`, `MARQUEE_DATABASE_PATH`, `MARQUEE_STORAGE`).

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;

/// Which catalog backend to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub database_path: String,
    pub storage: StorageBackend,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let builder = defaults()?
            .add_source(File::with_name("marquee").required(false))
            .add_source(Environment::with_prefix("MARQUEE"));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("bind_address", "0.0.0.0:3000")?
        .set_default("database_path", "data/marquee.db")?
        .set_default("storage", "sqlite")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_builder(defaults().unwrap()).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:3000");
        assert_eq!(settings.database_path, "data/marquee.db");
        assert_eq!(settings.storage, StorageBackend::Sqlite);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
bind_address = "127.0.0.1:8080"
storage = "memory"
"#;
        let builder = defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml));
        let settings = Settings::from_builder(builder).unwrap();

        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.database_path, "data/marquee.db");
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let builder = defaults()
            .unwrap()
            .add_source(File::from_str(r#"storage = "mongo""#, FileFormat::Toml));
        assert!(Settings::from_builder(builder).is_err());
    }
}
