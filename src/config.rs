use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};

/// Optional config file, read from the working directory when present.
pub const CONFIG_FILE: &str = "house_price.toml";

/// Where the three startup artifacts live.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. Environment variables (HOUSE_PRICE_* prefix)
/// 2. Config file (./house_price.toml)
/// 3. Built-in defaults (lowest priority)
///
/// Relative file names resolve against `artifact_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// - ENV: HOUSE_PRICE_ARTIFACT_DIR
    /// - Default: current directory
    pub artifact_dir: PathBuf,

    /// - ENV: HOUSE_PRICE_MODEL_FILE
    pub model_file: PathBuf,

    /// - ENV: HOUSE_PRICE_COLUMNS_FILE
    pub columns_file: PathBuf,

    /// - ENV: HOUSE_PRICE_ADDRESSES_FILE
    pub addresses_file: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("."),
            model_file: PathBuf::from("final_house_price_model.json"),
            columns_file: PathBuf::from("model_columns.json"),
            addresses_file: PathBuf::from("address_list.json"),
        }
    }
}

impl ArtifactConfig {
    /// Load configuration from the optional file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if Path::new(CONFIG_FILE).is_file() {
            builder
                .add_file(CONFIG_FILE)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("house_price");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config.with_empty_as_default())
    }

    /// Replace empty values (e.g. `HOUSE_PRICE_MODEL_FILE=`) with the default.
    pub fn with_empty_as_default(self) -> Self {
        let defaults = Self::default();
        let pick = |value: PathBuf, default: PathBuf| {
            if value.as_os_str().is_empty() {
                default
            } else {
                value
            }
        };
        Self {
            artifact_dir: pick(self.artifact_dir, defaults.artifact_dir),
            model_file: pick(self.model_file, defaults.model_file),
            columns_file: pick(self.columns_file, defaults.columns_file),
            addresses_file: pick(self.addresses_file, defaults.addresses_file),
        }
    }

    /// Point every artifact at `dir`, keeping the file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.resolve(&self.model_file)
    }

    pub fn columns_path(&self) -> PathBuf {
        self.resolve(&self.columns_file)
    }

    pub fn addresses_path(&self) -> PathBuf {
        self.resolve(&self.addresses_file)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.artifact_dir.join(file)
        }
    }
}
