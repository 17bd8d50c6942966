#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, FeatureArgs};
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARTIFACT_DIR: &str = "./models";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_MODEL_FILE: &str = "lasso_model.json";

/// Where the two fitted artifacts live. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_dir")]
    pub dir: String,
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,
    #[serde(default = "default_model_file")]
    pub model_file: String,
}

fn default_dir() -> String {
    DEFAULT_ARTIFACT_DIR.to_string()
}

fn default_scaler_file() -> String {
    DEFAULT_SCALER_FILE.to_string()
}

fn default_model_file() -> String {
    DEFAULT_MODEL_FILE.to_string()
}

impl ArtifactPaths {
    pub fn new(dir: &str, scaler_file: &str, model_file: &str) -> Self {
        Self {
            dir: dir.to_string(),
            scaler_file: scaler_file.to_string(),
            model_file: model_file.to_string(),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_DIR, DEFAULT_SCALER_FILE, DEFAULT_MODEL_FILE)
    }
}

impl ConfigProvider for ArtifactPaths {
    fn artifact_dir(&self) -> &str {
        &self.dir
    }

    fn scaler_file(&self) -> &str {
        &self.scaler_file
    }

    fn model_file(&self) -> &str {
        &self.model_file
    }
}

impl Validate for ArtifactPaths {
    fn validate(&self) -> Result<()> {
        validate_path("artifacts.dir", &self.dir)?;
        validate_path("artifacts.scaler_file", &self.scaler_file)?;
        validate_path("artifacts.model_file", &self.model_file)?;
        validate_file_extension("artifacts.scaler_file", &self.scaler_file, &["json"])?;
        validate_file_extension("artifacts.model_file", &self.model_file, &["json"])?;
        Ok(())
    }
}
