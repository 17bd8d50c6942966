use crate::config::{ArtifactPaths, TomlConfig};
use crate::core::FormInput;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "house-price-predictor")]
#[command(about = "Estimate a California median house value from block features")]
pub struct CliConfig {
    #[command(flatten)]
    pub features: FeatureArgs,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Directory holding the scaler and model artifacts")]
    pub artifact_dir: Option<String>,

    #[arg(long, help = "Scaler artifact file name")]
    pub scaler_file: Option<String>,

    #[arg(long, help = "Model artifact file name")]
    pub model_file: Option<String>,

    #[arg(long, help = "Print a JSON report instead of a single line")]
    pub json: bool,

    #[arg(long, help = "Load and validate the artifacts, then exit")]
    pub check: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// The form fields. Defaults match the original form.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct FeatureArgs {
    #[arg(
        long,
        default_value_t = 122.23,
        allow_hyphen_values = true,
        help = "Longitude as a positive magnitude (e.g. 122.23)"
    )]
    pub longitude: f64,

    #[arg(long, default_value_t = 37.88, allow_hyphen_values = true)]
    pub latitude: f64,

    #[arg(long, default_value_t = 28, help = "Housing median age (1-52)")]
    pub housing_median_age: u32,

    #[arg(long, default_value_t = 2000)]
    pub total_rooms: u32,

    #[arg(long, default_value_t = 400)]
    pub total_bedrooms: u32,

    #[arg(long, default_value_t = 1000)]
    pub population: u32,

    #[arg(long, default_value_t = 380)]
    pub households: u32,

    #[arg(
        long,
        default_value_t = 4.0,
        allow_hyphen_values = true,
        help = "Median income in $10k"
    )]
    pub median_income: f64,
}

impl From<&FeatureArgs> for FormInput {
    fn from(args: &FeatureArgs) -> Self {
        FormInput {
            longitude_magnitude: args.longitude,
            latitude: args.latitude,
            housing_median_age: args.housing_median_age,
            total_rooms: args.total_rooms,
            total_bedrooms: args.total_bedrooms,
            population: args.population,
            households: args.households,
            median_income: args.median_income,
        }
    }
}

impl CliConfig {
    pub fn form_input(&self) -> FormInput {
        FormInput::from(&self.features)
    }

    /// Command line flags win over the TOML file, which wins over defaults.
    pub fn artifact_paths(&self, file: Option<&TomlConfig>) -> ArtifactPaths {
        let mut paths = file.map(|f| f.artifacts.clone()).unwrap_or_default();
        if let Some(dir) = &self.artifact_dir {
            paths.dir = dir.clone();
        }
        if let Some(scaler_file) = &self.scaler_file {
            paths.scaler_file = scaler_file.clone();
        }
        if let Some(model_file) = &self.model_file {
            paths.model_file = model_file.clone();
        }
        paths
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Some(dir) = &self.artifact_dir {
            validate_path("artifact_dir", dir)?;
        }
        Ok(())
    }
}
