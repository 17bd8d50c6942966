pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LinearKind, LinearModel, LocalStorage, MemoryStorage, Scaler};
pub use config::{ArtifactPaths, TomlConfig};
pub use crate::core::artifacts::{ArtifactLoader, Artifacts};
pub use crate::core::{features::engineer, pipeline::predict, predictor::Predictor};
pub use domain::model::{
    westward_longitude, EngineeredInput, Estimate, FeatureVector, FormInput, Prediction, RawInput,
    FEATURE_COLUMNS, FEATURE_COUNT,
};
pub use utils::error::{PredictorError, Result};
pub use utils::format::format_currency;
