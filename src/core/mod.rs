pub mod artifacts;
pub mod features;
pub mod pipeline;
pub mod predictor;

pub use crate::domain::model::{
    EngineeredInput, Estimate, FeatureVector, FormInput, Prediction, RawInput,
};
pub use crate::domain::ports::{ConfigProvider, FeatureTransform, Regressor, Storage};
pub use crate::utils::error::Result;
