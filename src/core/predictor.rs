use crate::core::artifacts::Artifacts;
use crate::core::features::engineer;
use crate::core::pipeline::{predict, predict_vector};
use crate::core::{Estimate, FeatureVector, Prediction, RawInput};
use crate::utils::error::Result;
use std::sync::Arc;

/// Per-process inference context. Built once after the artifacts load and
/// passed to whatever serves requests; it never changes afterwards.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: Arc<Artifacts>,
}

impl Predictor {
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Runs feature engineering and scoring for one record.
    ///
    /// Input errors only reject this record; the loaded artifacts are
    /// untouched.
    pub fn estimate(&self, raw: &RawInput) -> Result<Estimate> {
        tracing::debug!("Step 1: Engineering ratio features...");
        let engineered = engineer(raw)?;
        tracing::debug!(
            "rooms_per_household={}, bedrooms_per_room={}, population_per_household={}",
            engineered.rooms_per_household,
            engineered.bedrooms_per_room,
            engineered.population_per_household
        );

        tracing::debug!("Step 2: Scaling and scoring...");
        let prediction = predict(&engineered, self.artifacts.scaler(), self.artifacts.model())?;

        tracing::info!("🏡 Estimated value: {}", prediction);

        Ok(Estimate {
            engineered,
            prediction,
        })
    }

    pub fn score_vector(&self, features: &FeatureVector) -> Result<Prediction> {
        predict_vector(features, self.artifacts.scaler(), self.artifacts.model())
    }
}
