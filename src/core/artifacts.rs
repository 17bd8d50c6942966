use crate::adapters::{LinearModel, Scaler};
use crate::core::{ConfigProvider, FeatureTransform, Regressor, Storage};
use crate::domain::model::{check_column_names, FEATURE_COUNT};
use crate::utils::error::{PredictorError, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// The fitted scaler and model, validated against the expected feature layout.
/// Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    scaler: Scaler,
    model: LinearModel,
}

/// Labels used for `ArtifactCorrupt::path` when the artifacts were built
/// in memory rather than read from storage.
pub const SCALER_LABEL: &str = "scaler";
pub const MODEL_LABEL: &str = "model";

impl Artifacts {
    /// Checks that both artifacts have usable parameters and accept exactly
    /// the 11 expected columns, in order when the exporter recorded column
    /// names.
    pub fn new(scaler: Scaler, model: LinearModel) -> Result<Self> {
        scaler.check_parameters().map_err(|reason| PredictorError::ArtifactCorrupt {
            path: SCALER_LABEL.to_string(),
            reason,
        })?;
        model.check_parameters().map_err(|reason| PredictorError::ArtifactCorrupt {
            path: MODEL_LABEL.to_string(),
            reason,
        })?;

        check_dimensionality("scaler", scaler.n_features_in())?;
        if let Some(names) = scaler.feature_names_in() {
            check_column_names("scaler.feature_names_in", names)?;
        }

        check_dimensionality("model", model.n_features_in())?;
        if let Some(names) = model.feature_names_in() {
            check_column_names("model.feature_names_in", names)?;
        }

        Ok(Self { scaler, model })
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

fn check_dimensionality(stage: &str, n_features_in: usize) -> Result<()> {
    if n_features_in != FEATURE_COUNT {
        return Err(PredictorError::FeatureShapeMismatch {
            stage: stage.to_string(),
            expected: FEATURE_COUNT,
            actual: n_features_in,
        });
    }
    Ok(())
}

/// Reads the scaler and model once and hands out the same shared copy
/// on every later call.
pub struct ArtifactLoader<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    loaded: OnceCell<Arc<Artifacts>>,
}

impl<S: Storage, C: ConfigProvider> ArtifactLoader<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            loaded: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<Arc<Artifacts>> {
        self.loaded
            .get_or_try_init(|| async {
                let artifacts = self.load_uncached().await?;
                Ok::<_, PredictorError>(Arc::new(artifacts))
            })
            .await
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    async fn load_uncached(&self) -> Result<Artifacts> {
        tracing::info!(
            "📦 Loading artifacts from '{}' (scaler: {}, model: {})",
            self.config.artifact_dir(),
            self.config.scaler_file(),
            self.config.model_file()
        );

        let scaler: Scaler = self.read_artifact(self.config.scaler_file()).await?;
        let model: LinearModel = self.read_artifact(self.config.model_file()).await?;

        let artifacts = Artifacts::new(scaler, model).map_err(|e| match e {
            PredictorError::ArtifactCorrupt { path, reason } if path == SCALER_LABEL => {
                self.corrupt(self.config.scaler_file(), reason)
            }
            PredictorError::ArtifactCorrupt { path, reason } if path == MODEL_LABEL => {
                self.corrupt(self.config.model_file(), reason)
            }
            other => other,
        })?;

        tracing::info!(
            "✅ Loaded {} scaler and {} model ({} of {} coefficients active)",
            artifacts.scaler().kind(),
            artifacts.model().kind,
            artifacts.model().active_features(),
            FEATURE_COUNT
        );

        Ok(artifacts)
    }

    async fn read_artifact<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let bytes = self.storage.read_file(file).await.map_err(|e| {
            tracing::error!("❌ Cannot read artifact {}: {}", file, e);
            PredictorError::ArtifactNotFound {
                path: self.display_path(file),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!("Read {} bytes from {}", bytes.len(), file);

        serde_json::from_slice(&bytes).map_err(|e| self.corrupt(file, e.to_string()))
    }

    fn corrupt(&self, file: &str, reason: String) -> PredictorError {
        PredictorError::ArtifactCorrupt {
            path: self.display_path(file),
            reason,
        }
    }

    fn display_path(&self, file: &str) -> String {
        std::path::Path::new(self.config.artifact_dir())
            .join(file)
            .display()
            .to_string()
    }
}
