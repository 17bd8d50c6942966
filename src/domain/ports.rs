use crate::utils::error::Result;
use ndarray::{Array1, ArrayView1};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn artifact_dir(&self) -> &str;
    fn scaler_file(&self) -> &str;
    fn model_file(&self) -> &str;
}

/// A fitted normalization step: same-width vector in, same-width vector out.
pub trait FeatureTransform: Send + Sync {
    fn n_features_in(&self) -> usize;

    /// Column names recorded at fit time, when the exporter kept them.
    fn feature_names_in(&self) -> Option<&[String]>;

    /// Must reject input whose width differs from `n_features_in`.
    fn transform(&self, x: ArrayView1<'_, f64>) -> Result<Array1<f64>>;
}

/// A fitted regressor mapping a scaled vector to one value.
pub trait Regressor: Send + Sync {
    fn n_features_in(&self) -> usize;

    fn feature_names_in(&self) -> Option<&[String]>;

    /// Must reject input whose width differs from `n_features_in`.
    fn predict(&self, x: ArrayView1<'_, f64>) -> Result<f64>;
}
