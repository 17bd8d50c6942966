//! Fitted feature scalers, deserialized from exported JSON artifacts.

use crate::domain::ports::FeatureTransform;
use crate::utils::error::{PredictorError, Result};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Exported scaler parameters, tagged by scaler type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
    /// `(x - mean) / scale`. A `None` mean or scale means centering or
    /// scaling was disabled when fitting.
    StandardScaler {
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
        #[serde(default)]
        mean: Option<Vec<f64>>,
        #[serde(default)]
        scale: Option<Vec<f64>>,
        /// Only needed when both `mean` and `scale` are absent.
        #[serde(default)]
        n_features_in: Option<usize>,
    },
    /// `x * scale + min`
    MinMaxScaler {
        #[serde(default)]
        feature_names_in: Option<Vec<String>>,
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

impl Scaler {
    pub fn standard(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self::StandardScaler {
            feature_names_in: None,
            mean: Some(mean),
            scale: Some(scale),
            n_features_in: None,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        match &mut self {
            Self::StandardScaler {
                feature_names_in, ..
            }
            | Self::MinMaxScaler {
                feature_names_in, ..
            } => {
                *feature_names_in = Some(names);
            }
        }
        self
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::StandardScaler { .. } => "standard_scaler",
            Self::MinMaxScaler { .. } => "min_max_scaler",
        }
    }

    /// Checks parameter widths agree and every parameter is usable.
    /// The returned reason ends up in `ArtifactCorrupt`.
    pub fn check_parameters(&self) -> std::result::Result<(), String> {
        match self {
            Self::StandardScaler {
                feature_names_in,
                mean,
                scale,
                n_features_in,
            } => {
                let width = self.n_features_in();
                if width == 0 {
                    return Err("standard_scaler has no mean, scale or n_features_in".to_string());
                }
                for (name, param) in [("mean", mean), ("scale", scale)] {
                    if let Some(values) = param {
                        check_width(name, values.len(), width)?;
                        check_finite(name, values)?;
                    }
                }
                if let Some(scale) = scale {
                    if let Some(i) = scale.iter().position(|s| *s == 0.0) {
                        return Err(format!("scale[{}] is zero", i));
                    }
                }
                if let Some(n) = n_features_in {
                    check_width("n_features_in", *n, width)?;
                }
                if let Some(names) = feature_names_in {
                    check_width("feature_names_in", names.len(), width)?;
                }
            }
            Self::MinMaxScaler {
                feature_names_in,
                min,
                scale,
            } => {
                check_width("scale", scale.len(), min.len())?;
                check_finite("min", min)?;
                check_finite("scale", scale)?;
                if let Some(names) = feature_names_in {
                    check_width("feature_names_in", names.len(), min.len())?;
                }
            }
        }
        Ok(())
    }
}

fn check_width(name: &str, actual: usize, expected: usize) -> std::result::Result<(), String> {
    if actual != expected {
        return Err(format!("{} has {} entries, expected {}", name, actual, expected));
    }
    Ok(())
}

fn check_finite(name: &str, values: &[f64]) -> std::result::Result<(), String> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(format!("{}[{}] is not finite", name, i)),
        None => Ok(()),
    }
}

impl FeatureTransform for Scaler {
    fn n_features_in(&self) -> usize {
        match self {
            Self::StandardScaler {
                mean,
                scale,
                n_features_in,
                ..
            } => mean
                .as_ref()
                .or(scale.as_ref())
                .map(Vec::len)
                .or(*n_features_in)
                .unwrap_or(0),
            Self::MinMaxScaler { min, .. } => min.len(),
        }
    }

    fn feature_names_in(&self) -> Option<&[String]> {
        match self {
            Self::StandardScaler {
                feature_names_in, ..
            }
            | Self::MinMaxScaler {
                feature_names_in, ..
            } => feature_names_in.as_deref(),
        }
    }

    fn transform(&self, x: ArrayView1<'_, f64>) -> Result<Array1<f64>> {
        let expected = self.n_features_in();
        if x.len() != expected {
            return Err(PredictorError::FeatureShapeMismatch {
                stage: format!("{}.transform", self.kind()),
                expected,
                actual: x.len(),
            });
        }

        let scaled = match self {
            Self::StandardScaler { mean, scale, .. } => {
                let mut out = x.to_owned();
                if let Some(mean) = mean {
                    out -= &self.parameter("mean", mean, x.len())?;
                }
                if let Some(scale) = scale {
                    out /= &self.parameter("scale", scale, x.len())?;
                }
                out
            }
            Self::MinMaxScaler { min, scale, .. } => {
                let scale = self.parameter("scale", scale, x.len())?;
                let min = self.parameter("min", min, x.len())?;
                &x * &scale + &min
            }
        };

        Ok(scaled)
    }
}

impl Scaler {
    /// Views a fitted parameter, refusing one that would not line up with `x`.
    fn parameter<'a>(
        &self,
        name: &str,
        values: &'a [f64],
        width: usize,
    ) -> Result<ArrayView1<'a, f64>> {
        if values.len() != width {
            return Err(PredictorError::FeatureShapeMismatch {
                stage: format!("{}.{}", self.kind(), name),
                expected: width,
                actual: values.len(),
            });
        }
        Ok(ArrayView1::from(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler_transform() {
        let scaler = Scaler::standard(vec![1.0, 10.0], vec![2.0, 5.0]);
        let out = scaler.transform(array![3.0, 0.0].view()).unwrap();
        assert_eq!(out, array![1.0, -2.0]);
    }

    #[test]
    fn test_standard_scaler_without_mean() {
        let scaler: Scaler = serde_json::from_str(
            r#"{"kind": "standard_scaler", "mean": null, "scale": [2.0, 4.0]}"#,
        )
        .unwrap();
        assert_eq!(scaler.n_features_in(), 2);
        let out = scaler.transform(array![3.0, 8.0].view()).unwrap();
        assert_eq!(out, array![1.5, 2.0]);
    }

    #[test]
    fn test_min_max_scaler_transform() {
        let scaler: Scaler = serde_json::from_str(
            r#"{"kind": "min_max_scaler", "min": [-1.0, 0.0], "scale": [0.5, 0.1]}"#,
        )
        .unwrap();
        let out = scaler.transform(array![4.0, 10.0].view()).unwrap();
        assert_eq!(out, array![1.0, 1.0]);
    }

    #[test]
    fn test_transform_rejects_wrong_width() {
        let scaler = Scaler::standard(vec![0.0; 3], vec![1.0; 3]);
        let err = scaler.transform(array![1.0, 2.0].view()).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::FeatureShapeMismatch { expected: 3, actual: 2, .. }
        ));
    }

    #[test]
    fn test_transform_rejects_ragged_parameters() {
        let scaler = Scaler::standard(vec![0.0; 3], vec![1.0; 2]);
        let err = scaler.transform(array![1.0, 2.0, 3.0].view()).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::FeatureShapeMismatch { expected: 3, actual: 2, .. }
        ));

        let scaler = Scaler::MinMaxScaler {
            feature_names_in: None,
            min: vec![0.0; 2],
            scale: vec![1.0; 3],
        };
        assert!(scaler.transform(array![1.0, 2.0].view()).is_err());
    }

    #[test]
    fn test_check_parameters() {
        assert!(Scaler::standard(vec![0.0, 1.0], vec![1.0, 1.0]).check_parameters().is_ok());
        assert!(Scaler::standard(vec![0.0], vec![1.0, 1.0]).check_parameters().is_err());
        assert!(Scaler::standard(vec![0.0, 0.0], vec![1.0, 0.0]).check_parameters().is_err());
        assert!(Scaler::standard(vec![f64::NAN, 0.0], vec![1.0, 1.0]).check_parameters().is_err());

        let named = Scaler::standard(vec![0.0, 1.0], vec![1.0, 1.0])
            .with_feature_names(vec!["only_one".to_string()]);
        assert!(named.check_parameters().is_err());
    }
}
