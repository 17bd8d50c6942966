//! Fitted linear regressors (lasso, ridge, ordinary least squares).

use crate::domain::ports::Regressor;
use crate::utils::error::{PredictorError, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearKind {
    Lasso,
    Ridge,
    LinearRegression,
}

impl std::fmt::Display for LinearKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LinearKind::Lasso => "lasso",
            LinearKind::Ridge => "ridge",
            LinearKind::LinearRegression => "linear_regression",
        };
        f.write_str(name)
    }
}

/// `y = coef · x + intercept`. Regularization only matters at fit time;
/// `alpha` is carried for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub kind: LinearKind,
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

impl LinearModel {
    pub fn new(kind: LinearKind, coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            kind,
            feature_names_in: None,
            coef,
            intercept,
            alpha: None,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names_in = Some(names);
        self
    }

    /// Lasso zeroes out coefficients; handy to log at startup.
    pub fn active_features(&self) -> usize {
        self.coef.iter().filter(|c| **c != 0.0).count()
    }

    pub fn check_parameters(&self) -> std::result::Result<(), String> {
        if self.coef.is_empty() {
            return Err("coef is empty".to_string());
        }
        if let Some(i) = self.coef.iter().position(|c| !c.is_finite()) {
            return Err(format!("coef[{}] is not finite", i));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        if let Some(names) = &self.feature_names_in {
            if names.len() != self.coef.len() {
                return Err(format!(
                    "feature_names_in has {} entries, expected {}",
                    names.len(),
                    self.coef.len()
                ));
            }
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn n_features_in(&self) -> usize {
        self.coef.len()
    }

    fn feature_names_in(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    fn predict(&self, x: ArrayView1<'_, f64>) -> Result<f64> {
        if x.len() != self.coef.len() {
            return Err(PredictorError::FeatureShapeMismatch {
                stage: format!("{}.predict", self.kind),
                expected: self.coef.len(),
                actual: x.len(),
            });
        }

        Ok(x.dot(&ArrayView1::from(self.coef.as_slice())) + self.intercept)
    }
}
