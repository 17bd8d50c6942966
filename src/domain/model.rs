use crate::utils::error::{PredictorError, Result};
use crate::utils::format::format_currency;
use crate::utils::validation::{validate_at_least, validate_finite, validate_range, Validate};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Column order the scaler and model were fitted on. Never reorder.
pub const FEATURE_COLUMNS: [&str; 11] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "rooms_per_household",
    "bedrooms_per_room",
    "population_per_household",
];

pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

pub const MIN_HOUSING_MEDIAN_AGE: u32 = 1;
pub const MAX_HOUSING_MEDIAN_AGE: u32 = 52;

/// California longitudes are all west of Greenwich, so the training data
/// stores them negative. Users type the positive magnitude.
pub fn westward_longitude(magnitude: f64) -> f64 {
    -magnitude.abs()
}

/// The record as the user fills it in on the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    pub longitude_magnitude: f64,
    pub latitude: f64,
    pub housing_median_age: u32,
    pub total_rooms: u32,
    pub total_bedrooms: u32,
    pub population: u32,
    pub households: u32,
    /// In units of $10k.
    pub median_income: f64,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            longitude_magnitude: 122.23,
            latitude: 37.88,
            housing_median_age: 28,
            total_rooms: 2000,
            total_bedrooms: 400,
            population: 1000,
            households: 380,
            median_income: 4.0,
        }
    }
}

impl FormInput {
    /// Applies the longitude sign flip. Does not validate.
    pub fn to_raw(&self) -> RawInput {
        RawInput {
            longitude: westward_longitude(self.longitude_magnitude),
            latitude: self.latitude,
            housing_median_age: self.housing_median_age,
            total_rooms: self.total_rooms,
            total_bedrooms: self.total_bedrooms,
            population: self.population,
            households: self.households,
            median_income: self.median_income,
        }
    }
}

impl Validate for FormInput {
    fn validate(&self) -> Result<()> {
        validate_finite("longitude", self.longitude_magnitude)?;
        validate_at_least("longitude", self.longitude_magnitude, 0.0)?;
        validate_finite("latitude", self.latitude)?;
        validate_range("latitude", self.latitude, -90.0, 90.0)?;
        validate_range(
            "housing_median_age",
            self.housing_median_age,
            MIN_HOUSING_MEDIAN_AGE,
            MAX_HOUSING_MEDIAN_AGE,
        )?;
        validate_at_least("total_rooms", self.total_rooms, 1)?;
        validate_at_least("total_bedrooms", self.total_bedrooms, 1)?;
        validate_at_least("population", self.population, 1)?;
        validate_at_least("households", self.households, 1)?;
        validate_finite("median_income", self.median_income)?;
        validate_at_least("median_income", self.median_income, 0.0)?;
        Ok(())
    }
}

/// Base features with longitude already in the westward-negative convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: u32,
    pub total_rooms: u32,
    pub total_bedrooms: u32,
    pub population: u32,
    pub households: u32,
    pub median_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeredInput {
    #[serde(flatten)]
    pub raw: RawInput,
    pub rooms_per_household: f64,
    pub bedrooms_per_room: f64,
    pub population_per_household: f64,
}

impl EngineeredInput {
    /// Lays the 11 fields out in `FEATURE_COLUMNS` order.
    pub fn to_feature_vector(&self) -> FeatureVector {
        let raw = &self.raw;
        let values = Array1::from(vec![
            raw.longitude,
            raw.latitude,
            f64::from(raw.housing_median_age),
            f64::from(raw.total_rooms),
            f64::from(raw.total_bedrooms),
            f64::from(raw.population),
            f64::from(raw.households),
            raw.median_income,
            self.rooms_per_household,
            self.bedrooms_per_room,
            self.population_per_household,
        ]);

        FeatureVector {
            columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            values,
        }
    }
}

/// Named feature values. Column names travel with the values so a reordered
/// vector is caught before it reaches the scaler.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Array1<f64>,
}

impl FeatureVector {
    pub fn from_columns(columns: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(PredictorError::FeatureShapeMismatch {
                stage: "feature_vector".to_string(),
                expected: columns.len(),
                actual: values.len(),
            });
        }

        Ok(Self {
            columns,
            values: Array1::from(values),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    /// Checks length and column order against `FEATURE_COLUMNS`.
    pub fn check_layout(&self, stage: &str) -> Result<()> {
        check_column_names(stage, &self.columns)
    }
}

/// Shared by the pipeline and by artifact startup checks.
pub fn check_column_names<S: AsRef<str>>(stage: &str, columns: &[S]) -> Result<()> {
    if columns.len() != FEATURE_COUNT {
        return Err(PredictorError::FeatureShapeMismatch {
            stage: stage.to_string(),
            expected: FEATURE_COUNT,
            actual: columns.len(),
        });
    }

    for (position, (expected, found)) in FEATURE_COLUMNS.iter().zip(columns).enumerate() {
        if *expected != found.as_ref() {
            return Err(PredictorError::ColumnOrderMismatch {
                stage: stage.to_string(),
                position,
                expected: expected.to_string(),
                found: found.as_ref().to_string(),
            });
        }
    }

    Ok(())
}

/// Estimated median house value in dollars. Not clamped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prediction(pub f64);

impl Prediction {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn formatted(self) -> String {
        format_currency(self.0)
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    pub engineered: EngineeredInput,
    pub prediction: Prediction,
}
