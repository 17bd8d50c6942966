use crate::core::{EngineeredInput, FeatureTransform, FeatureVector, Prediction, Regressor};
use crate::utils::error::{PredictorError, Result};

/// Scores one engineered record: fixed-order vector → scaler → model.
pub fn predict<T, R>(engineered: &EngineeredInput, scaler: &T, model: &R) -> Result<Prediction>
where
    T: FeatureTransform + ?Sized,
    R: Regressor + ?Sized,
{
    let features = engineered.to_feature_vector();
    predict_vector(&features, scaler, model)
}

/// Scores a pre-assembled vector. The layout is checked against
/// `FEATURE_COLUMNS` before either primitive sees it.
pub fn predict_vector<T, R>(features: &FeatureVector, scaler: &T, model: &R) -> Result<Prediction>
where
    T: FeatureTransform + ?Sized,
    R: Regressor + ?Sized,
{
    features.check_layout("pipeline")?;

    tracing::debug!("Scaling {} features", features.len());
    let scaled = scaler.transform(features.values())?;
    if scaled.len() != features.len() {
        return Err(PredictorError::FeatureShapeMismatch {
            stage: "scaler output".to_string(),
            expected: features.len(),
            actual: scaled.len(),
        });
    }

    let value = model.predict(scaled.view())?;
    tracing::debug!("Model output: {}", value);

    Ok(Prediction(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LinearKind, LinearModel, Scaler};
    use crate::core::features::engineer;
    use crate::domain::model::{FormInput, FEATURE_COLUMNS, FEATURE_COUNT};

    fn identity_scaler() -> Scaler {
        Scaler::standard(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
    }

    fn picking_model(column: usize) -> LinearModel {
        let mut coef = vec![0.0; FEATURE_COUNT];
        coef[column] = 1.0;
        LinearModel::new(LinearKind::LinearRegression, coef, 0.0)
    }

    #[test]
    fn test_longitude_reaches_model_negated() {
        let engineered = engineer(&FormInput::default().to_raw()).unwrap();
        let prediction = predict(&engineered, &identity_scaler(), &picking_model(0)).unwrap();
        assert_eq!(prediction.value(), -122.23);
    }

    #[test]
    fn test_ratios_reach_model_in_order() {
        let engineered = engineer(&FormInput::default().to_raw()).unwrap();
        let scaler = identity_scaler();

        let bedrooms = predict(&engineered, &scaler, &picking_model(9)).unwrap();
        assert_eq!(bedrooms.value(), 0.2);

        let income = predict(&engineered, &scaler, &picking_model(7)).unwrap();
        assert_eq!(income.value(), 4.0);
    }

    #[test]
    fn test_vector_has_eleven_columns() {
        let engineered = engineer(&FormInput::default().to_raw()).unwrap();
        let vector = engineered.to_feature_vector();
        assert_eq!(vector.len(), 11);
        assert_eq!(vector.columns(), FEATURE_COLUMNS.map(String::from).as_slice());
        assert_eq!(vector.get("households"), Some(380.0));
    }

    #[test]
    fn test_negative_prediction_passes_through() {
        let engineered = engineer(&FormInput::default().to_raw()).unwrap();
        let model = LinearModel::new(LinearKind::Lasso, vec![0.0; FEATURE_COUNT], -5000.0);
        let prediction = predict(&engineered, &identity_scaler(), &model).unwrap();
        assert_eq!(prediction.value(), -5000.0);
    }

    #[test]
    fn test_short_vector_rejected_before_scaling() {
        let vector = FeatureVector::from_columns(
            FEATURE_COLUMNS[..10].iter().map(|c| c.to_string()).collect(),
            vec![1.0; 10],
        )
        .unwrap();
        let err = predict_vector(&vector, &identity_scaler(), &picking_model(0)).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::FeatureShapeMismatch { expected: 11, actual: 10, .. }
        ));
    }

    #[test]
    fn test_narrow_artifacts_rejected() {
        let engineered = engineer(&FormInput::default().to_raw()).unwrap();
        let scaler = Scaler::standard(vec![0.0; 10], vec![1.0; 10]);
        let err = predict(&engineered, &scaler, &picking_model(0)).unwrap_err();
        assert!(matches!(err, PredictorError::FeatureShapeMismatch { .. }));
    }
}
