use house_price_predictor::core::pipeline::predict_vector;
use house_price_predictor::{
    engineer, predict, ArtifactLoader, ArtifactPaths, FeatureVector, FormInput, LocalStorage,
    Predictor, PredictorError, FEATURE_COLUMNS,
};
use std::sync::Arc;

fn sample_paths() -> ArtifactPaths {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/models");
    ArtifactPaths::new(dir, "scaler.json", "lasso_model.json")
}

async fn sample_predictor() -> Predictor {
    let paths = sample_paths();
    let loader = ArtifactLoader::new(LocalStorage::new(paths.dir.clone()), paths);
    Predictor::new(loader.load().await.expect("sample artifacts should load"))
}

fn reference_form() -> FormInput {
    FormInput {
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

#[tokio::test]
async fn test_reference_scenario() {
    let predictor = sample_predictor().await;
    let estimate = predictor.estimate(&reference_form().to_raw()).unwrap();

    let engineered = estimate.engineered;
    assert_eq!(engineered.raw.longitude, -122.23);
    assert!((engineered.rooms_per_household - 5.263157894736842).abs() < 1e-12);
    assert!((engineered.bedrooms_per_room - 0.2).abs() < 1e-12);
    assert!((engineered.population_per_household - 2.631578947368421).abs() < 1e-12);

    assert!((estimate.prediction.value() - 226_732.501_398_284_2).abs() < 1e-6);
    assert_eq!(estimate.prediction.formatted(), "$226,732.50");
}

#[tokio::test]
async fn test_prediction_is_bit_identical_across_runs() {
    let predictor = sample_predictor().await;
    let raw = reference_form().to_raw();

    let first = predictor.estimate(&raw).unwrap().prediction.value();
    let second = predictor.estimate(&raw).unwrap().prediction.value();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[tokio::test]
async fn test_longitude_sign_matters() {
    let predictor = sample_predictor().await;
    let artifacts = predictor.artifacts();

    // 故意跳過符號轉換，確認結果不同
    let mut unflipped = reference_form().to_raw();
    unflipped.longitude = 122.23;
    let wrong =
        predict(&engineer(&unflipped).unwrap(), artifacts.scaler(), artifacts.model()).unwrap();
    let right = predictor.estimate(&reference_form().to_raw()).unwrap().prediction;

    assert_ne!(wrong.value(), right.value());
}

#[tokio::test]
async fn test_swapped_values_change_result() {
    let predictor = sample_predictor().await;
    let engineered = engineer(&reference_form().to_raw()).unwrap();
    let baseline = engineered.to_feature_vector();
    let expected = predictor.score_vector(&baseline).unwrap();

    for (a, b) in [(0, 1), (3, 4), (5, 6), (8, 10), (2, 7)] {
        let mut values = baseline.values().to_vec();
        values.swap(a, b);
        let drifted = FeatureVector::from_columns(baseline.columns().to_vec(), values).unwrap();

        let result = predictor.score_vector(&drifted).unwrap();
        assert_ne!(result, expected, "swapping columns {} and {} went unnoticed", a, b);
    }
}

#[tokio::test]
async fn test_reordered_vector_is_rejected() {
    let predictor = sample_predictor().await;
    let artifacts = predictor.artifacts();
    let baseline = engineer(&reference_form().to_raw()).unwrap().to_feature_vector();

    let mut columns = baseline.columns().to_vec();
    let mut values = baseline.values().to_vec();
    columns.swap(3, 4);
    values.swap(3, 4);
    let reordered = FeatureVector::from_columns(columns, values).unwrap();

    match predict_vector(&reordered, artifacts.scaler(), artifacts.model()) {
        Err(PredictorError::ColumnOrderMismatch {
            position,
            expected,
            found,
            ..
        }) => {
            assert_eq!(position, 3);
            assert_eq!(expected, "total_rooms");
            assert_eq!(found, "total_bedrooms");
        }
        other => panic!("expected ColumnOrderMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_vector_is_rejected() {
    let predictor = sample_predictor().await;

    let short = FeatureVector::from_columns(
        FEATURE_COLUMNS[..10].iter().map(|c| c.to_string()).collect(),
        vec![1.0; 10],
    )
    .unwrap();
    assert!(matches!(
        predictor.score_vector(&short),
        Err(PredictorError::FeatureShapeMismatch { expected: 11, actual: 10, .. })
    ));

    let mut long_columns: Vec<String> = FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect();
    long_columns.push("median_house_value".to_string());
    let long = FeatureVector::from_columns(long_columns, vec![1.0; 12]).unwrap();
    assert!(matches!(
        predictor.score_vector(&long),
        Err(PredictorError::FeatureShapeMismatch { expected: 11, actual: 12, .. })
    ));
}

#[tokio::test]
async fn test_invalid_request_does_not_poison_shared_state() {
    let predictor = Arc::new(sample_predictor().await);

    let mut raw = reference_form().to_raw();
    raw.total_rooms = 0;
    assert!(matches!(
        predictor.estimate(&raw),
        Err(PredictorError::DivisionByZero { .. })
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = Arc::clone(&predictor);
            std::thread::spawn(move || {
                predictor
                    .estimate(&reference_form().to_raw())
                    .unwrap()
                    .prediction
                    .value()
            })
        })
        .collect();

    let values: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(values.windows(2).all(|w| w[0].to_bits() == w[1].to_bits()));
}
