use crate::core::{EngineeredInput, RawInput};
use crate::utils::error::{PredictorError, Result};
use crate::utils::validation::validate_finite;

/// Derives the three ratio features the model was trained on.
///
/// Zero `households` or `total_rooms` is rejected instead of producing
/// `inf`/`NaN` that would flow silently into the model.
pub fn engineer(raw: &RawInput) -> Result<EngineeredInput> {
    validate_finite("longitude", raw.longitude)?;
    validate_finite("latitude", raw.latitude)?;
    validate_finite("median_income", raw.median_income)?;

    if raw.households == 0 {
        return Err(PredictorError::DivisionByZero {
            field: "households".to_string(),
        });
    }
    if raw.total_rooms == 0 {
        return Err(PredictorError::DivisionByZero {
            field: "total_rooms".to_string(),
        });
    }

    let total_rooms = f64::from(raw.total_rooms);
    let households = f64::from(raw.households);

    // 順序與訓練時相同
    let rooms_per_household = total_rooms / households;
    let bedrooms_per_room = f64::from(raw.total_bedrooms) / total_rooms;
    let population_per_household = f64::from(raw.population) / households;

    Ok(EngineeredInput {
        raw: *raw,
        rooms_per_household,
        bedrooms_per_room,
        population_per_household,
    })
}
