use crate::models::prediction::PredictionRequest;

/// Pre-flight checks applied only when `validateInputs` is enabled.
pub fn validate_request(request: &PredictionRequest) -> Result<(), String> {
    if !request.threshold.is_finite() || !(0.0..=1.0).contains(&request.threshold) {
        return Err(format!(
            "threshold {} is outside [0, 1]",
            request.threshold
        ));
    }

    let non_finite: Vec<&str> = request
        .data
        .iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(key, _)| key.as_str())
        .collect();
    if !non_finite.is_empty() {
        return Err(format!("non-finite values for {}", non_finite.join(", ")));
    }

    Ok(())
}
