//! GET|POST /API/form/validation

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::login::DEFAULT_LOCALE;
use crate::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    pub validator: String,
    #[serde(default)]
    pub value: Value,
    pub locale: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub validator: String,
    pub display_name: String,
    pub valid: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorInfo {
    pub name: String,
    pub display_name: String,
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<ValidatorInfo>> {
    let validators = state
        .validators
        .list()
        .into_iter()
        .map(|(name, display_name)| ValidatorInfo {
            name: name.to_string(),
            display_name: display_name.to_string(),
        })
        .collect();
    Json(validators)
}

pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ValidationRequest>,
) -> Result<Json<ValidationResponse>, ApiError> {
    let validator = state
        .validators
        .get(&req.validator)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown validator '{}'", req.validator)))?;

    // Explicit locale, then the session's, then the default.
    let locale = match req.locale {
        Some(locale) => locale,
        None => state
            .sessions
            .current_session(&headers)
            .await
            .map(|s| s.locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
    };

    let valid = validator.validate(&req.value, &locale);
    tracing::debug!(
        "Validator '{}' ({}) on {}: {}",
        req.validator,
        locale,
        req.value,
        valid
    );
    Ok(Json(ValidationResponse {
        display_name: validator.display_name().to_string(),
        validator: req.validator,
        valid,
    }))
}
