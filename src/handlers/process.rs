//! POST /API/bpm/process/:processDefinitionId/instantiation

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::{Map, Value};

use crate::engine::{EngineError, ProcessInstanceRef};
use crate::error::ApiError;
use crate::router::AppState;

const PROCESS_DEFINITION_ID: &str = "processDefinitionId";

pub async fn instantiate(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    Json(inputs): Json<Map<String, Value>>,
) -> Result<Json<ProcessInstanceRef>, ApiError> {
    let session = state
        .sessions
        .current_session(&headers)
        .await
        .ok_or(ApiError::Unauthenticated)?;
    let process_definition_id = parse_process_definition_id(&raw_id)?;

    match state
        .processes
        .start_process_with_inputs(&session, process_definition_id, &inputs)
        .await
    {
        Ok(instance) => Ok(Json(instance)),
        Err(EngineError::ContractViolation { explanations, .. }) => {
            Err(ApiError::ContractViolation {
                message: "Cannot instanciate process task.".into(),
                explanations,
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn parse_process_definition_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim().parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "Attribute '{PROCESS_DEFINITION_ID}' is mandatory and must be a number, got '{raw}'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_process_definition_id("42").unwrap(), 42);
        assert_eq!(parse_process_definition_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn non_numeric_id_names_the_attribute() {
        let err = parse_process_definition_id("abc").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("'processDefinitionId' is mandatory"));
        assert!(parse_process_definition_id("-1").is_err());
    }
}
