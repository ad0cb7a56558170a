//! In-memory process API.
//!
//! Validates contract inputs against the directory's process definitions and
//! hands out sequential case ids. No process is actually executed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{Directory, EngineError, ProcessApi, ProcessInstanceRef};
use crate::session::Session;

pub struct InMemoryProcessApi {
    directory: Arc<Directory>,
    next_case_id: AtomicU64,
}

impl InMemoryProcessApi {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self {
            directory,
            next_case_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl ProcessApi for InMemoryProcessApi {
    async fn start_process_with_inputs(
        &self,
        session: &Session,
        process_definition_id: u64,
        inputs: &Map<String, Value>,
    ) -> Result<ProcessInstanceRef, EngineError> {
        let process = self
            .directory
            .process(session.tenant_id, process_definition_id)
            .ok_or_else(|| {
                EngineError::NotFound(format!("process definition {process_definition_id}"))
            })?;

        if !process.enabled {
            return Err(EngineError::ProcessActivation(format!(
                "process definition {} ({} {}) is not enabled",
                process.id, process.name, process.version
            )));
        }

        let explanations = process.contract_violations(inputs);
        if !explanations.is_empty() {
            return Err(EngineError::ContractViolation {
                message: format!(
                    "Error while validating expected inputs: {}",
                    explanations.join(", ")
                ),
                explanations,
            });
        }

        let case_id = self.next_case_id.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            "Started case {} of process {} ({} {}) for user {}",
            case_id,
            process.id,
            process.name,
            process.version,
            session.user_name
        );

        Ok(ProcessInstanceRef {
            case_id,
            process_definition_id,
            started_by: session.user_id,
        })
    }
}
