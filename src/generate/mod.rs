//! Script generation: the service seam the wizard hands a completed
//! interview to, and the artifact types it produces.
//!
//! The wizard core never calls the service directly; it only flips to
//! `Submitting` and lets the shell drive the async call, so the state
//! machine stays deterministic and testable without a runtime.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wizard::{CallGoal, FieldKey, FormState, WizardError};

pub mod store;
pub mod template;

pub use store::{ScriptStore, StoreError};
pub use template::TemplateScriptService;

/// Opaque identifier for a generated script artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptId(String);

impl ScriptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh timestamp-derived id.
    pub fn generate() -> Self {
        let now = Utc::now();
        Self(format!(
            "{}-{:04}",
            now.format("%Y%m%dT%H%M%SZ"),
            now.timestamp_subsec_millis()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A completed interview, ready for the generation service. The goal is
/// already parsed into its closed enum; everything else is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub product: String,
    pub persona: String,
    pub industry: String,
    pub goal: CallGoal,
    pub tone: String,
    pub objections: String,
}

impl ScriptRequest {
    /// Snapshot the form into a request payload. Fails only if the goal
    /// code is not in the enumerated set, which the navigation gate
    /// prevents for any session that reached submission.
    pub fn from_form(form: &FormState) -> Result<Self, WizardError> {
        let goal_code = form.get(FieldKey::Goal).trim();
        let goal = CallGoal::from_code(goal_code)
            .ok_or_else(|| WizardError::UnknownGoal(goal_code.to_string()))?;
        Ok(Self {
            product: form.get(FieldKey::Product).trim().to_string(),
            persona: form.get(FieldKey::Persona).trim().to_string(),
            industry: form.get(FieldKey::Industry).trim().to_string(),
            goal,
            tone: form.get(FieldKey::Tone).trim().to_string(),
            objections: form.get(FieldKey::Objections).trim().to_string(),
        })
    }
}

/// The generated artifact: four script sections plus the inputs that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallScript {
    pub id: ScriptId,
    pub created_at: DateTime<Utc>,
    pub request: ScriptRequest,
    pub opener: String,
    pub value_pitch: String,
    pub objection_handling: String,
    pub closing: String,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid generation request: {0}")]
    InvalidRequest(#[from] WizardError),

    #[error("failed to render script template")]
    Template(#[from] handlebars::RenderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("generation timed out after {0}s")]
    TimedOut(u64),

    #[error("generation service unavailable: {0}")]
    Unavailable(String),
}

/// External collaborator that turns a completed interview into a script
/// artifact and yields its identifier. Latency and failure behavior are
/// the service's concern; callers treat the call as a single
/// outstanding async operation.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &ScriptRequest) -> Result<ScriptId, GenerateError>;
}

/// In-memory service for tests: records every request and replays
/// scripted responses, falling back to a fixed success id.
pub struct MockGenerationService {
    calls: AtomicUsize,
    requests: Mutex<Vec<ScriptRequest>>,
    responses: Mutex<VecDeque<Result<ScriptId, GenerateError>>>,
    fallback_id: ScriptId,
}

impl MockGenerationService {
    pub fn succeeding_with(id: impl Into<String>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            fallback_id: ScriptId::new(id),
        }
    }

    /// Queue a response for the next call; once the queue drains, calls
    /// succeed with the fallback id.
    pub fn push_response(&self, response: Result<ScriptId, GenerateError>) {
        self.responses
            .lock()
            .expect("mock responses lock poisoned")
            .push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ScriptRequest> {
        self.requests
            .lock()
            .expect("mock requests lock poisoned")
            .clone()
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    async fn generate(&self, request: &ScriptRequest) -> Result<ScriptId, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("mock requests lock poisoned")
            .push(request.clone());
        let queued = self
            .responses
            .lock()
            .expect("mock responses lock poisoned")
            .pop_front();
        match queued {
            Some(response) => response,
            None => Ok(self.fallback_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::FormState;

    fn filled_form() -> FormState {
        let mut form = FormState::new();
        form.set(FieldKey::Product, "  Cloud CRM ");
        form.set(FieldKey::Persona, "Sales Directors");
        form.set(FieldKey::Industry, "Technology");
        form.set(FieldKey::Goal, "start-trial");
        form.set(FieldKey::Tone, "friendly");
        form.set(FieldKey::Objections, "Too expensive");
        form
    }

    #[test]
    fn test_request_snapshot_trims_and_parses_goal() {
        let request = ScriptRequest::from_form(&filled_form()).unwrap();
        assert_eq!(request.product, "Cloud CRM");
        assert_eq!(request.goal, CallGoal::StartTrial);
    }

    #[test]
    fn test_request_rejects_unknown_goal() {
        let mut form = filled_form();
        form.set(FieldKey::Goal, "world-domination");
        let err = ScriptRequest::from_form(&form).unwrap_err();
        assert_eq!(err, WizardError::UnknownGoal("world-domination".to_string()));
    }

    #[tokio::test]
    async fn test_mock_service_records_calls_and_replays_responses() {
        let service = MockGenerationService::succeeding_with("42");
        service.push_response(Err(GenerateError::Unavailable("down".to_string())));

        let request = ScriptRequest::from_form(&filled_form()).unwrap();
        assert!(service.generate(&request).await.is_err());
        assert_eq!(
            service.generate(&request).await.unwrap(),
            ScriptId::new("42")
        );
        assert_eq!(service.call_count(), 2);
        assert_eq!(service.requests().len(), 2);
    }
}
