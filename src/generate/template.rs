//! Template-backed generation service.
//!
//! Renders the four script sections from embedded Handlebars templates
//! and persists the result through the script store. Deliberately
//! simple: the quality of the prose is an external concern, the seam is
//! what matters.

use async_trait::async_trait;
use chrono::Utc;
use handlebars::Handlebars;
use serde_json::json;

use super::store::ScriptStore;
use super::{CallScript, GenerateError, GenerationService, ScriptId, ScriptRequest};

const OPENER: &str = include_str!("templates/opener.hbs");
const VALUE_PITCH: &str = include_str!("templates/value_pitch.hbs");
const OBJECTION_HANDLING: &str = include_str!("templates/objection_handling.hbs");
const CLOSING: &str = include_str!("templates/closing.hbs");

pub struct TemplateScriptService {
    registry: Handlebars<'static>,
    store: ScriptStore,
}

impl TemplateScriptService {
    pub fn new(store: ScriptStore) -> Self {
        let mut registry = Handlebars::new();
        // Plain-text output, not HTML
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);
        Self { registry, store }
    }

    /// Build the full artifact without persisting it.
    pub fn render(&self, request: &ScriptRequest) -> Result<CallScript, GenerateError> {
        let values = json!({
            "product": request.product,
            "persona": request.persona,
            "industry": request.industry,
            "goal_label": request.goal.label(),
            "goal_ask": request.goal.ask(),
            "tone": request.tone,
            "objections": request.objections,
        });

        let section = |template: &str| -> Result<String, GenerateError> {
            let rendered = self.registry.render_template(template, &values)?;
            Ok(rendered.trim_end().to_string())
        };

        Ok(CallScript {
            id: ScriptId::generate(),
            created_at: Utc::now(),
            request: request.clone(),
            opener: section(OPENER)?,
            value_pitch: section(VALUE_PITCH)?,
            objection_handling: section(OBJECTION_HANDLING)?,
            closing: section(CLOSING)?,
        })
    }

    pub fn store(&self) -> &ScriptStore {
        &self.store
    }
}

#[async_trait]
impl GenerationService for TemplateScriptService {
    async fn generate(&self, request: &ScriptRequest) -> Result<ScriptId, GenerateError> {
        let script = self.render(request)?;
        self.store.save(&script)?;
        tracing::info!(id = %script.id, goal = request.goal.code(), "script generated");
        Ok(script.id)
    }
}
