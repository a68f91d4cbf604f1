//! The intelligence gateway.
//!
//! Each operation turns domain objects into a prompt, makes one provider
//! call and returns a value. It never returns an error: a failed call or an
//! unparseable answer is logged and replaced by a fixed fallback, and an
//! empty answer by a fixed default. There is no retry and no shared mutable
//! state, so any number of operations can run concurrently.

use std::sync::Arc;

use shadowops_core::model::{
    DeclaredWorkflow, GravityHistoryPoint, Intervention, ShadowEdge, ShadowInsight, ShadowNode,
};

use crate::client::{GenerateRequest, LlmClient, LlmError};
use crate::config::IntelConfig;
use crate::gemini::GeminiClient;
use crate::parse::{parse_simulation, SimulationResult};
use crate::prompt;

// ── Defaults (provider answered with no text) ───────────────────────────────

pub const SUMMARY_DEFAULT: &str =
    "Systems are operating within expected variance. No critical shadow work detected.";
pub const SIMULATION_DEFAULT_REDUCTION: f64 = 0.0;
pub const SIMULATION_DEFAULT_REASONING: &str = "No change expected.";
pub const DIVERGENCE_DEFAULT: &str = "No major divergence detected.";
pub const ROOT_CAUSE_DEFAULT: &str = "Structural friction in the handoff phase.";
pub const EFFECTIVENESS_DEFAULT: &str = "Intervention effect is neutral. Continue monitoring.";

// ── Fallbacks (call failed or answer unparseable) ───────────────────────────

pub const SUMMARY_FALLBACK: &str = "Unable to generate AI summary at this time.";
pub const SIMULATION_FALLBACK_REDUCTION: f64 = 15.0;
pub const SIMULATION_FALLBACK_REASONING: &str =
    "Simulation estimate based on typical process optimization patterns.";
pub const DIVERGENCE_FALLBACK: &str = "Analysis unavailable. Observed patterns suggest significant undocumented rework loops between QA and Security phases.";
pub const ROOT_CAUSE_FALLBACK: &str = "Friction between formal tools and actual coordination needs.";
pub const EFFECTIVENESS_FALLBACK: &str = "The strategy has resulted in a gradual decay of system gravity, though structural rework loops persist.";

const SUMMARY_TEMPERATURE: f32 = 0.7;
const DIVERGENCE_TEMPERATURE: f32 = 0.5;
const ROOT_CAUSE_TEMPERATURE: f32 = 0.4;
const EFFECTIVENESS_TEMPERATURE: f32 = 0.5;

impl SimulationResult {
    pub fn empty_default() -> Self {
        SimulationResult {
            reduction: SIMULATION_DEFAULT_REDUCTION,
            reasoning: SIMULATION_DEFAULT_REASONING.to_string(),
        }
    }

    pub fn fallback() -> Self {
        SimulationResult {
            reduction: SIMULATION_FALLBACK_REDUCTION,
            reasoning: SIMULATION_FALLBACK_REASONING.to_string(),
        }
    }
}

/// Wrapper around a generative model that decorates fixtures with
/// narrative text.
#[derive(Clone)]
pub struct Intelligence {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl Intelligence {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Intelligence {
            client,
            model: model.into(),
        }
    }

    /// Gateway backed by the Gemini REST API.
    pub fn gemini(config: IntelConfig) -> Self {
        let model = config.model.clone();
        Self::new(Arc::new(GeminiClient::new(config)), model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call(&self, operation: &'static str, request: GenerateRequest) -> Result<String, LlmError> {
        let result = self.client.generate(&request).await;
        if let Err(e) = &result {
            tracing::warn!(operation, error = %e, "generation failed, using fallback");
        }
        result
    }

    async fn text_operation(
        &self,
        operation: &'static str,
        prompt: String,
        temperature: f32,
        empty_default: &str,
        fallback: &str,
    ) -> String {
        let request = GenerateRequest::new(&self.model, prompt).with_temperature(temperature);
        match self.call(operation, request).await {
            Ok(text) if text.is_empty() => empty_default.to_string(),
            Ok(text) => text,
            Err(_) => fallback.to_string(),
        }
    }

    /// Two-sentence executive summary of the highest-gravity nodes and the
    /// high-severity insights.
    pub async fn generate_executive_summary(
        &self,
        nodes: &[ShadowNode],
        insights: &[ShadowInsight],
    ) -> String {
        self.text_operation(
            "executive_summary",
            prompt::executive_summary(nodes, insights),
            SUMMARY_TEMPERATURE,
            SUMMARY_DEFAULT,
            SUMMARY_FALLBACK,
        )
        .await
    }

    /// Estimated gravity reduction for applying `strategy` to `node`.
    pub async fn simulate_intervention(&self, node: &ShadowNode, strategy: &str) -> SimulationResult {
        let request = GenerateRequest::new(&self.model, prompt::simulate_intervention(node, strategy))
            .with_json_schema(prompt::simulation_response_schema());
        let text = match self.call("simulate_intervention", request).await {
            Ok(text) => text,
            Err(_) => return SimulationResult::fallback(),
        };
        if text.is_empty() {
            return SimulationResult::empty_default();
        }
        match parse_simulation(&text) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(operation = "simulate_intervention", error = %e, "unparseable answer, using fallback");
                SimulationResult::fallback()
            }
        }
    }

    /// Bullet-point comparison of a declared workflow with observed nodes and
    /// edges.
    pub async fn analyze_divergence(
        &self,
        workflow: &DeclaredWorkflow,
        edges: &[ShadowEdge],
        nodes: &[ShadowNode],
    ) -> String {
        self.text_operation(
            "analyze_divergence",
            prompt::divergence(workflow, edges, nodes),
            DIVERGENCE_TEMPERATURE,
            DIVERGENCE_DEFAULT,
            DIVERGENCE_FALLBACK,
        )
        .await
    }

    /// Short structural explanation for one divergence point. The answer is
    /// trimmed; a blank answer gets the default.
    pub async fn explain_root_cause(&self, point_name: &str, metadata_summary: &str) -> String {
        let request = GenerateRequest::new(&self.model, prompt::root_cause(point_name, metadata_summary))
            .with_temperature(ROOT_CAUSE_TEMPERATURE);
        match self.call("explain_root_cause", request).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    ROOT_CAUSE_DEFAULT.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            Err(_) => ROOT_CAUSE_FALLBACK.to_string(),
        }
    }

    /// One-sentence verdict on an intervention given the node's gravity
    /// history.
    pub async fn analyze_intervention_effectiveness(
        &self,
        intervention: &Intervention,
        history: &[GravityHistoryPoint],
    ) -> String {
        self.text_operation(
            "intervention_effectiveness",
            prompt::intervention_effectiveness(intervention, history),
            EFFECTIVENESS_TEMPERATURE,
            EFFECTIVENESS_DEFAULT,
            EFFECTIVENESS_FALLBACK,
        )
        .await
    }
}
