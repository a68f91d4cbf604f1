//! Prompt construction for each gateway operation.
//!
//! Domain objects are embedded as compact JSON with their wire field names.

use serde::Serialize;
use serde_json::json;

use shadowops_core::model::{
    DeclaredWorkflow, GravityHistoryPoint, Intervention, Severity, ShadowEdge, ShadowInsight,
    ShadowNode,
};
use shadowops_core::views::{top_by_gravity, with_severity};

/// How many nodes the executive summary sees.
pub const SUMMARY_TOP_NODES: usize = 3;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryContext {
    top_gravity_nodes: Vec<ShadowNode>,
    critical_insights: Vec<ShadowInsight>,
}

pub fn executive_summary(nodes: &[ShadowNode], insights: &[ShadowInsight]) -> String {
    let context = SummaryContext {
        top_gravity_nodes: top_by_gravity(nodes, SUMMARY_TOP_NODES),
        critical_insights: with_severity(insights, Severity::High),
    };
    format!(
        "Act as a COO advisor. Analyze the following shadow work metadata and provide a \
         2-sentence executive summary. Focus on system friction and organizational health.\n\n\
         Metadata: {}",
        to_json(&context)
    )
}

pub fn simulate_intervention(node: &ShadowNode, strategy: &str) -> String {
    format!(
        "Analyze this shadow work node: {}.\n\
         What is the estimated reduction in 'Gravity Score' (0-100) if we apply this strategy: {}?\n\
         Return your answer as a JSON object with 'reduction' (number) and 'reasoning' (string).",
        to_json(node),
        strategy
    )
}

/// Provider-format schema sent with the simulation request.
pub fn simulation_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "reduction": { "type": "NUMBER" },
            "reasoning": { "type": "STRING" }
        },
        "required": ["reduction", "reasoning"]
    })
}

pub fn divergence(
    workflow: &DeclaredWorkflow,
    edges: &[ShadowEdge],
    nodes: &[ShadowNode],
) -> String {
    format!(
        "Compare this SOP (Standard Operating Procedure): {}\n\
         with the observed shadow work nodes: {} and edges: {}.\n\
         Identify the biggest \"Divergence\" between what is supposed to happen and what actually happens.\n\
         Focus on bypassed steps or extra loops. Keep it to 3 bullet points.",
        to_json(workflow),
        to_json(nodes),
        to_json(edges)
    )
}

pub fn root_cause(point_name: &str, metadata_summary: &str) -> String {
    format!(
        "Act as a principal systems architect. Explain the likely ROOT CAUSE for this operational divergence: \"{}\".\n\
         Pattern metadata provided (specifically interpret reworkCount, roleSpread, interactionCount, and relationship edges): \"{}\".\n\
         Identify the structural system failure (e.g., missing feedback loop, role overload, tool mismatch).\n\
         Be concise (max 25 words). Focus on \"why the system forces this behavior.\"",
        point_name, metadata_summary
    )
}

pub fn intervention_effectiveness(
    intervention: &Intervention,
    history: &[GravityHistoryPoint],
) -> String {
    format!(
        "Analyze the effectiveness of this intervention strategy: \"{}\".\n\
         Initial Gravity: {}\n\
         Current Gravity: {}\n\
         Historical Trend: {}\n\
         Provide a concise (1 sentence) verdict on whether the intervention helped and what the next system-level step should be.",
        intervention.strategy,
        intervention.initial_gravity,
        intervention.current_gravity,
        to_json(history)
    )
}
