//! Read-only views derived from the fixture store.
//!
//! Nothing here is stored; every value is recomputed from the fixtures on
//! demand.

use serde::Serialize;

use crate::fixtures::FixtureStore;
use crate::model::{InterventionStatus, ObjectType, Severity, ShadowInsight, ShadowNode};

/// Mock organizational trust index shown on the dashboard.
pub const TRUST_INDEX: u32 = 63;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Nodes that are not tracked tasks.
    pub invisible_work_count: usize,
    pub total_gravity: f64,
    pub resolved_interventions: usize,
    pub total_interventions: usize,
    pub trust_index: u32,
}

impl DashboardMetrics {
    pub fn compute(store: &FixtureStore) -> Self {
        DashboardMetrics {
            invisible_work_count: store
                .nodes
                .iter()
                .filter(|n| n.object_type != ObjectType::Task)
                .count(),
            total_gravity: store.nodes.iter().map(|n| n.gravity_score).sum(),
            resolved_interventions: store
                .interventions
                .iter()
                .filter(|i| i.status == InterventionStatus::Resolved)
                .count(),
            total_interventions: store.interventions.len(),
            trust_index: TRUST_INDEX,
        }
    }
}

/// The `limit` highest-gravity nodes, highest first. The input is untouched.
pub fn top_by_gravity(nodes: &[ShadowNode], limit: usize) -> Vec<ShadowNode> {
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|a, b| b.gravity_score.total_cmp(&a.gravity_score));
    sorted.truncate(limit);
    sorted
}

pub fn with_severity(insights: &[ShadowInsight], severity: Severity) -> Vec<ShadowInsight> {
    insights
        .iter()
        .filter(|i| i.severity == severity)
        .cloned()
        .collect()
}

/// Nodes whose gravity exceeds an alert threshold.
pub fn above_threshold(nodes: &[ShadowNode], threshold: f64) -> Vec<&ShadowNode> {
    nodes.iter().filter(|n| n.gravity_score > threshold).collect()
}

/// Every edge touching `node_id`, rendered as `"<type> (weight: <w>)"` and
/// joined with `", "`.
pub fn edge_summary(store: &FixtureStore, node_id: &str) -> String {
    store
        .edges_touching(node_id)
        .iter()
        .map(|e| format!("{} (weight: {})", e.edge_type, e.weight))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A place where observed behavior diverges from the declared workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivergencePoint {
    pub id: &'static str,
    pub name: &'static str,
    pub node_id: &'static str,
    /// Counter and edge summary handed to the root-cause prompt.
    pub metadata: String,
}

#[derive(Clone, Copy)]
enum Counter {
    Interactions,
    Rework,
    RoleSpread,
}

const POINTS: [(&str, &str, &str, &[Counter]); 3] = [
    (
        "prd_rework",
        "PRD Rework Loops",
        "n1",
        &[Counter::Interactions, Counter::Rework, Counter::RoleSpread],
    ),
    (
        "security_bypass",
        "Security Review Bypass",
        "n2",
        &[Counter::Interactions, Counter::RoleSpread],
    ),
    (
        "wiki_shadow",
        "Shadow Coordination Step",
        "n4",
        &[Counter::Interactions, Counter::Rework, Counter::RoleSpread],
    ),
];

/// The Reality Mode divergence points with metadata built from the current
/// fixtures. Counters of a missing node render as `n/a`.
pub fn divergence_points(store: &FixtureStore) -> Vec<DivergencePoint> {
    POINTS
        .iter()
        .map(|&(id, name, node_id, counters)| {
            let node = store.node(node_id);
            let fields = counters
                .iter()
                .map(|c| {
                    let (label, value) = match c {
                        Counter::Interactions => {
                            ("interactionCount", node.map(|n| n.interaction_count))
                        }
                        Counter::Rework => ("reworkCount", node.map(|n| n.rework_count)),
                        Counter::RoleSpread => ("roleSpread", node.map(|n| n.role_spread)),
                    };
                    let value = value.map_or_else(|| "n/a".to_string(), |v| v.to_string());
                    format!("{}: {}", label, value)
                })
                .collect::<Vec<_>>()
                .join(", ");
            DivergencePoint {
                id,
                name,
                node_id,
                metadata: format!(
                    "Node Metadata: [{}]. Relationship Patterns (Edges): [{}]",
                    fields,
                    edge_summary(store, node_id)
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn store() -> FixtureStore {
        FixtureStore::mock_at(datetime!(2026-03-01 12:00 UTC))
    }

    #[test]
    fn dashboard_metrics_from_mock_data() {
        let m = DashboardMetrics::compute(&store());
        assert_eq!(m.invisible_work_count, 4);
        assert!((m.total_gravity - 300.0).abs() < 1e-9);
        assert_eq!(m.resolved_interventions, 1);
        assert_eq!(m.total_interventions, 2);
        assert_eq!(m.trust_index, 63);
    }

    #[test]
    fn top_by_gravity_leaves_input_order_alone() {
        let s = store();
        let before: Vec<String> = s.nodes.iter().map(|n| n.id.clone()).collect();
        let top = top_by_gravity(&s.nodes, 3);
        let ids: Vec<&str> = top.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n4", "n1", "n2"]);
        let after: Vec<String> = s.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn severity_and_threshold_filters() {
        let s = store();
        let high = with_severity(&s.insights, Severity::High);
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].id, "i1");

        let hot: Vec<&str> = above_threshold(&s.nodes, 65.0)
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(hot, vec!["n1", "n4"]);
    }

    #[test]
    fn edge_summary_lists_touching_edges() {
        let s = store();
        assert_eq!(edge_summary(&s, "n1"), "dependency (weight: 4)");
        assert_eq!(
            edge_summary(&s, "n4"),
            "dependency (weight: 4), handoff (weight: 2), rework (weight: 8)"
        );
        assert_eq!(edge_summary(&s, "n3"), "");
    }

    #[test]
    fn divergence_point_metadata() {
        let points = divergence_points(&store());
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].id, "prd_rework");
        assert_eq!(
            points[0].metadata,
            "Node Metadata: [interactionCount: 145, reworkCount: 22, roleSpread: 4]. \
             Relationship Patterns (Edges): [dependency (weight: 4)]"
        );
        assert_eq!(
            points[1].metadata,
            "Node Metadata: [interactionCount: 89, roleSpread: 3]. \
             Relationship Patterns (Edges): [handoff (weight: 2), handoff (weight: 5)]"
        );
    }

    #[test]
    fn divergence_point_with_missing_node() {
        let mut s = store();
        s.nodes.retain(|n| n.id != "n2");
        s.edges.retain(|e| !e.touches("n2"));
        let points = divergence_points(&s);
        assert_eq!(
            points[1].metadata,
            "Node Metadata: [interactionCount: n/a, roleSpread: n/a]. \
             Relationship Patterns (Edges): []"
        );
    }
}
