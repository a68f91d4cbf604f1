//! The read-only fixture store that stands in for an ingestion backend.
//!
//! Collections are built once (either the bundled demo data set or a JSON
//! document) and only ever handed out by shared reference.

use std::path::Path;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::error::FixtureError;
use crate::model::{
    DeclaredWorkflow, EdgeType, GravityHistoryPoint, InsightType, Integration, IntegrationStatus,
    Intervention, InterventionStatus, ObjectType, Severity, ShadowEdge, ShadowInsight, ShadowNode,
    WorkflowStep,
};

const PROJECT: &str = "alpha";

/// All fixture collections for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureStore {
    pub nodes: Vec<ShadowNode>,
    pub edges: Vec<ShadowEdge>,
    pub insights: Vec<ShadowInsight>,
    pub workflows: Vec<DeclaredWorkflow>,
    pub interventions: Vec<Intervention>,
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

impl FixtureStore {
    /// The bundled demo data set, with timestamps relative to now.
    pub fn mock() -> Self {
        Self::mock_at(OffsetDateTime::now_utc())
    }

    /// The bundled demo data set, with timestamps relative to `now`.
    pub fn mock_at(now: OffsetDateTime) -> Self {
        FixtureStore {
            nodes: mock_nodes(now),
            edges: mock_edges(),
            insights: mock_insights(now),
            workflows: mock_workflows(),
            interventions: mock_interventions(now),
            integrations: mock_integrations(),
        }
    }

    /// Parse a fixture document in the same camelCase JSON shape the store
    /// serializes to.
    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        let store: FixtureStore = serde_json::from_str(json)?;
        store.check_references()?;
        Ok(store)
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn node(&self, id: &str) -> Option<&ShadowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn workflow(&self, id: &str) -> Option<&DeclaredWorkflow> {
        self.workflows.iter().find(|w| w.id == id)
    }

    pub fn interventions_for(&self, node_id: &str) -> Vec<&Intervention> {
        self.interventions
            .iter()
            .filter(|i| i.node_id == node_id)
            .collect()
    }

    pub fn edges_touching(&self, node_id: &str) -> Vec<&ShadowEdge> {
        self.edges.iter().filter(|e| e.touches(node_id)).collect()
    }

    /// Nodes referenced by an insight, in the insight's order. Unknown ids
    /// are skipped.
    pub fn related_nodes(&self, insight: &ShadowInsight) -> Vec<&ShadowNode> {
        insight
            .related_node_ids
            .iter()
            .filter_map(|id| self.node(id))
            .collect()
    }

    /// Edges and interventions must point at known nodes.
    fn check_references(&self) -> Result<(), FixtureError> {
        for edge in &self.edges {
            for endpoint in [&edge.from_node_id, &edge.to_node_id] {
                if self.node(endpoint).is_none() {
                    return Err(FixtureError::DanglingReference {
                        owner: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }
        for intervention in &self.interventions {
            if self.node(&intervention.node_id).is_none() {
                return Err(FixtureError::DanglingReference {
                    owner: intervention.id.clone(),
                    node_id: intervention.node_id.clone(),
                });
            }
        }
        Ok(())
    }
}

// ── Demo data ────────────────────────────────────────────────────────────────

fn point(now: OffsetDateTime, days_ago: i64, score: f64) -> GravityHistoryPoint {
    GravityHistoryPoint {
        timestamp: now - Duration::days(days_ago),
        score,
    }
}

#[allow(clippy::too_many_arguments)]
fn node(
    id: &str,
    object_type: ObjectType,
    object_id: &str,
    counts: (u32, u32, u32),
    gravity_score: f64,
    created_at: OffsetDateTime,
    last_activity_at: OffsetDateTime,
    display_name: &str,
    history: Option<Vec<GravityHistoryPoint>>,
) -> ShadowNode {
    let (interaction_count, rework_count, role_spread) = counts;
    ShadowNode {
        id: id.to_string(),
        object_type,
        object_id: object_id.to_string(),
        project_id: PROJECT.to_string(),
        interaction_count,
        rework_count,
        role_spread,
        gravity_score,
        created_at,
        last_activity_at,
        display_name: display_name.to_string(),
        history,
    }
}

fn mock_nodes(now: OffsetDateTime) -> Vec<ShadowNode> {
    vec![
        node(
            "n1",
            ObjectType::Doc,
            "PRD-2025-CORE",
            (145, 22, 4),
            84.5,
            now - Duration::days(30),
            now,
            "Core Platform PRD (v4 Revision)",
            Some(vec![
                point(now, 20, 95.0),
                point(now, 15, 92.4),
                point(now, 10, 88.1),
                point(now, 0, 84.5),
            ]),
        ),
        node(
            "n2",
            ObjectType::Process,
            "SEC-REVIEW-ADHOC",
            (89, 12, 3),
            62.1,
            now - Duration::days(15),
            now - Duration::hours(1),
            "Ad-hoc Security Patching",
            Some(vec![
                point(now, 10, 45.0),
                point(now, 5, 55.2),
                point(now, 0, 62.1),
            ]),
        ),
        node(
            "n3",
            ObjectType::Task,
            "OPS-1123",
            (25, 2, 2),
            15.2,
            now - Duration::days(5),
            now - Duration::minutes(10),
            "CI Pipeline Optimization",
            None,
        ),
        node(
            "n4",
            ObjectType::Doc,
            "INTERNAL-WIKI-QA",
            (210, 45, 5),
            95.8,
            now - Duration::days(45),
            now,
            "QA Test Procedure (Stale Draft)",
            Some(vec![
                point(now, 30, 80.0),
                point(now, 15, 92.5),
                point(now, 0, 95.8),
            ]),
        ),
        node(
            "n5",
            ObjectType::Deploy,
            "PROD-ROLLOUT-G1",
            (56, 8, 4),
            42.4,
            now - Duration::days(2),
            now,
            "Weekly Production Rollout",
            None,
        ),
    ]
}

fn edge(id: &str, from: &str, to: &str, edge_type: EdgeType, weight: f64) -> ShadowEdge {
    ShadowEdge {
        id: id.to_string(),
        from_node_id: from.to_string(),
        to_node_id: to.to_string(),
        edge_type,
        weight,
        project_id: PROJECT.to_string(),
    }
}

fn mock_edges() -> Vec<ShadowEdge> {
    vec![
        edge("e1", "n1", "n4", EdgeType::Dependency, 4.0),
        edge("e2", "n4", "n2", EdgeType::Handoff, 2.0),
        edge("e3", "n2", "n5", EdgeType::Handoff, 5.0),
        edge("e4", "n4", "n4", EdgeType::Rework, 8.0),
    ]
}

fn mock_interventions(now: OffsetDateTime) -> Vec<Intervention> {
    vec![
        Intervention {
            id: "int1".to_string(),
            node_id: "n1".to_string(),
            strategy: "Assign explicit architect owner to PRD phase to reduce cross-role coordination drift.".to_string(),
            timestamp: now - Duration::days(20),
            initial_gravity: 95.0,
            target_gravity: 65.0,
            current_gravity: 84.5,
            status: InterventionStatus::Active,
        },
        Intervention {
            id: "int2".to_string(),
            node_id: "n3".to_string(),
            strategy: "Automate deployment checks for CI optimizations.".to_string(),
            timestamp: now - Duration::days(10),
            initial_gravity: 35.0,
            target_gravity: 10.0,
            current_gravity: 15.2,
            status: InterventionStatus::Resolved,
        },
    ]
}

fn insight(
    id: &str,
    insight_type: InsightType,
    severity: Severity,
    confidence: f64,
    description: &str,
    related: &str,
    now: OffsetDateTime,
) -> ShadowInsight {
    ShadowInsight {
        id: id.to_string(),
        insight_type,
        severity,
        confidence,
        description: description.to_string(),
        related_node_ids: vec![related.to_string()],
        project_id: PROJECT.to_string(),
        created_at: now,
    }
}

fn mock_insights(now: OffsetDateTime) -> Vec<ShadowInsight> {
    vec![
        insight(
            "i1",
            InsightType::PhantomOwnership,
            Severity::High,
            0.92,
            "The Core PRD exhibits massive interaction volume from multiple roles without a formal task structure. It is acting as a shadow command-and-control center.",
            "n1",
            now,
        ),
        insight(
            "i2",
            InsightType::ReworkLoop,
            Severity::Medium,
            0.85,
            "QA Test Procedures are in a constant state of revision (8 rework cycles detected). This suggests the documentation format is incompatible with the release velocity.",
            "n4",
            now,
        ),
        insight(
            "i3",
            InsightType::ShadowTask,
            Severity::Low,
            0.78,
            "Security patching activity is occurring outside of tracked tickets. 12 distinct interventions detected in the last 15 days.",
            "n2",
            now,
        ),
    ]
}

fn mock_workflows() -> Vec<DeclaredWorkflow> {
    let step = |id: &str, name: &str, order: u32| WorkflowStep {
        id: id.to_string(),
        name: name.to_string(),
        order,
    };
    vec![DeclaredWorkflow {
        id: "w1".to_string(),
        name: "Standard Release Cycle".to_string(),
        steps: vec![
            step("s1", "PRD Finalization", 1),
            step("s2", "Security Review", 2),
            step("s3", "QA Validation", 3),
            step("s4", "Prod Deployment", 4),
        ],
        project_id: PROJECT.to_string(),
        description: "The formal process for taking a feature from PRD to Production deployment."
            .to_string(),
    }]
}

fn mock_integrations() -> Vec<Integration> {
    let source = |name: &str, kind: &str, status, health, last_sync: &str| Integration {
        name: name.to_string(),
        kind: kind.to_string(),
        status,
        health,
        last_sync: last_sync.to_string(),
    };
    vec![
        source("Jira Software", "Metadata", IntegrationStatus::Connected, 98, "2m ago"),
        source("Slack Enterprise", "Graph Only", IntegrationStatus::Connected, 100, "Just now"),
        source("Google Workspace", "Edit Signals", IntegrationStatus::Error, 0, "14h ago"),
        source("GitHub Actions", "CI Metrics", IntegrationStatus::Connected, 95, "1h ago"),
    ]
}
