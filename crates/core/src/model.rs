//! Domain records for shadow-work analytics.
//!
//! Every record serializes with camelCase field names and the wire spellings
//! of its enums, so the JSON embedded in model prompts is the same shape a
//! browser client would send.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// ── Enums ────────────────────────────────────────────────────────────────────

/// Kind of raw behavioral signal observed in a source system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    DocEdit,
    TaskReopen,
    ApprovalDelay,
    CiRetry,
    ThreadRevive,
}

impl SignalType {
    pub const ALL: [SignalType; 5] = [
        SignalType::DocEdit,
        SignalType::TaskReopen,
        SignalType::ApprovalDelay,
        SignalType::CiRetry,
        SignalType::ThreadRevive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::DocEdit => "DOC_EDIT",
            SignalType::TaskReopen => "TASK_REOPEN",
            SignalType::ApprovalDelay => "APPROVAL_DELAY",
            SignalType::CiRetry => "CI_RETRY",
            SignalType::ThreadRevive => "THREAD_REVIVE",
        }
    }
}

/// System a signal was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSystem {
    Docs,
    Jira,
    Slack,
    Ci,
    Custom,
}

impl SourceSystem {
    pub const ALL: [SourceSystem; 5] = [
        SourceSystem::Docs,
        SourceSystem::Jira,
        SourceSystem::Slack,
        SourceSystem::Ci,
        SourceSystem::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceSystem::Docs => "docs",
            SourceSystem::Jira => "jira",
            SourceSystem::Slack => "slack",
            SourceSystem::Ci => "ci",
            SourceSystem::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Doc,
    Task,
    Deploy,
    Process,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Doc,
        ObjectType::Task,
        ObjectType::Deploy,
        ObjectType::Process,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Doc => "doc",
            ObjectType::Task => "task",
            ObjectType::Deploy => "deploy",
            ObjectType::Process => "process",
        }
    }
}

/// Role of the (anonymized) actor behind a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Engineer,
    Qa,
    Ops,
    Manager,
}

impl ActorRole {
    pub const ALL: [ActorRole; 4] = [
        ActorRole::Engineer,
        ActorRole::Qa,
        ActorRole::Ops,
        ActorRole::Manager,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActorRole::Engineer => "engineer",
            ActorRole::Qa => "qa",
            ActorRole::Ops => "ops",
            ActorRole::Manager => "manager",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Handoff,
    Rework,
    Dependency,
}

impl EdgeType {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeType::Handoff => "handoff",
            EdgeType::Rework => "rework",
            EdgeType::Dependency => "dependency",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightType {
    ShadowTask,
    ReworkLoop,
    Bottleneck,
    PhantomOwnership,
}

impl InsightType {
    pub fn as_str(self) -> &'static str {
        match self {
            InsightType::ShadowTask => "SHADOW_TASK",
            InsightType::ReworkLoop => "REWORK_LOOP",
            InsightType::Bottleneck => "BOTTLENECK",
            InsightType::PhantomOwnership => "PHANTOM_OWNERSHIP",
        }
    }
}

/// Insight severity. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionStatus {
    Active,
    Resolved,
    Stalled,
}

impl InterventionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InterventionStatus::Active => "active",
            InterventionStatus::Resolved => "resolved",
            InterventionStatus::Stalled => "stalled",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.pad(self.as_str())
                }
            }
        )*
    };
}

display_via_as_str!(
    SignalType,
    SourceSystem,
    ObjectType,
    ActorRole,
    EdgeType,
    InsightType,
    Severity,
    InterventionStatus,
);

// ── Records ──────────────────────────────────────────────────────────────────

/// A single observed signal from the ingestion stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: String,
    pub signal_type: SignalType,
    pub source_system: SourceSystem,
    pub object_type: ObjectType,
    pub object_id: String,
    pub actor_role: ActorRole,
    pub intensity: f64,
    pub project_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GravityHistoryPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub score: f64,
}

/// A work object that accumulates informal coordination ("shadow work").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowNode {
    pub id: String,
    pub object_type: ObjectType,
    pub object_id: String,
    pub project_id: String,
    pub interaction_count: u32,
    pub rework_count: u32,
    /// Distinct roles interacting with the object.
    pub role_spread: u32,
    pub gravity_score: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_activity_at: OffsetDateTime,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<GravityHistoryPoint>>,
}

impl ShadowNode {
    /// True when the node has a multi-point history whose latest score is
    /// below its earliest one.
    pub fn is_improving(&self) -> bool {
        match self.history.as_deref() {
            Some([first, .., last]) => last.score < first.score,
            _ => false,
        }
    }

    /// Bubble radius on the friction map.
    pub fn map_radius(&self) -> f64 {
        30.0 + self.gravity_score / 2.0
    }

    /// Gravity left after applying an estimated reduction.
    pub fn projected_gravity(&self, reduction: f64) -> f64 {
        self.gravity_score - reduction
    }

    pub fn history_points(&self) -> &[GravityHistoryPoint] {
        self.history.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEdge {
    pub id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    pub edge_type: EdgeType,
    pub weight: f64,
    pub project_id: String,
}

impl ShadowEdge {
    pub fn touches(&self, node_id: &str) -> bool {
        self.from_node_id == node_id || self.to_node_id == node_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowInsight {
    pub id: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub severity: Severity,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub description: String,
    pub related_node_ids: Vec<String>,
    pub project_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    pub id: String,
    pub name: String,
    pub order: u32,
}

/// A documented standard operating procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredWorkflow {
    pub id: String,
    pub name: String,
    pub steps: Vec<WorkflowStep>,
    pub project_id: String,
    pub description: String,
}

impl DeclaredWorkflow {
    /// Steps sorted by their declared order.
    pub fn ordered_steps(&self) -> Vec<&WorkflowStep> {
        let mut steps: Vec<&WorkflowStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: String,
    pub node_id: String,
    pub strategy: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub initial_gravity: f64,
    pub target_gravity: f64,
    pub current_gravity: f64,
    pub status: InterventionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    Error,
}

/// A connected metadata source, as shown on the integrations page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub name: String,
    pub kind: String,
    pub status: IntegrationStatus,
    pub health: u8,
    pub last_sync: String,
}
