//! shadowops-core: domain model and fixture store for shadow-work analytics.
//!
//! Nodes, edges, insights, workflows and interventions are plain records.
//! They are built once by [`FixtureStore`] and never mutated afterwards;
//! [`views`] derives the dashboard numbers from them on demand.
//!
//! # Public API
//!
//! - [`FixtureStore`] -- read-only collections plus id lookups
//! - [`views`] -- dashboard metrics, edge summaries, divergence points
//! - [`SignalStream`] -- simulated live signal buffer
//! - model records: [`ShadowNode`], [`ShadowEdge`], [`ShadowInsight`],
//!   [`DeclaredWorkflow`], [`Intervention`], [`Signal`]

pub mod error;
pub mod fixtures;
pub mod model;
pub mod signal;
pub mod views;

pub use error::FixtureError;
pub use fixtures::FixtureStore;
pub use model::{
    ActorRole, DeclaredWorkflow, EdgeType, GravityHistoryPoint, InsightType, Integration,
    IntegrationStatus, Intervention, InterventionStatus, ObjectType, Severity, ShadowEdge,
    ShadowInsight, ShadowNode, Signal, SignalType, SourceSystem, WorkflowStep,
};
pub use signal::{SignalStream, SIGNAL_BUFFER_CAPACITY};
pub use views::{DashboardMetrics, DivergencePoint};
