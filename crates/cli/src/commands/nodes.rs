use serde_json::json;
use tokio::task::JoinSet;

use shadowops_core::views::{edge_summary, top_by_gravity};
use shadowops_core::Intervention;
use shadowops_intel::gateway::EFFECTIVENESS_FALLBACK;

use crate::app::App;
use crate::commands::gravity;
use crate::print_json;

pub(crate) fn cmd_nodes(app: &App) {
    let threshold = app.gravity_threshold();
    let nodes = top_by_gravity(&app.store.nodes, app.store.nodes.len());

    if app.is_json() {
        let rows: Vec<_> = nodes
            .iter()
            .map(|n| {
                json!({
                    "id": n.id,
                    "displayName": n.display_name,
                    "objectType": n.object_type,
                    "gravityScore": n.gravity_score,
                    "interactionCount": n.interaction_count,
                    "reworkCount": n.rework_count,
                    "roleSpread": n.role_spread,
                    "improving": n.is_improving(),
                    "alert": n.gravity_score > threshold,
                })
            })
            .collect();
        print_json(&json!({ "threshold": threshold, "nodes": rows }));
        return;
    }

    println!(
        "  {:<4} {:<9} {:>7} {:>6} {:>6} {:>5}  NAME",
        "ID", "TYPE", "GRAVITY", "INTER", "REWORK", "ROLES"
    );
    for n in &nodes {
        let flag = if n.gravity_score > threshold { "!" } else { " " };
        let trend = if n.is_improving() { "  (improving)" } else { "" };
        println!(
            "{} {:<4} {:<9} {:>7} {:>6} {:>6} {:>5}  {}{}",
            flag,
            n.id,
            n.object_type,
            gravity(n.gravity_score),
            n.interaction_count,
            n.rework_count,
            n.role_spread,
            n.display_name,
            trend
        );
    }
}

/// Ask for a verdict on every intervention concurrently. Results keep the
/// order of `interventions`.
async fn verdicts(app: &App, node_id: &str, interventions: &[&Intervention]) -> Vec<String> {
    let history = app
        .store
        .node(node_id)
        .map(|n| n.history_points().to_vec())
        .unwrap_or_default();

    let mut set = JoinSet::new();
    for (index, intervention) in interventions.iter().enumerate() {
        let intel = app.intel.clone();
        let intervention = (*intervention).clone();
        let history = history.clone();
        set.spawn(async move {
            let verdict = intel
                .analyze_intervention_effectiveness(&intervention, &history)
                .await;
            (index, verdict)
        });
    }

    let mut out = vec![EFFECTIVENESS_FALLBACK.to_string(); interventions.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, verdict)) => out[index] = verdict,
            Err(e) => tracing::warn!(error = %e, "verdict task failed"),
        }
    }
    out
}

pub(crate) async fn cmd_node(app: &App, id: &str) {
    let Some(node) = app.store.node(id) else {
        app.fail(&format!("error: node '{}' not found", id));
    };
    let interventions = app.store.interventions_for(id);
    let verdicts = verdicts(app, id, &interventions).await;
    let edges = edge_summary(&app.store, id);

    if app.is_json() {
        let interventions: Vec<_> = interventions
            .iter()
            .zip(&verdicts)
            .map(|(i, verdict)| {
                json!({
                    "intervention": i,
                    "verdict": verdict,
                })
            })
            .collect();
        print_json(&json!({
            "node": node,
            "improving": node.is_improving(),
            "alert": node.gravity_score > app.gravity_threshold(),
            "edgeSummary": edges,
            "interventions": interventions,
        }));
        return;
    }

    println!("{} ({})", node.display_name, node.id);
    println!("  type:         {} {}", node.object_type, node.object_id);
    println!("  gravity:      {}", gravity(node.gravity_score));
    println!("  interactions: {}", node.interaction_count);
    println!("  rework:       {}", node.rework_count);
    println!("  role spread:  {}", node.role_spread);
    if !edges.is_empty() {
        println!("  edges:        {}", edges);
    }
    let history = node.history_points();
    if !history.is_empty() {
        let trend: Vec<String> = history.iter().map(|p| gravity(p.score)).collect();
        let label = if node.is_improving() {
            "improving"
        } else {
            "not improving"
        };
        println!("  history:      {} ({})", trend.join(" -> "), label);
    }
    for (intervention, verdict) in interventions.iter().zip(&verdicts) {
        println!();
        println!(
            "Intervention {} [{}]: {}",
            intervention.id, intervention.status, intervention.strategy
        );
        println!(
            "  gravity {} -> {} (target {})",
            gravity(intervention.initial_gravity),
            gravity(intervention.current_gravity),
            gravity(intervention.target_gravity)
        );
        println!("  verdict: {}", verdict);
    }
}
