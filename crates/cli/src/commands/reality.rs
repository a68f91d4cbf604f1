//! Reality Mode: the declared workflow next to what actually happens.

use serde_json::json;
use tokio::task::JoinSet;

use shadowops_core::views::{divergence_points, DivergencePoint};
use shadowops_core::DeclaredWorkflow;
use shadowops_intel::gateway::ROOT_CAUSE_FALLBACK;

use crate::app::App;
use crate::print_json;

fn select_workflow<'a>(app: &'a App, id: Option<&str>) -> &'a DeclaredWorkflow {
    match id {
        Some(id) => match app.store.workflow(id) {
            Some(w) => w,
            None => app.fail(&format!("error: workflow '{}' not found", id)),
        },
        None => match app.store.workflows.first() {
            Some(w) => w,
            None => app.fail("error: no declared workflows in fixtures"),
        },
    }
}

/// Root causes for every divergence point, requested concurrently and
/// returned in point order.
async fn root_causes(app: &App, points: &[DivergencePoint]) -> Vec<String> {
    let mut set = JoinSet::new();
    for (index, point) in points.iter().enumerate() {
        let intel = app.intel.clone();
        let name = point.name;
        let metadata = point.metadata.clone();
        set.spawn(async move { (index, intel.explain_root_cause(name, &metadata).await) });
    }

    let mut out = vec![ROOT_CAUSE_FALLBACK.to_string(); points.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, cause)) => out[index] = cause,
            Err(e) => tracing::warn!(error = %e, "root cause task failed"),
        }
    }
    out
}

pub(crate) async fn cmd_reality(app: &App, workflow_id: Option<&str>) {
    let workflow = select_workflow(app, workflow_id);
    let points = divergence_points(&app.store);

    let (analysis, causes) = tokio::join!(
        app.intel
            .analyze_divergence(workflow, &app.store.edges, &app.store.nodes),
        root_causes(app, &points),
    );

    if app.is_json() {
        let points: Vec<_> = points
            .iter()
            .zip(&causes)
            .map(|(p, cause)| {
                json!({
                    "id": p.id,
                    "name": p.name,
                    "nodeId": p.node_id,
                    "metadata": p.metadata,
                    "rootCause": cause,
                })
            })
            .collect();
        print_json(&json!({
            "workflow": workflow,
            "analysis": analysis,
            "divergencePoints": points,
        }));
        return;
    }

    println!("{}: {}", workflow.name, workflow.description);
    let steps: Vec<&str> = workflow
        .ordered_steps()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    println!("  declared: {}", steps.join(" -> "));
    println!();
    println!("Divergence analysis:");
    for line in analysis.lines() {
        println!("  {}", line);
    }
    for (point, cause) in points.iter().zip(&causes) {
        println!();
        println!("{} ({})", point.name, app.node_name(point.node_id));
        if !app.quiet {
            println!("  {}", point.metadata);
        }
        println!("  root cause: {}", cause);
    }
}
