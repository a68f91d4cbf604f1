use serde_json::json;

use crate::app::App;
use crate::commands::gravity;
use crate::print_json;

pub(crate) const DEFAULT_STRATEGY: &str =
    "Remove manual approval gates and move to automated testing.";

pub(crate) async fn cmd_simulate(app: &App, node_id: &str, strategy: &str) {
    let Some(node) = app.store.node(node_id) else {
        app.fail(&format!("error: node '{}' not found", node_id));
    };
    if strategy.trim().is_empty() {
        app.fail("error: --strategy must not be empty");
    }

    let result = app.intel.simulate_intervention(node, strategy).await;
    let projected = node.projected_gravity(result.reduction);

    if app.is_json() {
        print_json(&json!({
            "nodeId": node.id,
            "strategy": strategy,
            "currentGravity": node.gravity_score,
            "reduction": result.reduction,
            "projectedGravity": projected,
            "reasoning": result.reasoning,
        }));
        return;
    }

    println!("{}: {}", node.display_name, strategy);
    println!(
        "  gravity {} -> {} (-{})",
        gravity(node.gravity_score),
        gravity(projected),
        gravity(result.reduction)
    );
    println!("  {}", result.reasoning);
}
