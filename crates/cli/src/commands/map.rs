use serde_json::json;

use crate::app::App;
use crate::commands::gravity;
use crate::print_json;

pub(crate) fn cmd_map(app: &App) {
    let store = &app.store;

    if app.is_json() {
        let nodes: Vec<_> = store
            .nodes
            .iter()
            .map(|n| {
                json!({
                    "id": n.id,
                    "displayName": n.display_name,
                    "gravityScore": n.gravity_score,
                    "radius": n.map_radius(),
                })
            })
            .collect();
        print_json(&json!({ "nodes": nodes, "edges": store.edges }));
        return;
    }

    println!("Nodes:");
    for n in &store.nodes {
        println!(
            "  ({:>5.1}) {:<32} gravity {}",
            n.map_radius(),
            n.display_name,
            gravity(n.gravity_score)
        );
    }
    println!();
    println!("Edges:");
    for e in &store.edges {
        println!(
            "  {} -> {}  {} (weight: {})",
            app.node_name(&e.from_node_id),
            app.node_name(&e.to_node_id),
            e.edge_type,
            e.weight
        );
    }
}
