use serde_json::json;

use shadowops_core::views::{above_threshold, top_by_gravity};
use shadowops_core::DashboardMetrics;

use crate::app::App;
use crate::commands::gravity;
use crate::print_json;

const HOTSPOTS: usize = 3;

pub(crate) async fn cmd_dashboard(app: &App) {
    let store = &app.store;
    let metrics = DashboardMetrics::compute(store);
    let hotspots = top_by_gravity(&store.nodes, HOTSPOTS);
    let alerts = if app.settings.notifications.high_gravity_alerts {
        above_threshold(&store.nodes, app.gravity_threshold())
    } else {
        Vec::new()
    };

    let summary = app
        .intel
        .generate_executive_summary(&store.nodes, &store.insights)
        .await;

    if app.is_json() {
        print_json(&json!({
            "metrics": metrics,
            "threshold": app.settings.inference.gravity_alert_threshold,
            "alerts": alerts.iter().map(|n| &n.id).collect::<Vec<_>>(),
            "hotspots": hotspots.iter().map(|n| json!({
                "id": n.id,
                "displayName": n.display_name,
                "gravityScore": n.gravity_score,
            })).collect::<Vec<_>>(),
            "summary": summary,
        }));
        return;
    }

    println!("Invisible work:   {}", metrics.invisible_work_count);
    println!("Total gravity:    {}", gravity(metrics.total_gravity));
    println!(
        "Interventions:    {}/{} resolved",
        metrics.resolved_interventions, metrics.total_interventions
    );
    println!("Trust index:      {}", metrics.trust_index);
    println!();
    println!("Hotspots:");
    for node in &hotspots {
        println!("  {:>6}  {}", gravity(node.gravity_score), node.display_name);
    }
    if !alerts.is_empty() {
        println!();
        println!(
            "Alerts (gravity above {}):",
            app.settings.inference.gravity_alert_threshold
        );
        for node in &alerts {
            println!("  ! {} ({})", node.display_name, gravity(node.gravity_score));
        }
    }
    println!();
    println!("Executive summary:");
    println!("  {}", summary);
}
