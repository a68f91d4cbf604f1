use serde_json::json;

use shadowops_core::ShadowInsight;

use crate::app::App;
use crate::commands::percent;
use crate::print_json;

/// Insights at or above `min_confidence`, most severe first.
pub(crate) fn visible_insights(insights: &[ShadowInsight], min_confidence: f64) -> Vec<&ShadowInsight> {
    let mut shown: Vec<&ShadowInsight> = insights
        .iter()
        .filter(|i| i.confidence >= min_confidence)
        .collect();
    shown.sort_by(|a, b| b.severity.cmp(&a.severity));
    shown
}

pub(crate) fn cmd_insights(app: &App) {
    let cutoff = app.settings.inference.confidence_cutoff;
    let shown = visible_insights(&app.store.insights, cutoff.min_confidence());

    if app.is_json() {
        let rows: Vec<_> = shown
            .iter()
            .map(|i| {
                json!({
                    "insight": i,
                    "relatedNodes": app
                        .store
                        .related_nodes(i)
                        .iter()
                        .map(|n| &n.display_name)
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        print_json(&json!({
            "minConfidence": cutoff.min_confidence(),
            "hidden": app.store.insights.len() - shown.len(),
            "insights": rows,
        }));
        return;
    }

    if shown.is_empty() {
        println!("No insights above the confidence cutoff.");
        return;
    }
    for insight in &shown {
        println!(
            "[{}] {} ({} confidence)",
            insight.severity,
            insight.insight_type,
            percent(insight.confidence)
        );
        println!("  {}", insight.description);
        let related: Vec<&str> = insight
            .related_node_ids
            .iter()
            .map(|id| app.node_name(id))
            .collect();
        if !related.is_empty() {
            println!("  related: {}", related.join(", "));
        }
    }
    let hidden = app.store.insights.len() - shown.len();
    if hidden > 0 && !app.quiet {
        println!();
        println!("{} insight(s) below the confidence cutoff hidden.", hidden);
    }
}
