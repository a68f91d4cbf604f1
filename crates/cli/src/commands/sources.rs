use serde_json::json;

use shadowops_core::IntegrationStatus;

use crate::app::App;
use crate::print_json;

pub(crate) fn cmd_sources(app: &App) {
    let integrations = &app.store.integrations;

    if app.is_json() {
        print_json(&json!({ "integrations": integrations }));
        return;
    }

    if integrations.is_empty() {
        println!("No metadata sources connected.");
        return;
    }
    for i in integrations {
        let status = match i.status {
            IntegrationStatus::Connected => "connected",
            IntegrationStatus::Error => "ERROR",
        };
        println!(
            "  {:<18} {:<12} {:<9} health {:>3}%  synced {}",
            i.name, i.kind, status, i.health, i.last_sync
        );
    }
}
