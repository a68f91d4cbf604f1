use serde_json::json;

use crate::app::App;
use crate::print_json;

pub(crate) fn cmd_settings(app: &App) {
    let settings = &app.settings;
    let key_state = if settings.intelligence.api_key.is_empty() {
        "unset"
    } else {
        "set"
    };

    if app.is_json() {
        print_json(&json!({
            "settings": settings,
            "apiKey": key_state,
        }));
        return;
    }

    match toml::to_string_pretty(settings) {
        Ok(text) => print!("{}", text),
        Err(e) => app.fail(&format!("error: could not render settings: {}", e)),
    }
    println!();
    println!("# api key: {}", key_state);
}
