//! Everything a command needs: settings, fixtures and the gateway.

use std::path::Path;
use std::process;

use shadowops_core::FixtureStore;
use shadowops_intel::Intelligence;

use crate::settings::Settings;
use crate::{report_error, OutputFormat};

pub(crate) struct App {
    pub store: FixtureStore,
    pub settings: Settings,
    pub intel: Intelligence,
    pub output: OutputFormat,
    pub quiet: bool,
}

impl App {
    /// Resolve settings (file, then environment, then flags), load the
    /// fixtures and build the gateway. Errors are ready-to-print messages.
    pub fn load(
        config: Option<&Path>,
        model: Option<&str>,
        output: OutputFormat,
        quiet: bool,
    ) -> Result<App, String> {
        let mut settings = Settings::load(config).map_err(|e| format!("error: {}", e))?;
        if let Some(model) = model {
            settings.intelligence = settings.intelligence.with_model(model);
        }
        settings.validate().map_err(|e| format!("error: {}", e))?;

        let store = match &settings.fixtures {
            Some(path) => FixtureStore::from_path(path).map_err(|e| format!("error: {}", e))?,
            None => FixtureStore::mock(),
        };
        tracing::debug!(
            nodes = store.nodes.len(),
            model = %settings.intelligence.model,
            "fixtures loaded"
        );

        let intel = Intelligence::gemini(settings.intelligence.clone());
        Ok(App {
            store,
            settings,
            intel,
            output,
            quiet,
        })
    }

    pub fn is_json(&self) -> bool {
        self.output == OutputFormat::Json
    }

    /// Report `msg` and exit with status 1.
    pub fn fail(&self, msg: &str) -> ! {
        report_error(msg, self.output, self.quiet);
        process::exit(1);
    }

    pub fn gravity_threshold(&self) -> f64 {
        f64::from(self.settings.inference.gravity_alert_threshold)
    }

    /// Display name for a node id, or the id itself when it is unknown.
    pub fn node_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.store
            .node(id)
            .map(|n| n.display_name.as_str())
            .unwrap_or(id)
    }
}
