// ABOUTME: Shared plumbing for the roikit binary
// ABOUTME: Logging setup, catalog loading, choice lists and the logging lead capture hook

use std::borrow::Cow;

use roikit_calculator::{ChoiceSource, LeadCaptureHook, LeadEvent};
use roikit_catalog::{Catalog, CatalogError};
use roikit_config::Config;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global subscriber. Logs go to stderr so `--json` output stays clean.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// The configured catalog file, or the built-in catalog when none is set
pub fn load_catalog(config: &Config) -> Result<Cow<'static, Catalog>, CatalogError> {
    match &config.catalog_path {
        Some(path) => {
            debug!("Using catalog from {:?}", path);
            Catalog::from_file(path).map(Cow::Owned)
        }
        None => Ok(Cow::Borrowed(Catalog::builtin())),
    }
}

/// (id, label) pairs offered for a choice field
pub fn choice_options(catalog: &Catalog, source: ChoiceSource) -> Vec<(String, String)> {
    match source {
        ChoiceSource::Tasks => catalog
            .list_tasks()
            .iter()
            .map(|t| (t.id.clone(), t.label.clone()))
            .collect(),
        ChoiceSource::Tools => catalog
            .list_tools()
            .iter()
            .map(|t| (t.id.clone(), t.label.clone()))
            .collect(),
        ChoiceSource::Platforms => catalog
            .list_platforms()
            .iter()
            .map(|p| (p.id.clone(), p.label.clone()))
            .collect(),
        ChoiceSource::RoiTasks => catalog
            .list_roi_tasks()
            .iter()
            .map(|t| (t.id.clone(), t.label.clone()))
            .collect(),
    }
}

/// Records leads as structured log events; nothing is sent anywhere
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLeadCapture;

impl LeadCaptureHook for LogLeadCapture {
    fn on_result(&self, event: &LeadEvent) {
        info!(
            email = %event.email,
            calculator = %event.calculator_id,
            task = %event.task_id,
            monthly_savings = event.monthly_savings,
            "Lead captured"
        );
    }
}
