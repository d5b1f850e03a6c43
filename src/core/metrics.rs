use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(PrometheusHandle::render)
}

pub(crate) fn record_role_assignment(created: bool) {
    let outcome = if created { "created" } else { "updated" };
    metrics::counter!("role_assignments_total", "outcome" => outcome).increment(1);
}

pub(crate) fn record_grade_saved(mode: &'static str) {
    metrics::counter!("grades_saved_total", "mode" => mode).increment(1);
}
