use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Settings;

/// `RUST_LOG` wins when set; otherwise `SIAKAD_LOG_LEVEL` applies to this crate and sqlx
/// statement logging stays at warn.
fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.telemetry().log_level;
        EnvFilter::new(format!("{level},sqlx=warn"))
    })
}

pub(crate) fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let builder = fmt()
        .with_env_filter(env_filter(settings))
        .with_target(false)
        .with_span_events(fmt::format::FmtSpan::CLOSE);

    let installed = if settings.telemetry().json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
