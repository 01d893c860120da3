use std::{fs, path::Path};

use anyhow::Context;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROM_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder so counters emitted during a session are
/// kept. Calling this more than once is harmless.
pub fn init() {
    if PROM_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = PROM_HANDLE.set(handle);
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to install Prometheus metrics recorder");
        }
    }
}

/// Exposition text of everything recorded so far.
pub fn render() -> Option<String> {
    PROM_HANDLE.get().map(|h| h.render())
}

pub fn write_snapshot<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let Some(text) = render() else {
        tracing::warn!("metrics recorder not initialized, skipping snapshot");
        return Ok(());
    };
    fs::write(path, text)
        .with_context(|| format!("failed to write metrics snapshot to {}", path.display()))?;
    tracing::info!(path = %path.display(), "metrics snapshot written");
    Ok(())
}
