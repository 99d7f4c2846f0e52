//! CLI consumer of the platform services.
//!
//! Every command obtains the process-wide backend from the registry,
//! performs one operation, prints the result and returns. Capability
//! failures never surface here; only output errors do.

mod format;

use std::time::Duration;

use platform_services::{BatteryInfo, Platform, PlatformServices, registry};
use tokio_util::sync::CancellationToken;

use crate::cli::Command;

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run one CLI command against the active backend.
pub async fn run(command: Command) -> Result<(), ClientError> {
    let services = registry::get_or_create();

    match command {
        Command::Copy { text } => {
            services.set_clipboard_text(&text);
            format::print_copied(&text);
        }
        Command::Paste => {
            format::print_clipboard(&services.clipboard_text())?;
        }
        Command::Vibrate { kind } => {
            services.vibrate(kind);
            format::print_vibrated(kind);
        }
        Command::Battery {
            json,
            timeout_ms,
            watch,
            interval_ms,
        } => {
            let timeout = Duration::from_millis(timeout_ms);
            if watch {
                let interval = Duration::from_millis(interval_ms.max(1));
                watch_battery(services.as_ref(), timeout, interval, json).await?;
            } else {
                let info =
                    query_battery(services.as_ref(), timeout, &CancellationToken::new()).await;
                format::print_battery(info, json)?;
            }
        }
        Command::Info => format::print_info(Platform::current()),
    }

    Ok(())
}

/// Query the battery, cancelling the request once `timeout` elapses or
/// `shutdown` fires.
async fn query_battery(
    services: &dyn PlatformServices,
    timeout: Duration,
    shutdown: &CancellationToken,
) -> BatteryInfo {
    let cancel = shutdown.child_token();
    let timer = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::debug!(
                timeout_ms = timeout.as_millis() as u64,
                "battery query timed out"
            );
            cancel.cancel();
        })
    };

    let info = services.battery_info(&cancel).await;
    timer.abort();
    info
}

/// Print a reading every `interval` until Ctrl-C.
async fn watch_battery(
    services: &dyn PlatformServices,
    timeout: Duration,
    interval: Duration,
    json: bool,
) -> Result<(), ClientError> {
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                return;
            }
            tracing::info!("interrupted; stopping battery watch");
            shutdown.cancel();
        });
    }

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                let info = query_battery(services, timeout, &shutdown).await;
                if shutdown.is_cancelled() {
                    break;
                }
                format::print_battery(info, json)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use platform_services::platform::desktop::DesktopServices;

    use super::*;

    fn desktop_at(root: &std::path::Path) -> DesktopServices {
        DesktopServices::new()
            .with_clipboard_providers(Vec::new())
            .with_power_supply_root(root)
    }

    #[tokio::test]
    async fn query_without_battery_is_unknown() {
        let root = tempfile::tempdir().unwrap();
        let services = desktop_at(root.path());
        let info =
            query_battery(&services, Duration::from_secs(5), &CancellationToken::new()).await;
        assert_eq!(info, BatteryInfo::default());
    }

    #[tokio::test]
    async fn query_after_shutdown_is_unknown() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("BAT0");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("type"), "Battery\n").unwrap();
        std::fs::write(dir.join("capacity"), "90\n").unwrap();

        let services = desktop_at(root.path());
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let info = query_battery(&services, Duration::from_secs(5), &shutdown).await;
        assert_eq!(info, BatteryInfo::default());
    }
}
