//! Desktop backend — the default on every target that is not a phone.
//!
//! Clipboard goes through a chain of [`ClipboardProvider`]s, battery
//! through the Linux power-supply class. Desktops have no vibration
//! motor, so haptics are a no-op.

pub mod clipboard;
pub mod power_supply;

use std::path::PathBuf;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::battery::{self, NoBattery};
use super::{BatteryInfo, PlatformServices, VibrationType};
pub use clipboard::ClipboardProvider;
use power_supply::PowerSupplyBattery;

pub struct DesktopServices {
    providers: Vec<Box<dyn ClipboardProvider>>,
    power_supply_root: PathBuf,
}

impl DesktopServices {
    pub fn new() -> Self {
        Self {
            providers: clipboard::default_providers(),
            power_supply_root: PathBuf::from(power_supply::DEFAULT_ROOT),
        }
    }

    /// Replace the clipboard provider chain. Providers are tried in
    /// order.
    pub fn with_clipboard_providers(mut self, providers: Vec<Box<dyn ClipboardProvider>>) -> Self {
        self.providers = providers;
        self
    }

    /// Read batteries from `root` instead of `/sys/class/power_supply`.
    pub fn with_power_supply_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.power_supply_root = root.into();
        self
    }
}

impl Default for DesktopServices {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformServices for DesktopServices {
    fn set_clipboard_text(&self, text: &str) {
        for provider in &self.providers {
            match provider.write(text.as_bytes()) {
                Ok(()) => {
                    tracing::debug!(
                        provider = provider.name(),
                        bytes = text.len(),
                        "clipboard set"
                    );
                    return;
                }
                Err(e) => {
                    tracing::debug!(
                        provider = provider.name(),
                        error = %e,
                        "clipboard provider failed"
                    );
                }
            }
        }
        tracing::warn!(
            providers = self.providers.len(),
            "set_clipboard_text failed: no clipboard provider succeeded"
        );
    }

    fn clipboard_text(&self) -> String {
        for provider in &self.providers {
            match provider.read() {
                Ok(bytes) => return String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    tracing::debug!(
                        provider = provider.name(),
                        error = %e,
                        "clipboard provider failed"
                    );
                }
            }
        }
        tracing::warn!(
            providers = self.providers.len(),
            "clipboard_text failed: no clipboard provider succeeded"
        );
        String::new()
    }

    fn vibrate(&self, kind: VibrationType) {
        if let Some(pattern) = kind.pattern() {
            tracing::debug!(
                %kind,
                duration_ms = pattern.duration.as_millis() as u64,
                "no haptic device on desktop; ignoring vibration"
            );
        }
    }

    fn battery_info<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, BatteryInfo> {
        async move {
            match PowerSupplyBattery::locate(&self.power_supply_root) {
                Ok(battery) => battery::resolve(&battery, cancel),
                Err(e) => {
                    tracing::debug!(
                        root = %self.power_supply_root.display(),
                        error = %e,
                        "no power-supply battery"
                    );
                    battery::resolve(&NoBattery, cancel)
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::clipboard::{CommandClipboard, Invocation};
    use super::*;

    fn failing() -> Box<dyn ClipboardProvider> {
        Box::new(CommandClipboard::new(
            "missing",
            Invocation::new("psa-no-such-clipboard-tool", &[]),
            Invocation::new("psa-no-such-clipboard-tool", &[]),
        ))
    }

    #[cfg(unix)]
    fn file_backed(path: &Path) -> Box<dyn ClipboardProvider> {
        let path = path.to_str().unwrap();
        Box::new(CommandClipboard::new(
            "file",
            Invocation::new("sh", &["-c", &format!("cat > '{path}'")]),
            Invocation::new("cat", &[path]),
        ))
    }

    fn battery_root(attrs: &[(&str, &str)]) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("BAT0");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("type"), "Battery\n").unwrap();
        for (attr, value) in attrs {
            fs::write(dir.join(attr), format!("{value}\n")).unwrap();
        }
        root
    }

    // -- Clipboard --

    #[test]
    fn clipboard_read_without_providers_is_empty() {
        let services = DesktopServices::new().with_clipboard_providers(Vec::new());
        assert_eq!(services.clipboard_text(), "");
    }

    #[test]
    fn clipboard_failures_degrade_to_empty() {
        let services = DesktopServices::new().with_clipboard_providers(vec![failing()]);
        services.set_clipboard_text("dropped");
        assert_eq!(services.clipboard_text(), "");
    }

    #[cfg(unix)]
    #[test]
    fn clipboard_falls_through_to_working_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip");
        let services =
            DesktopServices::new().with_clipboard_providers(vec![failing(), file_backed(&path)]);

        services.set_clipboard_text("hello psa");
        assert_eq!(services.clipboard_text(), "hello psa");
        // Reading twice without a write returns the same value.
        assert_eq!(services.clipboard_text(), "hello psa");

        // Haptics are a no-op and leave the clipboard alone.
        for kind in [
            VibrationType::None,
            VibrationType::Light,
            VibrationType::Medium,
            VibrationType::Heavy,
        ] {
            services.vibrate(kind);
        }
        assert_eq!(services.clipboard_text(), "hello psa");
    }

    // -- Battery --

    #[tokio::test]
    async fn battery_from_power_supply() {
        let root = battery_root(&[("capacity", "81"), ("status", "Full")]);
        let services = DesktopServices::new().with_power_supply_root(root.path());

        let info = services.battery_info(&CancellationToken::new()).await;
        assert_eq!(info, BatteryInfo::new(81, true));
    }

    #[tokio::test]
    async fn battery_zero_capacity_uses_energy_pair() {
        let root = battery_root(&[
            ("capacity", "0"),
            ("energy_now", "30"),
            ("energy_full", "40"),
            ("status", "Discharging"),
        ]);
        let services = DesktopServices::new().with_power_supply_root(root.path());

        let info = services.battery_info(&CancellationToken::new()).await;
        assert_eq!(info, BatteryInfo::new(75, false));
    }

    #[tokio::test]
    async fn battery_without_supply_is_unknown() {
        let root = tempfile::tempdir().unwrap();
        let services = DesktopServices::new().with_power_supply_root(root.path());

        let info = services.battery_info(&CancellationToken::new()).await;
        assert_eq!(info, BatteryInfo::default());
    }

    #[tokio::test]
    async fn battery_cancelled_returns_default() {
        let root = battery_root(&[("capacity", "81"), ("status", "Charging")]);
        let services = DesktopServices::new().with_power_supply_root(root.path());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let info = services.battery_info(&cancel).await;
        assert_eq!(info, BatteryInfo::default());
    }
}
