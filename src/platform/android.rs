//! Android backend — clipboard, vibrator and battery manager services.
//!
//! Native calls go through [`AndroidBridge`], a narrow adapter over the
//! activity's system services. The backend owns the policy: intensity
//! mapping, the SDK split for amplitude control, the handheld fallback
//! and the battery degradation order.
//!
//! A backend without a bridge still implements the whole interface and
//! answers with safe defaults.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::battery::{self, BatteryProbe, ChargeStatus, LevelSnapshot, NoBattery};
use super::{BatteryInfo, HapticPattern, PlatformError, PlatformServices, VibrationType};

/// First SDK level with `VibrationEffect.createOneShot(duration, amplitude)`.
pub const AMPLITUDE_CONTROL_MIN_SDK: i32 = 26;

/// Label attached to clips this backend places on the clipboard.
pub const CLIP_LABEL: &str = "PSA";

// android.os.BatteryManager.BATTERY_STATUS_*
pub const BATTERY_STATUS_UNKNOWN: i32 = 1;
pub const BATTERY_STATUS_CHARGING: i32 = 2;
pub const BATTERY_STATUS_DISCHARGING: i32 = 3;
pub const BATTERY_STATUS_NOT_CHARGING: i32 = 4;
pub const BATTERY_STATUS_FULL: i32 = 5;

/// Extras of the sticky `ACTION_BATTERY_CHANGED` intent. Missing extras
/// read as -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryIntent {
    pub level: i32,
    pub scale: i32,
    pub status: i32,
}

/// Native system-service calls used by [`AndroidServices`].
///
/// Every call may fail; the backend catches all of them.
pub trait AndroidBridge: Send + Sync {
    /// `Build.VERSION.SDK_INT`.
    fn sdk_int(&self) -> Result<i32, PlatformError>;

    /// `ClipboardManager.setPrimaryClip(ClipData.newPlainText(label, text))`.
    fn set_primary_clip(&self, label: &str, text: &str) -> Result<(), PlatformError>;

    /// Text of the primary clip's first item, `None` when there is no clip.
    fn primary_clip_text(&self) -> Result<Option<String>, PlatformError>;

    /// `Vibrator.vibrate(VibrationEffect.createOneShot(duration, amplitude))`.
    fn vibrate_one_shot(&self, duration_ms: u64, amplitude: u8) -> Result<(), PlatformError>;

    /// Pre-26 `Vibrator.vibrate(duration)`.
    fn vibrate_legacy(&self, duration_ms: u64) -> Result<(), PlatformError>;

    /// Engine-level generic vibration, used only as a fallback.
    fn handheld_vibrate(&self) -> Result<(), PlatformError>;

    /// `BatteryManager.getIntProperty(BATTERY_PROPERTY_CAPACITY)`.
    fn battery_capacity(&self) -> Result<i32, PlatformError>;

    /// Sticky `ACTION_BATTERY_CHANGED` intent, `None` if not delivered.
    fn battery_changed(&self) -> Result<Option<BatteryIntent>, PlatformError>;
}

/// Attach to the process's native bridge.
///
/// This crate ships no JNI layer of its own; hosts that embed one hand
/// it to [`AndroidServices::new`] directly. Without it the backend runs
/// detached.
fn attach_bridge() -> Result<Arc<dyn AndroidBridge>, PlatformError> {
    Err(PlatformError::Unavailable("no Android bridge registered".into()))
}

pub struct AndroidServices {
    bridge: Option<Arc<dyn AndroidBridge>>,
    sdk_int: i32,
}

impl AndroidServices {
    pub fn new(bridge: Arc<dyn AndroidBridge>) -> Self {
        let sdk_int = bridge.sdk_int().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "SDK_INT unavailable; assuming legacy vibrator API");
            0
        });
        Self {
            bridge: Some(bridge),
            sdk_int,
        }
    }

    /// Backend with no native services: every call yields its default.
    pub fn detached() -> Self {
        Self {
            bridge: None,
            sdk_int: 0,
        }
    }

    /// Attach to the native bridge, or fall back to a detached backend.
    pub fn connect() -> Self {
        match attach_bridge() {
            Ok(bridge) => Self::new(bridge),
            Err(e) => {
                tracing::warn!(error = %e, "Android services unavailable; running degraded");
                Self::detached()
            }
        }
    }

    pub fn is_detached(&self) -> bool {
        self.bridge.is_none()
    }

    pub fn sdk_int(&self) -> i32 {
        self.sdk_int
    }

    fn play(
        &self,
        bridge: &dyn AndroidBridge,
        pattern: HapticPattern,
    ) -> Result<(), PlatformError> {
        let duration_ms = pattern.duration.as_millis() as u64;
        if self.sdk_int >= AMPLITUDE_CONTROL_MIN_SDK {
            bridge.vibrate_one_shot(duration_ms, pattern.amplitude)
        } else {
            bridge.vibrate_legacy(duration_ms)
        }
    }
}

impl PlatformServices for AndroidServices {
    fn set_clipboard_text(&self, text: &str) {
        let Some(bridge) = &self.bridge else { return };
        if let Err(e) = bridge.set_primary_clip(CLIP_LABEL, text) {
            tracing::warn!(error = %e, "set_clipboard_text failed");
        }
    }

    fn clipboard_text(&self) -> String {
        let Some(bridge) = &self.bridge else {
            return String::new();
        };
        match bridge.primary_clip_text() {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard_text failed");
                String::new()
            }
        }
    }

    fn vibrate(&self, kind: VibrationType) {
        let Some(bridge) = &self.bridge else { return };
        let Some(pattern) = kind.pattern() else {
            return;
        };

        if let Err(e) = self.play(bridge.as_ref(), pattern) {
            let fallback = bridge.handheld_vibrate();
            tracing::warn!(
                %kind,
                error = %e,
                fallback_ok = fallback.is_ok(),
                "vibrate failed; used handheld fallback"
            );
        }
    }

    fn battery_info<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, BatteryInfo> {
        async move {
            match &self.bridge {
                Some(bridge) => battery::resolve(&BridgeBattery(bridge.as_ref()), cancel),
                None => battery::resolve(&NoBattery, cancel),
            }
        }
        .boxed()
    }
}

/// Battery probes over the bridge: capacity property first, then the
/// battery-changed intent.
struct BridgeBattery<'a>(&'a dyn AndroidBridge);

impl BridgeBattery<'_> {
    fn intent(&self) -> Result<BatteryIntent, PlatformError> {
        self.0
            .battery_changed()?
            .ok_or_else(|| PlatformError::Battery("ACTION_BATTERY_CHANGED not delivered".into()))
    }
}

impl BatteryProbe for BridgeBattery<'_> {
    fn capacity(&self) -> Result<i32, PlatformError> {
        self.0.battery_capacity()
    }

    fn snapshot(&self) -> Result<LevelSnapshot, PlatformError> {
        let intent = self.intent()?;
        Ok(LevelSnapshot {
            level: intent.level.into(),
            scale: intent.scale.into(),
        })
    }

    fn status(&self) -> Result<ChargeStatus, PlatformError> {
        Ok(charge_status(self.intent()?.status))
    }
}

fn charge_status(code: i32) -> ChargeStatus {
    match code {
        BATTERY_STATUS_CHARGING => ChargeStatus::Charging,
        BATTERY_STATUS_DISCHARGING => ChargeStatus::Discharging,
        BATTERY_STATUS_NOT_CHARGING => ChargeStatus::NotCharging,
        BATTERY_STATUS_FULL => ChargeStatus::Full,
        _ => ChargeStatus::Unknown,
    }
}
