//! iOS backend — `UIPasteboard`, `UIImpactFeedbackGenerator` and
//! `UIDevice` battery monitoring behind [`IosBridge`].

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::battery::{self, BatteryProbe, ChargeStatus, LevelSnapshot, NoBattery};
use super::{BatteryInfo, PlatformError, PlatformServices, VibrationType};

/// `UIImpactFeedbackGenerator.FeedbackStyle` subset used here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

// UIDevice.BatteryState raw values.
pub const BATTERY_STATE_UNKNOWN: i32 = 0;
pub const BATTERY_STATE_UNPLUGGED: i32 = 1;
pub const BATTERY_STATE_CHARGING: i32 = 2;
pub const BATTERY_STATE_FULL: i32 = 3;

/// Native calls used by [`IosServices`]. Every call may fail.
pub trait IosBridge: Send + Sync {
    fn set_pasteboard_string(&self, text: &str) -> Result<(), PlatformError>;

    /// `UIPasteboard.general.string`, `None` when it holds no text.
    fn pasteboard_string(&self) -> Result<Option<String>, PlatformError>;

    /// `impactOccurred(intensity:)` on a generator of `style`.
    fn impact(&self, style: ImpactStyle, intensity: f32) -> Result<(), PlatformError>;

    /// `AudioServicesPlaySystemSound(kSystemSoundID_Vibrate)`, the generic
    /// fallback.
    fn play_vibrate_sound(&self) -> Result<(), PlatformError>;

    /// `UIDevice.batteryLevel`: 0.0–1.0, or -1.0 when monitoring is off.
    fn battery_level(&self) -> Result<f32, PlatformError>;

    /// `UIDevice.batteryState` raw value.
    fn battery_state(&self) -> Result<i32, PlatformError>;
}

fn attach_bridge() -> Result<Arc<dyn IosBridge>, PlatformError> {
    Err(PlatformError::Unavailable("no iOS bridge registered".into()))
}

pub struct IosServices {
    bridge: Option<Arc<dyn IosBridge>>,
}

impl IosServices {
    pub fn new(bridge: Arc<dyn IosBridge>) -> Self {
        Self {
            bridge: Some(bridge),
        }
    }

    pub fn detached() -> Self {
        Self { bridge: None }
    }

    /// Attach to the native bridge, or fall back to a detached backend.
    pub fn connect() -> Self {
        match attach_bridge() {
            Ok(bridge) => Self::new(bridge),
            Err(e) => {
                tracing::warn!(error = %e, "iOS services unavailable; running degraded");
                Self::detached()
            }
        }
    }

    pub fn is_detached(&self) -> bool {
        self.bridge.is_none()
    }
}

fn impact_style(kind: VibrationType) -> Option<ImpactStyle> {
    match kind {
        VibrationType::None => None,
        VibrationType::Light => Some(ImpactStyle::Light),
        VibrationType::Medium => Some(ImpactStyle::Medium),
        VibrationType::Heavy => Some(ImpactStyle::Heavy),
    }
}

impl PlatformServices for IosServices {
    fn set_clipboard_text(&self, text: &str) {
        let Some(bridge) = &self.bridge else { return };
        if let Err(e) = bridge.set_pasteboard_string(text) {
            tracing::warn!(error = %e, "set_clipboard_text failed");
        }
    }

    fn clipboard_text(&self) -> String {
        let Some(bridge) = &self.bridge else {
            return String::new();
        };
        match bridge.pasteboard_string() {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard_text failed");
                String::new()
            }
        }
    }

    fn vibrate(&self, kind: VibrationType) {
        let Some(bridge) = &self.bridge else { return };
        let (Some(style), Some(pattern)) = (impact_style(kind), kind.pattern()) else {
            return;
        };

        let intensity = f32::from(pattern.amplitude) / 255.0;
        if let Err(e) = bridge.impact(style, intensity) {
            let fallback = bridge.play_vibrate_sound();
            tracing::warn!(
                %kind,
                error = %e,
                fallback_ok = fallback.is_ok(),
                "impact feedback failed; used system vibrate"
            );
        }
    }

    fn battery_info<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, BatteryInfo> {
        async move {
            match &self.bridge {
                Some(bridge) => battery::resolve(&DeviceBattery(bridge.as_ref()), cancel),
                None => battery::resolve(&NoBattery, cancel),
            }
        }
        .boxed()
    }
}

/// `UIDevice` battery reads. There is no level/scale source on iOS.
struct DeviceBattery<'a>(&'a dyn IosBridge);

impl BatteryProbe for DeviceBattery<'_> {
    fn capacity(&self) -> Result<i32, PlatformError> {
        let level = self.0.battery_level()?;
        if level < 0.0 {
            return Ok(-1);
        }
        Ok((level * 100.0).round() as i32)
    }

    fn snapshot(&self) -> Result<LevelSnapshot, PlatformError> {
        Err(PlatformError::Unavailable("no battery snapshot on iOS".into()))
    }

    fn status(&self) -> Result<ChargeStatus, PlatformError> {
        Ok(match self.0.battery_state()? {
            BATTERY_STATE_CHARGING => ChargeStatus::Charging,
            BATTERY_STATE_FULL => ChargeStatus::Full,
            BATTERY_STATE_UNPLUGGED => ChargeStatus::Discharging,
            _ => ChargeStatus::Unknown,
        })
    }
}
