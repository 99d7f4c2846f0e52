//! Platform abstraction — one capability interface, several backends.
//!
//! Extracts all platform-specific behavior (clipboard, haptics, battery)
//! behind [`PlatformServices`]. Each backend implements the whole trait
//! against one environment; the registry picks exactly one at startup.
//!
//! Every operation degrades instead of failing. Backends report internal
//! failures as [`PlatformError`] and swallow them at the trait boundary,
//! replacing them with the operation's documented default.

pub mod android;
pub mod battery;
pub mod desktop;
#[cfg(any(test, feature = "test-util"))]
pub mod fake;
pub mod ios;
mod types;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

pub use types::{BatteryInfo, HapticPattern, ParseVibrationError, VibrationType};

/// Errors raised by platform adapters.
///
/// Never returned from [`PlatformServices`] methods; they exist so the
/// adapters can use `?` and the backends can log a reason before falling
/// back to a default.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The native service could not be obtained (no bridge attached,
    /// tool not installed, no battery present).
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Clipboard read or write failed.
    #[error("clipboard: {0}")]
    Clipboard(String),

    /// Vibration request rejected by the platform.
    #[error("haptics: {0}")]
    Haptics(String),

    /// Battery probe returned nothing usable.
    #[error("battery: {0}")]
    Battery(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device capabilities available to the application.
///
/// `Send + Sync` is required because the cached backend is shared
/// process-wide through an `Arc`.
pub trait PlatformServices: Send + Sync {
    /// Replace the clipboard content. Best effort: failures are logged
    /// and dropped.
    fn set_clipboard_text(&self, text: &str);

    /// Current clipboard text, or an empty string when the clipboard is
    /// empty or unreadable.
    fn clipboard_text(&self) -> String;

    /// Request haptic feedback. [`VibrationType::None`] returns without
    /// touching the platform.
    fn vibrate(&self, kind: VibrationType);

    /// Query battery state.
    ///
    /// Always completes. Yields `BatteryInfo::default()` when the
    /// platform cannot report, or when `cancel` fires before the probes
    /// finish.
    fn battery_info<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, BatteryInfo>;
}
