//! Device capabilities (clipboard, haptics, battery) behind one
//! interface, with the backend picked once per process.
//!
//! ```no_run
//! use platform_services::{VibrationType, registry};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() {
//! let services = registry::get_or_create();
//! services.set_clipboard_text("hello");
//! services.vibrate(VibrationType::Light);
//! let battery = services.battery_info(&CancellationToken::new()).await;
//! println!("{battery}");
//! # }
//! ```

pub mod platform;
pub mod registry;

pub use platform::{
    BatteryInfo, HapticPattern, ParseVibrationError, PlatformError, PlatformServices, VibrationType,
};
pub use registry::{Platform, get_or_create};
