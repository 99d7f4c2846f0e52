//! In-memory backend for tests.
//!
//! Records the last clipboard write, counts vibration requests and
//! answers battery queries with a configurable value. Install it with
//! [`crate::registry::reset_for_tests`].

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use super::{BatteryInfo, PlatformServices, VibrationType};

#[derive(Debug)]
pub struct FakeServices {
    clipboard: Mutex<String>,
    vibrations: AtomicUsize,
    next_battery: Mutex<BatteryInfo>,
}

impl FakeServices {
    /// Empty clipboard, no vibrations, battery `42% charging`.
    pub fn new() -> Self {
        Self {
            clipboard: Mutex::new(String::new()),
            vibrations: AtomicUsize::new(0),
            next_battery: Mutex::new(BatteryInfo::new(42, true)),
        }
    }

    pub fn with_battery(self, info: BatteryInfo) -> Self {
        self.set_next_battery(info);
        self
    }

    pub fn last_clipboard(&self) -> String {
        lock(&self.clipboard).clone()
    }

    /// Number of non-`None` vibration requests.
    pub fn vibrate_count(&self) -> usize {
        self.vibrations.load(Ordering::SeqCst)
    }

    pub fn set_next_battery(&self, info: BatteryInfo) {
        *lock(&self.next_battery) = info;
    }
}

impl Default for FakeServices {
    fn default() -> Self {
        Self::new()
    }
}

// A panicking test thread must not wedge the others sharing this fake.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl PlatformServices for FakeServices {
    fn set_clipboard_text(&self, text: &str) {
        *lock(&self.clipboard) = text.to_string();
    }

    fn clipboard_text(&self) -> String {
        self.last_clipboard()
    }

    fn vibrate(&self, kind: VibrationType) {
        if kind != VibrationType::None {
            self.vibrations.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn battery_info<'a>(&'a self, _cancel: &'a CancellationToken) -> BoxFuture<'a, BatteryInfo> {
        let info = *lock(&self.next_battery);
        futures::future::ready(info).boxed()
    }
}
