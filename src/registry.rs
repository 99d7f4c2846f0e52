//! Backend selection — the process-wide [`PlatformServices`] instance.
//!
//! Lifecycle: the slot starts empty; the first [`get_or_create`] builds
//! the backend for [`Platform::current`] and every later call returns
//! that same instance. Production code never replaces it. Test setup and
//! teardown swap it through [`reset_for_tests`], which only exists under
//! `cfg(test)` or the `test-util` feature.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::platform::PlatformServices;
use crate::platform::android::AndroidServices;
use crate::platform::desktop::DesktopServices;
use crate::platform::ios::IosServices;

/// Target environment a backend is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Desktop,
    Android,
    Ios,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a fresh backend for `platform`.
///
/// Never fails: a mobile backend whose native services cannot be reached
/// comes back detached and answers with defaults.
pub fn backend_for(platform: Platform) -> Arc<dyn PlatformServices> {
    match platform {
        Platform::Desktop => Arc::new(DesktopServices::new()),
        Platform::Android => Arc::new(AndroidServices::connect()),
        Platform::Ios => Arc::new(IosServices::connect()),
    }
}

static ACTIVE: RwLock<Option<Arc<dyn PlatformServices>>> = RwLock::new(None);

/// The active backend, built on first use.
///
/// Concurrent first calls construct at most one backend: the
/// check-and-set runs under the write lock.
pub fn get_or_create() -> Arc<dyn PlatformServices> {
    if let Some(active) = ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
    {
        return Arc::clone(active);
    }

    let mut slot = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(active) = slot.as_ref() {
        return Arc::clone(active);
    }

    let platform = Platform::current();
    tracing::info!(%platform, "creating platform services");
    let active = backend_for(platform);
    *slot = Some(Arc::clone(&active));
    active
}

/// Replace the cached backend, or clear it with `None` so the next
/// [`get_or_create`] rebuilds the default.
#[cfg(any(test, feature = "test-util"))]
pub fn reset_for_tests(replacement: Option<Arc<dyn PlatformServices>>) {
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = replacement;
}
