//! Battery degradation policy — priority-ordered probes with defaults.
//!
//! Backends expose their battery sources as a [`BatteryProbe`];
//! [`resolve`] turns them into a [`BatteryInfo`]:
//!
//! 1. The direct capacity read is the fast path. A value above zero is
//!    accepted as is.
//! 2. Zero or below (unknown, failed) falls back to a level/scale
//!    snapshot, `round(level / scale * 100)`.
//! 3. Both failing leaves 0.
//!
//! Charging is read independently: only `Charging` and `Full` count.
//! `Unknown` maps to not charging; this is an approximation, not a
//! platform guarantee.

use tokio_util::sync::CancellationToken;

use super::{BatteryInfo, PlatformError};

/// Charging state as reported by a platform status signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Unknown,
    Charging,
    Discharging,
    NotCharging,
    Full,
}

impl ChargeStatus {
    pub fn is_charging(self) -> bool {
        matches!(self, Self::Charging | Self::Full)
    }
}

/// Raw level/scale pair, e.g. `level=45, scale=50` for 90%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub level: i64,
    pub scale: i64,
}

impl LevelSnapshot {
    /// Percentage rounded to the nearest integer (ties to even), or
    /// `None` when the pair does not describe a valid reading.
    pub fn percent(self) -> Option<i32> {
        if self.level < 0 || self.scale <= 0 {
            return None;
        }
        let pct = (self.level as f64 / self.scale as f64 * 100.0).round_ties_even();
        Some(pct.min(i32::MAX as f64) as i32)
    }
}

/// The battery sources one backend can read.
///
/// Each probe is attempted at most once per query. Errors are logged by
/// [`resolve`] and never reach the caller.
pub trait BatteryProbe {
    /// Direct percentage read. Zero or negative means unknown.
    fn capacity(&self) -> Result<i32, PlatformError>;

    /// Level/scale snapshot used when the direct read is unknown.
    fn snapshot(&self) -> Result<LevelSnapshot, PlatformError>;

    /// Charging status signal.
    fn status(&self) -> Result<ChargeStatus, PlatformError>;
}

/// Resolve battery state from `probe`.
///
/// `cancel` is checked before every probe. Once it fires the query stops
/// and yields `BatteryInfo::default()`.
pub fn resolve(probe: &dyn BatteryProbe, cancel: &CancellationToken) -> BatteryInfo {
    if cancel.is_cancelled() {
        tracing::debug!("battery query cancelled before start");
        return BatteryInfo::default();
    }

    let mut pct = probe.capacity().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "battery capacity probe failed");
        -1
    });

    if cancel.is_cancelled() {
        return BatteryInfo::default();
    }

    let charging = match probe.status() {
        Ok(status) => status.is_charging(),
        Err(e) => {
            tracing::debug!(error = %e, "battery status probe failed");
            false
        }
    };

    if pct <= 0 {
        if cancel.is_cancelled() {
            return BatteryInfo::default();
        }
        match probe.snapshot() {
            Ok(snapshot) => match snapshot.percent() {
                Some(fallback) => pct = fallback,
                None => tracing::debug!(?snapshot, "battery snapshot invalid"),
            },
            Err(e) => tracing::debug!(error = %e, "battery snapshot probe failed"),
        }
    }

    BatteryInfo::new(pct, charging)
}

/// Probe for platforms with no battery source at all.
pub struct NoBattery;

impl BatteryProbe for NoBattery {
    fn capacity(&self) -> Result<i32, PlatformError> {
        Err(PlatformError::Unavailable("no battery source".into()))
    }

    fn snapshot(&self) -> Result<LevelSnapshot, PlatformError> {
        Err(PlatformError::Unavailable("no battery source".into()))
    }

    fn status(&self) -> Result<ChargeStatus, PlatformError> {
        Err(PlatformError::Unavailable("no battery source".into()))
    }
}
