//! Battery probe over the Linux power-supply class
//! (`/sys/class/power_supply/<name>/`).
//!
//! `capacity` is the direct read, `energy_now`/`energy_full` (or the
//! `charge_*` pair on batteries that report in µAh) the snapshot, and
//! `status` the charging signal.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform::PlatformError;
use crate::platform::battery::{BatteryProbe, ChargeStatus, LevelSnapshot};

pub const DEFAULT_ROOT: &str = "/sys/class/power_supply";

/// One battery directory under the power-supply root.
#[derive(Debug, Clone)]
pub struct PowerSupplyBattery {
    dir: PathBuf,
}

impl PowerSupplyBattery {
    /// Find the first supply whose `type` is `Battery`.
    ///
    /// Entries are visited in name order so `BAT0` wins over `BAT1`.
    pub fn locate(root: &Path) -> Result<Self, PlatformError> {
        let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        dirs.sort();

        dirs.into_iter()
            .find(|dir| {
                read_attr(dir, "type")
                    .map(|t| t == "Battery")
                    .unwrap_or(false)
            })
            .map(|dir| Self { dir })
            .ok_or_else(|| {
                PlatformError::Unavailable(format!("no battery under {}", root.display()))
            })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_int(&self, name: &str) -> Result<i64, PlatformError> {
        let raw = read_attr(&self.dir, name)?;
        raw.parse()
            .map_err(|_| PlatformError::Battery(format!("{name}: not an integer: {raw:?}")))
    }
}

fn read_attr(dir: &Path, name: &str) -> Result<String, PlatformError> {
    Ok(fs::read_to_string(dir.join(name))?.trim().to_string())
}

impl BatteryProbe for PowerSupplyBattery {
    fn capacity(&self) -> Result<i32, PlatformError> {
        let value = self.read_int("capacity")?;
        i32::try_from(value)
            .map_err(|_| PlatformError::Battery(format!("capacity out of range: {value}")))
    }

    fn snapshot(&self) -> Result<LevelSnapshot, PlatformError> {
        let pair = |now: &str, full: &str| -> Result<LevelSnapshot, PlatformError> {
            Ok(LevelSnapshot {
                level: self.read_int(now)?,
                scale: self.read_int(full)?,
            })
        };
        pair("energy_now", "energy_full").or_else(|_| pair("charge_now", "charge_full"))
    }

    fn status(&self) -> Result<ChargeStatus, PlatformError> {
        Ok(parse_status(&read_attr(&self.dir, "status")?))
    }
}

fn parse_status(raw: &str) -> ChargeStatus {
    match raw {
        "Charging" => ChargeStatus::Charging,
        "Discharging" => ChargeStatus::Discharging,
        "Not charging" => ChargeStatus::NotCharging,
        "Full" => ChargeStatus::Full,
        _ => ChargeStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supply(root: &Path, name: &str, attrs: &[(&str, &str)]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (attr, value) in attrs {
            fs::write(dir.join(attr), format!("{value}\n")).unwrap();
        }
    }

    #[test]
    fn locate_skips_mains_adapter() {
        let root = tempfile::tempdir().unwrap();
        supply(root.path(), "AC", &[("type", "Mains"), ("online", "1")]);
        supply(root.path(), "BAT0", &[("type", "Battery")]);

        let battery = PowerSupplyBattery::locate(root.path()).unwrap();
        assert!(battery.dir().ends_with("BAT0"));
    }

    #[test]
    fn locate_prefers_first_battery() {
        let root = tempfile::tempdir().unwrap();
        supply(root.path(), "BAT1", &[("type", "Battery")]);
        supply(root.path(), "BAT0", &[("type", "Battery")]);

        let battery = PowerSupplyBattery::locate(root.path()).unwrap();
        assert!(battery.dir().ends_with("BAT0"));
    }

    #[test]
    fn locate_without_battery() {
        let root = tempfile::tempdir().unwrap();
        supply(root.path(), "AC", &[("type", "Mains")]);
        assert!(PowerSupplyBattery::locate(root.path()).is_err());
    }

    #[test]
    fn locate_missing_root() {
        let root = tempfile::tempdir().unwrap();
        assert!(PowerSupplyBattery::locate(&root.path().join("absent")).is_err());
    }

    #[test]
    fn reads_capacity_and_status() {
        let root = tempfile::tempdir().unwrap();
        supply(
            root.path(),
            "BAT0",
            &[
                ("type", "Battery"),
                ("capacity", "64"),
                ("status", "Charging"),
            ],
        );
        let battery = PowerSupplyBattery::locate(root.path()).unwrap();
        assert_eq!(battery.capacity().unwrap(), 64);
        assert_eq!(battery.status().unwrap(), ChargeStatus::Charging);
    }

    #[test]
    fn snapshot_prefers_energy_pair() {
        let root = tempfile::tempdir().unwrap();
        supply(
            root.path(),
            "BAT0",
            &[
                ("type", "Battery"),
                ("energy_now", "25000000"),
                ("energy_full", "50000000"),
                ("charge_now", "1"),
                ("charge_full", "4"),
            ],
        );
        let battery = PowerSupplyBattery::locate(root.path()).unwrap();
        assert_eq!(
            battery.snapshot().unwrap(),
            LevelSnapshot {
                level: 25_000_000,
                scale: 50_000_000
            }
        );
    }

    #[test]
    fn snapshot_falls_back_to_charge_pair() {
        let root = tempfile::tempdir().unwrap();
        supply(
            root.path(),
            "BAT0",
            &[
                ("type", "Battery"),
                ("charge_now", "3000"),
                ("charge_full", "4000"),
            ],
        );
        let battery = PowerSupplyBattery::locate(root.path()).unwrap();
        assert_eq!(battery.snapshot().unwrap().percent(), Some(75));
    }

    #[test]
    fn garbage_capacity_is_error() {
        let root = tempfile::tempdir().unwrap();
        supply(
            root.path(),
            "BAT0",
            &[("type", "Battery"), ("capacity", "n/a")],
        );
        let battery = PowerSupplyBattery::locate(root.path()).unwrap();
        assert!(battery.capacity().is_err());
    }

    #[test]
    fn status_strings() {
        assert_eq!(parse_status("Full"), ChargeStatus::Full);
        assert_eq!(parse_status("Not charging"), ChargeStatus::NotCharging);
        assert_eq!(parse_status("Discharging"), ChargeStatus::Discharging);
        assert_eq!(parse_status("Unknown"), ChargeStatus::Unknown);
        assert_eq!(parse_status(""), ChargeStatus::Unknown);
    }
}
