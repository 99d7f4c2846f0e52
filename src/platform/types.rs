//! Value types shared by every backend.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

/// Battery level and charging flag.
///
/// `percentage` is clamped to `0..=100` by [`BatteryInfo::new`]; there is
/// no other way to build one, so the range holds for every value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BatteryInfo {
    percentage: u8,
    is_charging: bool,
}

impl BatteryInfo {
    pub fn new(percentage: i32, is_charging: bool) -> Self {
        Self {
            percentage: percentage.clamp(0, 100) as u8,
            is_charging,
        }
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }
}

impl fmt::Display for BatteryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_charging {
            "charging"
        } else {
            "not charging"
        };
        write!(f, "{}% {state}", self.percentage)
    }
}

/// Requested haptic intensity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VibrationType {
    #[default]
    None,
    Light,
    Medium,
    Heavy,
}

/// Duration/amplitude pair a vibration request is issued with.
///
/// Amplitude is on the 0–255 scale; platforms without amplitude control
/// use the duration only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticPattern {
    pub duration: Duration,
    pub amplitude: u8,
}

impl VibrationType {
    /// The pattern to play, or `None` for [`VibrationType::None`].
    pub fn pattern(self) -> Option<HapticPattern> {
        let (millis, amplitude) = match self {
            Self::None => return None,
            Self::Light => (20, 64),
            Self::Medium => (40, 160),
            Self::Heavy => (80, 255),
        };
        Some(HapticPattern {
            duration: Duration::from_millis(millis),
            amplitude,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }
}

impl fmt::Display for VibrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vibration type: {0} (expected: none, light, medium, heavy)")]
pub struct ParseVibrationError(String);

impl FromStr for VibrationType {
    type Err = ParseVibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "heavy" => Ok(Self::Heavy),
            _ => Err(ParseVibrationError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- BatteryInfo --

    #[test]
    fn percentage_clamped_into_range() {
        for p in [i32::MIN, -100, -1, 0, 1, 50, 99, 100, 101, 255, i32::MAX] {
            let pct = BatteryInfo::new(p, false).percentage();
            assert!(pct <= 100, "{p} produced {pct}");
        }
        assert_eq!(BatteryInfo::new(-5, false).percentage(), 0);
        assert_eq!(BatteryInfo::new(150, true).percentage(), 100);
        assert_eq!(BatteryInfo::new(73, true).percentage(), 73);
    }

    #[test]
    fn default_is_unknown() {
        let info = BatteryInfo::default();
        assert_eq!(info, BatteryInfo::new(0, false));
    }

    #[test]
    fn display_format() {
        assert_eq!(BatteryInfo::new(88, false).to_string(), "88% not charging");
        assert_eq!(BatteryInfo::new(12, true).to_string(), "12% charging");
    }

    #[test]
    fn serializes_fields() {
        let json = serde_json::to_string(&BatteryInfo::new(88, true)).unwrap();
        assert_eq!(json, r#"{"percentage":88,"is_charging":true}"#);
    }

    // -- VibrationType --

    #[test]
    fn none_has_no_pattern() {
        assert_eq!(VibrationType::None.pattern(), None);
    }

    #[test]
    fn intensity_table() {
        let light = VibrationType::Light.pattern().unwrap();
        assert_eq!(light.duration, Duration::from_millis(20));
        assert_eq!(light.amplitude, 64);

        let medium = VibrationType::Medium.pattern().unwrap();
        assert_eq!(medium.duration, Duration::from_millis(40));
        assert_eq!(medium.amplitude, 160);

        let heavy = VibrationType::Heavy.pattern().unwrap();
        assert_eq!(heavy.duration, Duration::from_millis(80));
        assert_eq!(heavy.amplitude, 255);
    }

    #[test]
    fn parse_names() {
        assert_eq!("light".parse(), Ok(VibrationType::Light));
        assert_eq!("HEAVY".parse(), Ok(VibrationType::Heavy));
        assert_eq!("none".parse(), Ok(VibrationType::None));
    }

    #[test]
    fn serializes_lowercase_name() {
        let json = serde_json::to_string(&VibrationType::Light).unwrap();
        assert_eq!(json, r#""light""#);
    }

    #[test]
    fn parse_unknown() {
        let err = "buzz".parse::<VibrationType>().unwrap_err();
        assert!(err.to_string().contains("buzz"));
    }
}
