//! Sensor readings and the decoded result of an attribute request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value the vendor reports in the leak field when water is detected.
pub const WATER_LEAK_MARKER: &str = "water";

/// Two-state leak status.
///
/// The vendor field is collapsed: the water marker maps to [`Water`](Self::Water),
/// anything else to [`Ok`](Self::Ok).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeakStatus {
    Water,
    Ok,
}

impl LeakStatus {
    /// Collapse a raw vendor leak value.
    #[must_use]
    pub fn from_raw(raw: &serde_json::Value) -> Self {
        if raw.as_str() == Some(WATER_LEAK_MARKER) {
            Self::Water
        } else {
            Self::Ok
        }
    }

    /// Textual form exposed to the host (`"water"` or `"ok"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => WATER_LEAK_MARKER,
            Self::Ok => "ok",
        }
    }
}

impl fmt::Display for LeakStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful reading of one device.
///
/// Numeric fields are `None` when the device answered with `null` or a
/// non-numeric value; the leak status is decoded on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    /// Room temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Collapsed leak status.
    pub leak: LeakStatus,
    /// Liquid level percentage; only tank monitors report it.
    pub level: Option<f64>,
    /// Battery voltage in volts.
    pub battery_voltage: Option<f64>,
}

/// Decoded answer to an attribute request.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributesResponse {
    /// All requested attributes were present.
    Reading(SensorReading),
    /// The vendor API or session failed (`"error"` key).
    TransportError(serde_json::Value),
    /// The device itself reported a failure (`"errorCode"` key).
    DeviceError(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_collapse_water_marker_to_water() {
        assert_eq!(LeakStatus::from_raw(&json!("water")), LeakStatus::Water);
    }

    #[test]
    fn should_collapse_ok_to_ok() {
        assert_eq!(LeakStatus::from_raw(&json!("ok")), LeakStatus::Ok);
    }

    #[test]
    fn should_collapse_any_other_value_to_ok() {
        assert_eq!(LeakStatus::from_raw(&json!("dry")), LeakStatus::Ok);
        assert_eq!(LeakStatus::from_raw(&json!(1)), LeakStatus::Ok);
        assert_eq!(LeakStatus::from_raw(&serde_json::Value::Null), LeakStatus::Ok);
    }

    #[test]
    fn should_display_host_strings() {
        assert_eq!(LeakStatus::Water.to_string(), "water");
        assert_eq!(LeakStatus::Ok.to_string(), "ok");
    }

    #[test]
    fn should_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&LeakStatus::Water).unwrap(),
            "\"water\""
        );
    }
}
