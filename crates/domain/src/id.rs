//! Opaque vendor identifiers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier the Neviweb gateway assigns to a device.
///
/// The vendor reports ids either as JSON numbers or strings; both forms are
/// accepted and kept as text. The id is the sensor's unique identity and
/// the key for every client call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a textual vendor id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for DeviceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DeviceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DeviceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from(n),
            Raw::Text(s) => Self(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_numeric_id_as_text() {
        let id: DeviceId = serde_json::from_str("102345").unwrap();
        assert_eq!(id.as_str(), "102345");
    }

    #[test]
    fn should_deserialize_string_id() {
        let id: DeviceId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(id, DeviceId::new("abc-1"));
    }

    #[test]
    fn should_serialize_as_string() {
        let json = serde_json::to_string(&DeviceId::from(42)).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn should_display_inner_text() {
        assert_eq!(DeviceId::from("7788").to_string(), "7788");
    }

    #[test]
    fn should_reject_non_scalar_id() {
        let result = serde_json::from_str::<DeviceId>("{\"id\": 1}");
        assert!(result.is_err());
    }
}
