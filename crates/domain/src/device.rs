//! Device — an entry of the gateway's cached device catalog.
//!
//! The catalog is fetched by the vendor client elsewhere; this module only
//! describes its shape and which hardware models the sensor integration
//! recognizes.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// Water-leak detector models (WL4200).
pub const SENSOR_MODELS: &[u32] = &[5051];

/// Tank / liquid-level monitor models (LM4110-ZB).
pub const TANK_MONITOR_MODELS: &[u32] = &[4110];

/// Hardware signature reported by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Vendor hardware model number, when reported.
    #[serde(default)]
    pub model: Option<u32>,
}

/// One device of the gateway catalog.
///
/// Only the fields the integration reads are modelled; anything else the
/// vendor sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Vendor device identifier.
    pub id: DeviceId,
    /// Name the user gave the device in the vendor app.
    pub name: String,
    /// Hardware signature; missing for some device kinds.
    #[serde(default)]
    pub signature: Option<Signature>,
}

impl DeviceDescriptor {
    /// Reported hardware model, if the descriptor carries one.
    #[must_use]
    pub fn model(&self) -> Option<u32> {
        self.signature.as_ref().and_then(|sig| sig.model)
    }

    /// Recognized model family, `None` for anything the integration skips.
    #[must_use]
    pub fn family(&self) -> Option<ModelFamily> {
        self.model().and_then(ModelFamily::from_model)
    }
}

/// Recognized hardware families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Water-leak detector: temperature, leak status and battery.
    Sensor,
    /// Tank monitor: additionally reports a liquid level percentage.
    TankMonitor,
}

impl ModelFamily {
    /// Classify a vendor model number.
    #[must_use]
    pub fn from_model(model: u32) -> Option<Self> {
        if TANK_MONITOR_MODELS.contains(&model) {
            Some(Self::TankMonitor)
        } else if SENSOR_MODELS.contains(&model) {
            Some(Self::Sensor)
        } else {
            None
        }
    }

    /// Whether devices of this family report a level status.
    #[must_use]
    pub fn is_monitor(self) -> bool {
        matches!(self, Self::TankMonitor)
    }
}
