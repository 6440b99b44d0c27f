//! Neviweb130 sensor — one adapter per leak detector or tank monitor.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Instant;

use neviweb_app::ports::NeviwebClient;
use neviweb_domain::entity::{AttributeValue, Entity};
use neviweb_domain::error::ValidationError;
use neviweb_domain::id::DeviceId;
use neviweb_domain::reading::{AttributesResponse, LeakStatus, SensorReading};

use crate::error::PollError;
use crate::payload::{self, ATTR_LEVEL_STATUS, UPDATE_ATTRIBUTES};

/// Host presentation of one kind of reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorType {
    pub kind: &'static str,
    pub unit: Option<&'static str>,
    pub icon: &'static str,
}

/// Presentation of every reading a sensor can carry.
pub const SENSOR_TYPES: [SensorType; 4] = [
    SensorType {
        kind: "temperature",
        unit: Some("\u{b0}C"),
        icon: "mdi:thermometer",
    },
    SensorType {
        kind: "leak status",
        unit: None,
        icon: "mdi:water-percent",
    },
    SensorType {
        kind: "level status",
        unit: Some("%"),
        icon: "mdi:water-percent",
    },
    SensorType {
        kind: "battery",
        unit: Some("v"),
        icon: "mdi:battery-50",
    },
];

/// The entity state is the temperature.
const STATE_TYPE: SensorType = SENSOR_TYPES[0];

/// Last-known values of a sensor.
///
/// Every field is `None` until the first successful poll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub current_temperature: Option<f64>,
    pub leak_status: Option<LeakStatus>,
    /// Only ever set on tank monitors.
    pub level_status: Option<f64>,
    pub battery_voltage: Option<f64>,
}

/// Adapter mapping one vendor device onto host-readable properties.
///
/// The sensor owns its cached values; the client is shared with every
/// other sensor of the integration.
pub struct Neviweb130Sensor<C> {
    client: C,
    id: DeviceId,
    name: String,
    is_monitor: bool,
    state: Snapshot,
}

impl<C: NeviwebClient> Neviweb130Sensor<C> {
    /// Create a sensor with no observed values yet.
    pub fn new(client: C, id: DeviceId, name: String, is_monitor: bool) -> Self {
        Self {
            client,
            id,
            name,
            is_monitor,
            state: Snapshot::default(),
        }
    }

    /// Attribute names requested on each poll.
    #[must_use]
    pub fn update_attributes(&self) -> Vec<&'static str> {
        let mut attributes = UPDATE_ATTRIBUTES.to_vec();
        if self.is_monitor {
            attributes.push(ATTR_LEVEL_STATUS);
        }
        attributes
    }

    /// Fetch the latest readings and refresh the cached values.
    ///
    /// Both the attributes and the daily statistics are fetched; the
    /// statistics are not interpreted. On any error the cached values are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// - [`PollError::Transport`] / [`PollError::Device`] when the payload
    ///   carries an error marker
    /// - [`PollError::Client`] when either client call fails
    /// - [`PollError::Payload`] when a success payload cannot be decoded
    pub async fn poll(&mut self) -> Result<Snapshot, PollError> {
        let attributes = self.update_attributes();

        let start = Instant::now();
        let device_data = self
            .client
            .get_device_attributes(&self.id, &attributes)
            .await?;
        let _daily_stats = self.client.get_device_daily_stats(&self.id).await?;
        let elapsed = start.elapsed();

        tracing::debug!(sensor = %self.name, ?elapsed, %device_data, "updating sensor");

        match payload::decode_attributes(device_data, self.is_monitor)? {
            AttributesResponse::Reading(reading) => {
                self.apply(reading);
                Ok(self.snapshot())
            }
            AttributesResponse::TransportError(details) => {
                tracing::warn!(sensor = %self.name, %details, "cannot update sensor");
                Err(PollError::Transport(details))
            }
            AttributesResponse::DeviceError(details) => {
                tracing::warn!(sensor = %self.name, %details, "error in reading device");
                Err(PollError::Device(details))
            }
        }
    }

    fn apply(&mut self, reading: SensorReading) {
        self.state.current_temperature = reading.temperature;
        self.state.leak_status = Some(reading.leak);
        if self.is_monitor {
            self.state.level_status = reading.level;
        }
        self.state.battery_voltage = reading.battery_voltage;
    }
}

impl<C> Neviweb130Sensor<C> {
    /// Unique id, the vendor device id.
    #[must_use]
    pub fn unique_id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this sensor is a tank monitor reporting a level status.
    #[must_use]
    pub fn is_monitor(&self) -> bool {
        self.is_monitor
    }

    /// Current temperature in degrees Celsius.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.state.current_temperature
    }

    /// Whether a leak status has been observed.
    ///
    /// This reports *presence*, not the water/ok value: it is `true` after
    /// the first successful poll whatever the leak state. The value itself
    /// is exposed through [`state_attributes`](Self::state_attributes) and
    /// [`snapshot`](Self::snapshot).
    #[must_use]
    pub fn leak_status(&self) -> bool {
        self.state.leak_status.is_some()
    }

    /// Whether a level status has been observed.
    ///
    /// Presence only, like [`leak_status`](Self::leak_status); never `true`
    /// for plain sensors.
    #[must_use]
    pub fn level_status(&self) -> bool {
        self.state.level_status.is_some()
    }

    /// Battery voltage in volts.
    #[must_use]
    pub fn battery_voltage(&self) -> Option<f64> {
        self.state.battery_voltage
    }

    /// Copy of the cached values.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.clone()
    }

    /// Diagnostics mapping: battery voltage, raw leak status and id.
    ///
    /// Values not observed yet are `null`.
    #[must_use]
    pub fn state_attributes(&self) -> BTreeMap<String, AttributeValue> {
        BTreeMap::from([
            (
                "Battery".to_string(),
                AttributeValue::from(self.state.battery_voltage),
            ),
            (
                "leak".to_string(),
                AttributeValue::from(self.state.leak_status.map(LeakStatus::as_str)),
            ),
            ("id".to_string(), AttributeValue::from(self.id.as_str())),
        ])
    }

    /// Host entity id, e.g. `sensor.neviweb130_5521`.
    ///
    /// Lowercase ASCII letters and digits are kept; any other character is
    /// written as `_<hex code point>_`, so distinct device ids never share
    /// an entity id (`AB-12` gives `_41__42__2d_12`).
    #[must_use]
    pub fn entity_id(&self) -> String {
        let mut entity_id = String::from("sensor.neviweb130_");
        for c in self.id.as_str().chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                entity_id.push(c);
            } else {
                let _ = write!(entity_id, "_{:x}_", u32::from(c));
            }
        }
        entity_id
    }

    /// Build the host-facing [`Entity`]; the temperature is the state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name or id is blank.
    pub fn to_entity(&self) -> Result<Entity, ValidationError> {
        Entity::builder()
            .entity_id(self.entity_id())
            .unique_id(self.id.clone())
            .friendly_name(self.name.as_str())
            .state(self.state.current_temperature.map(AttributeValue::Float))
            .attributes(self.state_attributes())
            .attributes(STATE_TYPE.unit.map(|unit| {
                ("unit_of_measurement".to_string(), AttributeValue::from(unit))
            }))
            .attribute("icon", AttributeValue::from(STATE_TYPE.icon))
            .build()
    }
}
