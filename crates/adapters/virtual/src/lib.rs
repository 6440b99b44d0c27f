//! # neviweb-adapter-virtual
//!
//! In-memory [`NeviwebClient`] serving a simulated gateway, for
//! demonstration and end-to-end tests. No network access.
//!
//! ## Simulated catalog ([`VirtualClient::demo`])
//!
//! | Id | Name | Model | Behaviour |
//! |----|------|-------|-----------|
//! | 1000 | GT130 | — | Gateway, no signature |
//! | 1001 | Basement | 5051 | Temperature drift, leak on every fifth poll |
//! | 1002 | Oil tank | 4110 | Level falls 1 % per poll from 100 % to 21 %, then refills |
//! | 1003 | Living room | 1123 | Thermostat, not a sensor |
//!
//! Scripted answers queued with [`VirtualClient::push_response`] take
//! precedence over the simulation.
//!
//! ## Dependency rule
//!
//! Depends on `neviweb-app` (port traits) and `neviweb-domain` only.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Value, json};

use neviweb_app::ports::{ClientError, NeviwebClient};
use neviweb_domain::device::{DeviceDescriptor, SENSOR_MODELS, Signature, TANK_MONITOR_MODELS};
use neviweb_domain::id::DeviceId;

#[derive(Debug, Default)]
struct DeviceState {
    ticks: u32,
    scripted: VecDeque<Value>,
    attribute_calls: usize,
    daily_stats_calls: usize,
}

/// Simulated Neviweb session.
pub struct VirtualClient {
    catalog: Vec<DeviceDescriptor>,
    devices: Mutex<HashMap<DeviceId, DeviceState>>,
}

impl VirtualClient {
    /// Serve the given catalog.
    #[must_use]
    pub fn new(catalog: Vec<DeviceDescriptor>) -> Self {
        let devices = catalog
            .iter()
            .map(|d| (d.id.clone(), DeviceState::default()))
            .collect();
        Self {
            catalog,
            devices: Mutex::new(devices),
        }
    }

    /// The demo gateway described in the crate docs.
    #[must_use]
    pub fn demo() -> Self {
        let device = |id: u64, name: &str, model: Option<u32>| DeviceDescriptor {
            id: DeviceId::from(id),
            name: name.to_string(),
            signature: model.map(|m| Signature { model: Some(m) }),
        };
        Self::new(vec![
            device(1000, "GT130", None),
            device(1001, "Basement", Some(5051)),
            device(1002, "Oil tank", Some(4110)),
            device(1003, "Living room", Some(1123)),
        ])
    }

    /// Queue a raw attribute answer for a device.
    pub fn push_response(&self, id: &DeviceId, payload: Value) {
        self.lock()
            .entry(id.clone())
            .or_default()
            .scripted
            .push_back(payload);
    }

    /// Number of attribute requests served for a device.
    #[must_use]
    pub fn attribute_calls(&self, id: &DeviceId) -> usize {
        self.lock().get(id).map_or(0, |d| d.attribute_calls)
    }

    /// Number of daily-stats requests served for a device.
    #[must_use]
    pub fn daily_stats_calls(&self, id: &DeviceId) -> usize {
        self.lock().get(id).map_or(0, |d| d.daily_stats_calls)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DeviceId, DeviceState>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn model_of(&self, id: &DeviceId) -> Option<u32> {
        self.catalog
            .iter()
            .find(|d| &d.id == id)
            .and_then(DeviceDescriptor::model)
    }

    fn simulate(model: Option<u32>, tick: u32, attributes: &[&str]) -> Value {
        let Some(model) = model else {
            return json!({"errorCode": "DVCATTRNSPTD"});
        };
        if !SENSOR_MODELS.contains(&model) && !TANK_MONITOR_MODELS.contains(&model) {
            return json!({"errorCode": "DVCATTRNSPTD"});
        }

        let mut reading = serde_json::Map::new();
        for &name in attributes {
            let value = match name {
                "roomTemperature" => json!(18.0 + f64::from(tick % 10) * 0.5),
                "waterleakStatus" => {
                    let leaking = SENSOR_MODELS.contains(&model) && tick % 5 == 4;
                    json!(if leaking { "water" } else { "ok" })
                }
                "levelStatus" => json!(100 - (tick % 80)),
                "batteryVoltage" => json!(3.2 - f64::from(tick % 100) * 0.002),
                _ => Value::Null,
            };
            reading.insert(name.to_string(), value);
        }
        Value::Object(reading)
    }
}

impl NeviwebClient for VirtualClient {
    fn gateway_data(&self) -> Vec<DeviceDescriptor> {
        self.catalog.clone()
    }

    async fn get_device_attributes(
        &self,
        id: &DeviceId,
        attributes: &[&str],
    ) -> Result<Value, ClientError> {
        let model = self.model_of(id);
        let mut devices = self.lock();
        let Some(state) = devices.get_mut(id) else {
            return Ok(json!({"error": {"code": "DVCNOTFOUND", "id": id.as_str()}}));
        };
        state.attribute_calls += 1;

        if let Some(payload) = state.scripted.pop_front() {
            tracing::trace!(%id, %payload, "serving scripted response");
            return Ok(payload);
        }

        let payload = Self::simulate(model, state.ticks, attributes);
        state.ticks = state.ticks.wrapping_add(1);
        Ok(payload)
    }

    async fn get_device_daily_stats(&self, id: &DeviceId) -> Result<Value, ClientError> {
        if let Some(state) = self.lock().get_mut(id) {
            state.daily_stats_calls += 1;
        }
        Ok(json!({"values": []}))
    }
}
