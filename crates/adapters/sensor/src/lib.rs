//! # neviweb-adapter-sensor
//!
//! Neviweb130 sensor integration — exposes Sinopé water-leak detectors and
//! tank level monitors, reached through the Neviweb cloud, as host entities.
//!
//! ## Supported models
//!
//! | Model | Hardware | Readings |
//! |-------|----------|----------|
//! | 5051 | WL4200 water-leak detector | temperature, leak status, battery |
//! | 4110 | LM4110-ZB level monitor | the above plus liquid level (%) |
//!
//! ## How it works
//!
//! [`setup`](Integration::setup) reads the shared client's cached device
//! catalog and builds one [`Neviweb130Sensor`] per recognized device. Each
//! [`update`](Integration::update) polls every sensor once, in order. The
//! integration owns no timer: cadence comes from the caller (see
//! `neviweb_app::services::poll_loop`).
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `neviweb-app` and `neviweb-domain`.

mod config;
pub mod discovery;
mod error;
pub mod payload;
mod sensor;

pub use config::{DEFAULT_NAME_PREFIX, DEFAULT_SCAN_INTERVAL_SECS, SensorConfig};
pub use error::{PayloadParseError, PollError};
pub use sensor::{Neviweb130Sensor, SENSOR_TYPES, SensorType, Snapshot};

use neviweb_app::ports::{Integration, NeviwebClient};
use neviweb_domain::entity::Entity;
use neviweb_domain::error::{NeviwebError, NotFoundError};
use neviweb_domain::id::DeviceId;

/// Integration polling every recognized Neviweb130 sensor.
pub struct Neviweb130Integration<C> {
    client: C,
    config: SensorConfig,
    sensors: Vec<Neviweb130Sensor<C>>,
}

impl<C: NeviwebClient + Clone> Neviweb130Integration<C> {
    /// Create the integration around a shared client.
    #[must_use]
    pub fn new(client: C, config: SensorConfig) -> Self {
        Self {
            client,
            config,
            sensors: Vec::new(),
        }
    }

    /// Sensors built by the last [`setup`](Integration::setup).
    #[must_use]
    pub fn sensors(&self) -> &[Neviweb130Sensor<C>] {
        &self.sensors
    }

    /// Look up a sensor by its vendor id.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when no sensor has that id.
    pub fn sensor(&self, id: &DeviceId) -> Result<&Neviweb130Sensor<C>, NotFoundError> {
        self.sensors
            .iter()
            .find(|sensor| sensor.unique_id() == id)
            .ok_or_else(|| NotFoundError {
                entity: "Sensor",
                id: id.to_string(),
            })
    }

    fn entities(&self) -> Result<Vec<Entity>, NeviwebError> {
        self.sensors
            .iter()
            .map(|sensor| sensor.to_entity().map_err(NeviwebError::from))
            .collect()
    }
}

impl<C> Integration for Neviweb130Integration<C>
where
    C: NeviwebClient + Clone + 'static,
{
    fn name(&self) -> &'static str {
        "neviweb130"
    }

    async fn setup(&mut self) -> Result<Vec<Entity>, NeviwebError> {
        let catalog = self.client.gateway_data();
        self.sensors = discovery::discover(&catalog, &self.client, &self.config.name_prefix);

        tracing::info!(
            catalog = catalog.len(),
            sensors = self.sensors.len(),
            "Neviweb130 sensor discovery complete"
        );

        self.entities()
    }

    async fn update(&mut self) -> Result<Vec<Entity>, NeviwebError> {
        for sensor in &mut self.sensors {
            match sensor.poll().await {
                Ok(_) => {}
                // Already logged by the sensor itself.
                Err(PollError::Transport(_) | PollError::Device(_)) => {}
                Err(err) => {
                    tracing::warn!(
                        sensor = %sensor.name(),
                        %err,
                        "sensor poll failed, keeping last-known values"
                    );
                }
            }
        }

        self.entities()
    }

    async fn teardown(&mut self) -> Result<(), NeviwebError> {
        self.sensors.clear();
        tracing::info!("Neviweb130 sensor integration stopped");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use neviweb_domain::device::{DeviceDescriptor, Signature};
    use neviweb_domain::entity::AttributeValue;
    use serde_json::json;

    use crate::test_support::FakeClient;

    fn catalog() -> Vec<DeviceDescriptor> {
        serde_json::from_value(json!([
            {"id": 100, "name": "Gateway"},
            {"id": 101, "name": "Basement", "signature": {"model": 5051}},
            {"id": 102, "name": "Oil tank", "signature": {"model": 4110}},
            {"id": 103, "name": "Hallway", "signature": {"model": 1123}}
        ]))
        .unwrap()
    }

    fn integration() -> (Neviweb130Integration<FakeClient>, FakeClient) {
        let client = FakeClient::with_catalog(catalog());
        (
            Neviweb130Integration::new(client.clone(), SensorConfig::default()),
            client,
        )
    }

    #[test]
    fn should_return_neviweb130_as_name() {
        let (integration, _) = integration();
        assert_eq!(integration.name(), "neviweb130");
    }

    #[tokio::test]
    async fn should_discover_recognized_devices_on_setup() {
        let (mut integration, _) = integration();
        let entities = integration.setup().await.unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].friendly_name, "neviweb130 sensor Basement");
        assert_eq!(entities[1].friendly_name, "neviweb130 sensor Oil tank");
        assert!(entities.iter().all(|e| e.state.is_none()));
    }

    #[tokio::test]
    async fn should_poll_every_sensor_on_update() {
        let (mut integration, client) = integration();
        integration.setup().await.unwrap();
        client.push_attributes(
            json!({"roomTemperature": 18.0, "waterleakStatus": "water", "batteryVoltage": 3.0}),
        );
        client.push_attributes(json!({
            "roomTemperature": 6.0,
            "waterleakStatus": "ok",
            "levelStatus": 73,
            "batteryVoltage": 2.7
        }));

        let entities = integration.update().await.unwrap();

        assert_eq!(client.attribute_requests().len(), 2);
        assert_eq!(client.daily_stats_requests(), 2);
        assert_eq!(entities[0].state, Some(AttributeValue::Float(18.0)));
        assert_eq!(entities[0].get_attribute("leak"), Some(&AttributeValue::from("water")));
        assert_eq!(entities[1].state, Some(AttributeValue::Float(6.0)));

        let tank = integration.sensor(&DeviceId::from(102)).unwrap();
        assert_eq!(tank.snapshot().level_status, Some(73.0));
    }

    #[tokio::test]
    async fn should_keep_polling_other_sensors_when_one_fails() {
        let (mut integration, client) = integration();
        integration.setup().await.unwrap();
        client.fail_next();
        client.push_attributes(json!({
            "roomTemperature": 6.0,
            "waterleakStatus": "ok",
            "levelStatus": 73,
            "batteryVoltage": 2.7
        }));

        let entities = integration.update().await.unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].state, None);
        assert_eq!(entities[1].state, Some(AttributeValue::Float(6.0)));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_sensor() {
        let (mut integration, _) = integration();
        integration.setup().await.unwrap();

        let err = integration.sensor(&DeviceId::from(103)).err().unwrap();
        assert_eq!(err.id, "103");
    }

    #[tokio::test]
    async fn should_use_configured_name_prefix() {
        let client = FakeClient::with_catalog(vec![DeviceDescriptor {
            id: DeviceId::from(7),
            name: "Sump".to_string(),
            signature: Some(Signature { model: Some(5051) }),
        }]);
        let config = SensorConfig {
            name_prefix: "sedna".to_string(),
            ..SensorConfig::default()
        };
        let mut integration = Neviweb130Integration::new(client, config);

        let entities = integration.setup().await.unwrap();
        assert_eq!(entities[0].friendly_name, "sedna Sump");
    }

    #[tokio::test]
    async fn should_drop_sensors_on_teardown() {
        let (mut integration, _) = integration();
        integration.setup().await.unwrap();

        integration.teardown().await.unwrap();
        assert!(integration.sensors().is_empty());
    }
}
