//! Attribute payload decoding at the client boundary.
//!
//! The vendor answers an attribute request with a loosely-typed JSON
//! mapping. It is decoded exactly once, here, into an
//! [`AttributesResponse`]:
//!
//! | Payload | Result |
//! |---------|--------|
//! | has an `"error"` key | [`AttributesResponse::TransportError`] |
//! | has an `"errorCode"` key | [`AttributesResponse::DeviceError`] |
//! | otherwise | [`AttributesResponse::Reading`], or a [`PayloadParseError`] |
//!
//! `"error"` wins when both markers are present. Only an absent attribute
//! fails a success payload: a `null` or non-numeric value decodes to `None`
//! so the remaining fields, the leak status in particular, still land.

use serde_json::{Map, Value};

use neviweb_domain::reading::{AttributesResponse, LeakStatus, SensorReading};

use crate::error::PayloadParseError;

pub const ATTR_ROOM_TEMPERATURE: &str = "roomTemperature";
pub const ATTR_WATER_LEAK_STATUS: &str = "waterleakStatus";
pub const ATTR_LEVEL_STATUS: &str = "levelStatus";
pub const ATTR_BATTERY_VOLTAGE: &str = "batteryVoltage";

/// Attributes requested from every sensor.
pub const UPDATE_ATTRIBUTES: [&str; 3] = [
    ATTR_ROOM_TEMPERATURE,
    ATTR_WATER_LEAK_STATUS,
    ATTR_BATTERY_VOLTAGE,
];

const ERROR_KEY: &str = "error";
const ERROR_CODE_KEY: &str = "errorCode";

/// Snake-case spelling some API revisions use for the same attribute.
fn alias(name: &'static str) -> &'static str {
    match name {
        ATTR_ROOM_TEMPERATURE => "room_temperature",
        ATTR_WATER_LEAK_STATUS => "water_leak_status",
        ATTR_LEVEL_STATUS => "level_status",
        ATTR_BATTERY_VOLTAGE => "battery_voltage",
        other => other,
    }
}

fn lookup<'a>(
    map: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, PayloadParseError> {
    map.get(name)
        .or_else(|| map.get(alias(name)))
        .ok_or(PayloadParseError::MissingAttribute(name))
}

fn number(
    map: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<f64>, PayloadParseError> {
    Ok(lookup(map, name)?.as_f64())
}

/// Decode a raw attribute payload.
///
/// `with_level` selects whether the level status is expected (tank
/// monitors); for other sensors it is ignored even when present.
///
/// # Errors
///
/// Returns [`PayloadParseError`] when the payload is not an object, or
/// carries no error marker and lacks a requested attribute.
pub fn decode_attributes(
    payload: Value,
    with_level: bool,
) -> Result<AttributesResponse, PayloadParseError> {
    let Value::Object(map) = payload else {
        return Err(PayloadParseError::NotAnObject);
    };

    if map.contains_key(ERROR_KEY) {
        return Ok(AttributesResponse::TransportError(Value::Object(map)));
    }
    if map.contains_key(ERROR_CODE_KEY) {
        return Ok(AttributesResponse::DeviceError(Value::Object(map)));
    }

    let temperature = number(&map, ATTR_ROOM_TEMPERATURE)?;
    let leak = LeakStatus::from_raw(lookup(&map, ATTR_WATER_LEAK_STATUS)?);
    let level = if with_level {
        number(&map, ATTR_LEVEL_STATUS)?
    } else {
        None
    };
    let battery_voltage = number(&map, ATTR_BATTERY_VOLTAGE)?;

    Ok(AttributesResponse::Reading(SensorReading {
        temperature,
        leak,
        level,
        battery_voltage,
    }))
}
