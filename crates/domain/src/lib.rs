//! # neviweb-domain
//!
//! Pure domain model for the Neviweb130 sensor integration.
//!
//! ## Responsibilities
//! - Opaque vendor identifiers ([`id::DeviceId`])
//! - Gateway catalog descriptors and the recognized hardware models
//! - Sensor readings and the tagged result of an attribute request
//! - The host-facing [`entity::Entity`] view of a polled sensor
//! - Typed error conventions shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! The vendor client and the host are expressed as traits in the `app`
//! crate (ports).

pub mod device;
pub mod entity;
pub mod error;
pub mod id;
pub mod reading;
