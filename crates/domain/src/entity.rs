//! Entity — the host-facing view of one polled sensor.
//!
//! The host reads a sensor through its unique id, display name, a state
//! value and a flat attribute mapping for diagnostics/display.

mod attribute_value;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use attribute_value::AttributeValue;

use crate::error::ValidationError;
use crate::id::DeviceId;

/// UTC timestamp used for `last_updated`.
pub type Timestamp = DateTime<Utc>;

/// Snapshot of a sensor as exposed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Host entity id, e.g. `sensor.neviweb130_5521`.
    pub entity_id: String,
    /// Vendor device id backing the entity.
    pub unique_id: DeviceId,
    /// Display name.
    pub friendly_name: String,
    /// Primary state value; `None` until the first successful poll.
    pub state: Option<AttributeValue>,
    /// Extra attributes for diagnostics and display.
    pub attributes: BTreeMap<String, AttributeValue>,
    /// When this snapshot was produced.
    pub last_updated: Timestamp,
}

impl Entity {
    /// Start building an entity.
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// Builder for [`Entity`]; validates ids and names on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct EntityBuilder {
    entity_id: String,
    unique_id: Option<DeviceId>,
    friendly_name: String,
    state: Option<AttributeValue>,
    attributes: BTreeMap<String, AttributeValue>,
}

impl EntityBuilder {
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = entity_id.into();
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: DeviceId) -> Self {
        self.unique_id = Some(unique_id);
        self
    }

    #[must_use]
    pub fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = name.into();
        self
    }

    #[must_use]
    pub fn state(mut self, state: Option<AttributeValue>) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn attributes(
        mut self,
        attributes: impl IntoIterator<Item = (String, AttributeValue)>,
    ) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Finish the entity, stamping `last_updated` with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyEntityId`] when the entity id (or the
    /// unique id it falls back on) is blank, and
    /// [`ValidationError::EmptyName`] when the friendly name is blank.
    pub fn build(self) -> Result<Entity, ValidationError> {
        if self.entity_id.trim().is_empty() {
            return Err(ValidationError::EmptyEntityId);
        }
        let unique_id = self
            .unique_id
            .filter(|id| !id.as_str().trim().is_empty())
            .ok_or(ValidationError::EmptyEntityId)?;
        if self.friendly_name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Entity {
            entity_id: self.entity_id,
            unique_id,
            friendly_name: self.friendly_name,
            state: self.state,
            attributes: self.attributes,
            last_updated: Utc::now(),
        })
    }
}
