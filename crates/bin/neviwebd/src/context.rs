//! Host context — keeps the latest snapshot of every entity and logs state
//! changes.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use neviweb_app::ports::IntegrationContext;
use neviweb_domain::entity::Entity;
use neviweb_domain::error::NeviwebError;

/// In-process entity registry standing in for the host's state machine.
#[derive(Default)]
pub struct HostContext {
    entities: Mutex<HashMap<String, Entity>>,
}

impl HostContext {
    /// Latest snapshot of an entity.
    #[cfg(test)]
    pub fn get(&self, entity_id: &str) -> Option<Entity> {
        self.entities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(entity_id)
            .cloned()
    }
}

impl IntegrationContext for HostContext {
    async fn upsert_entity(&self, entity: Entity) -> Result<(), NeviwebError> {
        let mut entities = self.entities.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = entities.get(&entity.entity_id);

        match previous {
            None => tracing::info!(
                entity_id = %entity.entity_id,
                name = %entity.friendly_name,
                "entity registered"
            ),
            Some(prev) if prev.state != entity.state || prev.attributes != entity.attributes => {
                tracing::info!(
                    entity_id = %entity.entity_id,
                    state = ?entity.state,
                    attributes = ?entity.attributes,
                    "entity state changed"
                );
            }
            Some(_) => tracing::debug!(entity_id = %entity.entity_id, "entity unchanged"),
        }

        entities.insert(entity.entity_id.clone(), entity);
        Ok(())
    }
}
