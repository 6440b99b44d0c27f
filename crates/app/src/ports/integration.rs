//! Integration port — lifecycle of a device integration and the host sink
//! it reports into.

use std::future::Future;

use neviweb_domain::entity::Entity;
use neviweb_domain::error::NeviwebError;

/// Host-side sink for entity snapshots.
///
/// This is a **port** — the poll loop pushes every snapshot an integration
/// produces through it. The binary crate provides the concrete
/// implementation.
pub trait IntegrationContext: Send + Sync {
    /// Register or refresh one entity.
    fn upsert_entity(
        &self,
        entity: Entity,
    ) -> impl Future<Output = Result<(), NeviwebError>> + Send;

    /// Convenience: register or refresh every entity in order.
    fn upsert_all(
        &self,
        entities: Vec<Entity>,
    ) -> impl Future<Output = Result<(), NeviwebError>> + Send {
        async move {
            for entity in entities {
                self.upsert_entity(entity).await?;
            }
            Ok(())
        }
    }
}

/// A pluggable device integration.
///
/// The poll loop calls the lifecycle methods in order:
///
/// 1. [`setup`](Self::setup) — discover devices, return their initial entities
/// 2. [`update`](Self::update) — once per tick, for as long as the loop runs
/// 3. [`teardown`](Self::teardown) — release resources on shutdown
pub trait Integration {
    /// Unique name identifying this integration (e.g. `"neviweb130"`).
    fn name(&self) -> &'static str;

    /// Discover devices and build one adapter per recognized device.
    fn setup(&mut self) -> impl Future<Output = Result<Vec<Entity>, NeviwebError>> + Send;

    /// Run one poll cycle over every adapter.
    ///
    /// Returns the entity snapshot of every adapter, including those whose
    /// poll failed (their last-known values are kept).
    fn update(&mut self) -> impl Future<Output = Result<Vec<Entity>, NeviwebError>> + Send;

    /// Called on graceful shutdown.
    fn teardown(&mut self) -> impl Future<Output = Result<(), NeviwebError>> + Send;
}
