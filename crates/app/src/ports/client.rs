//! Vendor client port — the shared Neviweb session.
//!
//! The client owns authentication, the cached device catalog and every
//! network call. One instance is shared read-only by all sensor adapters;
//! implementations must be safe to call from several adapters at once.

use std::future::Future;
use std::sync::Arc;

use neviweb_domain::device::DeviceDescriptor;
use neviweb_domain::error::NeviwebError;
use neviweb_domain::id::DeviceId;

/// Shared client for the Neviweb cloud API.
pub trait NeviwebClient: Send + Sync {
    /// Snapshot of the gateway device catalog fetched at login.
    fn gateway_data(&self) -> Vec<DeviceDescriptor>;

    /// Fetch the named attributes of a device.
    ///
    /// The raw answer is either `{"error": …}`, `{"errorCode": …}` or a
    /// mapping keyed by the requested attribute names.
    fn get_device_attributes(
        &self,
        id: &DeviceId,
        attributes: &[&str],
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> + Send;

    /// Fetch the daily statistics payload of a device.
    fn get_device_daily_stats(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> + Send;
}

impl<T: NeviwebClient> NeviwebClient for Arc<T> {
    fn gateway_data(&self) -> Vec<DeviceDescriptor> {
        (**self).gateway_data()
    }

    fn get_device_attributes(
        &self,
        id: &DeviceId,
        attributes: &[&str],
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> + Send {
        (**self).get_device_attributes(id, attributes)
    }

    fn get_device_daily_stats(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<serde_json::Value, ClientError>> + Send {
        (**self).get_device_daily_stats(id)
    }
}

/// Failures raised by a client before any payload is available.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The client has no live session.
    #[error("Neviweb client not connected")]
    NotConnected,

    /// The HTTP exchange or its decoding failed.
    #[error("Neviweb request failed")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ClientError {
    /// Convert into a [`NeviwebError::Upstream`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> NeviwebError {
        NeviwebError::Upstream(Box::new(self))
    }
}

impl From<ClientError> for NeviwebError {
    fn from(err: ClientError) -> Self {
        err.into_domain()
    }
}
