//! Sensor adapter error types.

use neviweb_app::ports::ClientError;
use neviweb_domain::error::NeviwebError;

/// Why a poll cycle of one sensor did not refresh its cached values.
///
/// Whatever the variant, the sensor keeps its last-known values.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The vendor API answered with an `"error"` payload.
    #[error("Neviweb could not serve the request: {0}")]
    Transport(serde_json::Value),

    /// The device answered with an `"errorCode"` payload.
    #[error("device reported an error: {0}")]
    Device(serde_json::Value),

    /// The client failed before producing a payload.
    #[error("Neviweb client error")]
    Client(#[from] ClientError),

    /// The payload carried no error marker but could not be decoded.
    #[error("malformed attribute payload")]
    Payload(#[from] PayloadParseError),
}

/// Details about why an attribute payload could not be decoded.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadParseError {
    /// The payload is not a JSON object.
    #[error("attribute payload is not a JSON object")]
    NotAnObject,

    /// A requested attribute is absent.
    #[error("attribute {0} missing from payload")]
    MissingAttribute(&'static str),
}

impl PollError {
    /// Convert into a [`NeviwebError`] for propagation across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> NeviwebError {
        match self {
            Self::Client(err) => err.into_domain(),
            other => NeviwebError::Upstream(Box::new(other)),
        }
    }
}

impl From<PollError> for NeviwebError {
    fn from(err: PollError) -> Self {
        err.into_domain()
    }
}
