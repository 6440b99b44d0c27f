//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`NeviwebError`] at port boundaries.

/// Base error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum NeviwebError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A looked-up item does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The vendor client or another outside collaborator failed.
    #[error("upstream error")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations raised by domain builders.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The display name is empty or whitespace.
    #[error("name must not be empty")]
    EmptyName,

    /// The entity id is empty or whitespace.
    #[error("entity id must not be empty")]
    EmptyEntityId,
}

/// A lookup miss, e.g. an entity that no integration owns.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of item looked up (e.g. `"Sensor"`).
    pub entity: &'static str,
    /// Identifier that was not found.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_not_found_with_kind_and_id() {
        let err = NotFoundError {
            entity: "Sensor",
            id: "1234".to_string(),
        };
        assert_eq!(err.to_string(), "Sensor 1234 not found");
    }

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: NeviwebError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            NeviwebError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_keep_upstream_source() {
        let io = std::io::Error::other("socket closed");
        let err = NeviwebError::Upstream(Box::new(io));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "socket closed");
    }
}
