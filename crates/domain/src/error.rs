//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`FieldlinkError`] via `#[from]`.

/// Top-level error returned by application services and ports.
#[derive(Debug, thiserror::Error)]
pub enum FieldlinkError {
    /// A request did not carry the fields a use-case requires.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A storage adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Presence checks on inbound payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent or empty.
    #[error("{0} is required.")]
    MissingField(&'static str),

    /// One of the listed fields was absent or empty.
    #[error("Missing {}.", .0.join(" or "))]
    MissingAnyOf(&'static [&'static str]),
}

/// Lookup miss for a keyed record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// Key that was looked up.
    pub id: String,
}
