use crate::tree::NodeKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{kind} not found: {name}")]
    NotFound { kind: NodeKind, name: String },

    #[error("Object named '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// The handle refers to a node that has already been released.
    #[error("node handle does not refer to a live node")]
    StaleHandle,

    /// The handle is live but names a node of the other kind.
    #[error("expected a {expected}, found a {found}")]
    KindMismatch { expected: NodeKind, found: NodeKind },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists { .. })
    }
}
