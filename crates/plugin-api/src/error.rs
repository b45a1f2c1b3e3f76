use thiserror::Error;

/// Errors that can occur when mutating the [`SourceRegistry`](crate::SourceRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A source attempted to register an identifier that already exists.
    #[error("source id '{id}' is already registered")]
    DuplicateId { id: &'static str },

    /// A source attempted to claim an action keyword another source owns.
    #[error("action keyword '{keyword}' is already claimed by source '{owner}'")]
    DuplicateActionKeyword {
        keyword: &'static str,
        owner: &'static str,
    },
}
