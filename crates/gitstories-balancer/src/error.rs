use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("balancer working set allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// A traced node was released before the settle pass reached it.
    #[error("traced node is no longer part of the tree")]
    StaleHandle,

    #[error("invalid balancer option `{field}` = {value}: {reason}")]
    InvalidOptions {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
