use thiserror::Error;

use crate::ItemId;

/// A caller contract violation detected at registration or configuration time.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("tracked item has no id")]
    MissingId,
    #[error("tracked item {id} has a non-finite rect")]
    NonFiniteRect { id: ItemId },
    #[error("tracked item {id} has a negative size ({width}x{height})")]
    NegativeSize { id: ItemId, width: f64, height: f64 },
    #[error("threshold list is empty")]
    EmptyThresholds,
    #[error("threshold {value} is outside [0, 1]")]
    InvalidThreshold { value: f64 },
    #[error("thresholds must be ascending ({prev} then {next})")]
    UnsortedThresholds { prev: f64, next: f64 },
    #[error("classifier threshold {value} is not finite")]
    NonFiniteClassifierThreshold { value: f64 },
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("tracker has been torn down")]
    Closed,
}

pub type Result<T> = core::result::Result<T, Error>;
