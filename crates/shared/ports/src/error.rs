use thiserror::Error;

/// Errors raised while resolving a zone identifier
///
/// There is exactly one kind: the zone database does not know the name.
/// Callers turn it into a degraded display instead of propagating it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("Invalid time zone: {0}")]
    InvalidZone(String),
}

pub type ZoneResult<T> = std::result::Result<T, ZoneError>;
