use thiserror::Error;

use crate::classify::Classification;

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejected coordinate input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// Failure reported by a [`crate::PlaceSource`].
#[derive(Debug, Error)]
pub enum PlaceSourceError {
    /// The remote geodata service failed or answered with a non-2xx status.
    #[error("remote service error: {0}")]
    RemoteService(String),
}

/// Failures surfaced by [`crate::DiscoverySession`].
///
/// Every variant is recoverable by user action; none of them ends the session.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Location acquisition failed; the classification carries the
    /// user-facing guidance.
    #[error("{}", .0.message)]
    Location(Classification),

    /// The nearby query failed. Retrying reuses the same origin.
    #[error(transparent)]
    Remote(#[from] PlaceSourceError),

    /// `retry` was called before any position had been acquired.
    #[error("no acquired position to retry from")]
    NoOrigin,
}
