//! Single-shot position acquisition.
//!
//! [`LocationAcquirer`] wraps a platform [`LocationProvider`] and enforces the
//! acquisition policy: standard accuracy, a 20 s timeout, and reuse of a fix
//! up to 30 s old. It never resolves with a malformed coordinate.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::classify::{FailureCode, GeoFailure, PermissionState};
use crate::geo::{Coordinate, LocationSample};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(20);
const MAX_FIX_AGE: Duration = Duration::from_secs(30);

/// Options forwarded to the platform on every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: ACQUIRE_TIMEOUT,
            maximum_age: MAX_FIX_AGE,
        }
    }
}

/// Unvalidated fix as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// The device geolocation capability.
pub trait LocationProvider {
    /// `false` when the runtime has no location capability at all.
    fn is_supported(&self) -> bool;

    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<RawFix, GeoFailure>>;

    /// Permission-state probe. `None` when the platform cannot answer.
    fn permission_state(&self) -> impl Future<Output = Option<PermissionState>>;
}

pub struct LocationAcquirer<P> {
    provider: P,
    options: PositionOptions,
    last: Option<LocationSample>,
}

impl<P: LocationProvider> LocationAcquirer<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, PositionOptions::default())
    }

    pub fn with_options(provider: P, options: PositionOptions) -> Self {
        Self {
            provider,
            options,
            last: None,
        }
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Acquires one position as of now.
    ///
    /// # Errors
    ///
    /// See [`LocationAcquirer::acquire_at`].
    pub async fn acquire(&mut self) -> Result<LocationSample, GeoFailure> {
        self.acquire_at(Utc::now()).await
    }

    /// Acquires one position, treating `now` as the current instant.
    ///
    /// # Errors
    ///
    /// - [`FailureCode::Unsupported`] immediately when the capability is absent.
    /// - [`FailureCode::Timeout`] when the platform does not answer in time.
    /// - [`FailureCode::PositionUnavailable`] when the platform returns a
    ///   malformed coordinate.
    /// - Whatever code the platform reports otherwise. Permission denials carry
    ///   the result of the permission-state probe.
    pub async fn acquire_at(&mut self, now: DateTime<Utc>) -> Result<LocationSample, GeoFailure> {
        if !self.provider.is_supported() {
            return Err(GeoFailure::new(
                FailureCode::Unsupported,
                "geolocation capability is not available",
            ));
        }

        if let Some(last) = self.reusable_fix(now) {
            tracing::debug!(coordinate = %last.coordinate, "reusing recent position fix");
            return Ok(last);
        }

        let outcome =
            tokio::time::timeout(self.options.timeout, self.provider.current_position(&self.options))
                .await
                .unwrap_or_else(|_| {
                    Err(GeoFailure::new(
                        FailureCode::Timeout,
                        format!("no position within {}s", self.options.timeout.as_secs()),
                    ))
                });

        match outcome {
            Ok(fix) => {
                let coordinate = Coordinate::new(fix.latitude, fix.longitude).map_err(|e| {
                    tracing::warn!(error = %e, "platform returned a malformed position");
                    GeoFailure::new(FailureCode::PositionUnavailable, e.to_string())
                })?;
                let sample = LocationSample {
                    coordinate,
                    acquired_at: now,
                };
                self.last = Some(sample);
                Ok(sample)
            }
            Err(failure) if failure.code == FailureCode::PermissionDenied => {
                let permission = self.provider.permission_state().await;
                Err(failure.with_permission(permission))
            }
            Err(failure) => Err(failure),
        }
    }

    fn reusable_fix(&self, now: DateTime<Utc>) -> Option<LocationSample> {
        let last = self.last?;
        let max_age = TimeDelta::from_std(self.options.maximum_age).ok()?;
        let age = now.signed_duration_since(last.acquired_at);
        (age >= TimeDelta::zero() && age <= max_age).then_some(last)
    }
}
