//! Session-scoped discovery flow.
//!
//! A [`DiscoverySession`] owns everything that lives for one browsing session:
//! the acquirer (and its last fix), the cache, the place store behind the
//! sync controller, the last acquired origin and the current [`ViewState`].
//! It is built at session start and torn down with [`DiscoverySession::close`].
//!
//! Flow: acquire -> cache lookup -> remote fetch on miss -> store -> render.

use std::future::Future;

use chrono::{DateTime, Utc};
use tracing::Instrument;
use uuid::Uuid;

use crate::cache::{SessionStorage, SpatialCache};
use crate::classify::classify;
use crate::error::{DiscoveryError, PlaceSourceError};
use crate::geo::{Coordinate, LocationSample};
use crate::locate::{LocationAcquirer, LocationProvider};
use crate::place::{Place, PlaceId};
use crate::sync::{ListProjection, MapProjection, SyncController};
use crate::view::{status_line, ViewState};

/// Fixed nearby-search radius in metres.
pub const SEARCH_RADIUS_M: u32 = 2000;

const REMOTE_FAILURE_MSG: &str = "Could not load nearby places.";

/// Remote nearby-search backend.
pub trait PlaceSource {
    /// Named places within `radius_m` of `origin`, in source order.
    fn fetch_nearby(
        &self,
        origin: Coordinate,
        radius_m: u32,
    ) -> impl Future<Output = Result<Vec<Place>, PlaceSourceError>>;
}

pub struct DiscoverySession<P, Q, S, M, L> {
    id: Uuid,
    acquirer: LocationAcquirer<P>,
    source: Q,
    cache: SpatialCache<S>,
    sync: SyncController<M, L>,
    origin: Option<LocationSample>,
    state: ViewState,
}

impl<P, Q, S, M, L> DiscoverySession<P, Q, S, M, L>
where
    P: LocationProvider,
    Q: PlaceSource,
    S: SessionStorage,
    M: MapProjection,
    L: ListProjection,
{
    pub fn new(provider: P, source: Q, storage: S, map: M, list: L) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, "discovery session started");
        Self {
            id,
            acquirer: LocationAcquirer::new(provider),
            source,
            cache: SpatialCache::new(storage),
            sync: SyncController::new(map, list),
            origin: None,
            state: ViewState::Idle,
        }
    }

    /// Runs the full flow as of now. Returns the number of places shown.
    ///
    /// # Errors
    ///
    /// See [`DiscoverySession::discover_at`].
    pub async fn discover(&mut self) -> Result<usize, DiscoveryError> {
        self.discover_at(Utc::now()).await
    }

    /// Acquires a position and shows the places around it, from cache when
    /// the previous result is still valid.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::Location`] with the classified failure when no
    ///   position could be acquired. Never retried automatically.
    /// - [`DiscoveryError::Remote`] when the nearby query fails. The view
    ///   state then offers a retry.
    pub async fn discover_at(&mut self, now: DateTime<Utc>) -> Result<usize, DiscoveryError> {
        let span = tracing::info_span!("discover", session_id = %self.id);
        async {
            self.state = ViewState::Locating;
            let sample = match self.acquirer.acquire_at(now).await {
                Ok(sample) => sample,
                Err(failure) => {
                    let classification = classify(&failure);
                    tracing::warn!(
                        category = ?classification.category,
                        raw = %failure.message,
                        "location acquisition failed"
                    );
                    self.state = ViewState::Failed {
                        message: classification.message.clone(),
                        retryable: false,
                    };
                    return Err(DiscoveryError::Location(classification));
                }
            };
            self.origin = Some(sample);
            self.load(sample.coordinate, now).await
        }
        .instrument(span)
        .await
    }

    /// Re-issues the query for the last acquired origin without touching the
    /// location capability.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::NoOrigin`] if no position was ever acquired.
    /// - [`DiscoveryError::Remote`] if the query fails again.
    pub async fn retry_at(&mut self, now: DateTime<Utc>) -> Result<usize, DiscoveryError> {
        let origin = self.origin.ok_or(DiscoveryError::NoOrigin)?;
        let span = tracing::info_span!("retry", session_id = %self.id);
        self.load(origin.coordinate, now).instrument(span).await
    }

    /// # Errors
    ///
    /// See [`DiscoverySession::retry_at`].
    pub async fn retry(&mut self) -> Result<usize, DiscoveryError> {
        self.retry_at(Utc::now()).await
    }

    async fn load(&mut self, origin: Coordinate, now: DateTime<Utc>) -> Result<usize, DiscoveryError> {
        if let Some(places) = self.cache.lookup(origin, now) {
            return Ok(self.show(places, origin));
        }

        self.state = ViewState::Loading;
        match self.source.fetch_nearby(origin, SEARCH_RADIUS_M).await {
            Ok(places) => {
                tracing::info!(%origin, count = places.len(), "fetched nearby places");
                self.cache.store(origin, now, &places);
                Ok(self.show(places, origin))
            }
            Err(e) => {
                tracing::warn!(%origin, error = %e, "nearby query failed");
                self.state = ViewState::Failed {
                    message: REMOTE_FAILURE_MSG.to_owned(),
                    retryable: true,
                };
                Err(e.into())
            }
        }
    }

    fn show(&mut self, places: Vec<Place>, origin: Coordinate) -> usize {
        let count = places.len();
        self.sync.render_all(places, Some(origin));
        self.state = ViewState::for_count(count);
        count
    }

    /// Selects a place in both projections. Unknown ids are ignored.
    pub fn select(&mut self, id: &PlaceId) -> bool {
        self.sync.select(id)
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn status_line(&self) -> String {
        status_line(&self.state)
    }

    #[must_use]
    pub fn origin(&self) -> Option<LocationSample> {
        self.origin
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        self.sync.store().all()
    }

    #[must_use]
    pub fn sync(&self) -> &SyncController<M, L> {
        &self.sync
    }

    /// Ends the session, discarding the session-scoped cache entry.
    pub fn close(mut self) {
        self.cache.clear();
        tracing::info!(session_id = %self.id, "discovery session closed");
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
