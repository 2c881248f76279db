//! Spatial-temporal cache of the last nearby-query result.
//!
//! One entry at a time, persisted through a [`SessionStorage`] collaborator.
//! The validity rule lives on [`CacheEntry`] and knows nothing about the
//! stored format; [`StoredEntry`] is the only type that touches the wire.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::{distance_km, Coordinate};
use crate::place::Place;

pub const CACHE_KEY: &str = "nearby.places.cache";
const MAX_AGE_SECS: i64 = 10 * 60;
const MAX_DRIFT_KM: f64 = 0.1;

/// Session-scoped key/value storage.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Process-lifetime storage; the default for a single session.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// The last successful fetch: where, when, and what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub origin: Coordinate,
    pub captured_at: DateTime<Utc>,
    pub places: Vec<Place>,
}

impl CacheEntry {
    /// `true` iff the entry is younger than 10 minutes and `origin` lies within
    /// 100 m of the entry's origin. Both bounds are strict. An entry captured
    /// after `now` is never valid.
    #[must_use]
    pub fn is_valid_for(&self, origin: Coordinate, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.captured_at);
        age >= TimeDelta::zero()
            && age < TimeDelta::seconds(MAX_AGE_SECS)
            && distance_km(self.origin, origin) < MAX_DRIFT_KM
    }
}

/// Storage format: `{lat, lng, data, timestamp}`, timestamp in Unix millis.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    lat: f64,
    lng: f64,
    data: Vec<Place>,
    timestamp: i64,
}

impl StoredEntry {
    fn from_entry(entry: &CacheEntry) -> Self {
        Self {
            lat: entry.origin.lat,
            lng: entry.origin.lng,
            data: entry.places.clone(),
            timestamp: entry.captured_at.timestamp_millis(),
        }
    }

    /// Rebuilds the entry, or `None` if any part of it is out of range. One bad
    /// place discards the whole entry.
    fn into_entry(self) -> Option<CacheEntry> {
        let origin = Coordinate::new(self.lat, self.lng).ok()?;
        let captured_at = DateTime::from_timestamp_millis(self.timestamp)?;
        if let Some(place) = self
            .data
            .iter()
            .find(|p| Coordinate::new(p.coordinate.lat, p.coordinate.lng).is_err())
        {
            tracing::warn!(id = %place.id, "cached place has an invalid coordinate");
            return None;
        }
        Some(CacheEntry {
            origin,
            captured_at,
            places: self.data,
        })
    }
}

pub struct SpatialCache<S> {
    storage: S,
}

impl<S: SessionStorage> SpatialCache<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the cached places when the stored entry is valid for `origin`
    /// at `now`. A valid entry with zero places is still a hit.
    ///
    /// Never fails: a missing or undecodable entry is a miss.
    pub fn lookup(&self, origin: Coordinate, now: DateTime<Utc>) -> Option<Vec<Place>> {
        let entry = self.load()?;
        if entry.is_valid_for(origin, now) {
            tracing::debug!(%origin, count = entry.places.len(), "cache hit");
            Some(entry.places)
        } else {
            tracing::debug!(
                %origin,
                cached_origin = %entry.origin,
                captured_at = %entry.captured_at,
                "cache entry stale or out of range"
            );
            None
        }
    }

    /// Replaces whatever entry exists with a new one.
    pub fn store(&mut self, origin: Coordinate, now: DateTime<Utc>, places: &[Place]) {
        let entry = CacheEntry {
            origin,
            captured_at: now,
            places: places.to_vec(),
        };
        match serde_json::to_string(&StoredEntry::from_entry(&entry)) {
            Ok(json) => self.storage.set(CACHE_KEY, json),
            Err(e) => tracing::warn!(error = %e, "failed to serialize cache entry"),
        }
    }

    pub fn clear(&mut self) {
        self.storage.remove(CACHE_KEY);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load(&self) -> Option<CacheEntry> {
        let raw = self.storage.get(CACHE_KEY)?;
        let stored = serde_json::from_str::<StoredEntry>(&raw)
            .map_err(|e| tracing::warn!(error = %e, "discarding undecodable cache entry"))
            .ok()?;
        stored.into_entry()
    }
}
