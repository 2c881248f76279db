//! The authoritative set of places for the active search.

use std::collections::HashMap;

use crate::place::{Place, PlaceId};

/// Ordered places plus an id index.
///
/// `replace` builds the new snapshot completely before swapping it in, so a
/// reader only ever sees the old set or the new one.
#[derive(Debug, Default)]
pub struct PlaceStore {
    places: Vec<Place>,
    index: HashMap<PlaceId, usize>,
}

impl PlaceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a new result set, keeping remote order. A repeated id keeps its
    /// first occurrence.
    pub fn replace(&mut self, places: Vec<Place>) {
        let mut kept = Vec::with_capacity(places.len());
        let mut index = HashMap::with_capacity(places.len());
        for place in places {
            if index.contains_key(&place.id) {
                tracing::warn!(id = %place.id, "dropping duplicate place id");
                continue;
            }
            index.insert(place.id.clone(), kept.len());
            kept.push(place);
        }
        self.places = kept;
        self.index = index;
    }

    #[must_use]
    pub fn get(&self, id: &PlaceId) -> Option<&Place> {
        self.index.get(id).map(|&i| &self.places[i])
    }

    pub(crate) fn get_mut(&mut self, id: &PlaceId) -> Option<&mut Place> {
        let i = *self.index.get(id)?;
        self.places.get_mut(i)
    }

    #[must_use]
    pub fn all(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
