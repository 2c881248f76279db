//! Selection sync between the map and list projections.
//!
//! The two projections never reference each other. Both are addressed only by
//! [`PlaceId`], and the [`SyncController`] is the single owner of selection
//! state: at most one place is selected, and the previous selection is cleared
//! before the next one is applied.

use crate::geo::{distance_km, format_distance, Coordinate};
use crate::place::{Place, PlaceId, PlaceSummary};
use crate::store::PlaceStore;

/// Zoom level used when focusing a selected place.
pub const FOCUS_ZOOM: u8 = 17;

/// Marker-based rendering of the place set.
pub trait MapProjection {
    fn add_marker(&mut self, id: &PlaceId, coordinate: Coordinate, content: &PlaceSummary);
    fn remove_all_markers(&mut self);
    fn focus(&mut self, coordinate: Coordinate, zoom: u8);
    fn open_detail(&mut self, id: &PlaceId);
    fn close_detail(&mut self, id: &PlaceId);
}

/// Row-based rendering of the place set.
pub trait ListProjection {
    /// Replaces every row.
    fn render_rows(&mut self, rows: &[ListRow]);
    fn highlight_row(&mut self, id: &PlaceId);
    fn unhighlight_row(&mut self, id: &PlaceId);
    fn scroll_row_into_view(&mut self, id: &PlaceId);
}

/// One list row, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: PlaceId,
    pub summary: PlaceSummary,
    /// Distance from the search origin, e.g. `"240 m"`.
    pub distance: Option<String>,
}

pub struct SyncController<M, L> {
    store: PlaceStore,
    map: M,
    list: L,
    selected: Option<PlaceId>,
}

impl<M: MapProjection, L: ListProjection> SyncController<M, L> {
    pub fn new(map: M, list: L) -> Self {
        Self {
            store: PlaceStore::new(),
            map,
            list,
            selected: None,
        }
    }

    /// Replaces the store and rebuilds both projections from scratch.
    ///
    /// Any previous selection is dropped along with the old result set.
    pub fn render_all(&mut self, places: Vec<Place>, origin: Option<Coordinate>) {
        self.store.replace(places);
        self.selected = None;

        self.map.remove_all_markers();
        for place in self.store.all() {
            self.map
                .add_marker(&place.id, place.coordinate, &place.summary());
        }

        let rows: Vec<ListRow> = self
            .store
            .all()
            .iter()
            .map(|place| ListRow {
                id: place.id.clone(),
                summary: place.summary(),
                distance: origin.map(|o| format_distance(distance_km(o, place.coordinate))),
            })
            .collect();
        self.list.render_rows(&rows);
    }

    /// Selects the place with `id` in both projections.
    ///
    /// Returns `false` when nothing changed: the id is unknown to the current
    /// store, or it is already selected.
    pub fn select(&mut self, id: &PlaceId) -> bool {
        if self.selected.as_ref() == Some(id) {
            return false;
        }
        let Some(coordinate) = self.store.get(id).map(|p| p.coordinate) else {
            tracing::warn!(%id, "ignoring selection of unknown place");
            return false;
        };

        if let Some(previous) = self.selected.take() {
            if let Some(place) = self.store.get_mut(&previous) {
                place.set_selected(false);
            }
            self.map.close_detail(&previous);
            self.list.unhighlight_row(&previous);
        }

        if let Some(place) = self.store.get_mut(id) {
            place.set_selected(true);
        }
        self.selected = Some(id.clone());

        self.map.focus(coordinate, FOCUS_ZOOM);
        self.map.open_detail(id);
        self.list.scroll_row_into_view(id);
        self.list.highlight_row(id);
        true
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Place> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    #[must_use]
    pub fn store(&self) -> &PlaceStore {
        &self.store
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording projections shared by the sync and session tests.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum MapCall {
        AddMarker(PlaceId),
        RemoveAll,
        Focus(Coordinate, u8),
        OpenDetail(PlaceId),
        CloseDetail(PlaceId),
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingMap {
        pub(crate) calls: Vec<MapCall>,
        pub(crate) markers: Vec<PlaceId>,
    }

    impl MapProjection for RecordingMap {
        fn add_marker(&mut self, id: &PlaceId, _coordinate: Coordinate, _content: &PlaceSummary) {
            self.markers.push(id.clone());
            self.calls.push(MapCall::AddMarker(id.clone()));
        }

        fn remove_all_markers(&mut self) {
            self.markers.clear();
            self.calls.push(MapCall::RemoveAll);
        }

        fn focus(&mut self, coordinate: Coordinate, zoom: u8) {
            self.calls.push(MapCall::Focus(coordinate, zoom));
        }

        fn open_detail(&mut self, id: &PlaceId) {
            self.calls.push(MapCall::OpenDetail(id.clone()));
        }

        fn close_detail(&mut self, id: &PlaceId) {
            self.calls.push(MapCall::CloseDetail(id.clone()));
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingList {
        pub(crate) rows: Vec<ListRow>,
        pub(crate) highlighted: Vec<PlaceId>,
        pub(crate) scrolled_to: Vec<PlaceId>,
    }

    impl ListProjection for RecordingList {
        fn render_rows(&mut self, rows: &[ListRow]) {
            self.rows = rows.to_vec();
            self.highlighted.clear();
        }

        fn highlight_row(&mut self, id: &PlaceId) {
            self.highlighted.push(id.clone());
        }

        fn unhighlight_row(&mut self, id: &PlaceId) {
            self.highlighted.retain(|h| h != id);
        }

        fn scroll_row_into_view(&mut self, id: &PlaceId) {
            self.scrolled_to.push(id.clone());
        }
    }
}
