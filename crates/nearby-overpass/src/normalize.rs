//! Normalization from raw Overpass elements to [`nearby_core::Place`].

use nearby_core::{Coordinate, Place, PlaceId};

use crate::types::OverpassElement;

/// Converts raw elements into places, in source order.
///
/// Elements without a non-blank `name` tag are dropped: they add nothing to
/// the list. Elements without a valid position are dropped as well, and so
/// is anything other than a node, since node ids and way ids overlap. The
/// place id is the source id, verbatim.
#[must_use]
pub fn normalize_elements(elements: Vec<OverpassElement>) -> Vec<Place> {
    let total = elements.len();
    let places: Vec<Place> = elements.into_iter().filter_map(normalize_element).collect();
    if places.len() < total {
        tracing::debug!(
            total,
            kept = places.len(),
            "dropped unusable elements"
        );
    }
    places
}

fn normalize_element(element: OverpassElement) -> Option<Place> {
    if let Some(kind) = element.element_type.as_deref().filter(|t| *t != "node") {
        tracing::debug!(id = element.id, kind, "skipping non-node element");
        return None;
    }

    let has_name = element
        .tags
        .get("name")
        .is_some_and(|n| !n.trim().is_empty());
    if !has_name {
        return None;
    }

    let coordinate = match (element.lat, element.lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon)
            .map_err(|e| tracing::warn!(id = element.id, error = %e, "skipping element"))
            .ok()?,
        _ => {
            tracing::warn!(id = element.id, "skipping element without position");
            return None;
        }
    };

    Some(Place::new(PlaceId::from(element.id), coordinate, element.tags))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn element(id: i64, name: Option<&str>) -> OverpassElement {
        let mut tags = BTreeMap::new();
        tags.insert("amenity".to_owned(), "restaurant".to_owned());
        if let Some(name) = name {
            tags.insert("name".to_owned(), name.to_owned());
        }
        OverpassElement {
            element_type: Some("node".to_owned()),
            id,
            lat: Some(19.43),
            lon: Some(-99.13),
            tags,
        }
    }

    #[test]
    fn unnamed_elements_are_dropped_preserving_order() {
        let places = normalize_elements(vec![
            element(5, Some("Los Cocuyos")),
            element(4, None),
            element(3, Some("Café El Jarocho")),
            element(2, Some("  ")),
            element(1, Some("La Opera")),
        ]);
        let ids: Vec<_> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["5", "3", "1"]);
    }

    #[test]
    fn id_and_tags_are_preserved() {
        let places = normalize_elements(vec![element(9_876_543_210, Some("Pujol"))]);
        assert_eq!(places[0].id, PlaceId::from(9_876_543_210));
        assert_eq!(places[0].tag("amenity"), Some("restaurant"));
        assert!(!places[0].is_selected());
    }

    #[test]
    fn elements_without_position_are_dropped() {
        let mut no_pos = element(1, Some("Way restaurant"));
        no_pos.lat = None;
        let mut bad_pos = element(2, Some("Broken"));
        bad_pos.lat = Some(95.0);
        assert!(normalize_elements(vec![no_pos, bad_pos]).is_empty());
    }

    #[test]
    fn non_node_elements_are_dropped() {
        let mut way = element(7, Some("Mercado de San Juan"));
        way.element_type = Some("way".to_owned());
        let mut untyped = element(8, Some("Contramar"));
        untyped.element_type = None;
        let ids: Vec<_> = normalize_elements(vec![way, untyped])
            .iter()
            .map(|p| p.id.as_str().to_owned())
            .collect();
        assert_eq!(ids, ["8"]);
    }
}
