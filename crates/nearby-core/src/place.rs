//! Domain types for discovered places.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Source-assigned identifier, preserved verbatim from the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for PlaceId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point of interest from one result set.
///
/// `selected` is the only field that changes after creation, and only the
/// [`crate::SyncController`] changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub coordinate: Coordinate,
    /// Raw source tags (`name`, `amenity`, `cuisine`, `addr:*`, ...).
    pub tags: BTreeMap<String, String>,
    #[serde(skip)]
    selected: bool,
}

impl Place {
    #[must_use]
    pub fn new(id: PlaceId, coordinate: Coordinate, tags: BTreeMap<String, String>) -> Self {
        Self {
            id,
            coordinate,
            tags,
            selected: false,
        }
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tag("name")
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    #[must_use]
    pub fn summary(&self) -> PlaceSummary {
        PlaceSummary::from_place(self)
    }
}

/// Markup-free content shown in a marker popup or a list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceSummary {
    pub name: String,
    pub category: String,
    pub cuisine: Option<String>,
    pub address: Option<String>,
}

impl PlaceSummary {
    fn from_place(place: &Place) -> Self {
        Self {
            name: place.name().unwrap_or("Unnamed").to_owned(),
            category: place
                .tag("amenity")
                .map_or_else(|| "Place".to_owned(), category_label),
            cuisine: place.tag("cuisine").map(cuisine_label),
            address: address_line(place),
        }
    }
}

fn category_label(amenity: &str) -> String {
    match amenity {
        "restaurant" => "Restaurant".to_owned(),
        "fast_food" => "Fast food".to_owned(),
        "cafe" => "Café".to_owned(),
        "bar" => "Bar".to_owned(),
        "pub" => "Pub".to_owned(),
        other => other.replace('_', " "),
    }
}

/// `mexican;tacos` -> `mexican, tacos`; `ice_cream` -> `ice cream`.
fn cuisine_label(raw: &str) -> String {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ")
}

fn address_line(place: &Place) -> Option<String> {
    let street = place.tag("addr:street")?;
    let mut line = match place.tag("addr:housenumber") {
        Some(number) => format!("{street} {number}"),
        None => street.to_owned(),
    };
    if let Some(city) = place.tag("addr:city") {
        line.push_str(", ");
        line.push_str(city);
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_with(tags: &[(&str, &str)]) -> Place {
        Place::new(
            PlaceId::from(42),
            Coordinate {
                lat: 19.43,
                lng: -99.13,
            },
            tags.iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn place_id_from_integer_is_verbatim() {
        assert_eq!(PlaceId::from(1_234_567_890_123).as_str(), "1234567890123");
    }

    #[test]
    fn new_place_is_not_selected() {
        assert!(!place_with(&[("name", "Taquería")]).is_selected());
    }

    #[test]
    fn blank_tags_read_as_absent() {
        let place = place_with(&[("name", "   ")]);
        assert_eq!(place.name(), None);
    }

    #[test]
    fn summary_maps_known_amenities_and_address() {
        let place = place_with(&[
            ("name", "El Califa"),
            ("amenity", "fast_food"),
            ("cuisine", "mexican;tacos"),
            ("addr:street", "Calle Altata"),
            ("addr:housenumber", "22"),
            ("addr:city", "Ciudad de México"),
        ]);
        let summary = place.summary();
        assert_eq!(summary.name, "El Califa");
        assert_eq!(summary.category, "Fast food");
        assert_eq!(summary.cuisine.as_deref(), Some("mexican, tacos"));
        assert_eq!(
            summary.address.as_deref(),
            Some("Calle Altata 22, Ciudad de México")
        );
    }

    #[test]
    fn summary_falls_back_for_unknown_amenity_and_missing_street() {
        let place = place_with(&[
            ("name", "Nevería"),
            ("amenity", "ice_cream"),
            ("addr:housenumber", "5"),
        ]);
        let summary = place.summary();
        assert_eq!(summary.category, "ice cream");
        assert_eq!(summary.cuisine, None);
        assert_eq!(summary.address, None);
    }

    #[test]
    fn selected_flag_is_not_serialized() {
        let mut place = place_with(&[("name", "Café Avellaneda")]);
        place.set_selected(true);
        let json = serde_json::to_value(&place).unwrap();
        assert!(json.get("selected").is_none());
        let back: Place = serde_json::from_value(json).unwrap();
        assert!(!back.is_selected());
    }
}
