//! Overpass QL for the nearby amenity search.

use nearby_core::Coordinate;

/// Amenity values included in a nearby search.
pub const AMENITIES: &[&str] = &["fast_food", "restaurant", "cafe", "bar", "pub"];

/// Server-side evaluation limit passed in the query header, in seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Builds the query for named-or-not amenity nodes within `radius_m` of
/// `origin`. Name filtering happens client-side during normalization.
#[must_use]
pub fn build_nearby_query(origin: Coordinate, radius_m: u32) -> String {
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\
         (node[\"amenity\"~\"^({})$\"](around:{radius_m},{},{}););\
         out body;",
        AMENITIES.join("|"),
        origin.lat,
        origin.lng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_embeds_radius_and_origin() {
        let q = build_nearby_query(
            Coordinate {
                lat: 19.4326,
                lng: -99.1332,
            },
            2000,
        );
        assert_eq!(
            q,
            "[out:json][timeout:25];\
             (node[\"amenity\"~\"^(fast_food|restaurant|cafe|bar|pub)$\"](around:2000,19.4326,-99.1332););\
             out body;"
        );
    }

    #[test]
    fn query_keeps_full_coordinate_precision() {
        let q = build_nearby_query(
            Coordinate {
                lat: 51.507_350_9,
                lng: -0.127_758_3,
            },
            500,
        );
        assert!(q.contains("(around:500,51.5073509,-0.1277583)"), "{q}");
    }
}
