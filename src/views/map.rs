// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Maps links for report locations.

use crate::models::Coordinates;

/// Map center used when no report location is known (Manaus).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: -3.1019,
    lng: -60.025,
};

const STATIC_MAP_ZOOM: u8 = 15;

/// Link that opens the location in Google Maps. Needs no API key.
pub fn maps_link(at: &Coordinates) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        at.lat, at.lng
    )
}

/// Static map image with a marker, or `None` without an API key.
pub fn static_map_url(at: &Coordinates, api_key: Option<&str>) -> Option<String> {
    let key = api_key?;
    Some(format!(
        "https://maps.googleapis.com/maps/api/staticmap?center={lat},{lng}&zoom={zoom}\
         &size=600x300&markers={lat},{lng}&key={key}",
        lat = at.lat,
        lng = at.lng,
        zoom = STATIC_MAP_ZOOM,
        key = urlencoding::encode(key),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(
            maps_link(&DEFAULT_CENTER),
            "https://www.google.com/maps/search/?api=1&query=-3.1019,-60.025"
        );
        assert_eq!(static_map_url(&DEFAULT_CENTER, None), None);
        let url = static_map_url(&DEFAULT_CENTER, Some("k3y")).unwrap();
        assert!(url.ends_with("&key=k3y"));
        assert!(url.contains("markers=-3.1019,-60.025"));
    }
}
