use tracing::debug;

use crate::data::LatLng;
use crate::markers::MarkerSet;
use crate::surface::MapSurface;

/// Recenters on `at` and opens every pin placed exactly there.
///
/// Returns how many pins were opened; zero is not an error.
pub fn focus<S: MapSurface>(
    surface: &mut S,
    markers: &MarkerSet<S::Pin>,
    at: LatLng,
    zoom: f64,
) -> usize {
    surface.center_on(at, zoom);

    let mut opened = 0;
    for pin in markers.at(at) {
        surface.open_content(&pin.handle);
        opened += 1;
    }
    if opened == 0 {
        debug!(lat = at.lat, lng = at.lng, "no pin at focused coordinate");
    }
    opened
}
