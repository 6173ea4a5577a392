//! Geodesic buffer corridors around road centerlines.
//!
//! Each vertex is offset half the corridor width to the left and right of
//! its local heading using direct geodesic solutions on the WGS84
//! ellipsoid, never planar offsets.

use geo::{Bearing, Coord, Destination, Geodesic, LineString, Point, Polygon};

/// Total corridor width used when matching work zones (50 m each side).
pub const DEFAULT_POLYGON_WIDTH_METERS: f64 = 100.0;

/// Builds a closed buffer polygon of `width_meters` total width around
/// `line`.
///
/// The heading at vertex `i` is the forward geodesic bearing from vertex
/// `i - 1` to vertex `i` (from vertex `0` to vertex `1` for the first
/// one). The ring lists every left offset in vertex order, then every
/// right offset in reverse vertex order, then repeats the first left
/// offset. Any other ordering makes the ring cross itself.
///
/// Returns `None` when `line` has fewer than two coordinates.
#[must_use]
pub fn build_buffer(line: &[Coord<f64>], width_meters: f64) -> Option<Polygon<f64>> {
    if line.len() < 2 {
        return None;
    }

    let half_width = width_meters / 2.0;
    let mut left = Vec::with_capacity(line.len() * 2 + 1);
    let mut right = Vec::with_capacity(line.len());

    for (i, coord) in line.iter().enumerate() {
        let vertex = Point::from(*coord);
        let heading = if i == 0 {
            Geodesic.bearing(vertex, Point::from(line[1]))
        } else {
            Geodesic.bearing(Point::from(line[i - 1]), vertex)
        };

        left.push(Geodesic.destination(vertex, heading - 90.0, half_width).0);
        right.push(Geodesic.destination(vertex, heading + 90.0, half_width).0);
    }

    let first = left[0];
    let mut ring = left;
    ring.extend(right.into_iter().rev());
    ring.push(first);

    log::trace!(
        "Built {width_meters}m buffer with {} ring points from {} vertices",
        ring.len(),
        line.len()
    );

    Some(Polygon::new(LineString::new(ring), vec![]))
}
