#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Geometry primitives for matching road events.
//!
//! Builds constant-width buffer corridors around road centerlines using
//! geodesic math on the WGS84 ellipsoid, and answers point-in-polygon
//! questions against them.
//!
//! All coordinates are `(longitude, latitude)` in decimal degrees, stored
//! as [`Coord`] with `x = longitude` and `y = latitude`, the same order
//! `GeoJSON` uses. Buffers and tests share that convention, so callers never
//! swap axes.

pub mod buffer;

pub use buffer::{DEFAULT_POLYGON_WIDTH_METERS, build_buffer};

use geo::{Contains, Coord, Geometry, Point, Polygon};

/// Tests whether `point` lies strictly inside `polygon`.
///
/// Returns `None` when `point` is not a [`Geometry::Point`] or `polygon`
/// is neither a [`Geometry::Polygon`] nor a [`Geometry::MultiPolygon`], so
/// callers can tell "could not determine" apart from "outside". Points on
/// the boundary are outside.
#[must_use]
pub fn point_in_polygon(point: &Geometry<f64>, polygon: &Geometry<f64>) -> Option<bool> {
    let Geometry::Point(point) = point else {
        return None;
    };

    match polygon {
        Geometry::Polygon(polygon) => Some(polygon.contains(point)),
        Geometry::MultiPolygon(polygons) => Some(polygons.contains(point)),
        _ => None,
    }
}

/// Typed shortcut for [`point_in_polygon`] when both shapes are known.
#[must_use]
pub fn contains_coord(polygon: &Polygon<f64>, coord: Coord<f64>) -> bool {
    polygon.contains(&Point::from(coord))
}

/// Returns every vertex of a point or line geometry, in order.
///
/// `Point`, `MultiPoint`, `LineString` and `MultiLineString` are
/// supported. Other geometry types yield no vertices, as do positions
/// with fewer than two ordinates.
#[must_use]
pub fn vertices(geometry: &geojson::Geometry) -> Vec<Coord<f64>> {
    match &geometry.value {
        geojson::Value::Point(position) => to_coord(position).into_iter().collect(),
        geojson::Value::MultiPoint(positions) | geojson::Value::LineString(positions) => {
            positions.iter().filter_map(|p| to_coord(p)).collect()
        }
        geojson::Value::MultiLineString(lines) => lines
            .iter()
            .flatten()
            .filter_map(|p| to_coord(p))
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns the centerline of a `LineString` geometry, or an empty list
/// for any other type.
#[must_use]
pub fn centerline(geometry: &geojson::Geometry) -> Vec<Coord<f64>> {
    match &geometry.value {
        geojson::Value::LineString(positions) => {
            positions.iter().filter_map(|p| to_coord(p)).collect()
        }
        _ => {
            log::trace!("Geometry is not a LineString; no centerline");
            Vec::new()
        }
    }
}

/// Converts a `GeoJSON` position (`[lon, lat, ...]`) into a [`Coord`].
/// Altitude is ignored.
fn to_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPolygon, polygon};

    fn unit_square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn point_inside_polygon() {
        let point = Geometry::Point(Point::new(0.5, 0.5));
        let polygon = Geometry::Polygon(unit_square());
        assert_eq!(point_in_polygon(&point, &polygon), Some(true));
    }

    #[test]
    fn point_outside_polygon() {
        let point = Geometry::Point(Point::new(1.5, 0.5));
        let polygon = Geometry::Polygon(unit_square());
        assert_eq!(point_in_polygon(&point, &polygon), Some(false));
    }

    #[test]
    fn multipolygon_is_supported() {
        let point = Geometry::Point(Point::new(0.25, 0.75));
        let polygon = Geometry::MultiPolygon(MultiPolygon(vec![unit_square()]));
        assert_eq!(point_in_polygon(&point, &polygon), Some(true));
    }

    #[test]
    fn wrong_geometry_types_give_no_answer() {
        let square = Geometry::Polygon(unit_square());
        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        let point = Geometry::Point(Point::new(0.5, 0.5));

        assert_eq!(point_in_polygon(&line, &square), None);
        assert_eq!(point_in_polygon(&point, &line), None);
        assert_eq!(point_in_polygon(&point, &point), None);
    }

    #[test]
    fn boundary_point_is_outside() {
        assert!(!contains_coord(&unit_square(), Coord { x: 0.0, y: 0.5 }));
        assert!(contains_coord(&unit_square(), Coord { x: 0.1, y: 0.5 }));
    }

    #[test]
    fn vertices_flatten_line_geometries() {
        let geometry = geojson::Geometry::new(geojson::Value::MultiLineString(vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0, 100.0]],
        ]));
        assert_eq!(
            vertices(&geometry),
            vec![
                Coord { x: 1.0, y: 2.0 },
                Coord { x: 3.0, y: 4.0 },
                Coord { x: 5.0, y: 6.0 },
            ]
        );
    }

    #[test]
    fn vertices_of_point_and_polygon() {
        let point = geojson::Geometry::new(geojson::Value::Point(vec![-104.48, 37.0]));
        assert_eq!(vertices(&point), vec![Coord { x: -104.48, y: 37.0 }]);

        let polygon = geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        assert!(vertices(&polygon).is_empty());
    }

    #[test]
    fn centerline_only_for_line_strings() {
        let line = geojson::Geometry::new(geojson::Value::LineString(vec![
            vec![-104.48011, 37.007645],
            vec![-104.480103, 37.008034],
        ]));
        assert_eq!(centerline(&line).len(), 2);

        let points = geojson::Geometry::new(geojson::Value::MultiPoint(vec![
            vec![-104.48011, 37.007645],
            vec![-104.480103, 37.008034],
        ]));
        assert!(centerline(&points).is_empty());
    }

    #[test]
    fn short_positions_are_dropped() {
        let line = geojson::Geometry::new(geojson::Value::LineString(vec![
            vec![1.0],
            vec![1.0, 2.0],
        ]));
        assert_eq!(vertices(&line), vec![Coord { x: 1.0, y: 2.0 }]);
    }
}
