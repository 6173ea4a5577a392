//! Finds source road events that fall inside a destination buffer.
//!
//! Candidate features are loaded into an R-tree keyed by their bounding
//! boxes so each buffer only tests the vertices of features whose extent
//! overlaps it. Results are identical to scanning every feature in order.

use geo::{BoundingRect, Coord, Geometry, LineString, Point, Polygon, Rect};
use rstar::{AABB, RTree, RTreeObject};
use wzdx_feed_models::FeedCollection;

/// A candidate feature's position in its collection plus its extent.
struct CandidateEntry {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CandidateEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over the features of one candidate collection.
///
/// Build once per source collection and query with every destination
/// buffer.
pub struct FeatureIndex {
    tree: RTree<CandidateEntry>,
    /// Vertices of every feature, indexed like the collection's features.
    vertices: Vec<Vec<Coord<f64>>>,
}

impl FeatureIndex {
    /// Indexes every feature of `candidates`. Features without geometry or
    /// vertices are kept out of the tree and can never match.
    #[must_use]
    pub fn new(candidates: &FeedCollection) -> Self {
        let vertices: Vec<Vec<Coord<f64>>> = candidates
            .features
            .iter()
            .map(|feature| {
                feature
                    .geometry
                    .as_ref()
                    .map(wzdx_spatial::vertices)
                    .unwrap_or_default()
            })
            .collect();

        let entries: Vec<CandidateEntry> = vertices
            .iter()
            .enumerate()
            .filter_map(|(index, coords)| {
                let rect = LineString::new(coords.clone()).bounding_rect()?;
                Some(CandidateEntry {
                    index,
                    envelope: to_envelope(rect),
                })
            })
            .collect();

        log::trace!(
            "Indexed {} of {} candidate features",
            entries.len(),
            vertices.len()
        );

        Self {
            tree: RTree::bulk_load(entries),
            vertices,
        }
    }

    /// Returns the indexes of candidate features with at least one vertex
    /// strictly inside `buffer`, ascending.
    ///
    /// A feature appears at most once no matter how many of its vertices
    /// match.
    #[must_use]
    pub fn find_matches(&self, buffer: &Polygon<f64>) -> Vec<usize> {
        let Some(rect) = buffer.bounding_rect() else {
            return Vec::new();
        };

        let mut candidates: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&to_envelope(rect))
            .map(|entry| entry.index)
            .collect();
        candidates.sort_unstable();

        let buffer = Geometry::Polygon(buffer.clone());

        candidates
            .into_iter()
            .filter(|&index| {
                self.vertices[index].iter().any(|coord| {
                    let point = Geometry::Point(Point::from(*coord));
                    wzdx_spatial::point_in_polygon(&point, &buffer) == Some(true)
                })
            })
            .collect()
    }

    /// Number of features in the indexed collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the indexed collection had no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Returns the indexes of features in `candidates` with at least one
/// vertex inside `buffer`, in ascending order.
///
/// Builds a throwaway [`FeatureIndex`]; reuse one directly when matching
/// many buffers against the same collection.
#[must_use]
pub fn find_matches(buffer: &Polygon<f64>, candidates: &FeedCollection) -> Vec<usize> {
    FeatureIndex::new(candidates).find_matches(buffer)
}

fn to_envelope(rect: Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y])
}
