//! Reconciles a source feed against a destination feed.

use wzdx_feed_models::FeedCollection;
use wzdx_spatial::build_buffer;

use crate::{CombineConfig, FeatureIndex, combine};

/// Reconciles `source` into a copy of `destination` using the default
/// 100 m corridor.
///
/// See [`reconcile_with`].
#[must_use]
pub fn reconcile(source: &FeedCollection, destination: &FeedCollection) -> Option<FeedCollection> {
    reconcile_with(source, destination, &CombineConfig::default())
}

/// Merges every source road event lying within a destination road
/// event's buffer corridor into a copy of `destination`.
///
/// Buffers are always built from the unmodified `destination` geometry.
/// Destination features whose geometry is not a line of at least two
/// points are skipped. Matches are applied in ascending source order.
///
/// Returns `None` when the merged copy equals `destination`, meaning
/// there is nothing to write. Neither input is modified.
#[must_use]
pub fn reconcile_with(
    source: &FeedCollection,
    destination: &FeedCollection,
    config: &CombineConfig,
) -> Option<FeedCollection> {
    let mut combined = destination.clone();
    let index = FeatureIndex::new(source);
    let mut merges = 0_usize;

    for (i, feature) in destination.features.iter().enumerate() {
        let line = feature
            .geometry
            .as_ref()
            .map(wzdx_spatial::centerline)
            .unwrap_or_default();

        let Some(buffer) = build_buffer(&line, config.polygon_width_meters) else {
            log::debug!(
                "Skipping destination feature {i}: {} centerline points",
                line.len()
            );
            continue;
        };

        let matches = index.find_matches(&buffer);
        if !matches.is_empty() {
            log::debug!("Destination feature {i} matched source features {matches:?}");
        }

        for source_index in matches {
            if combine(&mut combined, i, source, source_index) {
                merges += 1;
            }
        }
    }

    if combined == *destination {
        log::info!(
            "No source features matched {} destination features",
            destination.features.len()
        );
        return None;
    }

    log::info!(
        "Combined {merges} source matches into {} destination features",
        destination.features.len()
    );
    Some(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use wzdx_feed_models::{DataSource, VehicleImpact};

    #[test]
    fn matching_source_is_merged() {
        let source = fixtures::source_on_road();
        let destination = fixtures::destination();

        let combined = reconcile(&source, &destination).expect("features should combine");

        assert_eq!(
            combined.features[0].properties.impact(),
            VehicleImpact::AllLanesClosed
        );
        let ids: Vec<&str> = combined
            .data_sources()
            .iter()
            .filter_map(DataSource::data_source_id)
            .collect();
        assert_eq!(
            ids,
            vec![fixtures::DESTINATION_SOURCE_ID, fixtures::SOURCE_SOURCE_ID]
        );
    }

    #[test]
    fn distant_source_yields_none() {
        let source = fixtures::source_off_road();
        let destination = fixtures::destination();
        let before = destination.clone();

        assert!(reconcile(&source, &destination).is_none());
        assert_eq!(destination, before);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let source = fixtures::source_on_road();
        let destination = fixtures::destination();
        let source_before = serde_json::to_string(&source).unwrap();
        let destination_before = serde_json::to_string(&destination).unwrap();

        let _ = reconcile(&source, &destination);

        assert_eq!(serde_json::to_string(&source).unwrap(), source_before);
        assert_eq!(
            serde_json::to_string(&destination).unwrap(),
            destination_before
        );
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let source = fixtures::source_on_road();
        let destination = fixtures::destination();

        let first = reconcile(&source, &destination);
        let second = reconcile(&source, &destination);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn short_lines_are_skipped() {
        let source = fixtures::source_on_road();
        let destination = fixtures::collection(
            fixtures::DESTINATION_SOURCE_ID,
            &[
                ("unknown", serde_json::json!([[-104.480108, 37.0079]])),
                ("unknown", serde_json::json!([])),
            ],
        );

        assert!(reconcile(&source, &destination).is_none());
    }

    #[test]
    fn only_matching_destination_features_change() {
        let source = fixtures::source_on_road();
        let destination = fixtures::collection(
            fixtures::DESTINATION_SOURCE_ID,
            &[
                ("some-lanes-closed", serde_json::json!([[-105.0, 39.0], [-105.0, 39.001]])),
                ("unknown", serde_json::json!([[-104.48011, 37.007645], [-104.480103, 37.008034]])),
            ],
        );

        let combined = reconcile(&source, &destination).unwrap();
        assert_eq!(combined.features[0], destination.features[0]);
        assert_eq!(
            combined.features[1].properties.impact(),
            VehicleImpact::AllLanesClosed
        );
    }

    #[test]
    fn multiple_matches_accumulate_on_one_feature() {
        let source = fixtures::collection(
            fixtures::SOURCE_SOURCE_ID,
            &[
                ("alternating-one-way", serde_json::json!([[-104.480108, 37.0079]])),
                ("all-lanes-open", serde_json::json!([[-104.480106, 37.0077]])),
            ],
        );
        let destination = fixtures::destination();

        let combined = reconcile(&source, &destination).unwrap();
        assert_eq!(
            combined.features[0].properties.impact(),
            VehicleImpact::AlternatingOneWay
        );
        assert_eq!(combined.data_sources().len(), 2);
    }

    #[test]
    fn match_with_nothing_new_is_a_no_op() {
        let destination = fixtures::collection(
            fixtures::DESTINATION_SOURCE_ID,
            &[(
                "all-lanes-closed",
                serde_json::json!([[-104.48011, 37.007645], [-104.480103, 37.008034]]),
            )],
        );
        let source = fixtures::collection(
            fixtures::DESTINATION_SOURCE_ID,
            &[("some-lanes-closed", serde_json::json!([[-104.480108, 37.0079]]))],
        );

        assert!(reconcile(&source, &destination).is_none());
    }

    #[test]
    fn unrecognized_impacts_are_written_back_verbatim() {
        let source = fixtures::collection(
            fixtures::SOURCE_SOURCE_ID,
            &[("unknown", serde_json::json!([[-104.480108, 37.0079]]))],
        );
        let destination = fixtures::collection(
            fixtures::DESTINATION_SOURCE_ID,
            &[
                (
                    "flagging",
                    serde_json::json!([[-104.48011, 37.007645], [-104.480103, 37.008034]]),
                ),
                (
                    "some-lanes-closed-merge-left",
                    serde_json::json!([[-105.0, 39.0], [-105.0, 39.001]]),
                ),
            ],
        );

        let combined = reconcile(&source, &destination).expect("data sources should merge");
        let json = serde_json::to_value(&combined).unwrap();
        assert_eq!(
            json["features"][0]["properties"]["vehicle_impact"],
            serde_json::json!("flagging")
        );
        assert_eq!(
            json["features"][1]["properties"]["vehicle_impact"],
            serde_json::json!("some-lanes-closed-merge-left")
        );
        assert_eq!(combined.data_sources().len(), 2);
    }

    #[test]
    fn wider_corridor_reaches_farther_sources() {
        // ~180 m east of the destination line
        let source = fixtures::collection(
            fixtures::SOURCE_SOURCE_ID,
            &[("all-lanes-closed", serde_json::json!([[-104.478100, 37.0079]]))],
        );
        let destination = fixtures::destination();

        assert!(reconcile(&source, &destination).is_none());

        let wide = CombineConfig::default()
            .with_polygon_width_meters(500.0)
            .unwrap();
        assert!(reconcile_with(&source, &destination, &wide).is_some());
    }
}
