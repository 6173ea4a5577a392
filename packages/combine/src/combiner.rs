//! Merges one matched source road event into a destination road event.

use wzdx_feed_models::{FeedCollection, VehicleImpact};

/// Returns whichever of two WZDx vehicle impact strings is more severe.
///
/// Unrecognized strings rank as `unknown`. `source` is returned only when
/// it ranks strictly higher; ties keep `destination`.
#[must_use]
pub fn resolve_severity<'a>(source: &'a str, destination: &'a str) -> &'a str {
    let source_rank = VehicleImpact::parse_lossy(source).rank();
    let destination_rank = VehicleImpact::parse_lossy(destination).rank();
    if source_rank > destination_rank {
        source
    } else {
        destination
    }
}

/// Merges `source.features[source_index]` into
/// `destination.features[destination_index]`.
///
/// The destination's `vehicle_impact` becomes the more severe of the two,
/// and every source data source not already listed is appended to the
/// destination's data sources, after the existing entries.
///
/// Returns `false`, leaving `destination` untouched, when either index is
/// out of range.
pub fn combine(
    destination: &mut FeedCollection,
    destination_index: usize,
    source: &FeedCollection,
    source_index: usize,
) -> bool {
    let Some(source_feature) = source.features.get(source_index) else {
        log::debug!(
            "Source index {source_index} out of range ({} features)",
            source.features.len()
        );
        return false;
    };
    let Some(destination_feature) = destination.features.get_mut(destination_index) else {
        log::debug!("Destination index {destination_index} out of range");
        return false;
    };

    let properties = &mut destination_feature.properties;
    let current = properties.vehicle_impact_str();
    let resolved = resolve_severity(source_feature.properties.vehicle_impact_str(), current);
    if resolved != current {
        log::debug!(
            "Feature {destination_index}: vehicle_impact {current:?} -> {resolved:?} from source feature {source_index}"
        );
        properties.vehicle_impact = source_feature.properties.vehicle_impact.clone();
    }

    let data_sources = &mut destination.road_event_feed_info.data_sources;
    for data_source in source.data_sources() {
        if !data_sources.contains(data_source) {
            data_sources.push(data_source.clone());
        }
    }

    true
}
