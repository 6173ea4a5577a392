#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! WZDx road event feed types and vehicle impact severity definitions.
//!
//! These types describe the already-translated WZDx `GeoJSON` feeds that the
//! combination engine consumes. Only the members the engine reads are
//! modelled explicitly; everything else is carried through untouched in
//! flattened `extra` maps so a feed survives a round trip intact.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A JSON object holding members this crate does not interpret.
pub type ExtraMembers = serde_json::Map<String, serde_json::Value>;

/// How much a work zone restricts travel, from `unknown` up to
/// `all-lanes-closed`.
///
/// [`VehicleImpact::rank`] gives the explicit ordinal used for
/// comparisons. Feeds may carry values outside this table; those are kept
/// verbatim in [`RoadEventProperties::vehicle_impact`] and only rank as
/// [`VehicleImpact::Unknown`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VehicleImpact {
    /// Work zone present but every lane is open
    AllLanesOpen,
    /// One or more lanes closed
    SomeLanesClosed,
    /// Traffic alternates through a single open lane
    AlternatingOneWay,
    /// Road fully closed
    AllLanesClosed,
    /// Impact not reported. Unrecognized values also land here.
    #[default]
    #[serde(other)]
    Unknown,
}

impl VehicleImpact {
    /// Returns the severity ordinal, `0` (`unknown`) through `4`
    /// (`all-lanes-closed`).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::AllLanesOpen => 1,
            Self::SomeLanesClosed => 2,
            Self::AlternatingOneWay => 3,
            Self::AllLanesClosed => 4,
        }
    }

    /// Parses a WZDx vehicle impact string, falling back to
    /// [`VehicleImpact::Unknown`] for anything unrecognized.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or(Self::Unknown)
    }

    /// Picks the more severe of two impacts.
    ///
    /// `source` only wins when it ranks strictly higher; ties keep the
    /// existing `destination` value.
    #[must_use]
    pub const fn resolve(source: Self, destination: Self) -> Self {
        if source.rank() > destination.rank() {
            source
        } else {
            destination
        }
    }

    /// Returns all variants in ascending severity.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Unknown,
            Self::AllLanesOpen,
            Self::SomeLanesClosed,
            Self::AlternatingOneWay,
            Self::AllLanesClosed,
        ]
    }
}

/// An upstream feed descriptor listed in `road_event_feed_info.data_sources`.
///
/// Opaque to the engine apart from equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSource(pub ExtraMembers);

impl DataSource {
    /// Returns the `data_source_id` member, if present and a string.
    #[must_use]
    pub fn data_source_id(&self) -> Option<&str> {
        self.0
            .get("data_source_id")
            .and_then(serde_json::Value::as_str)
    }
}

/// Feed-level metadata of a WZDx feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadEventFeedInfo {
    /// Upstream feeds that contributed to this feed, in order.
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
    #[serde(flatten)]
    pub extra: ExtraMembers,
}

/// Properties of a single road event feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadEventProperties {
    /// Raw WZDx `vehicle_impact` value, written back exactly as read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_impact: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraMembers,
}

impl RoadEventProperties {
    /// Returns the raw `vehicle_impact` string, empty when absent.
    #[must_use]
    pub fn vehicle_impact_str(&self) -> &str {
        self.vehicle_impact.as_deref().unwrap_or_default()
    }

    /// Returns the ranked impact. Absent or unrecognized values are
    /// [`VehicleImpact::Unknown`].
    #[must_use]
    pub fn impact(&self) -> VehicleImpact {
        VehicleImpact::parse_lossy(self.vehicle_impact_str())
    }
}

/// One `GeoJSON` feature describing a road event.
///
/// Identity is positional: the engine refers to features by their index
/// in [`FeedCollection::features`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadEventFeature {
    #[serde(default)]
    pub properties: RoadEventProperties,
    /// Road geometry, `[longitude, latitude]` positions. `None` when the
    /// feed carries a `null` geometry.
    #[serde(default)]
    pub geometry: Option<geojson::Geometry>,
    #[serde(flatten)]
    pub extra: ExtraMembers,
}

/// A WZDx feature collection: feed metadata plus road event features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedCollection {
    #[serde(default)]
    pub road_event_feed_info: RoadEventFeedInfo,
    #[serde(default)]
    pub features: Vec<RoadEventFeature>,
    #[serde(flatten)]
    pub extra: ExtraMembers,
}

impl FeedCollection {
    /// Returns the feed's data sources.
    #[must_use]
    pub fn data_sources(&self) -> &[DataSource] {
        &self.road_event_feed_info.data_sources
    }
}
