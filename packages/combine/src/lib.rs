#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Combines overlapping work zone reports from two WZDx feeds.
//!
//! A vendor sensor feed (the *source*) and a state DOT feed (the
//! *destination*) often describe the same physical work zone. For every
//! destination road event a geodesic buffer corridor is drawn around its
//! centerline; any source event with a vertex inside that corridor is
//! treated as the same work zone and merged in:
//!
//! 1. `vehicle_impact` becomes the more severe of the two values
//!    (ties keep the destination's value).
//! 2. The source feed's data sources are appended to the destination's
//!    list, skipping entries already present.
//!
//! [`reconcile`] returns the merged copy of the destination feed, or
//! `None` when nothing matched.

pub mod combiner;
pub mod config;
pub mod matcher;
pub mod reconcile;

pub use combiner::{combine, resolve_severity};
pub use config::CombineConfig;
pub use matcher::{FeatureIndex, find_matches};
pub use reconcile::{reconcile, reconcile_with};

/// Errors from the fallible edges of the combiner: configuration and feed
/// file I/O. Reconciliation itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },
}
