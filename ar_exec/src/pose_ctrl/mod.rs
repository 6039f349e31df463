//! Pose control module
//!
//! Decides once per frame whether the guidance marker and instruction banner should be updated,
//! and if so computes where the marker goes and what the banner says.
//!
//! An update is only produced when all of these hold:
//!
//! 1. The marker asset has finished loading (successfully or not).
//! 2. The AR engine is actively tracking.
//! 3. More than `update_interval_ms` has passed since the last update, or there has never been
//!    one.
//! 4. A navigation sample has been received.
//!
//! The marker always floats at the same render distance from the viewer, only its direction
//! follows the sample's bearing.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod display;
mod params;
mod pose;
mod state;
mod throttle;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use display::*;
pub use params::*;
pub use pose::*;
pub use state::*;
pub use throttle::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Availability of the marker model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAsset {
    /// Still loading, no updates are produced
    Pending,

    /// Loaded, marker and banner updates are produced
    Loaded,

    /// Failed to load, only banner updates are produced
    Unavailable,
}

/// Possible errors that can occur during PoseCtrl processing.
#[derive(Debug, thiserror::Error)]
pub enum PoseCtrlError {
    #[error("Navigation sample has a non-finite distance ({0})")]
    NonFiniteDistance(f64),

    #[error("Navigation sample has a non-finite bearing ({0})")]
    NonFiniteBearing(f64),
}

impl Default for MarkerAsset {
    fn default() -> Self {
        MarkerAsset::Pending
    }
}
