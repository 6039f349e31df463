//! # AR Equipment Interface
//!
//! Structures exchanged with the AR engine (tracking state in, marker pose out) and with the UI
//! layer (instruction banner).

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Background colour of the banner on the final step (ARGB).
pub const COLOUR_SUCCESS_ARGB: u32 = 0xFF99_CC00;

/// Background colour of the banner when a turn is close (ARGB).
pub const COLOUR_WARNING_ARGB: u32 = 0xFFFF_BB33;

/// Background colour of the banner otherwise (ARGB).
pub const COLOUR_NEUTRAL_ARGB: u32 = 0xFFFF_FFFF;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Pose of the guidance marker in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPose {
    /// Position of the marker relative to the viewer.
    ///
    /// Units: render-space meters,
    /// Frame: Scene, X right, Y up, Z backwards (forward is -Z)
    pub position_m: Vector3<f64>,

    /// Rotation of the marker about the scene's Y axis. Not normalised, so values above 360 are
    /// possible.
    ///
    /// Units: degrees
    pub rotation_y_deg: f64,

    /// Uniform scale of the marker
    pub scale: f64,

    /// Whether the marker should be drawn
    pub visible: bool,
}

/// State of the instruction banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub banner_visible: bool,

    /// The raw instruction
    pub primary_text: String,

    /// Icon and formatted distance
    pub secondary_text: String,

    pub background: BackgroundCategory,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Camera tracking state reported by the AR engine each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    /// The camera pose is being estimated reliably
    Tracking,

    /// Tracking is temporarily lost, it may resume
    Paused,

    /// Tracking has stopped and will not resume
    Stopped,
}

/// Background category of the instruction banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundCategory {
    Destination,
    NearTurn,
    Default,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MarkerPose {
    /// A hidden marker at the given position with unit scale.
    pub fn hidden_at(position_m: Vector3<f64>) -> Self {
        Self {
            position_m,
            rotation_y_deg: 0.0,
            scale: 1.0,
            visible: false,
        }
    }

    /// Rotation about the Y axis in radians, as most renderers expect.
    pub fn rotation_y_rad(&self) -> f64 {
        self.rotation_y_deg.to_radians()
    }

    /// The marker's rotation as a rotation matrix about the scene Y axis.
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation_y_rad())
    }
}

impl TrackingState {
    /// Parse a tracking state from its upper case name, for example `"TRACKING"`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TRACKING" => Some(TrackingState::Tracking),
            "PAUSED" => Some(TrackingState::Paused),
            "STOPPED" => Some(TrackingState::Stopped),
            _ => None,
        }
    }

    /// True if the engine is actively tracking.
    pub fn is_tracking(&self) -> bool {
        *self == TrackingState::Tracking
    }
}

impl BackgroundCategory {
    /// The ARGB colour the renderer should use for this category.
    pub fn colour_argb(&self) -> u32 {
        match self {
            BackgroundCategory::Destination => COLOUR_SUCCESS_ARGB,
            BackgroundCategory::NearTurn => COLOUR_WARNING_ARGB,
            BackgroundCategory::Default => COLOUR_NEUTRAL_ARGB,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
