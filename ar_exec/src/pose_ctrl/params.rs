//! Parameters structure for PoseCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for pose control.
///
/// Any parameter missing from the file takes its default value.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {
    // ---- TIMING ----
    /// Minimum time between two accepted updates. The gap must be strictly
    /// greater than this.
    ///
    /// Units: milliseconds
    pub update_interval_ms: i64,

    // ---- MARKER GEOMETRY ----
    /// Distance from the viewer at which the marker is drawn, independent of
    /// the real distance to the waypoint.
    ///
    /// Units: render-space meters
    pub render_distance_m: f64,

    /// Fixed vertical offset of the marker.
    ///
    /// Units: render-space meters
    pub vertical_offset_m: f64,

    /// Position the marker is placed at (hidden) when the asset loads.
    ///
    /// Units: render-space meters,
    /// Frame: Scene
    pub initial_position_m: [f64; 3],

    // ---- MARKER SCALE ----
    /// Marker scale table as `[upper_distance_m, scale]` bands, checked in
    /// order.
    pub scale_bands: Vec<[f64; 2]>,

    /// Marker scale beyond the last band.
    pub far_scale: f64,

    // ---- BANNER ----
    /// Below this distance the banner warns of a turn ahead.
    ///
    /// Units: meters
    pub near_turn_distance_m: f64,

    /// Below this distance the banner asks the user to continue.
    ///
    /// Units: meters
    pub continue_distance_m: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            update_interval_ms: 100,
            render_distance_m: 2.0,
            vertical_offset_m: -0.3,
            initial_position_m: [0.0, -0.5, -2.0],
            // Three bands with the same scale, tune here
            scale_bands: vec![[10.0, 0.5], [50.0, 0.5], [200.0, 0.5]],
            far_scale: 0.8,
            near_turn_distance_m: 50.0,
            continue_distance_m: 200.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_params_file() {
        let p: Params = util::params::parse("update_interval_ms = 250\nfar_scale = 1.0").unwrap();

        assert_eq!(p.update_interval_ms, 250);
        assert_eq!(p.far_scale, 1.0);
        assert_eq!(p.render_distance_m, 2.0);
        assert_eq!(p.scale_bands.len(), 3);
    }
}
