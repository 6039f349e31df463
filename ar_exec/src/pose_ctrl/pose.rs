//! Marker pose calculation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;

// Internal
use super::{Params, PoseCtrlError};
use comms_if::{eqpt::ar::MarkerPose, nav::NavSample};
use util::maths::{all_finite, band_lookup};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the marker pose for a navigation sample.
///
/// The marker sits on a circle of radius `render_distance_m` around the
/// viewer in the direction of the bearing, and is turned to face back along
/// it. The rotation is `bearing + 180` degrees and is not normalised.
pub fn calc_marker_pose(sample: &NavSample, params: &Params) -> Result<MarkerPose, PoseCtrlError> {
    check_sample(sample)?;

    let bearing_rad = sample.bearing_deg.to_radians();

    let position_m = Vector3::new(
        bearing_rad.sin() * params.render_distance_m,
        params.vertical_offset_m,
        -bearing_rad.cos() * params.render_distance_m,
    );

    Ok(MarkerPose {
        position_m,
        rotation_y_deg: sample.bearing_deg + 180.0,
        scale: calc_scale(sample.distance_m, params),
        visible: true,
    })
}

/// Scale of the marker for a given distance to the waypoint.
pub fn calc_scale(distance_m: f64, params: &Params) -> f64 {
    band_lookup(&params.scale_bands, distance_m, params.far_scale)
}

/// Check that the sample's numeric fields can be used.
pub fn check_sample(sample: &NavSample) -> Result<(), PoseCtrlError> {
    if all_finite(&[sample.distance_m, sample.bearing_deg]) {
        return Ok(());
    }

    if !sample.distance_m.is_finite() {
        return Err(PoseCtrlError::NonFiniteDistance(sample.distance_m));
    }
    Err(PoseCtrlError::NonFiniteBearing(sample.bearing_deg))
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    fn pose_for(bearing_deg: f64, distance_m: f64) -> MarkerPose {
        let sample = NavSample {
            distance_m,
            bearing_deg,
            ..Default::default()
        };
        calc_marker_pose(&sample, &Params::default()).unwrap()
    }

    #[test]
    fn test_cardinal_bearings() {
        let p = pose_for(0.0, 5.0);
        assert!(p.position_m.x.abs() < EPS);
        assert!((p.position_m.z + 2.0).abs() < EPS);

        let p = pose_for(90.0, 5.0);
        assert!((p.position_m.x - 2.0).abs() < EPS);
        assert!(p.position_m.z.abs() < EPS);

        let p = pose_for(180.0, 5.0);
        assert!(p.position_m.x.abs() < EPS);
        assert!((p.position_m.z - 2.0).abs() < EPS);

        let p = pose_for(-90.0, 5.0);
        assert!((p.position_m.x + 2.0).abs() < EPS);

        assert_eq!(p.position_m.y, -0.3);
        assert!(p.visible);
    }

    #[test]
    fn test_rotation_not_normalised() {
        assert_eq!(pose_for(0.0, 5.0).rotation_y_deg, 180.0);
        assert_eq!(pose_for(90.0, 5.0).rotation_y_deg, 270.0);
        assert_eq!(pose_for(200.0, 5.0).rotation_y_deg, 380.0);
        assert_eq!(pose_for(-170.0, 5.0).rotation_y_deg, 10.0);
    }

    #[test]
    fn test_scale() {
        let params = Params::default();

        assert_eq!(calc_scale(0.0, &params), 0.5);
        assert_eq!(calc_scale(9.9, &params), 0.5);
        assert_eq!(calc_scale(49.0, &params), 0.5);
        assert_eq!(calc_scale(199.99, &params), 0.5);
        assert_eq!(calc_scale(200.0, &params), 0.8);
        assert_eq!(calc_scale(5000.0, &params), 0.8);
    }

    #[test]
    fn test_non_finite_sample() {
        let sample = NavSample {
            bearing_deg: std::f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            calc_marker_pose(&sample, &Params::default()),
            Err(PoseCtrlError::NonFiniteBearing(_))
        ));

        let sample = NavSample {
            distance_m: std::f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            check_sample(&sample),
            Err(PoseCtrlError::NonFiniteDistance(_))
        ));
    }
}
