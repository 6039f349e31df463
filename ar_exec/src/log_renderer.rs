//! # Logging Renderer
//!
//! Stands in for the AR engine and UI layer when replaying a script. Every
//! command is logged and archived into the session.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use ar_lib::navigator::{Banner, MarkerRenderer};
use comms_if::eqpt::ar::{BackgroundCategory, MarkerPose};
use log::{info, warn};
use nalgebra::Vector3;
use serde::Serialize;
use util::{
    archive::{ArchiveError, Archiver},
    session::{get_elapsed_seconds, Session},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct LogRenderer {
    arch_pose: Archiver,
}

pub struct LogBanner {
    arch_banner: Archiver,
}

#[derive(Serialize)]
struct PoseRecord {
    time_s: f64,
    placed: bool,
    x_m: f64,
    y_m: f64,
    z_m: f64,
    rotation_y_deg: f64,
    /// Direction the marker's forward (-Z) axis points in the scene
    heading_x: f64,
    heading_z: f64,
    scale: f64,
    visible: bool,
}

#[derive(Serialize)]
struct BannerRecord<'a> {
    time_s: f64,
    command: &'a str,
    value: String,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LogRenderer {
    pub fn new(session: &Session) -> Result<Self, ArchiveError> {
        Ok(Self {
            arch_pose: Archiver::from_path(session, "ar_nav/marker_pose.csv")?,
        })
    }

    fn archive(&mut self, pose: &MarkerPose, placed: bool) {
        let record = PoseRecord::new(get_elapsed_seconds(), pose, placed);

        if let Err(e) = self.arch_pose.serialise(record) {
            warn!("Could not archive marker pose: {}", e);
        }
    }
}

impl PoseRecord {
    fn new(time_s: f64, pose: &MarkerPose, placed: bool) -> Self {
        let heading = pose.rotation() * Vector3::new(0.0, 0.0, -1.0);

        Self {
            time_s,
            placed,
            x_m: pose.position_m.x,
            y_m: pose.position_m.y,
            z_m: pose.position_m.z,
            rotation_y_deg: pose.rotation_y_deg,
            heading_x: heading.x,
            heading_z: heading.z,
            scale: pose.scale,
            visible: pose.visible,
        }
    }
}

impl MarkerRenderer for LogRenderer {
    fn place_marker(&mut self, pose: &MarkerPose) {
        info!("Marker placed at {:?}", pose.position_m.as_slice());
        self.archive(pose, true);
    }

    fn set_marker_pose(&mut self, pose: &MarkerPose) {
        info!(
            "Marker at ({:.3}, {:.3}, {:.3}), yaw {:.1} deg ({:.3} rad), scale {}",
            pose.position_m.x,
            pose.position_m.y,
            pose.position_m.z,
            pose.rotation_y_deg,
            pose.rotation_y_rad(),
            pose.scale
        );
        self.archive(pose, false);
    }
}

impl LogBanner {
    pub fn new(session: &Session) -> Result<Self, ArchiveError> {
        Ok(Self {
            arch_banner: Archiver::from_path(session, "ar_nav/banner.csv")?,
        })
    }

    fn archive(&mut self, command: &str, value: String) {
        let record = BannerRecord {
            time_s: get_elapsed_seconds(),
            command,
            value,
        };

        if let Err(e) = self.arch_banner.serialise(record) {
            warn!("Could not archive banner command: {}", e);
        }
    }
}

impl Banner for LogBanner {
    fn set_banner_text(&mut self, primary: &str, secondary: &str) {
        info!("Banner: \"{}\" / \"{}\"", primary, secondary);
        self.archive("text", format!("{} | {}", primary, secondary));
    }

    fn set_banner_visible(&mut self, visible: bool) {
        self.archive("visible", visible.to_string());
    }

    fn set_banner_colour_category(&mut self, category: BackgroundCategory) {
        self.archive(
            "colour",
            format!("{:?} #{:08X}", category, category.colour_argb()),
        );
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pose_record_heading() {
        let pose = MarkerPose {
            position_m: Vector3::new(2.0, -0.3, 0.0),
            rotation_y_deg: 270.0,
            scale: 0.5,
            visible: true,
        };

        let record = PoseRecord::new(1.5, &pose, false);

        assert_eq!(record.x_m, 2.0);
        assert!((record.heading_x - 1.0).abs() < 1e-9);
        assert!(record.heading_z.abs() < 1e-9);

        // An unturned marker faces away from the viewer
        let record = PoseRecord::new(0.0, &MarkerPose::hidden_at(Vector3::zeros()), true);
        assert!(record.heading_x.abs() < 1e-9);
        assert!((record.heading_z + 1.0).abs() < 1e-9);
    }
}
