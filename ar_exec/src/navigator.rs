//! # Navigator
//!
//! The navigator is what the AR engine calls back into. It owns pose control and the
//! collaborators which draw the marker and the banner, and it is the boundary at which errors
//! stop: a frame which fails is logged and skipped, it never reaches the engine's loop.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::ar::{BackgroundCategory, MarkerPose, TrackingState};
use log::{error, info, trace};
use serde::Serialize;
use util::module::State;

use crate::{
    asset::AssetLoadError,
    pose_ctrl::{ArUpdate, InputData, MarkerAsset, PoseCtrl},
    sample_slot::SampleSlot,
};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Callbacks made by the AR engine.
pub trait SessionListener {
    /// The AR session has been created and frames will follow.
    fn on_session_ready(&mut self);

    /// A new camera frame has been processed.
    fn on_frame_tick(&mut self, timestamp_ms: i64, tracking_state: TrackingState);

    /// The AR session reported an error.
    fn on_session_error(&mut self, reason: &str);

    /// The one-shot marker asset load has finished.
    fn on_asset_loaded(&mut self, result: Result<(), AssetLoadError>);
}

/// Draws the guidance marker. Every call replaces the previous pose.
pub trait MarkerRenderer {
    /// Add the marker to the scene at its initial pose.
    fn place_marker(&mut self, pose: &MarkerPose);

    /// Move the marker.
    fn set_marker_pose(&mut self, pose: &MarkerPose);
}

/// Shows the instruction banner.
pub trait Banner {
    fn set_banner_text(&mut self, primary: &str, secondary: &str);

    fn set_banner_visible(&mut self, visible: bool);

    fn set_banner_colour_category(&mut self, category: BackgroundCategory);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Counters kept by the navigator.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct NavStats {
    /// Frames which produced an update
    pub num_updates: u64,

    /// Frames which were gated out
    pub num_skipped: u64,

    /// Frames which failed during processing
    pub num_failed: u64,

    /// Session errors reported by the engine
    pub num_session_errors: u64,
}

pub struct ArNavigator<R, B> {
    pose_ctrl: PoseCtrl,
    slot: SampleSlot,
    renderer: R,
    banner: B,
    session_active: bool,
    stats: NavStats,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<R, B> ArNavigator<R, B>
where
    R: MarkerRenderer,
    B: Banner,
{
    /// Create a new navigator reading samples from `slot`.
    ///
    /// The banner is hidden until the first update.
    pub fn new(pose_ctrl: PoseCtrl, slot: SampleSlot, renderer: R, mut banner: B) -> Self {
        banner.set_banner_visible(false);

        Self {
            pose_ctrl,
            slot,
            renderer,
            banner,
            session_active: false,
            stats: NavStats::default(),
        }
    }

    pub fn pose_ctrl(&self) -> &PoseCtrl {
        &self.pose_ctrl
    }

    pub fn pose_ctrl_mut(&mut self) -> &mut PoseCtrl {
        &mut self.pose_ctrl
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn banner(&self) -> &B {
        &self.banner
    }

    pub fn stats(&self) -> NavStats {
        self.stats
    }

    /// Hand an update to the collaborators.
    fn apply(&mut self, update: &ArUpdate) {
        if let Some(ref pose) = update.marker {
            self.renderer.set_marker_pose(pose);
        }

        let d = &update.display;
        self.banner.set_banner_text(&d.primary_text, &d.secondary_text);
        self.banner.set_banner_visible(d.banner_visible);
        self.banner.set_banner_colour_category(d.background);
    }
}

impl<R, B> SessionListener for ArNavigator<R, B>
where
    R: MarkerRenderer,
    B: Banner,
{
    fn on_session_ready(&mut self) {
        info!("AR session created");
        self.session_active = true;
    }

    fn on_frame_tick(&mut self, timestamp_ms: i64, tracking_state: TrackingState) {
        if !self.session_active {
            trace!("Frame at {} ms before the session is ready, ignored", timestamp_ms);
            return;
        }

        let input = InputData {
            now_ms: timestamp_ms,
            tracking_state,
            sample: self.slot.latest(),
        };

        match self.pose_ctrl.proc(&input) {
            Ok((Some(update), _)) => {
                self.apply(&update);
                self.stats.num_updates += 1;
            }
            Ok((None, _)) => self.stats.num_skipped += 1,
            Err(e) => {
                error!("Error processing AR update: {}", e);
                self.stats.num_failed += 1;
            }
        }
    }

    fn on_session_error(&mut self, reason: &str) {
        error!("AR session error: {}", reason);
        self.stats.num_session_errors += 1;
    }

    fn on_asset_loaded(&mut self, result: Result<(), AssetLoadError>) {
        match result {
            Ok(()) => {
                let pose = self.pose_ctrl.initial_marker_pose();
                self.renderer.place_marker(&pose);
                self.pose_ctrl.set_asset(MarkerAsset::Loaded);
                info!("Marker loaded and added to scene");
            }
            Err(e) => {
                error!("Marker loading failed: {}", e);
                info!("Continuing without a marker, the banner will still update");
                self.pose_ctrl.set_asset(MarkerAsset::Unavailable);
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::pose_ctrl::Params;
    use comms_if::nav::NavSample;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MockRenderer {
        placed: Vec<MarkerPose>,
        poses: Vec<MarkerPose>,
    }

    #[derive(Default)]
    struct MockBanner {
        text: Option<(String, String)>,
        visible: Vec<bool>,
        category: Option<BackgroundCategory>,
    }

    impl MarkerRenderer for MockRenderer {
        fn place_marker(&mut self, pose: &MarkerPose) {
            self.placed.push(*pose);
        }

        fn set_marker_pose(&mut self, pose: &MarkerPose) {
            self.poses.push(*pose);
        }
    }

    impl Banner for MockBanner {
        fn set_banner_text(&mut self, primary: &str, secondary: &str) {
            self.text = Some((primary.to_string(), secondary.to_string()));
        }

        fn set_banner_visible(&mut self, visible: bool) {
            self.visible.push(visible);
        }

        fn set_banner_colour_category(&mut self, category: BackgroundCategory) {
            self.category = Some(category);
        }
    }

    fn navigator() -> (ArNavigator<MockRenderer, MockBanner>, SampleSlot) {
        let slot = SampleSlot::new();
        let nav = ArNavigator::new(
            PoseCtrl::new(Params::default()),
            slot.clone(),
            MockRenderer::default(),
            MockBanner::default(),
        );
        (nav, slot)
    }

    fn turn_right() -> NavSample {
        NavSample {
            distance_m: 30.0,
            bearing_deg: 90.0,
            instruction: String::from("Turn right"),
            is_final_step: false,
        }
    }

    #[test]
    fn test_full_update() {
        let (mut nav, slot) = navigator();
        assert_eq!(nav.banner().visible, vec![false]);

        nav.on_session_ready();
        nav.on_asset_loaded(Ok(()));
        assert_eq!(nav.renderer().placed.len(), 1);
        assert!(!nav.renderer().placed[0].visible);

        // No sample yet
        nav.on_frame_tick(0, TrackingState::Tracking);
        assert!(nav.renderer().poses.is_empty());

        slot.submit(turn_right());
        nav.on_frame_tick(50, TrackingState::Tracking);

        let pose = nav.renderer().poses[0];
        assert!((pose.position_m.x - 2.0).abs() < 1e-9);
        assert_eq!(pose.rotation_y_deg, 270.0);
        assert_eq!(
            nav.banner().text,
            Some((String::from("Turn right"), String::from("🔄 Turn ahead in 30m")))
        );
        assert_eq!(nav.banner().visible, vec![false, true]);
        assert_eq!(nav.banner().category, Some(BackgroundCategory::NearTurn));

        // Throttled, then paused
        nav.on_frame_tick(150, TrackingState::Tracking);
        nav.on_frame_tick(500, TrackingState::Paused);
        assert_eq!(nav.renderer().poses.len(), 1);

        assert_eq!(
            nav.stats(),
            NavStats {
                num_updates: 1,
                num_skipped: 3,
                num_failed: 0,
                num_session_errors: 0,
            }
        );
    }

    #[test]
    fn test_markerless_mode() {
        let (mut nav, slot) = navigator();

        nav.on_session_ready();
        nav.on_asset_loaded(Err(AssetLoadError::NotFound(PathBuf::from("arrow.glb"))));
        slot.submit(turn_right());
        nav.on_frame_tick(0, TrackingState::Tracking);

        assert!(nav.renderer().placed.is_empty());
        assert!(nav.renderer().poses.is_empty());
        assert!(nav.banner().text.is_some());
        assert_eq!(nav.pose_ctrl().asset(), MarkerAsset::Unavailable);
    }

    #[test]
    fn test_failed_tick_is_noop() {
        let (mut nav, slot) = navigator();

        nav.on_session_ready();
        nav.on_asset_loaded(Ok(()));
        slot.submit(NavSample {
            distance_m: std::f64::NAN,
            ..turn_right()
        });
        nav.on_frame_tick(0, TrackingState::Tracking);

        assert!(nav.renderer().poses.is_empty());
        assert!(nav.banner().text.is_none());
        assert_eq!(nav.stats().num_failed, 1);

        // Normal operation resumes with the next good sample
        slot.submit(turn_right());
        nav.on_frame_tick(1, TrackingState::Tracking);
        assert_eq!(nav.renderer().poses.len(), 1);
    }

    #[test]
    fn test_ticks_before_session_ignored() {
        let (mut nav, slot) = navigator();

        nav.on_asset_loaded(Ok(()));
        slot.submit(turn_right());
        nav.on_frame_tick(0, TrackingState::Tracking);
        nav.on_session_error("camera unavailable");

        assert!(nav.renderer().poses.is_empty());
        assert_eq!(nav.stats().num_skipped, 0);
        assert_eq!(nav.stats().num_session_errors, 1);
    }
}
