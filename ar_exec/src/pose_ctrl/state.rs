//! Implementations for the PoseCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};
use serde::Serialize;
use std::sync::Arc;

// Internal
use super::{
    calc_display, calc_marker_pose, check_sample, MarkerAsset, Params, PoseCtrlError,
    ThrottleState,
};
use comms_if::{
    eqpt::ar::{DisplayState, MarkerPose, TrackingState},
    nav::NavSample,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Pose control module state
#[derive(Default)]
pub struct PoseCtrl {
    pub(crate) params: Params,

    pub(crate) asset: MarkerAsset,

    pub(crate) throttle: ThrottleState,

    pub(crate) report: StatusReport,
    arch_report: Archiver,
}

/// Input data to pose control, gathered once per frame.
#[derive(Debug, Clone)]
pub struct InputData {
    /// Frame timestamp.
    ///
    /// Units: milliseconds, monotonic
    pub now_ms: i64,

    /// Tracking state of the AR engine for this frame
    pub tracking_state: TrackingState,

    /// The current navigation sample, if one has been received
    pub sample: Option<Arc<NavSample>>,
}

/// An update to hand to the renderer and UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ArUpdate {
    /// New marker pose, `None` when running without a marker
    pub marker: Option<MarkerPose>,

    /// New banner state
    pub display: DisplayState,
}

/// Output of pose control, `None` if nothing should change this frame.
pub type OutputData = Option<ArUpdate>;

/// Status report for PoseCtrl processing.
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Timestamp of the frame this report is for
    pub now_ms: i64,

    /// What happened on this frame
    pub outcome: TickOutcome,

    /// True if a marker pose was part of the output
    pub marker_emitted: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Outcome of a single frame. All but `Updated` name the check that stopped
/// the update, in the order the checks are made.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Updated,
    AssetPending,
    NotTracking,
    Throttled,
    NoSample,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            now_ms: 0,
            outcome: TickOutcome::NoSample,
            marker_emitted: false,
        }
    }
}

impl State for PoseCtrl {
    type InitData = &'static str;
    type InitError = params::LoadError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = PoseCtrlError;

    /// Initialise the PoseCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        self.params = params::load(init_data)?;

        // Archiving is optional, carry on without it if the file can't be made
        match Archiver::from_path(session, "pose_ctrl/status_report.csv") {
            Ok(a) => self.arch_report = a,
            Err(e) => warn!("PoseCtrl status reports will not be archived: {}", e),
        }

        Ok(())
    }

    /// Perform cyclic processing of pose control.
    ///
    /// On error nothing is changed, including the throttle, so the next frame
    /// is free to try again.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        self.report = StatusReport {
            now_ms: input_data.now_ms,
            ..Default::default()
        };

        let sample = match self.gate(input_data) {
            Ok(s) => s,
            Err(outcome) => {
                trace!("PoseCtrl skipped frame at {} ms: {:?}", input_data.now_ms, outcome);
                self.report.outcome = outcome;
                return Ok((None, self.report));
            }
        };

        check_sample(sample)?;

        let marker = match self.asset {
            MarkerAsset::Loaded => Some(calc_marker_pose(sample, &self.params)?),
            _ => None,
        };
        let display = calc_display(sample, &self.params);

        self.throttle.accept(input_data.now_ms);

        debug!(
            "PoseCtrl update - Distance: {} m, Bearing: {} deg, Marker: {:?}",
            sample.distance_m, sample.bearing_deg, marker
        );

        self.report.outcome = TickOutcome::Updated;
        self.report.marker_emitted = marker.is_some();

        Ok((Some(ArUpdate { marker, display }), self.report))
    }
}

impl Archived for PoseCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        if self.arch_report.is_initialised() {
            self.arch_report.serialise(self.report)?;
        }

        Ok(())
    }
}

impl PoseCtrl {
    /// Create a new pose control module from already loaded parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Set the availability of the marker asset.
    pub fn set_asset(&mut self, asset: MarkerAsset) {
        self.asset = asset;
    }

    pub fn asset(&self) -> MarkerAsset {
        self.asset
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn throttle(&self) -> &ThrottleState {
        &self.throttle
    }

    /// Where the marker should be placed when its asset finishes loading.
    pub fn initial_marker_pose(&self) -> MarkerPose {
        let p = self.params.initial_position_m;
        MarkerPose::hidden_at(nalgebra::Vector3::new(p[0], p[1], p[2]))
    }

    /// Run the update checks, returning the sample to use or the reason
    /// there is no update this frame.
    fn gate<'a>(&self, input_data: &'a InputData) -> Result<&'a NavSample, TickOutcome> {
        if self.asset == MarkerAsset::Pending {
            return Err(TickOutcome::AssetPending);
        }

        if !input_data.tracking_state.is_tracking() {
            return Err(TickOutcome::NotTracking);
        }

        if !self
            .throttle
            .is_due(input_data.now_ms, self.params.update_interval_ms)
        {
            return Err(TickOutcome::Throttled);
        }

        match input_data.sample {
            Some(ref s) => Ok(&**s),
            None => Err(TickOutcome::NoSample),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
