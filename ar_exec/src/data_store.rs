//! # Data Store

use comms_if::eqpt::ar::TrackingState;
use serde::Serialize;

use crate::sample_slot::SampleSlot;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// Time since the exec started, used as the frame timestamp.
    ///
    /// Units: milliseconds, monotonic
    pub frame_time_ms: i64,

    // AR session
    /// True once the host application has launched the AR screen
    pub ar_launched: bool,

    /// Tracking state the engine reports on each frame
    pub tracking_state: TrackingState,

    /// Latest navigation sample, shared with the navigator
    pub sample_slot: SampleSlot,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Number of channel calls handled
    pub num_channel_calls: u64,

    /// Number of channel calls answered with an error
    pub num_channel_errors: u64,

    /// Number of channel calls for methods the channel does not implement
    pub num_channel_not_implemented: u64,
}

/// Summary of a run, saved into the session at exit.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub num_cycles: u64,
    pub num_channel_calls: u64,
    pub num_channel_errors: u64,
    pub num_channel_not_implemented: u64,
    pub final_tracking_state: TrackingState,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl Default for DataStore {
    fn default() -> Self {
        Self {
            num_cycles: 0,
            frame_time_ms: 0,
            ar_launched: false,
            // The engine starts tracking as soon as the session is up
            tracking_state: TrackingState::Tracking,
            sample_slot: SampleSlot::new(),
            num_consec_cycle_overruns: 0,
            num_channel_calls: 0,
            num_channel_errors: 0,
            num_channel_not_implemented: 0,
        }
    }
}

impl DataStore {
    /// Perform actions required at the start of a cycle.
    pub fn cycle_start(&mut self, frame_time_ms: i64) {
        self.frame_time_ms = frame_time_ms;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        self.num_cycles += 1;
    }

    /// Build the run summary.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            num_cycles: self.num_cycles as u64,
            num_channel_calls: self.num_channel_calls,
            num_channel_errors: self.num_channel_errors,
            num_channel_not_implemented: self.num_channel_not_implemented,
            final_tracking_state: self.tracking_state,
        }
    }
}
