//! # AR navigation library.
//!
//! This library holds everything the AR exec runs each frame, so that it can be tested and
//! benchmarked without an AR engine.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Marker asset loading - reports once whether the marker model can be shown
pub mod asset;

/// Channel processor - handles calls made by the host application
pub mod channel_processor;

/// Data store for the exec
pub mod data_store;

/// Navigator - connects the AR engine callbacks to pose control and the renderer
pub mod navigator;

/// Pose control module - turns navigation samples into marker poses and banner text
pub mod pose_ctrl;

/// Shared holder for the latest navigation sample
pub mod sample_slot;
