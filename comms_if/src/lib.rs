//! # Communications interface crate.
//!
//! Provides all common interfaces between the AR navigation core and the things around it: the
//! host application pushing navigation data, and the AR engine rendering the marker.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Method calls made by the host application on the AR channel
pub mod channel;

/// Definitions exchanged with the AR engine and UI layer
pub mod eqpt;

/// Navigation samples and their decoding
pub mod nav;
