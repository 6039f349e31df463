//! # Equipment Interface
//!
//! This module defines the interface structures which are handed to the AR engine and UI layer.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod ar;
