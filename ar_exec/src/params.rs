//! # AR Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
pub struct ArExecParams {
    /// Target period of one frame, the rate at which the simulated engine
    /// ticks.
    ///
    /// Units: seconds
    pub frame_period_s: f64,

    /// Path to the marker model, relative to the software root
    pub marker_asset_path: String,
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use ar_lib::asset::load_marker_asset;
    use std::path::Path;

    #[test]
    fn test_shipped_params_load_marker() {
        let params: ArExecParams =
            util::params::parse(include_str!("../../params/ar_exec.toml")).unwrap();

        let sw_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");

        assert!(params.frame_period_s > 0.0);
        assert!(load_marker_asset(&sw_root.join(&params.marker_asset_path)).is_ok());
    }
}
