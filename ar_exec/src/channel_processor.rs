//! # Channel processor module
//!
//! The channel processor handles calls made by the host application on the AR channel.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use serde_json::Value;

// Internal
use crate::{data_store::DataStore, navigator::SessionListener};
use comms_if::{
    channel::{ChannelCall, ChannelMethod, ChannelResponse},
    nav::NavSample,
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a channel call.
///
/// `updateAR` samples go into the datastore's sample slot, `launchAR` starts
/// the AR session on `listener`.
pub fn exec<L: SessionListener>(
    ds: &mut DataStore,
    listener: &mut L,
    call: &ChannelCall,
) -> ChannelResponse {
    ds.num_channel_calls += 1;

    let response = match call.method {
        ChannelMethod::LaunchAr => {
            if ds.ar_launched {
                debug!("AR screen already launched");
            } else {
                info!("Launching AR screen");
                ds.ar_launched = true;
                listener.on_session_ready();
            }
            ChannelResponse::Ok
        }
        ChannelMethod::UpdateAr => match call.arguments {
            Value::Object(ref map) => {
                debug!("Received AR data: {}", call.arguments);
                ds.sample_slot.submit(NavSample::from_json_map(map));
                ChannelResponse::Ok
            }
            _ => ChannelResponse::invalid_argument("Argument must be a Map"),
        },
        ChannelMethod::Unknown(ref name) => {
            warn!("Method \"{}\" is not implemented on this channel", name);
            ds.num_channel_not_implemented += 1;
            ChannelResponse::NotImplemented
        }
    };

    if let ChannelResponse::Error { ref code, ref message } = response {
        warn!("Channel call {:?} rejected: {} ({})", call.method, message, code);
        ds.num_channel_errors += 1;
    }

    response
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::asset::AssetLoadError;
    use comms_if::{channel::INVALID_ARGUMENT, eqpt::ar::TrackingState};

    #[derive(Default)]
    struct CountingListener {
        num_ready: u32,
    }

    impl SessionListener for CountingListener {
        fn on_session_ready(&mut self) {
            self.num_ready += 1;
        }
        fn on_frame_tick(&mut self, _: i64, _: TrackingState) {}
        fn on_session_error(&mut self, _: &str) {}
        fn on_asset_loaded(&mut self, _: Result<(), AssetLoadError>) {}
    }

    #[test]
    fn test_launch_once() {
        let mut ds = DataStore::default();
        let mut l = CountingListener::default();
        let call = ChannelCall::from_json(r#"{"method": "launchAR"}"#).unwrap();

        assert_eq!(exec(&mut ds, &mut l, &call), ChannelResponse::Ok);
        assert_eq!(exec(&mut ds, &mut l, &call), ChannelResponse::Ok);

        assert!(ds.ar_launched);
        assert_eq!(l.num_ready, 1);
        assert_eq!(ds.num_channel_calls, 2);
    }

    #[test]
    fn test_update() {
        let mut ds = DataStore::default();
        let mut l = CountingListener::default();

        let call = ChannelCall::from_json(
            r#"{"method": "updateAR", "arguments": {
                "distance": 1950, "bearing": 12.5, "instruction": "Head north", "isFinalStep": false
            }}"#,
        )
        .unwrap();
        assert_eq!(exec(&mut ds, &mut l, &call), ChannelResponse::Ok);

        let sample = ds.sample_slot.latest().unwrap();
        assert_eq!(sample.distance_m, 1950.0);
        assert_eq!(sample.instruction, "Head north");

        // A malformed sample still replaces the old one, with defaults
        let call = ChannelCall::from_json(
            r#"{"method": "updateAR", "arguments": {"distance": "far"}}"#,
        )
        .unwrap();
        assert_eq!(exec(&mut ds, &mut l, &call), ChannelResponse::Ok);
        assert_eq!(*ds.sample_slot.latest().unwrap(), NavSample::default());
    }

    #[test]
    fn test_update_requires_map() {
        let mut ds = DataStore::default();
        let mut l = CountingListener::default();
        let call = ChannelCall::from_json(r#"{"method": "updateAR", "arguments": [1, 2]}"#).unwrap();

        match exec(&mut ds, &mut l, &call) {
            ChannelResponse::Error { code, message } => {
                assert_eq!(code, INVALID_ARGUMENT);
                assert_eq!(message, "Argument must be a Map");
            }
            r => panic!("unexpected response {:?}", r),
        }

        assert!(ds.sample_slot.latest().is_none());
        assert_eq!(ds.num_channel_errors, 1);
    }

    #[test]
    fn test_unknown_method_not_implemented() {
        let mut ds = DataStore::default();
        let mut l = CountingListener::default();
        let call = ChannelCall::from_json(r#"{"method": "flyAway"}"#).unwrap();

        assert_eq!(exec(&mut ds, &mut l, &call), ChannelResponse::NotImplemented);

        assert!(!ds.ar_launched);
        assert_eq!(l.num_ready, 0);
        assert_eq!(ds.num_channel_calls, 1);
        assert_eq!(ds.num_channel_not_implemented, 1);
        assert_eq!(ds.num_channel_errors, 0);
    }
}
