//! # Navigation Samples
//!
//! A navigation sample is the latest guidance produced by the host's navigation engine: how far
//! away the next waypoint is, in which direction, and what the user should be told. Samples
//! arrive as loosely typed JSON maps, so decoding is tolerant: any field that is missing or of
//! the wrong type is replaced by its default and reported.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single navigation sample.
///
/// Samples are replaced wholesale on arrival, there is no merging with a previous sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavSample {
    /// Distance to the next waypoint.
    ///
    /// Units: meters
    pub distance_m: f64,

    /// Direction of the next waypoint relative to the viewer's forward axis. Zero is straight
    /// ahead, positive angles are clockwise.
    ///
    /// Units: degrees
    pub bearing_deg: f64,

    /// Instruction to display to the user, for example "Turn right".
    pub instruction: String,

    /// True if this is the last step of the route.
    pub is_final_step: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The fields of a navigation sample as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleField {
    Distance,
    Bearing,
    Instruction,
    IsFinalStep,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavSample {
    /// Decode a sample from a JSON map, returning the sample and the list of fields which had to
    /// be defaulted.
    ///
    /// Numeric fields accept any JSON number, defaulting to `0.0`. The instruction must be a
    /// string (default empty) and the final step flag a boolean (default `false`).
    pub fn decode(map: &Map<String, Value>) -> (Self, Vec<SampleField>) {
        let mut defaulted = Vec::new();

        let distance_m = match map.get(SampleField::Distance.key()).and_then(Value::as_f64) {
            Some(d) => d,
            None => {
                defaulted.push(SampleField::Distance);
                0.0
            }
        };

        let bearing_deg = match map.get(SampleField::Bearing.key()).and_then(Value::as_f64) {
            Some(b) => b,
            None => {
                defaulted.push(SampleField::Bearing);
                0.0
            }
        };

        let instruction = match map.get(SampleField::Instruction.key()).and_then(Value::as_str) {
            Some(s) => s.to_string(),
            None => {
                defaulted.push(SampleField::Instruction);
                String::new()
            }
        };

        let is_final_step = match map.get(SampleField::IsFinalStep.key()).and_then(Value::as_bool)
        {
            Some(f) => f,
            None => {
                defaulted.push(SampleField::IsFinalStep);
                false
            }
        };

        (
            Self {
                distance_m,
                bearing_deg,
                instruction,
                is_final_step,
            },
            defaulted,
        )
    }

    /// Decode a sample from a JSON map, logging a warning for each field which was defaulted.
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        let (sample, defaulted) = Self::decode(map);

        for field in defaulted {
            warn!(
                "Navigation sample field \"{}\" is missing or malformed (got {}), using default",
                field.key(),
                map.get(field.key()).unwrap_or(&Value::Null)
            );
        }

        sample
    }
}

impl SampleField {
    /// The key of this field in the wire map.
    pub fn key(&self) -> &'static str {
        match self {
            SampleField::Distance => "distance",
            SampleField::Bearing => "bearing",
            SampleField::Instruction => "instruction",
            SampleField::IsFinalStep => "isFinalStep",
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn as_map(val: Value) -> Map<String, Value> {
        match val {
            Value::Object(m) => m,
            _ => panic!("test value is not a map"),
        }
    }

    #[test]
    fn test_decode_complete() {
        let map = as_map(json!({
            "distance": 30,
            "bearing": 90.5,
            "instruction": "Turn right",
            "isFinalStep": false
        }));

        let (sample, defaulted) = NavSample::decode(&map);

        assert!(defaulted.is_empty());
        assert_eq!(sample.distance_m, 30.0);
        assert_eq!(sample.bearing_deg, 90.5);
        assert_eq!(sample.instruction, "Turn right");
        assert!(!sample.is_final_step);
    }

    #[test]
    fn test_decode_defaults() {
        let map = as_map(json!({
            "distance": "far",
            "instruction": 12,
            "isFinalStep": "yes"
        }));

        let (sample, defaulted) = NavSample::decode(&map);

        assert_eq!(sample, NavSample::default());
        assert_eq!(
            defaulted,
            vec![
                SampleField::Distance,
                SampleField::Bearing,
                SampleField::Instruction,
                SampleField::IsFinalStep
            ]
        );
    }
}
