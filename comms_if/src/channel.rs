//! # AR Channel
//!
//! The host application talks to the AR screen through a method channel. Each call carries a
//! method name and an arbitrary JSON argument, and is answered by a `ChannelResponse`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde_json::{self, Value};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the channel the host application uses.
pub const CHANNEL_NAME: &str = "ar_navigator_channel";

/// Error code returned when a call's argument has the wrong shape.
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A call made by the host application on the AR channel.
#[derive(Debug, Clone)]
pub struct ChannelCall {
    /// The method being called
    pub method: ChannelMethod,

    /// The argument of the call, `Value::Null` if none was given
    pub arguments: Value,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Methods called on the AR channel.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ChannelMethod {
    /// Open the AR screen and start the AR session
    LaunchAr,

    /// Push a new navigation sample, the argument must be a map
    UpdateAr,

    /// Any other method, answered with `ChannelResponse::NotImplemented`
    Unknown(String),
}

/// Response to a channel call.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelResponse {
    /// The call was handled
    Ok,

    /// The call was understood but could not be handled
    Error { code: String, message: String },

    /// The method is not known on this channel
    NotImplemented,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum ChannelParseError {
    #[error("Call contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Call has an invalid method ({0})")]
    InvalidMethod(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl ChannelCall {
    /// Parse a new call from a JSON packet of the form `{"method": ..., "arguments": ...}`.
    pub fn from_json(json_str: &str) -> Result<Self, ChannelParseError> {
        let val: Value = serde_json::from_str(json_str).map_err(ChannelParseError::InvalidJson)?;

        Self::from_value(val)
    }

    /// Build a call from an already parsed JSON value.
    pub fn from_value(mut val: Value) -> Result<Self, ChannelParseError> {
        let method = match val["method"].as_str() {
            Some(s) => ChannelMethod::from_str(s),
            None => {
                return Err(ChannelParseError::InvalidMethod(String::from(
                    "Expected \"method\" to be a string",
                )))
            }
        };

        Ok(ChannelCall {
            method,
            arguments: val["arguments"].take(),
        })
    }
}

impl ChannelMethod {
    fn from_str(s: &str) -> Self {
        match s {
            "launchAR" => ChannelMethod::LaunchAr,
            "updateAR" => ChannelMethod::UpdateAr,
            other => ChannelMethod::Unknown(other.to_string()),
        }
    }
}

impl ChannelResponse {
    /// Build an `INVALID_ARGUMENT` error response.
    pub fn invalid_argument(message: &str) -> Self {
        ChannelResponse::Error {
            code: String::from(INVALID_ARGUMENT),
            message: String::from(message),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_calls() {
        let call = ChannelCall::from_json(r#"{"method": "launchAR"}"#).unwrap();
        assert_eq!(call.method, ChannelMethod::LaunchAr);
        assert!(call.arguments.is_null());

        let call = ChannelCall::from_json(
            r#"{"method": "updateAR", "arguments": {"distance": 12.0}}"#,
        )
        .unwrap();
        assert_eq!(call.method, ChannelMethod::UpdateAr);
        assert_eq!(call.arguments["distance"].as_f64(), Some(12.0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ChannelCall::from_json(r#"{"method": 3}"#),
            Err(ChannelParseError::InvalidMethod(_))
        ));

        assert!(matches!(
            ChannelCall::from_json("not json"),
            Err(ChannelParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_unknown_method_is_kept() {
        let call = ChannelCall::from_json(r#"{"method": "flyAway", "arguments": 1}"#).unwrap();

        assert_eq!(call.method, ChannelMethod::Unknown(String::from("flyAway")));
        assert_eq!(call.arguments, Value::from(1));
    }
}
