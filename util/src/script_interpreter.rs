//! # AR navigation script interpreter module
//!
//! This module provides an interpreter for AR replay scripts. A script is a
//! list of timestamped JSON commands, one statement per line, each ending in
//! a `;`:
//!
//! ```text
//! 0.0: {"method": "launchAR"};
//! 0.5: {"method": "updateAR", "arguments": {"distance": 30, "bearing": 90}};
//! 2.0: {"tracking": "PAUSED"};
//! 2.5: {"sessionError": "camera unavailable"};
//! ```
//!
//! Channel calls are what the host application would send, the other
//! commands stand in for events raised by the AR engine.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::RegexBuilder;
use serde_json::Value;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use comms_if::{
    channel::{ChannelCall, ChannelParseError},
    eqpt::ar::TrackingState,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    cmd: ScriptCmd,
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_cmds` to acquire a list of commands that need executing.
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    cmds: VecDeque<Command>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A single scripted command.
#[derive(Debug, Clone)]
pub enum ScriptCmd {
    /// A call on the AR channel, as made by the host application
    Channel(ChannelCall),

    /// The AR engine's tracking state changes
    Tracking(TrackingState),

    /// The AR engine reports a session error
    SessionError(String),
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)"
    )]
    InvalidTimestamp(String),

    #[error("Script contains invalid JSON at {0} s: {1}")]
    InvalidJson(f64, serde_json::Error),

    #[error("Script contains an invalid channel call at {0} s: {1}")]
    InvalidCall(f64, ChannelParseError),

    #[error("Script contains an unknown tracking state at {0} s: {1}")]
    InvalidTracking(f64, String),
}

pub enum PendingCmds {
    None,
    Some(Vec<ScriptCmd>),
    EndOfScript,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        let mut cmd_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*(.*);[ \t\r]*$")
            .multi_line(true)
            .build()
            .expect("script regex is valid");

        for cap in re.captures_iter(script) {
            // Parse the exec time
            let exec_time_s: f64 = cap[1]
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            let cmd = parse_cmd(exec_time_s, &cap[3])?;

            cmd_queue.push_back(Command { exec_time_s, cmd });
        }

        if cmd_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        // Commands are executed in time order, stable for equal times
        cmd_queue.make_contiguous().sort_by(|a, b| {
            a.exec_time_s
                .partial_cmp(&b.exec_time_s)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ScriptInterpreter {
            _script_path: None,
            cmds: cmd_queue,
        })
    }

    /// Return the commands due at `current_time_s` (seconds since the start
    /// of the script), or `None` if nothing needs executing now.
    pub fn get_pending_cmds(&mut self, current_time_s: f64) -> PendingCmds {
        // If the queue is empty the script is over
        if self.cmds.is_empty() {
            return PendingCmds::EndOfScript;
        }

        let mut cmd_vec: Vec<ScriptCmd> = vec![];

        while let Some(c) = self.cmds.front() {
            if c.exec_time_s > current_time_s {
                break;
            }
            if let Some(c) = self.cmds.pop_front() {
                cmd_vec.push(c.cmd);
            }
        }

        if cmd_vec.is_empty() {
            PendingCmds::None
        } else {
            PendingCmds::Some(cmd_vec)
        }
    }

    /// Get the number of commands remaining in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64,
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse a single command payload.
fn parse_cmd(exec_time_s: f64, payload: &str) -> Result<ScriptCmd, ScriptError> {
    let val: Value =
        serde_json::from_str(payload).map_err(|e| ScriptError::InvalidJson(exec_time_s, e))?;

    if let Some(t) = val.get("tracking") {
        let name = t.as_str().unwrap_or_default();
        return match TrackingState::from_str(name) {
            Some(s) => Ok(ScriptCmd::Tracking(s)),
            None => Err(ScriptError::InvalidTracking(exec_time_s, t.to_string())),
        };
    }

    if let Some(reason) = val.get("sessionError") {
        let reason = match reason.as_str() {
            Some(s) => s.to_string(),
            None => reason.to_string(),
        };
        return Ok(ScriptCmd::SessionError(reason));
    }

    ChannelCall::from_value(val)
        .map(ScriptCmd::Channel)
        .map_err(|e| ScriptError::InvalidCall(exec_time_s, e))
}
