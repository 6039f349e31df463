//! AR navigation replay executable.
//!
//! # Architecture
//!
//! The exec stands in for the AR engine and the host application so that the
//! navigation core can be run without a phone:
//!
//!     - Initialise session, logging, parameters and pose control
//!     - Start loading the marker asset in the background
//!     - Main loop, once per frame:
//!         - Forward the asset load result when it arrives
//!         - Execute scripted channel calls and engine events
//!         - Tick the navigator if the AR screen has been launched
//!         - Archive pose control's status report
//!
//! The marker and banner commands produced by the navigator are logged and
//! archived by `log_renderer`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod log_renderer;
mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use ar_lib::{
    asset::{self, AssetLoadError},
    channel_processor,
    data_store::{DataStore, RunSummary},
    navigator::{ArNavigator, NavStats, SessionListener},
    pose_ctrl::PoseCtrl,
};
use comms_if::channel::CHANNEL_NAME;
use log_renderer::{LogBanner, LogRenderer};
use params::ArExecParams;
use util::{
    archive::Archived,
    host,
    logger::{logger_init, parse_level},
    module::State,
    script_interpreter::{PendingCmds, ScriptCmd, ScriptInterpreter},
    session::Session,
    time,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Replay an AR navigation script against the navigation core.
#[derive(Debug, StructOpt)]
#[structopt(name = "ar_exec")]
struct Opts {
    /// Path to the script to replay
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Minimum log level (info, debug or trace)
    #[structopt(long, default_value = "debug")]
    log_level: String,
}

/// Summary saved into the session directory at the end of the run.
#[derive(Serialize)]
struct ExecSummary {
    run: RunSummary,
    nav: NavStats,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    let min_level = parse_level(&opts.log_level).wrap_err("Invalid log level")?;

    // Initialise session
    let session = Session::new("ar_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(min_level, &session).wrap_err("Failed to initialise logging")?;

    info!("AR Navigation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: ArExecParams =
        util::params::load("ar_exec.toml").wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- LOAD SCRIPT ----

    info!("Loading script from {:?}", opts.script);

    let mut si = ScriptInterpreter::new(&opts.script).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} commands, replayed on channel \"{}\"\n",
        si.get_duration(),
        si.get_num_cmds(),
        CHANNEL_NAME
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    let mut pose_ctrl = PoseCtrl::default();
    pose_ctrl
        .init("pose_ctrl.toml", &session)
        .wrap_err("Failed to initialise PoseCtrl")?;
    info!("PoseCtrl init complete");

    let renderer = LogRenderer::new(&session).wrap_err("Failed to initialise the renderer")?;
    let banner = LogBanner::new(&session).wrap_err("Failed to initialise the banner")?;

    let mut navigator = ArNavigator::new(pose_ctrl, ds.sample_slot.clone(), renderer, banner);

    info!("Module initialisation complete\n");

    // ---- START ASSET LOAD ----

    let asset_path = host::get_ar_sw_root()
        .wrap_err("Cannot find the software root")?
        .join(&exec_params.marker_asset_path);

    info!("Starting to load marker asset {:?}", asset_path);

    let mut asset_rx = Some(asset::spawn_loader(asset_path));

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let frame_period = Duration::from_secs_f64(exec_params.frame_period_s);
    let exec_start = Instant::now();

    loop {
        let cycle_start_instant = Instant::now();
        let frame_time_ms = time::duration_to_millis(cycle_start_instant - exec_start);

        ds.cycle_start(frame_time_ms);

        // ---- ASSET LOAD ----

        if let Some(result) = poll_asset(&mut asset_rx) {
            navigator.on_asset_loaded(result);
        }

        // ---- SCRIPT PROCESSING ----

        match si.get_pending_cmds(frame_time_ms as f64 / 1000.0) {
            PendingCmds::None => (),
            PendingCmds::Some(cmds) => {
                for cmd in cmds {
                    match cmd {
                        ScriptCmd::Channel(call) => {
                            let response = channel_processor::exec(&mut ds, &mut navigator, &call);
                            debug!("{:?} -> {:?}", call.method, response);
                        }
                        ScriptCmd::Tracking(state) => {
                            info!("Tracking state now {:?}", state);
                            ds.tracking_state = state;
                        }
                        ScriptCmd::SessionError(reason) => navigator.on_session_error(&reason),
                    }
                }
            }
            PendingCmds::EndOfScript => {
                info!("End of AR script reached, stopping");
                break;
            }
        }

        // ---- FRAME PROCESSING ----

        if ds.ar_launched {
            navigator.on_frame_tick(ds.frame_time_ms, ds.tracking_state);

            if let Err(e) = navigator.pose_ctrl_mut().write() {
                warn!("Could not write PoseCtrl archives: {}", e);
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match frame_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - frame_period.as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    let stats = navigator.stats();
    info!(
        "{} updates, {} skipped frames, {} failed frames, {} session errors",
        stats.num_updates, stats.num_skipped, stats.num_failed, stats.num_session_errors
    );

    session.save(
        "summary.json",
        ExecSummary {
            run: ds.summary(),
            nav: stats,
        },
    );

    info!("End of execution");

    session.exit();

    Ok(())
}

/// Check for the asset load result, returning it once when it arrives.
fn poll_asset(
    asset_rx: &mut Option<Receiver<Result<(), AssetLoadError>>>,
) -> Option<Result<(), AssetLoadError>> {
    let result = match asset_rx {
        Some(rx) => match rx.try_recv() {
            Ok(r) => r,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AssetLoadError::LoaderLost),
        },
        None => return None,
    };

    *asset_rx = None;

    Some(result)
}
