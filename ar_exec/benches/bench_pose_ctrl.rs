//! # Pose Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use ar_lib::pose_ctrl::{
    calc_display, calc_marker_pose, InputData, MarkerAsset, Params, PoseCtrl,
};
use comms_if::{eqpt::ar::TrackingState, nav::NavSample};
use util::module::State;

fn pose_ctrl_benchmark(c: &mut Criterion) {
    let params = Params::default();

    let sample = NavSample {
        distance_m: 35.0,
        bearing_deg: 47.5,
        instruction: String::from("Turn right onto High Street"),
        is_final_step: false,
    };

    c.bench_function("calc_marker_pose", |b| {
        b.iter(|| calc_marker_pose(black_box(&sample), &params))
    });

    c.bench_function("calc_display", |b| {
        b.iter(|| calc_display(black_box(&sample), &params))
    });

    // Full frame, each tick far enough apart that the throttle never gates it
    let mut pose_ctrl = PoseCtrl::new(params.clone());
    pose_ctrl.set_asset(MarkerAsset::Loaded);

    let sample = Arc::new(sample);
    let mut now_ms = 0i64;

    c.bench_function("pose_ctrl_proc", |b| {
        b.iter(|| {
            now_ms += 1000;
            let input = InputData {
                now_ms,
                tracking_state: TrackingState::Tracking,
                sample: Some(sample.clone()),
            };
            pose_ctrl.proc(black_box(&input)).unwrap()
        })
    });
}

criterion_group!(benches, pose_ctrl_benchmark);
criterion_main!(benches);
