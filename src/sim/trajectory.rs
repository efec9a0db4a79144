//! Trajectory preview
//!
//! A coarse, collision-unaware forecast of where a launch will carry the
//! body. It does not model the physics engine and is only meant as an aim
//! hint.

use glam::Vec2;

use crate::consts::{TRAJECTORY_DECAY, TRAJECTORY_TIME_STEP};

/// Predict `segments` points along a decaying straight-line flight.
///
/// Point `i` is `start + v_i * (i * time_step)` where `v_i = velocity * decay^i`.
pub fn predict(start: Vec2, velocity: Vec2, segments: usize, time_step: f32, decay: f32) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(segments);
    predict_into(&mut points, start, velocity, segments, time_step, decay);
    points
}

/// Same as [`predict`] with the default step and decay, reusing `out`
pub fn predict_default_into(out: &mut Vec<Vec2>, start: Vec2, velocity: Vec2, segments: usize) {
    predict_into(out, start, velocity, segments, TRAJECTORY_TIME_STEP, TRAJECTORY_DECAY);
}

fn predict_into(
    out: &mut Vec<Vec2>,
    start: Vec2,
    mut velocity: Vec2,
    segments: usize,
    time_step: f32,
    decay: f32,
) {
    out.clear();
    for i in 0..segments {
        let time = i as f32 * time_step;
        out.push(start + velocity * time);
        velocity *= decay;
    }
}
