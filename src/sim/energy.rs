//! Mechanical energy of the double pendulum.
//!
//! Two potential conventions are kept side by side. The absolute one
//! (`-m g L cos θ`, zero with both links horizontal) feeds the total-energy
//! readout and is what the integrator approximately conserves. The floored
//! one (`m g L (1 - cos θ)`, zero hanging straight down) is never negative
//! and only scales the bar chart.

use crate::sim::state::{PendulumParameters, PendulumState};

/// Keeps the bar-chart scale finite when the system holds no energy.
pub const BAR_SCALE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySample {
    pub kinetic: f64,
    /// Absolute convention, may be negative
    pub potential: f64,
    pub total: f64,
}

pub fn kinetic_energy(state: &PendulumState, params: &PendulumParameters) -> f64 {
    let v1 = params.length1 * state.angular_velocity1;
    let v2 = params.length2 * state.angular_velocity2;
    let cross = 2.0
        * params.length1
        * params.length2
        * state.angular_velocity1
        * state.angular_velocity2
        * (state.angle1 - state.angle2).cos();

    0.5 * params.mass1 * v1.powi(2) + 0.5 * params.mass2 * (v1.powi(2) + v2.powi(2) + cross)
}

pub fn potential_energy(state: &PendulumState, params: &PendulumParameters) -> f64 {
    let g = params.gravity;
    -(params.mass1 + params.mass2) * g * params.length1 * state.angle1.cos()
        - params.mass2 * g * params.length2 * state.angle2.cos()
}

/// Potential measured from the hanging-down rest position.
pub fn floored_potential_energy(state: &PendulumState, params: &PendulumParameters) -> f64 {
    let g = params.gravity;
    (params.mass1 + params.mass2) * g * params.length1 * (1.0 - state.angle1.cos())
        + params.mass2 * g * params.length2 * (1.0 - state.angle2.cos())
}

pub fn energy(state: &PendulumState, params: &PendulumParameters) -> EnergySample {
    let kinetic = kinetic_energy(state, params);
    let potential = potential_energy(state, params);
    EnergySample {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}

/// Bar heights for kinetic and floored potential energy, scaled so that
/// together they fill `chart_height`.
pub fn bar_heights(state: &PendulumState, params: &PendulumParameters, chart_height: f64) -> (f64, f64) {
    let kinetic = kinetic_energy(state, params);
    let potential = floored_potential_energy(state, params);
    let scale = chart_height / (kinetic + potential + BAR_SCALE_EPSILON);
    (kinetic * scale, potential * scale)
}
