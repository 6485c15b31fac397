//! The simulation core: state, integrator, energy, history and the frame
//! loop that ties them into render data.

use std::time::Duration;

use bevy::prelude::Resource;
use log::{debug, info, warn};

pub mod config;
pub mod dynamics;
pub mod energy;
pub mod frame;
pub mod history;
pub mod integrator;
pub mod state;

use config::{MIN_POSITIVE_INPUT, SimConfig};
use frame::FrameOutput;
use history::HistoryBuffer;
use integrator::Integrator;
use state::{PendulumParameters, PendulumState};

/// How much simulated time one frame advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepPolicy {
    /// Fixed step per frame regardless of how long the frame took, so the
    /// simulation speed follows the display refresh rate.
    PerFrame { dt: f64 },
    /// Step by the measured frame duration times `time_scale`.
    WallClock { time_scale: f64 },
}

impl StepPolicy {
    pub fn dt(&self, frame_delta: Duration) -> f64 {
        match *self {
            StepPolicy::PerFrame { dt } => dt,
            StepPolicy::WallClock { time_scale } => frame_delta.as_secs_f64() * time_scale,
        }
    }
}

#[derive(Resource)]
pub struct Simulation {
    state: PendulumState,
    params: PendulumParameters,
    history: HistoryBuffer,
    integrator: Integrator,
    config: SimConfig,
    step_policy: StepPolicy,
    trace_enabled: bool,
    frame: FrameOutput,
    frames: u64,
    reported_non_finite: bool,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut sim = Self {
            state: PendulumState::INITIAL,
            params: PendulumParameters::default(),
            history: HistoryBuffer::new(config.history_capacity()),
            integrator: Integrator::new(),
            step_policy: StepPolicy::PerFrame { dt: config.dt },
            config,
            trace_enabled: false,
            frame: FrameOutput::default(),
            frames: 0,
            reported_non_finite: false,
        };
        sim.refresh_frame();
        sim
    }

    pub fn with_step_policy(mut self, step_policy: StepPolicy) -> Self {
        self.step_policy = step_policy;
        self
    }

    /// One frame of the loop: integrate, record history, rebuild render data.
    pub fn tick(&mut self, frame_delta: Duration) -> &FrameOutput {
        let dt = self.step_policy.dt(frame_delta);
        self.integrator.advance(&mut self.state, &self.params, dt);

        if !self.reported_non_finite && !self.state.is_finite() {
            warn!(
                "pendulum state became non-finite at frame {} ({:?}, {:?})",
                self.frames, self.state, self.params
            );
            self.reported_non_finite = true;
        }

        self.history.push(self.state.angle1, self.state.angle2);
        self.refresh_frame();
        self.frames += 1;
        &self.frame
    }

    fn refresh_frame(&mut self) {
        self.frame.fill(&self.state, &self.params, &self.history, &self.config, self.trace_enabled);
    }

    pub fn frame(&self) -> &FrameOutput {
        &self.frame
    }

    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    pub fn params(&self) -> &PendulumParameters {
        &self.params
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn step_policy(&self) -> StepPolicy {
        self.step_policy
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace_enabled
    }

    /// Simulated time since startup.
    pub fn elapsed(&self) -> f64 {
        self.integrator.elapsed()
    }

    /// Overrides the current state, e.g. to start from a chosen configuration.
    pub fn set_state(&mut self, state: PendulumState) {
        self.state = state;
        self.refresh_frame();
    }

    pub fn set_length1(&mut self, value: f64) {
        self.params.length1 = self.positive_input("length1", value);
    }

    pub fn set_length2(&mut self, value: f64) {
        self.params.length2 = self.positive_input("length2", value);
    }

    pub fn set_mass1(&mut self, value: f64) {
        self.params.mass1 = self.positive_input("mass1", value);
    }

    pub fn set_mass2(&mut self, value: f64) {
        self.params.mass2 = self.positive_input("mass2", value);
    }

    pub fn set_gravity(&mut self, value: f64) {
        self.params.gravity = value;
    }

    /// Puts both links back to horizontal at rest. History is left intact.
    pub fn reset(&mut self) {
        self.state = PendulumState::INITIAL;
        self.reported_non_finite = false;
        self.refresh_frame();
        info!("pendulum reset after {} frames", self.frames);
    }

    pub fn set_trace_enabled(&mut self, enabled: bool) {
        self.trace_enabled = enabled;
        self.refresh_frame();
    }

    fn positive_input(&self, name: &str, value: f64) -> f64 {
        if self.config.clamp_inputs && !(value >= MIN_POSITIVE_INPUT) {
            debug!("clamping {name} from {value} to {MIN_POSITIVE_INPUT}");
            return MIN_POSITIVE_INPUT;
        }
        value
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::frame::ClearMode;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn reset_is_idempotent() {
        let mut sim = Simulation::default();
        for _ in 0..30 {
            sim.tick(FRAME);
        }
        sim.reset();
        let once = *sim.state();
        sim.reset();
        assert_eq!(*sim.state(), once);
        assert_eq!(once, PendulumState::INITIAL);
    }

    #[test]
    fn reset_keeps_history() {
        let mut sim = Simulation::default();
        for _ in 0..10 {
            sim.tick(FRAME);
        }
        sim.reset();
        assert_eq!(sim.history().len(), 10);
    }

    #[test]
    fn per_frame_policy_ignores_frame_delta() {
        let mut fast = Simulation::default();
        let mut slow = Simulation::default();
        for _ in 0..20 {
            fast.tick(Duration::from_millis(4));
            slow.tick(Duration::from_millis(100));
        }
        assert_eq!(fast.state(), slow.state());
        assert!((fast.elapsed() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wall_clock_policy_scales_frame_delta() {
        let policy = StepPolicy::WallClock { time_scale: 2.0 };
        assert_eq!(policy.dt(Duration::from_millis(250)), 0.5);

        let mut sim = Simulation::default().with_step_policy(policy);
        sim.tick(Duration::from_millis(250));
        assert_eq!(sim.elapsed(), 0.5);
    }

    #[test]
    fn setters_update_parameters() {
        let mut sim = Simulation::default();
        sim.set_length1(120.0);
        sim.set_length2(80.0);
        sim.set_mass1(2.0);
        sim.set_mass2(9.0);
        sim.set_gravity(0.0);
        assert_eq!(
            *sim.params(),
            PendulumParameters {
                length1: 120.0,
                length2: 80.0,
                mass1: 2.0,
                mass2: 9.0,
                gravity: 0.0,
            }
        );
    }

    #[test]
    fn setters_pass_degenerate_values_through_by_default() {
        let mut sim = Simulation::default();
        sim.set_length1(0.0);
        sim.set_mass2(-3.0);
        assert_eq!(sim.params().length1, 0.0);
        assert_eq!(sim.params().mass2, -3.0);

        sim.tick(FRAME);
        assert!(!sim.state().is_finite());
    }

    #[test]
    fn clamping_floors_lengths_and_masses() {
        let mut sim = Simulation::new(SimConfig {
            clamp_inputs: true,
            ..Default::default()
        });
        sim.set_length1(0.0);
        sim.set_length2(f64::NAN);
        sim.set_mass1(-1.0);
        sim.set_mass2(4.0);
        sim.set_gravity(-2.0);
        assert_eq!(sim.params().length1, MIN_POSITIVE_INPUT);
        assert_eq!(sim.params().length2, MIN_POSITIVE_INPUT);
        assert_eq!(sim.params().mass1, MIN_POSITIVE_INPUT);
        assert_eq!(sim.params().mass2, 4.0);
        assert_eq!(sim.params().gravity, -2.0);
    }

    #[test]
    fn trace_toggle_switches_clear_mode() {
        let mut sim = Simulation::default();
        assert_eq!(sim.frame().clear_mode, ClearMode::Clear);
        sim.set_trace_enabled(true);
        assert!(sim.trace_enabled());
        assert_eq!(sim.frame().clear_mode, ClearMode::Fade { alpha: 0.05 });
        sim.set_trace_enabled(false);
        assert_eq!(sim.tick(FRAME).clear_mode, ClearMode::Clear);
    }
}
