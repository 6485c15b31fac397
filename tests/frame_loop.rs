use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

use approx::assert_relative_eq;
use pendulum_viz::Simulation;
use pendulum_viz::sim::config::SimConfig;
use pendulum_viz::sim::energy::energy;
use pendulum_viz::sim::frame::{ClearMode, plot_y};
use pendulum_viz::sim::state::PendulumState;

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn history_fills_to_graph_width_then_slides() {
    let config = SimConfig {
        graph_size: (50.0, 100.0),
        ..Default::default()
    };
    let mut sim = Simulation::new(config);

    let mut recent = Vec::new();
    for _ in 0..80 {
        sim.tick(FRAME);
        recent.push((sim.state().angle1, sim.state().angle2));
    }

    let history = sim.history();
    assert_eq!(history.len(), 50);
    let kept: Vec<_> = history.samples().map(|(_, a1, a2)| (a1, a2)).collect();
    assert_eq!(kept, recent[30..].to_vec());

    let frame = sim.frame();
    assert_eq!(frame.angle1_series.len(), 50);
    let (a1, _) = recent[79];
    assert_eq!(frame.angle1_series[49].x, 49.0);
    assert_eq!(frame.angle1_series[49].y, plot_y(a1, 100.0, 20.0));
}

#[test]
fn frame_output_tracks_state() {
    let mut sim = Simulation::default();
    let frame = sim.tick(FRAME).clone();
    let state = *sim.state();

    assert_relative_eq!(frame.joint1.x, 410.0 + 200.0 * state.angle1.sin(), epsilon = 1e-9);
    assert_relative_eq!(frame.joint1.y, 150.0 + 200.0 * state.angle1.cos(), epsilon = 1e-9);
    assert_eq!(frame.energy, energy(&state, sim.params()));
    assert_eq!(frame.energy_text, format!("Total Energy: {:.2} J", frame.energy.total));
    assert_eq!(frame.clear_mode, ClearMode::Clear);
}

#[test]
fn released_pendulum_swings_and_reset_restarts_it() {
    let mut sim = Simulation::default();
    for _ in 0..200 {
        sim.tick(FRAME);
    }
    assert!(sim.state().is_finite());
    assert!(sim.state().angle1 != FRAC_PI_2);

    sim.reset();
    assert_eq!(*sim.state(), PendulumState::INITIAL);
    assert_eq!(sim.history().len(), 200);
    assert_eq!(sim.frame().angle1_text, "Angle 1: 1.57 rad");
}

#[test]
fn gravity_off_freezes_the_pendulum() {
    let mut sim = Simulation::default();
    sim.set_gravity(0.0);
    sim.set_state(PendulumState::at_rest(0.9, -0.2));
    for _ in 0..100 {
        sim.tick(FRAME);
    }
    assert_eq!(*sim.state(), PendulumState::at_rest(0.9, -0.2));
}
