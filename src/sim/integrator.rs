use crate::sim::state::{PendulumParameters, PendulumState};
use crate::utils::symplectic_euler::SymplecticEuler;

/// Advances a [`PendulumState`] with semi-implicit Euler.
///
/// Never fails; pathological parameters simply produce non-finite state.
pub struct Integrator {
    stepper: SymplecticEuler,
    y: [f64; 4],
    elapsed: f64,
}

impl Integrator {
    pub fn new() -> Self {
        Self {
            stepper: SymplecticEuler::new(4),
            y: [0.0; 4],
            elapsed: 0.0,
        }
    }

    /// Simulated time accumulated over every `advance` call.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn advance(&mut self, state: &mut PendulumState, params: &PendulumParameters, dt: f64) {
        self.y = state.to_array();
        self.stepper.step(params, self.elapsed, dt, &mut self.y);
        state.set_from_array(&self.y);
        self.elapsed += dt;
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::energy::energy;
    use std::f64::consts::FRAC_PI_2;

    const DT: f64 = 0.05;

    #[test]
    fn first_step_from_horizontal() {
        let params = PendulumParameters::default();
        let mut state = PendulumState::INITIAL;
        let mut integrator = Integrator::new();

        integrator.advance(&mut state, &params, DT);

        assert!(state.angular_velocity1 != 0.0 && state.angular_velocity1.is_finite());
        // aligned links: the second link has no coupling torque yet
        assert!(state.angular_velocity2.is_finite());
        assert_eq!(state.angle1, FRAC_PI_2 + state.angular_velocity1 * DT);
        assert_eq!(state.angle2, FRAC_PI_2 + state.angular_velocity2 * DT);

        integrator.advance(&mut state, &params, DT);
        assert!(state.angular_velocity2 != 0.0 && state.angular_velocity2.is_finite());
    }

    #[test]
    fn zero_gravity_keeps_pendulum_static() {
        let params = PendulumParameters {
            gravity: 0.0,
            ..Default::default()
        };
        let start = PendulumState::at_rest(0.7, -1.3);
        let mut state = start;
        let mut integrator = Integrator::new();
        for _ in 0..500 {
            integrator.advance(&mut state, &params, DT);
        }
        assert_eq!(state, start);
    }

    #[test]
    fn total_energy_drift_is_bounded() {
        let params = PendulumParameters::default();
        let mut state = PendulumState::at_rest(0.5, 0.3);
        let mut integrator = Integrator::new();
        let initial = energy(&state, &params).total;

        for _ in 0..1000 {
            integrator.advance(&mut state, &params, DT);
        }

        let drift = (energy(&state, &params).total - initial).abs();
        assert!(drift < 0.05 * initial.abs(), "drift {drift} from {initial}");
    }

    #[test]
    fn elapsed_time_accumulates() {
        let params = PendulumParameters::default();
        let mut state = PendulumState::INITIAL;
        let mut integrator = Integrator::new();
        for _ in 0..4 {
            integrator.advance(&mut state, &params, 0.25);
        }
        assert_eq!(integrator.elapsed(), 1.0);
    }
}
