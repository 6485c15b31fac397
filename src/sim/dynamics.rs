use crate::sim::state::{PendulumParameters, PendulumState};
use crate::utils::ODEs::ODEFunc;

// Source : https://web.mit.edu/jorloff/www/chaosTalk/double-pendulum/double-pendulum-en.html
//
// The coupling denominator `2*m1 + m2 - m2*cos(2θ1 - 2θ2)` is not guarded.
// For positive masses it stays at or above 2*m1, but a zero length still
// divides by zero and the resulting NaN is left to propagate.
impl ODEFunc for PendulumParameters {
    fn call(&self, _t: f64, y: &[f64], out: &mut [f64]) {
        // State variables
        let theta1 = y[0];
        let omega1 = y[1];
        let theta2 = y[2];
        let omega2 = y[3];

        let m1 = self.mass1;
        let m2 = self.mass2;
        let l1 = self.length1;
        let l2 = self.length2;
        let g = self.gravity;

        // Common terms
        let delta = theta1 - theta2;
        let denom = 2.0 * m1 + m2 - m2 * (2.0 * theta1 - 2.0 * theta2).cos();

        let domega1_dt = (
            -g * (2.0 * m1 + m2) * theta1.sin()
            - m2 * g * (theta1 - 2.0 * theta2).sin()
            - 2.0 * delta.sin() * m2
                * (omega2.powi(2) * l2 + omega1.powi(2) * l1 * delta.cos())
        ) / (l1 * denom);

        let domega2_dt = (
            2.0 * delta.sin()
                * (omega1.powi(2) * l1 * (m1 + m2)
                + g * (m1 + m2) * theta1.cos()
                + omega2.powi(2) * l2 * m2 * delta.cos())
        ) / (l2 * denom);

        out[0] = omega1;
        out[1] = domega1_dt;
        out[2] = omega2;
        out[3] = domega2_dt;
    }
}

/// Angular accelerations `(a1, a2)` of both links in the given configuration.
pub fn accelerations(state: &PendulumState, params: &PendulumParameters) -> (f64, f64) {
    let mut out = [0.0; 4];
    params.call(0.0, &state.to_array(), &mut out);
    (out[1], out[3])
}
