use crate::utils::ODEs::ODEFunc;

/// Semi-implicit (symplectic) Euler stepper with a preallocated derivative
/// buffer.
///
/// The state is read as interleaved `(position, velocity)` pairs. All
/// accelerations are sampled on the pre-step state, then each velocity is
/// advanced and its position follows using the *updated* velocity:
///
/// ```text
/// v(t+dt) = v(t) + a(x(t), v(t)) * dt
/// x(t+dt) = x(t) + v(t+dt) * dt
/// ```
pub struct SymplecticEuler {
    deriv: Vec<f64>,
}

impl SymplecticEuler {
    pub fn new(dim: usize) -> Self {
        debug_assert!(dim % 2 == 0, "state must hold (position, velocity) pairs");
        Self { deriv: vec![0.0; dim] }
    }

    pub fn step(&mut self, ode: &dyn ODEFunc, t: f64, dt: f64, y: &mut [f64]) {
        debug_assert_eq!(y.len(), self.deriv.len());

        ode.call(t, y, &mut self.deriv);

        for (pair, rate) in y.chunks_exact_mut(2).zip(self.deriv.chunks_exact(2)) {
            pair[1] += rate[1] * dt;
            pair[0] += pair[1] * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // x'' = -x
    struct Harmonic;

    impl ODEFunc for Harmonic {
        fn call(&self, _t: f64, y: &[f64], out: &mut [f64]) {
            out[0] = y[1];
            out[1] = -y[0];
        }
    }

    #[test]
    fn velocity_is_updated_before_position() {
        let mut stepper = SymplecticEuler::new(2);
        let mut y = [1.0, 0.0];
        stepper.step(&Harmonic, 0.0, 0.1, &mut y);

        // v = 0 - 1 * 0.1, then x = 1 + v * 0.1
        assert_relative_eq!(y[1], -0.1, epsilon = 1e-15);
        assert_relative_eq!(y[0], 0.99, epsilon = 1e-15);
    }

    #[test]
    fn harmonic_energy_stays_bounded() {
        let mut stepper = SymplecticEuler::new(2);
        let mut y = [1.0, 0.0];
        for i in 0..10_000 {
            stepper.step(&Harmonic, i as f64 * 0.05, 0.05, &mut y);
        }
        let energy = 0.5 * (y[0] * y[0] + y[1] * y[1]);
        assert!((energy - 0.5).abs() < 0.05, "energy drifted to {energy}");
    }
}
