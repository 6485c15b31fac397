use std::f64::consts::FRAC_PI_2;

/// Angles are measured from the downward vertical at each pivot and are
/// never wrapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    pub angle1: f64,
    pub angle2: f64,
    pub angular_velocity1: f64,
    pub angular_velocity2: f64,
}

impl PendulumState {
    /// Both links horizontal, at rest.
    pub const INITIAL: Self = Self {
        angle1: FRAC_PI_2,
        angle2: FRAC_PI_2,
        angular_velocity1: 0.0,
        angular_velocity2: 0.0,
    };

    pub fn at_rest(angle1: f64, angle2: f64) -> Self {
        Self {
            angle1,
            angle2,
            angular_velocity1: 0.0,
            angular_velocity2: 0.0,
        }
    }

    /// Packs into the `[θ1, ω1, θ2, ω2]` layout the integrator steps.
    pub fn to_array(&self) -> [f64; 4] {
        [self.angle1, self.angular_velocity1, self.angle2, self.angular_velocity2]
    }

    pub fn set_from_array(&mut self, y: &[f64; 4]) {
        self.angle1 = y[0];
        self.angular_velocity1 = y[1];
        self.angle2 = y[2];
        self.angular_velocity2 = y[3];
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl Default for PendulumState {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParameters {
    /// Rod lengths (canvas pixels)
    pub length1: f64,
    pub length2: f64,
    /// Point masses at each bob
    pub mass1: f64,
    pub mass2: f64,
    /// Positive pulls toward +y ("down" on the canvas)
    pub gravity: f64,
}

impl Default for PendulumParameters {
    fn default() -> Self {
        Self {
            length1: 200.0,
            length2: 200.0,
            mass1: 5.0,
            mass2: 5.0,
            gravity: 9.8,
        }
    }
}
