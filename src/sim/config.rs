use thiserror::Error;

/// Floor applied to lengths and masses when input clamping is enabled.
pub const MIN_POSITIVE_INPUT: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Simulated time per display frame
    pub dt: f64,
    /// Pendulum canvas size in pixels
    pub canvas_size: (f64, f64),
    /// Vertical offset of the pivot from the top of the canvas
    pub anchor_y: f64,
    /// Angle graph size; its width is also the history capacity
    pub graph_size: (f64, f64),
    /// Vertical pixels per radian in the angle graph
    pub graph_pixels_per_radian: f64,
    /// Energy chart size
    pub energy_size: (f64, f64),
    /// Bob radius per unit mass
    pub bob_radius_per_mass: f64,
    /// Opacity of the per-frame overlay in trace mode
    pub trace_fade_alpha: f64,
    /// Clamp lengths and masses to a positive minimum on every set
    pub clamp_inputs: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,
            canvas_size: (820.0, 720.0),
            anchor_y: 150.0,
            graph_size: (400.0, 200.0),
            graph_pixels_per_radian: 20.0,
            energy_size: (260.0, 200.0),
            bob_radius_per_mass: 2.0,
            trace_fade_alpha: 0.05,
            clamp_inputs: false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("{panel} size must be positive, got {width}x{height}")]
    InvalidPanelSize {
        panel: &'static str,
        width: f64,
        height: f64,
    },
    #[error("trace fade alpha must lie in [0, 1], got {0}")]
    InvalidFadeAlpha(f64),
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.dt));
        }
        for (panel, (width, height)) in [
            ("canvas", self.canvas_size),
            ("graph", self.graph_size),
            ("energy chart", self.energy_size),
        ] {
            if !(width > 0.0 && height > 0.0) {
                return Err(ConfigError::InvalidPanelSize { panel, width, height });
            }
        }
        if !(0.0..=1.0).contains(&self.trace_fade_alpha) {
            return Err(ConfigError::InvalidFadeAlpha(self.trace_fade_alpha));
        }
        Ok(())
    }

    /// One history sample per horizontal graph pixel.
    pub fn history_capacity(&self) -> usize {
        self.graph_size.0.max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
        assert_eq!(SimConfig::default().history_capacity(), 400);
    }

    #[test]
    fn rejects_bad_time_step() {
        for dt in [0.0, -0.05, f64::NAN, f64::INFINITY] {
            let config = SimConfig { dt, ..Default::default() };
            assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeStep(_))));
        }
    }

    #[test]
    fn rejects_empty_panels() {
        let config = SimConfig {
            graph_size: (0.0, 200.0),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPanelSize {
                panel: "graph",
                width: 0.0,
                height: 200.0,
            })
        );

        let config = SimConfig {
            energy_size: (260.0, -1.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPanelSize { panel: "energy chart", .. })
        ));
    }

    #[test]
    fn rejects_fade_out_of_range() {
        let config = SimConfig {
            trace_fade_alpha: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFadeAlpha(1.5)));
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "trace fade alpha must lie in [0, 1], got 1.5"
        );
    }
}
