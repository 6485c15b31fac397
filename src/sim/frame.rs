//! Per-frame render data: everything the drawing systems need, computed
//! from state, parameters and history without touching the renderer.

use std::fmt::Write;

use bevy::math::DVec2;

use crate::sim::config::SimConfig;
use crate::sim::energy::{self, EnergySample};
use crate::sim::history::HistoryBuffer;
use crate::sim::state::{PendulumParameters, PendulumState};

/// How the pendulum canvas is prepared before drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearMode {
    Clear,
    /// Overlay with a translucent fill so earlier frames fade out
    Fade { alpha: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Canvas-space positions, +y pointing down
    pub anchor: DVec2,
    pub joint1: DVec2,
    pub joint2: DVec2,
    pub bob_radii: (f64, f64),

    pub angle1_text: String,
    pub angle2_text: String,
    pub energy_text: String,
    pub energy: EnergySample,

    /// Graph-space points `(index, y)`
    pub angle1_series: Vec<DVec2>,
    pub angle2_series: Vec<DVec2>,

    pub kinetic_bar: f64,
    pub potential_bar: f64,

    pub clear_mode: ClearMode,
}

impl Default for FrameOutput {
    fn default() -> Self {
        Self {
            anchor: DVec2::ZERO,
            joint1: DVec2::ZERO,
            joint2: DVec2::ZERO,
            bob_radii: (0.0, 0.0),
            angle1_text: String::new(),
            angle2_text: String::new(),
            energy_text: String::new(),
            energy: EnergySample {
                kinetic: 0.0,
                potential: 0.0,
                total: 0.0,
            },
            angle1_series: Vec::new(),
            angle2_series: Vec::new(),
            kinetic_bar: 0.0,
            potential_bar: 0.0,
            clear_mode: ClearMode::Clear,
        }
    }
}

/// Direct kinematic mapping from angles to the two joint positions.
pub fn joint_positions(state: &PendulumState, params: &PendulumParameters, anchor: DVec2) -> (DVec2, DVec2) {
    let joint1 = anchor + params.length1 * DVec2::new(state.angle1.sin(), state.angle1.cos());
    let joint2 = joint1 + params.length2 * DVec2::new(state.angle2.sin(), state.angle2.cos());
    (joint1, joint2)
}

/// Angle 0 sits on the vertical centre of the graph, positive angles go up.
pub fn plot_y(angle: f64, graph_height: f64, pixels_per_radian: f64) -> f64 {
    graph_height / 2.0 - angle * pixels_per_radian
}

impl FrameOutput {
    /// Refills this output in place, reusing its string and series buffers.
    pub fn fill(
        &mut self,
        state: &PendulumState,
        params: &PendulumParameters,
        history: &HistoryBuffer,
        config: &SimConfig,
        trace_enabled: bool,
    ) {
        self.anchor = DVec2::new(config.canvas_size.0 / 2.0, config.anchor_y);
        (self.joint1, self.joint2) = joint_positions(state, params, self.anchor);
        self.bob_radii = (
            params.mass1 * config.bob_radius_per_mass,
            params.mass2 * config.bob_radius_per_mass,
        );

        self.energy = energy::energy(state, params);

        self.angle1_text.clear();
        self.angle2_text.clear();
        self.energy_text.clear();
        // Writing into a String cannot fail
        let _ = write!(self.angle1_text, "Angle 1: {:.2} rad", state.angle1);
        let _ = write!(self.angle2_text, "Angle 2: {:.2} rad", state.angle2);
        let _ = write!(self.energy_text, "Total Energy: {:.2} J", self.energy.total);

        let (_, graph_height) = config.graph_size;
        let scale = config.graph_pixels_per_radian;
        self.angle1_series.clear();
        self.angle2_series.clear();
        for (i, a1, a2) in history.samples() {
            let x = i as f64;
            self.angle1_series.push(DVec2::new(x, plot_y(a1, graph_height, scale)));
            self.angle2_series.push(DVec2::new(x, plot_y(a2, graph_height, scale)));
        }

        (self.kinetic_bar, self.potential_bar) = energy::bar_heights(state, params, config.energy_size.1);

        self.clear_mode = if trace_enabled {
            ClearMode::Fade {
                alpha: config.trace_fade_alpha,
            }
        } else {
            ClearMode::Clear
        };
    }
}
