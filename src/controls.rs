//! Keyboard control surface. Each parameter gets a pair of keys that step it
//! through the same bounded range a slider would offer. The length ranges
//! keep the fully stretched pendulum inside its canvas.

use bevy::prelude::*;
use log::info;

use crate::sim::Simulation;
use crate::sim::state::PendulumParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Length1,
    Length2,
    Mass1,
    Mass2,
    Gravity,
}

impl Parameter {
    pub fn get(self, params: &PendulumParameters) -> f64 {
        match self {
            Parameter::Length1 => params.length1,
            Parameter::Length2 => params.length2,
            Parameter::Mass1 => params.mass1,
            Parameter::Mass2 => params.mass2,
            Parameter::Gravity => params.gravity,
        }
    }

    pub fn apply(self, sim: &mut Simulation, value: f64) {
        match self {
            Parameter::Length1 => sim.set_length1(value),
            Parameter::Length2 => sim.set_length2(value),
            Parameter::Mass1 => sim.set_mass1(value),
            Parameter::Mass2 => sim.set_mass2(value),
            Parameter::Gravity => sim.set_gravity(value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParameterBinding {
    pub parameter: Parameter,
    pub increase: KeyCode,
    pub decrease: KeyCode,
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl ParameterBinding {
    /// Value after `steps` increments (negative to decrement), kept in range.
    pub fn stepped(&self, current: f64, steps: i32) -> f64 {
        (current + self.step * steps as f64).clamp(self.min, self.max)
    }
}

pub const BINDINGS: [ParameterBinding; 5] = [
    ParameterBinding { parameter: Parameter::Length1, increase: KeyCode::KeyQ, decrease: KeyCode::KeyA, step: 10.0, min: 50.0, max: 200.0 },
    ParameterBinding { parameter: Parameter::Length2, increase: KeyCode::KeyW, decrease: KeyCode::KeyS, step: 10.0, min: 50.0, max: 200.0 },
    ParameterBinding { parameter: Parameter::Mass1, increase: KeyCode::KeyE, decrease: KeyCode::KeyD, step: 1.0, min: 1.0, max: 20.0 },
    ParameterBinding { parameter: Parameter::Mass2, increase: KeyCode::KeyR, decrease: KeyCode::KeyF, step: 1.0, min: 1.0, max: 20.0 },
    ParameterBinding { parameter: Parameter::Gravity, increase: KeyCode::KeyT, decrease: KeyCode::KeyG, step: 0.5, min: 0.0, max: 30.0 },
];

pub const RESET_KEY: KeyCode = KeyCode::Space;
pub const TRACE_KEY: KeyCode = KeyCode::KeyC;
pub const START_KEY: KeyCode = KeyCode::Enter;

pub const HELP_TEXT: &str = "Q/A length 1   W/S length 2   E/D mass 1   R/F mass 2   T/G gravity\n\
Space reset   C trace";

/// The start-up popup. Purely presentational.
#[derive(Resource, Debug)]
pub struct IntroOverlay {
    visible: bool,
}

impl IntroOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn dismiss_intro(&mut self) {
        self.visible = false;
    }
}

impl Default for IntroOverlay {
    fn default() -> Self {
        Self { visible: true }
    }
}

pub fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<Simulation>,
    mut intro: ResMut<IntroOverlay>,
) {
    for binding in BINDINGS.iter() {
        let steps = keys.just_pressed(binding.increase) as i32 - keys.just_pressed(binding.decrease) as i32;
        if steps == 0 {
            continue;
        }
        let value = binding.stepped(binding.parameter.get(sim.params()), steps);
        binding.parameter.apply(&mut sim, value);
        info!("{:?} set to {value}", binding.parameter);
    }

    if keys.just_pressed(RESET_KEY) {
        sim.reset();
    }

    if keys.just_pressed(TRACE_KEY) {
        let enabled = !sim.trace_enabled();
        sim.set_trace_enabled(enabled);
        info!("trace {}", if enabled { "enabled" } else { "disabled" });
    }

    if keys.just_pressed(START_KEY) && intro.is_visible() {
        intro.dismiss_intro();
    }
}
