pub mod controls;
pub mod plugin;
pub mod sim;
pub mod utils;

pub use plugin::PendulumPlugin;
pub use sim::Simulation;
