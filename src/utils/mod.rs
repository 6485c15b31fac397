#[allow(non_snake_case)]
pub mod ODEs;
pub mod energy_bars;
pub mod graph;
pub mod mesh_ribbon;
pub mod symplectic_euler;
