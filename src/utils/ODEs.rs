/// Right-hand side of a first-order system `dy/dt = f(t, y)`.
///
/// Second-order systems are flattened into interleaved `(position, velocity)`
/// pairs, so `out[2i]` is the rate of position `i` and `out[2i + 1]` its
/// acceleration.
pub trait ODEFunc {
    fn call(&self, t: f64, y: &[f64], out: &mut [f64]);
}
