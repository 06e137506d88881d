//! Miscellaneous tools.
//!
//! The norm used throughout is the plain Riemann sum `Σ dx |q[i]|²`, matching
//! the convention the visualizer applies to both position- and momentum-space
//! representations.

use ndarray::{ self as nd, Ix1 };
use num_complex::Complex64 as C64;

/// Calculate the norm of a real-valued wavefunction as `Σ dx q[i]²`.
pub fn wf_norm<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = f64>
{
    dx * q.iter().map(|qk| qk * qk).sum::<f64>()
}

/// Calculate the norm of a complex-valued wavefunction as `Σ dx |q[i]|²`.
pub fn wf_norm_c<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> f64
where S: nd::Data<Elem = C64>
{
    dx * q.iter().map(|qk| qk.norm_sqr()).sum::<f64>()
}

// an exactly zero norm is mapped to 1 so that identically zero input passes
// through unchanged instead of dividing by zero
fn norm_recip(norm: f64) -> f64 {
    if norm == 0.0 { 1.0 } else { norm.sqrt().recip() }
}

/// Renormalize a real-valued wavefunction in place.
///
/// An exactly zero norm is treated as 1 (degenerate input passes through
/// unchanged).
pub fn wf_renormalize<S>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
where S: nd::DataMut<Elem = f64>
{
    let r = norm_recip(wf_norm(q, dx));
    q.iter_mut().for_each(|qk| { *qk *= r; });
}

/// Renormalize a complex-valued wavefunction in place.
///
/// An exactly zero norm is treated as 1 (degenerate input passes through
/// unchanged).
pub fn wf_renormalize_c<S>(q: &mut nd::ArrayBase<S, Ix1>, dx: f64)
where S: nd::DataMut<Elem = C64>
{
    let r = norm_recip(wf_norm_c(q, dx));
    q.iter_mut().for_each(|qk| { *qk *= r; });
}

/// Return a normalized copy of a real-valued wavefunction.
pub fn wf_normalized<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let r = norm_recip(wf_norm(q, dx));
    q.mapv(|qk| qk * r)
}

/// Return a normalized copy of a complex-valued wavefunction.
pub fn wf_normalized_c<S>(q: &nd::ArrayBase<S, Ix1>, dx: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let r = norm_recip(wf_norm_c(q, dx));
    q.mapv(|qk| qk * r)
}
