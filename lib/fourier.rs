//! Direct position-to-momentum transforms with a selectable evaluation
//! strategy.
//!
//! The transform here is a direct O(N²) double sum, not an FFT: the
//! visualizer's meshes are not power-of-two constrained and the transform
//! center is an arbitrary mesh index. For every output index `p`,
//! interpreted as a frequency `k = (p - c) dx` about the center `c`,
//! ```text
//! out[p] = Σᵢ v[i] e^(-i s k (i - c) dx)
//! ```
//! with `s` a caller-supplied frequency scale. The result is scaled by
//! `dx √(2π)` and renormalized to `Σ dx |out|² = 1`, so momentum-space
//! representations obey the same norm convention as position-space ones.
//!
//! Several strategies computing this same sum coexist deliberately:
//! [`Canonical`][Method::Canonical] is the correctness reference, and
//! [`Optimized`][Method::Optimized] replaces the per-term `cos`/`sin` calls
//! with a multiplicative complex-exponential recurrence for the interactive
//! path. The two are cross-checked in tests; neither is ever picked
//! silently.

use std::f64::consts::TAU;
use std::ops::Add;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    Arr1,
    error::FourierError,
    utils::wf_renormalize_c,
};

pub type FourierResult<T> = Result<T, FourierError>;

/// Transform strategy selector.
///
/// All strategies except [`RawDft`][Self::RawDft] compute the same
/// recentered sum and agree within floating tolerance; they differ in where
/// the recentering phase is applied and in how the complex exponentials are
/// generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// Reference form: the center shift is carried inside the exponent and
    /// every term pays a fresh `cos`/`sin`.
    Canonical,
    /// Accumulate the inner sums with the position origin at index 0, then
    /// apply the recentering phase in a separate pass over the output.
    Shifted,
    /// Like [`Shifted`][Self::Shifted], but the index-linear part of the
    /// recentering phase is not baked into the array at all; it is reported
    /// as a per-index `phase_shift` for lazy application at evaluation time.
    PhaseDeferred,
    /// Walk the frequency axis with a multiplicative complex step per space
    /// sample instead of recomputing `cos`/`sin` per frequency.
    /// Mathematically identical to [`Canonical`][Self::Canonical], differing
    /// only in rounding accumulation.
    Optimized,
    /// Plain discrete transform `Σᵢ v[i] e^(-2πi p i / N)` with its own
    /// `1/√N` normalization and no recentering. Diagnostic use only; not
    /// comparable to the other strategies.
    RawDft,
}

impl Method {
    /// Return `true` if `self` is `Canonical`.
    pub fn is_canonical(&self) -> bool { matches!(self, Self::Canonical) }

    /// Return `true` if `self` is `Shifted`.
    pub fn is_shifted(&self) -> bool { matches!(self, Self::Shifted) }

    /// Return `true` if `self` is `PhaseDeferred`.
    pub fn is_phase_deferred(&self) -> bool {
        matches!(self, Self::PhaseDeferred)
    }

    /// Return `true` if `self` is `Optimized`.
    pub fn is_optimized(&self) -> bool { matches!(self, Self::Optimized) }

    /// Return `true` if `self` is `RawDft`.
    pub fn is_raw_dft(&self) -> bool { matches!(self, Self::RawDft) }
}

/// A momentum-space sample array together with any evaluation phase the
/// producing strategy left unapplied.
#[derive(Clone, Debug)]
pub struct Transformed {
    /// Momentum-space samples.
    pub values: nd::Array1<C64>,
    /// Per-index phase to be applied as `e^(i phase_shift x)` at evaluation
    /// time; zero for every strategy except
    /// [`PhaseDeferred`][Method::PhaseDeferred].
    pub phase_shift: f64,
}

// inner sums with the position origin at index 0:
// out[p] = Σᵢ v[i] e^(-i θ (p - c) i), θ = s dx²
fn accumulate_origin<S>(values: &Arr1<S>, center: usize, theta: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n = values.len();
    let c = center as f64;
    (0..n)
        .map(|p| {
            let kp = p as f64 - c;
            values.iter().enumerate()
                .map(|(i, vi)| vi * C64::cis(-theta * kp * i as f64))
                .fold(C64::zero(), C64::add)
        })
        .collect()
}

fn canonical<S>(values: &Arr1<S>, center: usize, theta: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n = values.len();
    let c = center as f64;
    (0..n)
        .map(|p| {
            let kp = p as f64 - c;
            values.iter().enumerate()
                .map(|(i, vi)| {
                    vi * C64::cis(-theta * kp * (i as f64 - c))
                })
                .fold(C64::zero(), C64::add)
        })
        .collect()
}

fn shifted<S>(values: &Arr1<S>, center: usize, theta: f64) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let c = center as f64;
    let mut out = accumulate_origin(values, center, theta);
    // recentering phase, applied after the fact
    out.iter_mut().enumerate()
        .for_each(|(p, op)| {
            *op *= C64::cis(theta * c * (p as f64 - c));
        });
    out
}

fn phase_deferred<S>(values: &Arr1<S>, center: usize, theta: f64)
    -> (nd::Array1<C64>, f64)
where S: nd::Data<Elem = C64>
{
    let c = center as f64;
    let mut out = accumulate_origin(values, center, theta);
    // the index-constant residue of the recentering phase is folded in here;
    // the index-linear part is deferred to evaluation time
    let residue = C64::cis(-theta * c * c);
    out.iter_mut().for_each(|op| { *op *= residue; });
    (out, theta * c)
}

fn optimized<S>(values: &Arr1<S>, center: usize, theta: f64)
    -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n = values.len();
    let c = center as f64;
    let mut out: nd::Array1<C64> = nd::Array1::zeros(n);
    for (i, vi) in values.iter().enumerate() {
        let xi = i as f64 - c;
        // two trig calls per space sample; every frequency step is one
        // complex multiply
        let step = C64::cis(-theta * xi);
        let mut cur = vi * C64::cis(theta * c * xi);
        for op in out.iter_mut() {
            *op += cur;
            cur *= step;
        }
    }
    out
}

fn raw_dft<S>(values: &Arr1<S>) -> nd::Array1<C64>
where S: nd::Data<Elem = C64>
{
    let n = values.len();
    let w = TAU / n as f64;
    let r = (n as f64).sqrt().recip();
    (0..n)
        .map(|p| {
            let sum: C64
                = values.iter().enumerate()
                .map(|(i, vi)| vi * C64::cis(-w * (p * i) as f64))
                .fold(C64::zero(), C64::add);
            sum * r
        })
        .collect()
}

/// Carry a position-space sample array to momentum space.
///
/// `center` is the mesh index about which frequencies are measured and must
/// lie within the mesh; `scale` multiplies every frequency. All strategies
/// except [`RawDft`][Method::RawDft] return an array normalized to
/// `Σ dx |out|² = 1`.
pub fn transform<S>(
    values: &Arr1<S>,
    center: usize,
    dx: f64,
    scale: f64,
    method: Method,
) -> FourierResult<Transformed>
where S: nd::Data<Elem = C64>
{
    let n = values.len();
    FourierError::check_center(center, n)?;
    let theta = scale * dx * dx;
    let front = dx * TAU.sqrt();
    let (mut out, phase_shift): (nd::Array1<C64>, f64)
        = match method {
            Method::Canonical => (canonical(values, center, theta), 0.0),
            Method::Shifted => (shifted(values, center, theta), 0.0),
            Method::PhaseDeferred => phase_deferred(values, center, theta),
            Method::Optimized => (optimized(values, center, theta), 0.0),
            Method::RawDft => {
                return Ok(Transformed {
                    values: raw_dft(values),
                    phase_shift: 0.0,
                });
            },
        };
    out.iter_mut().for_each(|op| { *op *= front; });
    wf_renormalize_c(&mut out, dx);
    Ok(Transformed { values: out, phase_shift })
}

#[cfg(test)]
mod test {
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use ndarray as nd;
    use num_complex::Complex64 as C64;
    use crate::{
        mesh::PotentialMesh,
        solve::Parity,
        utils::{ wf_norm_c, wf_normalized_c },
    };
    use super::*;

    // production-sized position-space state to transform
    fn qho_state() -> (nd::Array1<C64>, usize, f64) {
        let mesh = PotentialMesh::from_fn(1025, 20.0, |x| {
            let xc = x - 10.0;
            xc * xc / 2.0
        })
        .unwrap();
        let psi = mesh
            .integrate(2.5, Parity::Even)
            .resolve_classical()
            .unwrap();
        (psi.values().clone(), mesh.index_of_minimum(), mesh.get_dx())
    }

    fn max_norm(q: &nd::Array1<C64>) -> f64 {
        q.iter().map(|qk| qk.norm()).fold(0.0, f64::max)
    }

    #[test]
    fn all_recentered_strategies_agree_pointwise() {
        let (v, c, dx) = qho_state();
        let reference
            = transform(&v, c, dx, 0.5, Method::Canonical).unwrap();
        let tol = 1e-6 * max_norm(&reference.values);
        for method in [Method::Shifted, Method::Optimized] {
            let out = transform(&v, c, dx, 0.5, method).unwrap();
            assert_eq!(out.phase_shift, 0.0);
            for (r, o) in reference.values.iter().zip(&out.values) {
                assert_abs_diff_eq!((r - o).norm(), 0.0, epsilon = tol);
            }
        }
    }

    #[test]
    fn deferred_phase_reproduces_the_canonical_array() {
        let (v, c, dx) = qho_state();
        let reference
            = transform(&v, c, dx, 0.5, Method::Canonical).unwrap();
        let deferred
            = transform(&v, c, dx, 0.5, Method::PhaseDeferred).unwrap();
        assert_abs_diff_eq!(
            deferred.phase_shift, 0.5 * c as f64 * dx * dx, epsilon = 1e-15);
        let tol = 1e-6 * max_norm(&reference.values);
        for (p, (r, d)) in
            reference.values.iter().zip(&deferred.values).enumerate()
        {
            let evaluated
                = d * C64::cis(deferred.phase_shift * p as f64);
            assert_abs_diff_eq!((r - evaluated).norm(), 0.0, epsilon = tol);
        }
    }

    #[test]
    fn transformed_representation_is_normalized() {
        let (v, c, dx) = qho_state();
        for method in [
            Method::Canonical,
            Method::Shifted,
            Method::PhaseDeferred,
            Method::Optimized,
        ] {
            let out = transform(&v, c, dx, 0.5, method).unwrap();
            assert_relative_eq!(
                wf_norm_c(&out.values, dx), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn raw_dft_preserves_the_euclidean_norm() {
        let (v, _, _) = qho_state();
        let v = wf_normalized_c(&v, 1.0);
        let out = transform(&v, 0, 1.0, 1.0, Method::RawDft).unwrap();
        let before: f64 = v.iter().map(|vk| vk.norm_sqr()).sum();
        let after: f64 = out.values.iter().map(|ok| ok.norm_sqr()).sum();
        assert_relative_eq!(after, before, epsilon = 1e-9);
    }

    #[test]
    fn out_of_bounds_center_is_rejected() {
        let v: nd::Array1<C64> = nd::Array1::zeros(16);
        assert!(transform(&v, 16, 0.1, 1.0, Method::Canonical).is_err());
        assert!(transform(&v, 15, 0.1, 1.0, Method::Canonical).is_ok());
    }
}
