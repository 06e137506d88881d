//! Wavefunction value types: single-energy resolved solutions, the
//! discontinuity-weighted parity average, and equal-weight superpositions.
//!
//! Every value here is immutable once constructed; averaging, transforming,
//! or superposing always allocates a new value, so results may be freely
//! shared by concurrent readers. Time evolution is the closed-form
//! stationary phase: a [`Resolved`] wavefunction at mesh index `x` and time
//! `t` evaluates to
//! ```text
//! ψ[x] e^(-i E t) e^(i φ x)
//! ```
//! where the per-index phase `φ` is nonzero only for Fourier-transformed
//! results whose recentering phase was [deferred][crate::fourier::Method]
//! rather than baked into the array.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    DEF_AVG_EPSILON,
    DEF_SIGN_EPSILON,
    error::{ LengthError, WfError },
    fourier::{ self, Method },
    mesh::TurningPoints,
    utils::wf_renormalize_c,
};

pub type WfResult<T> = Result<T, WfError>;

/// Quality and provenance record attached to a [`Resolved`] wavefunction.
///
/// All fields are guaranteed finite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Metadata {
    /// Fixed energy of the solution.
    pub energy: f64,
    /// Turning points the two branches were stitched at.
    pub turning_points: TurningPoints,
    /// Derivative-discontinuity residual at the left stitch point.
    pub left_discontinuity: f64,
    /// Derivative-discontinuity residual at the right stitch point.
    pub right_discontinuity: f64,
}

impl Metadata {
    /// Create a new `Metadata`, rejecting non-finite fields.
    pub fn new(
        energy: f64,
        turning_points: TurningPoints,
        left_discontinuity: f64,
        right_discontinuity: f64,
    ) -> WfResult<Self>
    {
        WfError::check_finite("energy", energy)?;
        WfError::check_finite("left_discontinuity", left_discontinuity)?;
        WfError::check_finite("right_discontinuity", right_discontinuity)?;
        Ok(Self {
            energy,
            turning_points,
            left_discontinuity,
            right_discontinuity,
        })
    }

    /// Combined solution-quality figure, `|left · right|`.
    pub fn discontinuity(&self) -> f64 {
        (self.left_discontinuity * self.right_discontinuity).abs()
    }
}

/// A single-energy, complex-valued, time-evolvable solution.
///
/// Produced by [turning-point resolution][crate::solve::Unresolved::resolve],
/// by [`average`], or by a [Fourier transform][Self::fourier_transform]; each
/// producer allocates a new instance.
#[derive(Clone, Debug)]
pub struct Resolved {
    // sample array; length fixed at construction
    values: nd::Array1<C64>,
    // grid spacing
    dx: f64,
    meta: Metadata,
    // per-index evaluation phase; nonzero only for phase-deferred transforms
    phase_shift: f64,
}

impl Resolved {
    /// Create a new `Resolved` wavefunction, rejecting non-finite spacing or
    /// phase shift.
    pub fn new(
        values: nd::Array1<C64>,
        dx: f64,
        meta: Metadata,
        phase_shift: f64,
    ) -> WfResult<Self>
    {
        WfError::check_finite("dx", dx)?;
        WfError::check_finite("phase_shift", phase_shift)?;
        Ok(Self { values, dx, meta, phase_shift })
    }

    /// Get a reference to the sample array.
    pub fn values(&self) -> &nd::Array1<C64> { &self.values }

    /// Get the grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Get the attached metadata.
    pub fn metadata(&self) -> &Metadata { &self.meta }

    /// Get the fixed energy.
    pub fn energy(&self) -> f64 { self.meta.energy }

    /// Get the per-index evaluation phase.
    pub fn phase_shift(&self) -> f64 { self.phase_shift }

    /// Get the number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.values.len() }

    /// Evaluate the time-evolved value at mesh index `x` and time `t`.
    pub fn value_at(&self, x: usize, t: f64) -> C64 {
        let phase = -self.meta.energy * t + self.phase_shift * x as f64;
        self.values[x] * C64::from_polar(1.0, phase)
    }

    /// Sample the whole array at time `t`.
    pub fn values_at_time(&self, t: f64) -> nd::Array1<C64> {
        (0..self.len()).map(|x| self.value_at(x, t)).collect()
    }

    /// Carry this solution to momentum space with the given transform
    /// strategy; see [`fourier::transform`].
    ///
    /// The result is a new wavefunction over the same mesh length and
    /// spacing, carrying this solution's metadata and whatever evaluation
    /// phase the strategy left unapplied.
    pub fn fourier_transform(&self, center: usize, scale: f64, method: Method)
        -> WfResult<Self>
    {
        let out
            = fourier::transform(
                &self.values, center, self.dx, scale, method)?;
        Self::new(out.values, self.dx, self.meta, out.phase_shift)
    }

    /// Wrap `self` as a single-component superposition.
    pub fn as_generalized(self) -> Generalized {
        Generalized { components: vec![self] }
    }
}

/// Combine an even- and an odd-parity solution at the same energy and
/// turning points into one physically continuous solution, weighted toward
/// whichever branch has the smaller left derivative discontinuity.
///
/// If either input's left discontinuity is already below `1e-2` in
/// magnitude, that input's samples are taken unchanged; otherwise the second
/// input is scaled by `k = -d₁/d₂`, which cancels the left discontinuity by
/// construction, and the sum is renormalized.
///
/// Sign convention: scanning rightward from the left turning point, the
/// first sample whose real part exceeds `1e-16` in magnitude is made
/// positive, negating the whole array if necessary, so the solution enters
/// the classically allowed region from the left with a deterministic sign.
///
/// The output carries the first input's energy and turning points, with both
/// discontinuities reported as zero.
pub fn average(a: &Resolved, b: &Resolved) -> WfResult<Resolved> {
    LengthError::check(&a.values, &b.values)?;
    if a.dx != b.dx {
        return Err(WfError::MismatchedSpacing(a.dx, b.dx));
    }
    let d1 = a.meta.left_discontinuity;
    let d2 = b.meta.left_discontinuity;
    let mut values: nd::Array1<C64>
        = if d1.abs() < DEF_AVG_EPSILON {
            a.values.clone()
        } else if d2.abs() < DEF_AVG_EPSILON {
            b.values.clone()
        } else {
            // want d1 + k d2 = 0
            let k = -d1 / d2;
            let mut sum: nd::Array1<C64>
                = nd::Zip::from(&a.values).and(&b.values)
                .map_collect(|ak, bk| ak + k * bk);
            wf_renormalize_c(&mut sum, a.dx);
            sum
        };

    let wants_flip: bool
        = values.iter()
        .skip(a.meta.turning_points.left)
        .find(|vk| vk.re.abs() > DEF_SIGN_EPSILON)
        .map(|vk| vk.re < 0.0)
        .unwrap_or(false);
    if wants_flip {
        values.iter_mut().for_each(|vk| { *vk = -*vk; });
    }

    let meta = Metadata::new(a.meta.energy, a.meta.turning_points, 0.0, 0.0)?;
    Resolved::new(values, a.dx, meta, a.phase_shift)
}

/// An equal-weight superposition of [`Resolved`] solutions at distinct
/// energies.
///
/// All components are guaranteed to share a length and grid spacing; the
/// value at a mesh index and time is the arithmetic mean of the components'
/// time-evolved values.
#[derive(Clone, Debug)]
pub struct Generalized {
    components: Vec<Resolved>,
}

impl Generalized {
    /// Create a new superposition, rejecting an empty component list or
    /// components that disagree on length or spacing.
    pub fn new(components: Vec<Resolved>) -> WfResult<Self> {
        let first = components.first().ok_or(WfError::EmptyComponents)?;
        let n = first.len();
        let dx = first.dx;
        for psi in components.iter().skip(1) {
            if psi.len() != n {
                return Err(LengthError(n, psi.len()).into());
            }
            if psi.dx != dx {
                return Err(WfError::MismatchedSpacing(dx, psi.dx));
            }
        }
        Ok(Self { components })
    }

    /// Get a reference to the component list.
    pub fn components(&self) -> &[Resolved] { &self.components }

    /// Get the shared component length.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.components[0].len() }

    /// Get the shared grid spacing.
    pub fn dx(&self) -> f64 { self.components[0].dx }

    /// Evaluate the mean time-evolved value at mesh index `x` and time `t`.
    pub fn value_at(&self, x: usize, t: f64) -> C64 {
        let sum: C64
            = self.components.iter()
            .map(|psi| psi.value_at(x, t))
            .sum();
        sum / self.components.len() as f64
    }

    /// Sample the whole superposition at time `t`.
    pub fn values_at_time(&self, t: f64) -> nd::Array1<C64> {
        (0..self.len()).map(|x| self.value_at(x, t)).collect()
    }

    /// Sample the real part of the superposition at time 0.
    pub fn values_at_time_zero(&self) -> nd::Array1<f64> {
        (0..self.len()).map(|x| self.value_at(x, 0.0).re).collect()
    }
}

#[cfg(test)]
mod test {
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use ndarray as nd;
    use num_complex::Complex64 as C64;
    use crate::{
        mesh::PotentialMesh,
        solve::Parity,
        utils::wf_norm_c,
    };
    use super::*;

    fn tp(left: usize, right: usize) -> TurningPoints {
        TurningPoints { left, right }
    }

    fn qho_even() -> Resolved {
        PotentialMesh::from_fn(1025, 20.0, |x| {
            let xc = x - 10.0;
            xc * xc / 2.0
        })
        .unwrap()
        .integrate(2.5, Parity::Even)
        .resolve_classical()
        .unwrap()
    }

    #[test]
    fn metadata_rejects_non_finite_fields() {
        assert!(Metadata::new(f64::NAN, tp(0, 1), 0.0, 0.0).is_err());
        assert!(Metadata::new(1.0, tp(0, 1), f64::INFINITY, 0.0).is_err());
        assert!(Metadata::new(1.0, tp(0, 1), 0.0, f64::NAN).is_err());
        assert!(Metadata::new(1.0, tp(0, 1), 0.0, 0.0).is_ok());
    }

    #[test]
    fn resolved_rejects_non_finite_spacing() {
        let meta = Metadata::new(1.0, tp(0, 1), 0.0, 0.0).unwrap();
        let values: nd::Array1<C64> = nd::Array1::zeros(8);
        assert!(Resolved::new(values.clone(), f64::NAN, meta, 0.0).is_err());
        assert!(Resolved::new(values, 0.1, meta, 0.0).is_ok());
    }

    #[test]
    fn time_evolution_preserves_magnitude() {
        let psi = qho_even();
        for t in [0.0, 0.7, 13.5] {
            for x in [0, 312, 512, 800] {
                assert_abs_diff_eq!(
                    psi.value_at(x, t).norm(),
                    psi.values()[x].norm(),
                    epsilon = 1e-12,
                );
            }
        }
    }

    #[test]
    fn time_evolution_rotates_by_the_stationary_phase() {
        let psi = qho_even();
        let t = 0.25;
        let expected
            = psi.values()[512] * C64::from_polar(1.0, -psi.energy() * t);
        let got = psi.value_at(512, t);
        assert_abs_diff_eq!((got - expected).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn deferred_phase_evaluates_like_the_canonical_transform() {
        let psi = qho_even();
        let c = 512; // minimum index of the 1025-point harmonic mesh
        let reference
            = psi.fourier_transform(c, 0.5, Method::Canonical).unwrap();
        let deferred
            = psi.fourier_transform(c, 0.5, Method::PhaseDeferred).unwrap();
        assert_eq!(reference.phase_shift(), 0.0);
        assert!(deferred.phase_shift() != 0.0);
        let tol: f64
            = 1e-6
            * reference.values().iter()
            .map(|vk| vk.norm())
            .fold(0.0, f64::max);
        for t in [0.0, 0.8] {
            for x in [0, 137, 512, 1024] {
                let r = reference.value_at(x, t);
                let d = deferred.value_at(x, t);
                assert_abs_diff_eq!((r - d).norm(), 0.0, epsilon = tol);
            }
        }
    }

    #[test]
    fn averaging_near_eigenvalue_is_idempotent_up_to_sign() {
        let psi = qho_even();
        assert!(psi.metadata().left_discontinuity.abs() < 1e-2);
        let avg = average(&psi, &psi).unwrap();
        // sample arrays agree up to one overall sign
        let sign: f64
            = psi.values().iter().zip(avg.values())
            .find(|(p, _)| p.re.abs() > 1e-12)
            .map(|(p, a)| if (p.re < 0.0) == (a.re < 0.0) { 1.0 } else { -1.0 })
            .unwrap();
        for (p, a) in psi.values().iter().zip(avg.values()) {
            assert_abs_diff_eq!((sign * p - a).norm(), 0.0, epsilon = 1e-12);
        }
        assert_eq!(avg.metadata().left_discontinuity, 0.0);
        assert_eq!(avg.metadata().right_discontinuity, 0.0);
    }

    #[test]
    fn averaged_sign_is_positive_entering_the_well() {
        let psi = qho_even();
        let avg = average(&psi, &psi).unwrap();
        let first
            = avg.values().iter()
            .skip(avg.metadata().turning_points.left)
            .find(|vk| vk.re.abs() > 1e-16)
            .unwrap();
        assert!(first.re > 0.0);
    }

    #[test]
    fn averaging_rejects_mismatched_lengths() {
        let psi = qho_even();
        let meta = *psi.metadata();
        let short: nd::Array1<C64> = nd::Array1::zeros(16);
        let other = Resolved::new(short, psi.dx(), meta, 0.0).unwrap();
        assert!(average(&psi, &other).is_err());
    }

    #[test]
    fn superposition_of_identical_components_matches_either() {
        let psi = qho_even();
        let sup
            = Generalized::new(vec![psi.clone(), psi.clone()]).unwrap();
        for t in [0.0, 1.3] {
            for x in [0, 256, 512, 1024] {
                let lone = psi.value_at(x, t);
                let mean = sup.value_at(x, t);
                assert_abs_diff_eq!((lone - mean).norm(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn superposition_rejects_bad_component_lists() {
        assert!(Generalized::new(Vec::new()).is_err());
        let psi = qho_even();
        let meta = *psi.metadata();
        let short: nd::Array1<C64> = nd::Array1::zeros(16);
        let other = Resolved::new(short, psi.dx(), meta, 0.0).unwrap();
        assert!(Generalized::new(vec![psi, other]).is_err());
    }

    #[test]
    fn superposition_mean_stays_normalized_for_one_component() {
        let psi = qho_even();
        let dx = psi.dx();
        let sup = psi.as_generalized();
        let q = sup.values_at_time(2.0);
        assert_relative_eq!(wf_norm_c(&q, dx), 1.0, epsilon = 1e-9);
    }
}
