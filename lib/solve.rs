//! Numerov integration of the one-dimensional time-independent Schrödinger
//! equation at a fixed, externally supplied energy.
//!
//! [`integrate`] produces two raw half-solutions over the full mesh — one
//! grown outward from the potential minimum and one grown inward from both
//! mesh edges — which agree with the true solution's shape near their
//! respective seeding regions and diverge away from them. The two branches
//! are reconciled by [`Unresolved::resolve`], which rescales the edge branch
//! to match the center branch at a pair of turning points, stitches a single
//! normalized array, and reports the leftover derivative discontinuity at
//! each stitch point.
//!
//! The discontinuity residual is exactly zero only when the energy is a true
//! eigenvalue of the discretized problem; the visualizer surfaces it as a
//! solution-quality figure rather than searching for its root.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ MeshError, WfError },
    mesh::{ PotentialMesh, TurningPoints, classical_turning_points },
    utils::wf_renormalize,
    wavefunction::{ Metadata, Resolved, average },
};

pub type SolveResult<T> = Result<T, WfError>;

/// Whether a candidate solution is symmetric (even) or antisymmetric (odd)
/// about the integration origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Return `true` if `self` is `Even`.
    pub fn is_even(&self) -> bool { matches!(self, Self::Even) }

    /// Return `true` if `self` is `Odd`.
    pub fn is_odd(&self) -> bool { matches!(self, Self::Odd) }
}

/// The Numerov factor `F(x) = 1 - (dx²/6) (V(x) - E)`, taken with all inputs
/// explicit.
pub fn numerov_f(V: f64, E: f64, dx: f64) -> f64 {
    1.0 - dx.powi(2) / 6.0 * (V - E)
}

// three-term Numerov update: given psi[index] and the neighbor opposite the
// target, set the target sample
//
// rightwards => target = index + 1, otherwise target = index - 1
fn step<G>(psi: &mut nd::Array1<f64>, F: &G, index: usize, rightwards: bool)
where G: Fn(usize) -> f64
{
    let target = if rightwards { index + 1 } else { index - 1 };
    let prev1 = index;
    let prev2 = if rightwards { index - 1 } else { index + 1 };
    psi[target]
        = ((12.0 - 10.0 * F(prev1)) * psi[prev1] - F(prev2) * psi[prev2])
        / F(target);
}

/// A pair of raw Numerov half-solutions for one `(potential, energy, parity)`
/// triple, awaiting [resolution][Unresolved::resolve] at a pair of turning
/// points.
///
/// Owns its own copy of the potential; the branch arrays always have the
/// mesh's full length.
#[derive(Clone, Debug)]
pub struct Unresolved {
    // potential array (owned copy)
    V: nd::Array1<f64>,
    // fixed energy
    E: f64,
    // spatial extent
    x_max: f64,
    // grid spacing
    dx: f64,
    // branch grown outward from the potential minimum
    values_from_center: nd::Array1<f64>,
    // branch grown inward from both mesh edges
    values_from_edge: nd::Array1<f64>,
}

/// Integrate a potential mesh at a fixed energy and parity.
///
/// The center branch is seeded at the clamped index of the potential minimum
/// with `1` (even) or `0` (odd) and recurred outward in both directions; the
/// edge branch is seeded at both mesh edges with `±dx` and recurred inward
/// toward the minimum. Integration is pure arithmetic over fixed-size arrays
/// and cannot fail (the `N ≥ 3` precondition is enforced by
/// [`PotentialMesh`]).
pub fn integrate(mesh: &PotentialMesh, E: f64, parity: Parity) -> Unresolved {
    let V = mesh.get_V();
    let n = mesh.len();
    let dx = mesh.get_dx();
    let c = mesh.index_of_minimum();
    let F = |i: usize| numerov_f(V[i], E, dx);

    // outward from the minimum
    let mut center: nd::Array1<f64> = nd::Array1::zeros(n);
    if parity.is_even() {
        center[c] = 1.0;
        center[c + 1] = 0.5 * (12.0 - 10.0 * F(c)) * center[c] / F(c + 1);
    } else {
        center[c] = 0.0;
        center[c + 1] = dx;
    }
    for i in c + 1..n - 1 {
        step(&mut center, &F, i, true);
    }
    for i in (1..=c).rev() {
        step(&mut center, &F, i, false);
    }

    // inward from both edges; the solution is taken to be 0 outside the mesh
    let mut edge: nd::Array1<f64> = nd::Array1::zeros(n);
    edge[0] = if parity.is_even() { dx } else { -dx };
    edge[1] = (12.0 - 10.0 * F(0)) * edge[0] / F(1);
    for i in 1..c {
        step(&mut edge, &F, i, true);
    }
    edge[n - 1] = dx;
    edge[n - 2] = (12.0 - 10.0 * F(n - 1)) * edge[n - 1] / F(n - 2);
    for i in (c + 1..=n - 2).rev() {
        step(&mut edge, &F, i, false);
    }

    Unresolved {
        V: V.clone(),
        E,
        x_max: mesh.get_x_max(),
        dx,
        values_from_center: center,
        values_from_edge: edge,
    }
}

impl Unresolved {
    /// Get the fixed energy.
    pub fn energy(&self) -> f64 { self.E }

    /// Get the spatial extent.
    pub fn x_max(&self) -> f64 { self.x_max }

    /// Get the grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Get the number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.V.len() }

    /// Get a reference to the branch grown outward from the potential
    /// minimum.
    pub fn values_from_center(&self) -> &nd::Array1<f64> {
        &self.values_from_center
    }

    /// Get a reference to the branch grown inward from the mesh edges.
    pub fn values_from_edge(&self) -> &nd::Array1<f64> {
        &self.values_from_edge
    }

    /// The Numerov factor at mesh index `i`; see [`numerov_f`].
    pub fn f(&self, i: usize) -> f64 { numerov_f(self.V[i], self.E, self.dx) }

    /// Thin interface to [`classical_turning_points`][crate::mesh] for the
    /// stored potential and energy.
    pub fn classical_turning_points(&self) -> TurningPoints {
        classical_turning_points(&self.V, self.E)
    }

    // residual slope mismatch left behind at a stitch point; zero only at a
    // true eigenvalue of the discretized problem
    //
    // a stitch point on a mesh edge has no neighbor to evaluate and reports 0
    fn derivative_discontinuity<S>(&self, psi: &Arr1<S>, x: usize) -> f64
    where S: nd::Data<Elem = f64>
    {
        if x == 0 || x == psi.len() - 1 { return 0.0; }
        (psi[x + 1] + psi[x - 1] - (14.0 - 12.0 * self.f(x)) * psi[x])
            / self.dx
    }

    /// Rescale the edge branch to match the center branch at the given
    /// turning points, stitch a single array, normalize it, and report the
    /// leftover derivative discontinuity at each stitch point.
    ///
    /// The stitched array takes the scaled edge branch outside
    /// `[left, right)` and the raw center branch inside it.
    pub fn resolve(&self, tp: TurningPoints) -> SolveResult<Resolved> {
        let n = self.len();
        let TurningPoints { left, right } = tp;
        MeshError::check_turning_points(left, right, n)?;
        let left_scale
            = self.values_from_center[left] / self.values_from_edge[left];
        let right_scale
            = self.values_from_center[right] / self.values_from_edge[right];

        // piecewise: edge, center, edge
        let mut psi: nd::Array1<f64> = nd::Array1::zeros(n);
        for i in 0..left {
            psi[i] = left_scale * self.values_from_edge[i];
        }
        for i in left..right {
            psi[i] = self.values_from_center[i];
        }
        for i in right..n {
            psi[i] = right_scale * self.values_from_edge[i];
        }
        wf_renormalize(&mut psi, self.dx);

        let left_discont = self.derivative_discontinuity(&psi, left);
        let right_discont = self.derivative_discontinuity(&psi, right);

        let meta
            = Metadata::new(self.E, tp, left_discont, right_discont)?;
        let values: nd::Array1<C64> = psi.mapv(C64::from);
        Resolved::new(values, self.dx, meta, 0.0)
    }

    /// [Resolve][Self::resolve] at the stored potential's classical turning
    /// points.
    pub fn resolve_classical(&self) -> SolveResult<Resolved> {
        self.resolve(self.classical_turning_points())
    }
}

/// Integrate and resolve both parities at the classical turning points and
/// [average][crate::wavefunction::average] them into one physically
/// continuous solution.
pub fn solve_parity_pair(mesh: &PotentialMesh, E: f64)
    -> SolveResult<Resolved>
{
    let tp = mesh.classical_turning_points(E);
    let even = integrate(mesh, E, Parity::Even).resolve(tp)?;
    let odd = integrate(mesh, E, Parity::Odd).resolve(tp)?;
    average(&even, &odd)
}

#[cfg(test)]
mod test {
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use crate::{ mesh::PotentialMesh, utils::wf_norm_c };
    use super::*;

    // harmonic well over [-10, 10); E = 2.5 is the second even level
    fn qho_mesh() -> PotentialMesh {
        PotentialMesh::from_fn(1025, 20.0, |x| {
            let xc = x - 10.0;
            xc * xc / 2.0
        })
        .unwrap()
    }

    #[test]
    fn qho_eigenvalue_has_negligible_discontinuity() {
        let psi = qho_mesh()
            .integrate(2.5, Parity::Even)
            .resolve_classical()
            .unwrap();
        assert_abs_diff_eq!(
            psi.metadata().left_discontinuity, 0.0, epsilon = 1e-2);
        assert_abs_diff_eq!(
            psi.metadata().right_discontinuity, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn qho_eigenstate_is_symmetric_in_magnitude() {
        let mesh = qho_mesh();
        let c = mesh.index_of_minimum();
        assert_eq!(c, 512);
        let psi = mesh
            .integrate(2.5, Parity::Even)
            .resolve_classical()
            .unwrap();
        for k in 1..=c {
            assert_abs_diff_eq!(
                psi.values()[c + k].norm(),
                psi.values()[c - k].norm(),
                epsilon = 1e-6,
            );
        }
    }

    #[test]
    fn resolved_wavefunction_is_normalized() {
        let psi = qho_mesh()
            .integrate(2.5, Parity::Even)
            .resolve_classical()
            .unwrap();
        assert_relative_eq!(
            wf_norm_c(psi.values(), psi.dx()), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn discontinuity_changes_sign_across_the_eigenvalue() {
        let mesh = qho_mesh();
        let below = mesh
            .integrate(2.4, Parity::Even)
            .resolve_classical()
            .unwrap();
        let above = mesh
            .integrate(2.6, Parity::Even)
            .resolve_classical()
            .unwrap();
        let db = below.metadata().left_discontinuity;
        let da = above.metadata().left_discontinuity;
        assert!(db != 0.0 && da != 0.0);
        assert!(db * da < 0.0);
    }

    #[test]
    fn odd_parity_vanishes_at_the_origin() {
        let mesh = qho_mesh();
        let c = mesh.index_of_minimum();
        let raw = mesh.integrate(3.5, Parity::Odd);
        assert_eq!(raw.values_from_center()[c], 0.0);
        let psi = raw.resolve_classical().unwrap();
        assert_abs_diff_eq!(psi.values()[c].re, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn out_of_bounds_turning_points_are_rejected() {
        let raw = qho_mesh().integrate(2.5, Parity::Even);
        let inverted = TurningPoints { left: 700, right: 300 };
        assert!(raw.resolve(inverted).is_err());
        let oob = TurningPoints { left: 0, right: 1025 };
        assert!(raw.resolve(oob).is_err());
    }

    #[test]
    fn parity_pair_solution_is_normalized_and_continuous() {
        let psi = solve_parity_pair(&qho_mesh(), 2.5).unwrap();
        assert_relative_eq!(
            wf_norm_c(psi.values(), psi.dx()), 1.0, epsilon = 1e-9);
    }
}
