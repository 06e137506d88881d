#![allow(dead_code, non_snake_case)]

//! Numerical core for an interactive visualizer of the one-dimensional
//! time-independent Schrödinger equation on an arbitrary sampled potential.
//!
//! The pipeline implemented here runs one way:
//! 1. A [potential mesh][mesh::PotentialMesh] and an externally supplied
//!    energy are integrated outward from the potential minimum and inward
//!    from both mesh edges via Numerov's scheme, once per
//!    [parity][solve::Parity], producing a pair of raw
//!    [half-solutions][solve::Unresolved].
//! 2. The two branches are rescaled to match at the classical turning points,
//!    stitched, and normalized into a single complex-valued
//!    [`Resolved`][wavefunction::Resolved] wavefunction, with the leftover
//!    derivative discontinuity at each stitch point reported as a
//!    solution-quality residual.
//! 3. Even- and odd-parity solutions at the same energy may be
//!    [averaged][wavefunction::average] into one continuous solution,
//!    weighted to cancel the left discontinuity.
//! 4. Position-space solutions may be carried to momentum space by a family
//!    of direct (O(N²), non-FFT) [Fourier transforms][fourier::transform]
//!    with selectable evaluation strategy.
//!
//! Time evolution is the closed-form stationary phase `e^(-iEt)`; see
//! [`wavefunction`]. Energies are supplied by the caller (this crate performs
//! no eigenvalue search), and all quantities are in natural units
//! (ħ = m = 1).
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod utils;
pub mod mesh;
pub mod solve;
pub mod wavefunction;
pub mod fourier;

pub mod docs;

// threshold below which a branch's derivative discontinuity counts as
// already continuous when parity-averaging
pub(crate) const DEF_AVG_EPSILON: f64 = 1e-2;
// threshold below which a sample is ignored when fixing the overall sign
pub(crate) const DEF_SIGN_EPSILON: f64 = 1e-16;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
