//! Potential meshes and classical turning-point helpers.
//!
//! A potential is an ordered sequence of `N ≥ 3` real samples implicitly
//! covering the spatial extent `[0, x_max)`. The helpers here locate the
//! index of the global minimum (the integration origin for the
//! [Numerov scheme][crate::solve]) and the classical turning points for a
//! given energy.
//!
//! ```
//! use ndarray as nd;
//! use psix::mesh::{ PotentialMesh, classical_turning_points };
//!
//! // harmonic well over [-10, 10)
//! let mesh = PotentialMesh::from_fn(1025, 20.0, |x| {
//!     let xc = x - 10.0;
//!     xc * xc / 2.0
//! }).unwrap();
//! let tp = classical_turning_points(mesh.get_V(), 2.5);
//! assert!(tp.left < mesh.index_of_minimum());
//! assert!(tp.right > mesh.index_of_minimum());
//! ```

use ndarray as nd;
use crate::{
    Arr1,
    error::MeshError,
    solve::{ self, Parity, Unresolved },
};

pub type MeshResult<T> = Result<T, MeshError>;

/// A pair of mesh indices bracketing the classically allowed region for some
/// energy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TurningPoints {
    /// First index at which the energy exceeds the potential.
    pub left: usize,
    /// Last index at which the energy exceeds the potential.
    pub right: usize,
}

/// Return the index of the global minimum of a potential, clamped to
/// `[1, N - 2]` so that the integrator always has two neighbors to seed from.
///
/// A tie (a run of equal globally-minimal samples) is broken by taking the
/// midpoint of the run.
///
/// *Panics if `V` is empty*.
pub fn index_of_minimum<S>(V: &Arr1<S>) -> usize
where S: nd::Data<Elem = f64>
{
    let min: f64
        = V.iter().copied()
        .fold(V[0], f64::min);
    let first: usize
        = V.iter().position(|Vk| *Vk == min)
        .unwrap_or(0);
    let last: usize
        = V.iter().rposition(|Vk| *Vk == min)
        .unwrap_or(first);
    let mid = (first + last) / 2;
    mid.clamp(1, V.len().saturating_sub(2).max(1))
}

/// Return the classical turning points of a potential for a given energy.
///
/// `left` is the first index for which `E > V[left]`; `right` is the last.
/// If no such pair exists with `left <= right` (the energy lies below the
/// potential everywhere, or the scans cross), both points fall back to the
/// mesh edges `{0, N - 1}`, treating the mesh as an infinite well.
pub fn classical_turning_points<S>(V: &Arr1<S>, E: f64) -> TurningPoints
where S: nd::Data<Elem = f64>
{
    let n = V.len();
    let left = V.iter().position(|Vk| E > *Vk);
    let right = V.iter().rposition(|Vk| E > *Vk);
    match (left, right) {
        (Some(l), Some(r)) if l <= r => TurningPoints { left: l, right: r },
        _ => TurningPoints { left: 0, right: n - 1 },
    }
}

/// Simple record pairing potential samples with their spatial extent.
///
/// Arrays borrowed from this type are guaranteed to have at least 3 samples
/// covering `[0, x_max)` with uniform spacing `dx = x_max / N`, `x_max > 0`.
#[derive(Clone, Debug)]
pub struct PotentialMesh {
    // potential array
    V: nd::Array1<f64>,
    // spatial extent
    x_max: f64,
    // implied grid spacing
    dx: f64,
    // array size
    n: usize,
}

impl PotentialMesh {
    /// Create a new `PotentialMesh` from a bare sample array.
    pub fn new(V: nd::Array1<f64>, x_max: f64) -> MeshResult<Self> {
        MeshError::check_len(V.len())?;
        MeshError::check_extent(x_max)?;
        let n = V.len();
        let dx = x_max / n as f64;
        Ok(Self { V, x_max, dx, n })
    }

    /// Create a new `PotentialMesh` by sampling a potential function at the
    /// centers of `n` cells covering `[0, x_max)`, i.e. at
    /// `x = (i + 1/2) x_max / n`.
    pub fn from_fn<F>(n: usize, x_max: f64, mut V: F) -> MeshResult<Self>
    where F: FnMut(f64) -> f64
    {
        MeshError::check_len(n)?;
        MeshError::check_extent(x_max)?;
        let dx = x_max / n as f64;
        let samples: nd::Array1<f64>
            = (0..n)
            .map(|i| V((i as f64 + 0.5) * dx))
            .collect();
        Ok(Self { V: samples, x_max, dx, n })
    }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the spatial extent.
    pub fn get_x_max(&self) -> f64 { self.x_max }

    /// Get the grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the number of samples.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Thin interface to [`index_of_minimum`].
    pub fn index_of_minimum(&self) -> usize { index_of_minimum(&self.V) }

    /// Thin interface to [`classical_turning_points`].
    pub fn classical_turning_points(&self, E: f64) -> TurningPoints {
        classical_turning_points(&self.V, E)
    }

    /// Thin interface to [`solve::integrate`].
    pub fn integrate(&self, E: f64, parity: Parity) -> Unresolved {
        solve::integrate(self, E, parity)
    }
}
