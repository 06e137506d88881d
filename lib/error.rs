//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Every failure in this crate is a synchronous precondition violation: there
//! is nothing to retry and no partial result to salvage, so a failed call
//! simply aborts the current recomputation and the caller keeps whatever
//! wavefunction it last computed.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from potential-mesh constructors and turning-point resolution.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Returned when a potential mesh has fewer than 3 samples.
    #[error("potential meshes must contain at least 3 samples; got {0}")]
    TooShort(usize),

    /// Returned when a non-positive spatial extent is encountered.
    #[error("spatial extent must be greater than 0; got {0}")]
    BadExtent(f64),

    /// Returned when a turning-point pair is out of bounds or inverted.
    #[error("turning points must satisfy 0 <= left <= right < {n}; got left = {left}, right = {right}")]
    BadTurningPoints { left: usize, right: usize, n: usize },
}

impl MeshError {
    pub(crate) fn check_len(n: usize) -> Result<(), Self> {
        (n >= 3).then_some(()).ok_or(Self::TooShort(n))
    }

    pub(crate) fn check_extent(x_max: f64) -> Result<(), Self> {
        (x_max > 0.0).then_some(()).ok_or(Self::BadExtent(x_max))
    }

    pub(crate) fn check_turning_points(left: usize, right: usize, n: usize)
        -> Result<(), Self>
    {
        (left <= right && right < n)
            .then_some(())
            .ok_or(Self::BadTurningPoints { left, right, n })
    }
}

/// Returned from wavefunction constructors and combining operations.
#[derive(Debug, Error)]
pub enum WfError {
    /// Returned when a non-finite value reaches a wavefunction constructor.
    #[error("wavefunction field `{0}` must be finite; got {1}")]
    NonFinite(&'static str, f64),

    /// Returned when a superposition is constructed from zero components.
    #[error("generalized wavefunctions must have at least one component")]
    EmptyComponents,

    /// Returned when superposition components disagree on grid spacing.
    #[error("all superposition components must share a grid spacing; got {0} and {1}")]
    MismatchedSpacing(f64, f64),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),

    /// [`MeshError`]
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// [`FourierError`]
    #[error("fourier error: {0}")]
    Fourier(#[from] FourierError),
}

impl WfError {
    pub(crate) fn check_finite(name: &'static str, val: f64)
        -> Result<(), Self>
    {
        val.is_finite().then_some(()).ok_or(Self::NonFinite(name, val))
    }
}

/// Returned from the Fourier-transform engine.
#[derive(Debug, Error)]
pub enum FourierError {
    /// Returned when the transform center lies outside the mesh.
    #[error("transform center must lie within the mesh; got {center} for length {n}")]
    BadCenter { center: usize, n: usize },
}

impl FourierError {
    pub(crate) fn check_center(center: usize, n: usize) -> Result<(), Self> {
        (center < n).then_some(()).ok_or(Self::BadCenter { center, n })
    }
}
