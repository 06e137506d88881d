//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Two-branch integration](#two-branch-integration)
//! - [Stitching and the discontinuity residual](#stitching-and-the-discontinuity-residual)
//! - [Parity averaging](#parity-averaging)
//! - [Time dependence](#time-dependence)
//! - [Momentum space](#momentum-space)
//!
//! # Background
//! The one-dimensional time-independent Schrödinger equation in natural
//! units (ħ = m = 1) is
//! ```text
//! ∂²ψ
//! --- = 2 (V(x) - E) ψ(x)
//! ∂x²
//! ```
//! On a uniform discretization `x[i] = i δx`, `i ∊ {0, ..., N - 1}`,
//! Numerov's method[^1] integrates such second-order equations (no
//! first-derivative term) with an error term of only *O*(*δx*⁶). Writing
//! ```text
//!             δx²
//! F[i] = 1 - ----- (V[i] - E)
//!              6
//! ```
//! the three-term recursion is
//! ```text
//! F[i + 1] ψ[i + 1] = (12 - 10 F[i]) ψ[i] - F[i - 1] ψ[i - 1]
//! ```
//! which can be marched in either direction from any two seeded samples.
//!
//! # Two-branch integration
//! For a *given* energy — supplied here by the visualizer's draggable
//! energy control, not solved for — the recursion is unstable in the
//! classically forbidden region: marching toward a forbidden region picks up
//! the exponentially growing solution. The crate therefore integrates twice:
//! once outward from the potential minimum (seeded with 1 or 0 according to
//! the requested [parity][crate::solve::Parity]) and once inward from both
//! mesh edges (seeded with `±δx`, taking the solution to vanish just outside
//! the mesh). Each branch is trustworthy near its own seeding region and
//! diverges by construction away from it.
//!
//! # Stitching and the discontinuity residual
//! The classical turning points — where `E` crosses `V` — separate the
//! regions each branch owns. The edge branch is rescaled to match the center
//! branch at each turning point and the pieces are concatenated, giving a
//! solution continuous in *value* by construction but generally kinked in
//! *slope*. The leftover kink at a stitch point `x`,
//! ```text
//! (ψ[x + 1] + ψ[x - 1] - (14 - 12 F[x]) ψ[x]) / δx
//! ```
//! vanishes exactly when `E` is an eigenvalue of the discretized problem and
//! changes sign as `E` crosses one, so the visualizer can surface it as a
//! live solution-quality figure. The stitched array is normalized to
//! `Σ δx ψ[i]² = 1`.
//!
//! # Parity averaging
//! A generic energy is neither an even- nor an odd-parity eigenvalue, but a
//! weighted combination of the two resolved parities,
//! ```text
//! ψ = ψ₊ + k ψ₋,  k = -d₊ / d₋
//! ```
//! with `d±` the left discontinuities, cancels the left kink identically and
//! yields a physically continuous display candidate at any energy. The
//! combination is renormalized and given a deterministic overall sign.
//!
//! # Time dependence
//! Each resolved solution is an energy eigenstate, so time evolution is the
//! closed-form stationary phase
//! ```text
//! Ψ(x, t) = ψ[x] e^(-i E t)
//! ```
//! and a [generalized][crate::wavefunction::Generalized] wavefunction — an
//! equal-weight superposition over distinct energies — beats at the energy
//! differences without any propagation machinery.
//!
//! # Momentum space
//! The momentum-space representation is obtained by a *direct* recentered
//! sum,
//! ```text
//! φ[p] = Σᵢ ψ[i] e^(-i s k_p (i - c) δx),  k_p = (p - c) δx
//! ```
//! rather than an FFT: the mesh length is arbitrary and the center `c` is a
//! mesh index chosen by the caller (typically the potential minimum). The
//! center shift may equivalently be carried inside the exponent, applied as
//! an output phase pass, or deferred to evaluation time as a per-index
//! phase; and the exponentials may be generated by a multiplicative
//! recurrence instead of per-term trigonometry. See
//! [`fourier::Method`][crate::fourier::Method] for the concrete strategy
//! family and the trade-offs between them.
//!
//! [^1]: B. V. Numerov, "A method of extrapolation of perturbations," *Mon.
//! Not. R. Astron. Soc.* **84**, 592–601 (1924).
