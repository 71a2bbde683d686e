//! Derivative-free, single-variable search algorithms.
//!
//! Every solver minimizes an [`Objective`] over a bracketed interval of search
//! coordinates and reports progress to an [`Observer`].
//!
//! # Solvers
//!
//! - [`golden_section`]: recursive golden-section bracketing, the default
//! - [`brent`]: interpolation with bisection fallback, opt-in legacy method
//!
//! Both accept a `snap` function applied to every coordinate before it is
//! evaluated. Pass the identity for continuous parameters, or
//! [`DomainMapper::snap`] to keep integer-valued parameters on the integer
//! grid.
//!
//! [`Objective`]: hypersearch_core::Objective
//! [`Observer`]: hypersearch_core::Observer
//! [`DomainMapper::snap`]: hypersearch_core::DomainMapper::snap

pub mod brent;
pub mod golden_section;
