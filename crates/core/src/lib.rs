//! Core traits and types for single-parameter hyperparameter search.
//!
//! This crate defines the shared abstractions that the search algorithms and
//! the evaluation layer build on:
//!
//! - [`Objective`]: maps a search coordinate to a scalar loss
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`DomainMapper`]: translates between search coordinates and the real
//!   parameter values handed to the evaluated program
//! - [`Point`]: a coordinate paired with its loss

mod domain;
mod objective;
mod observer;
mod point;

pub use domain::DomainMapper;
pub use objective::{FnObjective, Objective};
pub use observer::Observer;
pub use point::Point;
