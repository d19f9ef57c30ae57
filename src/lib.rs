//! Side-by-side finite-difference solvers for the 1D linear convection
//! equation `u_t + c u_x = 0`.
//!
//! A [`Simulation`] owns one [`Grid`] and four [`FieldState`]s, one per
//! scheme (upwind, leapfrog, Lax-Friedrichs, Lax-Wendroff). It is driven
//! by pulling: call [`Simulation::initialize`], then [`Simulation::step`]
//! until it reports [`StepOutcome::Finished`], reading
//! [`Simulation::current_state`] whenever a snapshot is needed.

use std::{
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

use faer_core::Entity;

pub mod config;
pub mod driver;
pub mod field;
pub mod grid;
pub mod method;
pub mod methods;
pub mod sim;

pub use config::Config;
pub use driver::{Amplitude, Driver, Logger, ObsCtx, Observer, Recorder};
pub use field::{FieldState, History};
pub use grid::Grid;
pub use method::{Ctx, Method, SchemeKind};
pub use sim::{Simulation, Snapshot, Status, StepOutcome};

use thiserror::Error;

/// Fixed left boundary value, also the initial value of node 0.
pub const BOUNDARY_VALUE: f64 = 1.0;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: `{field}` must be {requirement}")]
    InvalidConfiguration {
        field: &'static str,
        requirement: &'static str,
    },
    #[error("cannot step a simulation in the `{0}` state")]
    InvalidState(Status),
    #[error("method needs {required} stored time levels, field keeps {stored}")]
    MissingHistory { required: usize, stored: usize },
}

/// Scalar type the solvers are generic over.
pub trait SimpleFloat:
    Entity
    + Copy
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + fmt::LowerExp
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    fn from_f64(value: f64) -> Self;
    fn abs(self) -> Self;
    fn is_finite(self) -> bool;
    fn is_nan(self) -> bool;

    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    fn one() -> Self {
        Self::from_f64(1.0)
    }
}

impl SimpleFloat for f32 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl SimpleFloat for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}
