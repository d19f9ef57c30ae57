use std::fmt;

use faer_core::MatMut;

use crate::{field::History, grid::Grid, methods, SimpleFloat};

/// What a scheme sees while producing time level `n`.
#[derive(Clone, Copy, Debug)]
pub struct Ctx<'a, F> {
    pub grid: &'a Grid<F>,
    /// CFL number `c * dt / dx`.
    pub sigma: F,
    /// Index of the time level being produced, starting at 1.
    pub n: usize,
}

pub trait Method<F: SimpleFloat> {
    /// Number of stored time levels the scheme reads from.
    fn time_levels(&self) -> usize {
        1
    }

    /// Writes the interior rows of `v` (every row but the first and the
    /// last) from the stored history. Boundary rows are left untouched.
    fn apply(&mut self, ctx: Ctx<F>, history: History<F>, v: MatMut<F>);

    fn name(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    Upwind,
    Leapfrog,
    LaxFriedrichs,
    LaxWendroff,
}

impl SchemeKind {
    pub const ALL: [SchemeKind; 4] = [
        SchemeKind::Upwind,
        SchemeKind::Leapfrog,
        SchemeKind::LaxFriedrichs,
        SchemeKind::LaxWendroff,
    ];

    pub fn method<F: SimpleFloat>(self) -> Box<dyn Method<F>> {
        match self {
            SchemeKind::Upwind => Box::new(methods::Upwind),
            SchemeKind::Leapfrog => Box::new(methods::Leapfrog),
            SchemeKind::LaxFriedrichs => Box::new(methods::LaxFriedrichs),
            SchemeKind::LaxWendroff => Box::new(methods::LaxWendroff),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SchemeKind::Upwind => "upwind",
            SchemeKind::Leapfrog => "leapfrog",
            SchemeKind::LaxFriedrichs => "lax-friedrichs",
            SchemeKind::LaxWendroff => "lax-wendroff",
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
