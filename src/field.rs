use std::fmt;

use faer_core::{Mat, MatMut, MatRef};

use crate::{
    grid::Grid,
    method::{Ctx, Method},
    SimError, SimpleFloat, BOUNDARY_VALUE,
};

fn initial_column<F: SimpleFloat>(nodes: usize) -> Mat<F> {
    // u(0) = 1, quiescent elsewhere
    Mat::from_fn(nodes, 1, |i, _| {
        if i == 0 {
            F::from_f64(BOUNDARY_VALUE)
        } else {
            F::zero()
        }
    })
}

/// Field values of one scheme: a ring of `time_levels` columns, the
/// newest at `head`, plus a scratch column the next level is written to.
///
/// Every column starts from the initial condition and steps only ever
/// write interior rows, so the boundary rows of all columns stay at their
/// initial values.
pub struct FieldState<F: SimpleFloat> {
    levels: Vec<Mat<F>>,
    head: usize,
    scratch: Mat<F>,
}

impl<F: SimpleFloat> FieldState<F> {
    pub fn new(grid: &Grid<F>, time_levels: usize) -> Self {
        let time_levels = time_levels.max(1);
        Self {
            levels: (0..time_levels)
                .map(|_| initial_column(grid.node_count()))
                .collect(),
            head: 0,
            scratch: initial_column(grid.node_count()),
        }
    }

    pub fn len(&self) -> usize {
        self.scratch.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn time_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn current(&self) -> MatRef<'_, F> {
        self.history().current()
    }

    pub fn history(&self) -> History<'_, F> {
        History {
            levels: &self.levels,
            head: self.head,
        }
    }

    /// Copy of the newest time level.
    pub fn values(&self) -> Vec<F> {
        let u = self.current();
        (0..u.nrows()).map(|i| u.read(i, 0)).collect()
    }

    /// Produces the next time level with `method` and makes it current.
    pub fn advance(&mut self, method: &mut dyn Method<F>, ctx: Ctx<F>) -> Result<(), SimError> {
        if method.time_levels() > self.time_levels() {
            return Err(SimError::MissingHistory {
                required: method.time_levels(),
                stored: self.time_levels(),
            });
        }

        let (history, out) = self.split();
        method.apply(ctx, history, out);
        self.commit();
        Ok(())
    }

    pub(crate) fn split(&mut self) -> (History<'_, F>, MatMut<'_, F>) {
        let Self {
            levels,
            head,
            scratch,
        } = self;

        (
            History {
                levels: levels.as_slice(),
                head: *head,
            },
            scratch.as_mut(),
        )
    }

    // Promote the scratch column to newest level; the oldest level
    // becomes the next scratch.
    pub(crate) fn commit(&mut self) {
        let oldest = (self.head + self.levels.len() - 1) % self.levels.len();
        std::mem::swap(&mut self.scratch, &mut self.levels[oldest]);
        self.head = oldest;
    }
}

impl<F: SimpleFloat> fmt::Debug for FieldState<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("nodes", &self.len())
            .field("time_levels", &self.time_levels())
            .field("head", &self.head)
            .finish()
    }
}

/// Read-only view of the stored time levels, `level(0)` being the newest.
#[derive(Clone, Copy)]
pub struct History<'a, F: SimpleFloat> {
    levels: &'a [Mat<F>],
    head: usize,
}

impl<'a, F: SimpleFloat> History<'a, F> {
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn current(&self) -> MatRef<'a, F> {
        self.level(0)
    }

    /// Time level `k` steps back from the newest one.
    ///
    /// # Panics
    /// If `k >= self.depth()`.
    pub fn level(&self, k: usize) -> MatRef<'a, F> {
        assert!(k < self.depth(), "time level {k} is not stored");
        self.levels[(self.head + k) % self.levels.len()].as_ref()
    }
}
