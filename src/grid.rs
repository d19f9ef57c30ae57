use faer_core::Mat;

use crate::{SimError, SimpleFloat};

// grid[0] <-> 0
// grid[i] <-> i * spacing forall i
// grid[nodes - 1] <-> length
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid<F> {
    length: F,
    nodes: usize,
    spacing: F,
}

impl<F: SimpleFloat> Grid<F> {
    pub fn new(length: F, nodes: usize) -> Result<Self, SimError> {
        if nodes < 2 {
            return Err(SimError::InvalidConfiguration {
                field: "node_count",
                requirement: "at least 2",
            });
        }
        if !(length > F::zero()) || !length.is_finite() {
            return Err(SimError::InvalidConfiguration {
                field: "domain_length",
                requirement: "a finite positive number",
            });
        }

        Ok(Self {
            length,
            nodes,
            spacing: length / F::from_f64((nodes - 1) as f64),
        })
    }

    pub fn length(&self) -> F {
        self.length
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn spacing(&self) -> F {
        self.spacing
    }

    /// Interior nodes, i.e. the ones a scheme updates.
    pub fn interior(&self) -> usize {
        self.nodes - 2
    }

    pub fn coordinate(&self, i: usize) -> F {
        F::from_f64(i as f64) * self.spacing
    }

    pub fn iter(self) -> impl Iterator<Item = F> {
        (0..self.nodes).map(move |i| self.coordinate(i))
    }

    pub fn coordinates(&self) -> Vec<F> {
        self.iter().collect()
    }

    /// Coordinates as a single faer column.
    pub fn get(&self) -> Mat<F> {
        Mat::from_fn(self.nodes, 1, |i, _| self.coordinate(i))
    }

    // CFL number `c * dt / dx` of a time step on this grid.
    pub fn cfl(&self, wave_speed: F, time_step: F) -> F {
        wave_speed * time_step / self.spacing
    }
}
