use crate::{grid::Grid, SimError, SimpleFloat};

/// Run parameters. Defaults reproduce the reference setup: 201 nodes on
/// `[0, 2]`, `c = 0.5`, `dt = 0.01`, 300 steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config<F> {
    pub node_count: usize,
    pub domain_length: F,
    pub wave_speed: F,
    pub time_step: F,
    pub step_count: usize,
}

impl<F: SimpleFloat> Default for Config<F> {
    fn default() -> Self {
        Self {
            node_count: 201,
            domain_length: F::from_f64(2.0),
            wave_speed: F::from_f64(0.5),
            time_step: F::from_f64(0.01),
            step_count: 300,
        }
    }
}

impl<F: SimpleFloat> Config<F> {
    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    pub fn with_domain_length(mut self, domain_length: F) -> Self {
        self.domain_length = domain_length;
        self
    }

    pub fn with_wave_speed(mut self, wave_speed: F) -> Self {
        self.wave_speed = wave_speed;
        self
    }

    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_step_count(mut self, step_count: usize) -> Self {
        self.step_count = step_count;
        self
    }

    // Given a CFL number `cfl`, adjust the time step such that
    // `wave_speed * dt / dx == cfl`. Needs a positive wave speed.
    pub fn with_cfl(mut self, cfl: F) -> Result<Self, SimError> {
        if !(cfl > F::zero()) || !cfl.is_finite() {
            return Err(SimError::InvalidConfiguration {
                field: "cfl",
                requirement: "a finite positive number",
            });
        }
        if !(self.wave_speed > F::zero()) {
            return Err(SimError::InvalidConfiguration {
                field: "wave_speed",
                requirement: "positive to derive a time step from a CFL number",
            });
        }

        let grid = self.grid()?;
        self.time_step = cfl * grid.spacing() / self.wave_speed;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        Grid::new(self.domain_length, self.node_count)?;

        if !(self.time_step > F::zero()) || !self.time_step.is_finite() {
            return Err(SimError::InvalidConfiguration {
                field: "time_step",
                requirement: "a finite positive number",
            });
        }
        if !self.wave_speed.is_finite() {
            return Err(SimError::InvalidConfiguration {
                field: "wave_speed",
                requirement: "finite",
            });
        }

        Ok(())
    }

    pub fn grid(&self) -> Result<Grid<F>, SimError> {
        Grid::new(self.domain_length, self.node_count)
    }

    pub fn spacing(&self) -> Result<F, SimError> {
        Ok(self.grid()?.spacing())
    }

    pub fn cfl(&self) -> Result<F, SimError> {
        Ok(self.grid()?.cfl(self.wave_speed, self.time_step))
    }
}
