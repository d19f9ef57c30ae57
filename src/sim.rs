use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::{
    config::Config,
    field::FieldState,
    grid::Grid,
    method::{Ctx, Method, SchemeKind},
    SimError, SimpleFloat,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Uninitialized,
    Ready,
    Finished,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Uninitialized => "uninitialized",
            Status::Ready => "ready",
            Status::Finished => "finished",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// All schemes advanced; carries the new tick count.
    Advanced(usize),
    /// The run already reached its last step, nothing was done.
    Finished,
}

/// Owned copy of every scheme's newest time level.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<F> {
    pub tick: usize,
    pub time: F,
    pub coordinates: Vec<F>,
    pub upwind: Vec<F>,
    pub leapfrog: Vec<F>,
    pub lax_friedrichs: Vec<F>,
    pub lax_wendroff: Vec<F>,
}

impl<F: SimpleFloat> Snapshot<F> {
    fn empty() -> Self {
        Self {
            tick: 0,
            time: F::zero(),
            coordinates: Vec::new(),
            upwind: Vec::new(),
            leapfrog: Vec::new(),
            lax_friedrichs: Vec::new(),
            lax_wendroff: Vec::new(),
        }
    }

    pub fn scheme(&self, kind: SchemeKind) -> &[F] {
        match kind {
            SchemeKind::Upwind => &self.upwind,
            SchemeKind::Leapfrog => &self.leapfrog,
            SchemeKind::LaxFriedrichs => &self.lax_friedrichs,
            SchemeKind::LaxWendroff => &self.lax_wendroff,
        }
    }

    fn scheme_mut(&mut self, kind: SchemeKind) -> &mut Vec<F> {
        match kind {
            SchemeKind::Upwind => &mut self.upwind,
            SchemeKind::Leapfrog => &mut self.leapfrog,
            SchemeKind::LaxFriedrichs => &mut self.lax_friedrichs,
            SchemeKind::LaxWendroff => &mut self.lax_wendroff,
        }
    }

    /// `max |u|` over the grid for one scheme, zero on an empty snapshot.
    /// A NaN anywhere makes the result NaN.
    pub fn max_abs(&self, kind: SchemeKind) -> F {
        self.scheme(kind)
            .iter()
            .map(|u| u.abs())
            .fold(F::zero(), |acc, u| if acc.is_nan() || u <= acc { acc } else { u })
    }

    /// Whether any value of `kind` is NaN or infinite.
    pub fn diverged(&self, kind: SchemeKind) -> bool {
        self.scheme(kind).iter().any(|u| !u.is_finite())
    }
}

struct Lane<F: SimpleFloat> {
    kind: SchemeKind,
    method: Box<dyn Method<F>>,
    field: FieldState<F>,
}

struct Run<F: SimpleFloat> {
    config: Config<F>,
    grid: Grid<F>,
    sigma: F,
    tick: usize,
    lanes: Vec<Lane<F>>,
}

impl<F: SimpleFloat> Run<F> {
    fn is_finished(&self) -> bool {
        self.tick >= self.config.step_count
    }
}

/// Advances the four schemes in lockstep on a shared grid.
///
/// ```
/// use convection::{Config, Simulation, StepOutcome};
///
/// let mut sim = Simulation::new();
/// sim.initialize(Config::<f64>::default().with_step_count(3)).unwrap();
/// while let StepOutcome::Advanced(_) = sim.step().unwrap() {}
/// assert_eq!(sim.current_state().tick, 3);
/// ```
pub struct Simulation<F: SimpleFloat> {
    run: Option<Run<F>>,
}

impl<F: SimpleFloat> Default for Simulation<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: SimpleFloat> Simulation<F> {
    pub fn new() -> Self {
        Self { run: None }
    }

    /// Creates and initializes a simulation in one go.
    pub fn with_config(config: Config<F>) -> Result<Self, SimError> {
        let mut sim = Self::new();
        sim.initialize(config)?;
        Ok(sim)
    }

    /// (Re)builds the grid and resets every scheme to the initial
    /// condition. On error the previous state is kept.
    pub fn initialize(&mut self, config: Config<F>) -> Result<(), SimError> {
        config.validate()?;
        let grid = config.grid()?;
        let sigma = grid.cfl(config.wave_speed, config.time_step);

        info!(
            "initialized {} nodes, Δx={:e}, Δt={:e}, c*Δt/Δx={}, {} steps",
            grid.node_count(),
            grid.spacing(),
            config.time_step,
            sigma,
            config.step_count,
        );
        if sigma.abs() > F::one() {
            warn!("CFL number {} exceeds 1, expect divergence", sigma);
        }

        let lanes = SchemeKind::ALL
            .into_iter()
            .map(|kind| {
                let method: Box<dyn Method<F>> = kind.method();
                let field = FieldState::new(&grid, method.time_levels());
                Lane {
                    kind,
                    method,
                    field,
                }
            })
            .collect();

        self.run = Some(Run {
            config,
            grid,
            sigma,
            tick: 0,
            lanes,
        });

        Ok(())
    }

    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        let run = self
            .run
            .as_mut()
            .ok_or(SimError::InvalidState(Status::Uninitialized))?;

        if run.is_finished() {
            return Ok(StepOutcome::Finished);
        }

        run.tick += 1;
        let ctx = Ctx {
            grid: &run.grid,
            sigma: run.sigma,
            n: run.tick,
        };

        for lane in run.lanes.iter_mut() {
            lane.field.advance(lane.method.as_mut(), ctx)?;
        }

        trace!("step {}/{}", run.tick, run.config.step_count);
        if run.is_finished() {
            debug!("reached final step {}", run.tick);
        }

        Ok(StepOutcome::Advanced(run.tick))
    }

    pub fn current_state(&self) -> Snapshot<F> {
        let Some(run) = self.run.as_ref() else {
            return Snapshot::empty();
        };

        let mut snapshot = Snapshot {
            tick: run.tick,
            time: F::from_f64(run.tick as f64) * run.config.time_step,
            coordinates: run.grid.coordinates(),
            ..Snapshot::empty()
        };
        for lane in &run.lanes {
            *snapshot.scheme_mut(lane.kind) = lane.field.values();
        }

        snapshot
    }

    pub fn status(&self) -> Status {
        match &self.run {
            None => Status::Uninitialized,
            Some(run) if run.is_finished() => Status::Finished,
            Some(_) => Status::Ready,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() == Status::Finished
    }

    pub fn tick(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.tick)
    }

    pub fn config(&self) -> Option<&Config<F>> {
        self.run.as_ref().map(|run| &run.config)
    }

    pub fn grid(&self) -> Option<&Grid<F>> {
        self.run.as_ref().map(|run| &run.grid)
    }

    /// CFL number of the current run.
    pub fn sigma(&self) -> Option<F> {
        self.run.as_ref().map(|run| run.sigma)
    }

    pub fn field(&self, kind: SchemeKind) -> Option<&FieldState<F>> {
        self.run.as_ref().and_then(|run| {
            run.lanes
                .iter()
                .find(|lane| lane.kind == kind)
                .map(|lane| &lane.field)
        })
    }
}

impl<F: SimpleFloat> fmt::Display for Simulation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(run) = &self.run else {
            return write!(f, "uninitialized convection simulation");
        };

        write!(
            f,
            "convection simulation ({}):\n\t- Δx = {:e} ({} nodes)\n\t- Δt = {:e} ({}/{} steps)\n\t- c*Δt/Δx = {}",
            self.status(),
            run.grid.spacing(),
            run.grid.node_count(),
            run.config.time_step,
            run.tick,
            run.config.step_count,
            run.sigma,
        )?;
        for lane in &run.lanes {
            write!(f, "\n\t- `{}` method", lane.method.name())?;
        }
        Ok(())
    }
}
