use crate::{
    config::Config,
    grid::Grid,
    method::SchemeKind,
    sim::{Simulation, Snapshot, StepOutcome},
    SimError, SimpleFloat,
};

pub struct ObsCtx<'ctx, F: SimpleFloat> {
    // Meta
    config: &'ctx Config<F>,
    grid: &'ctx Grid<F>,
    sigma: F,
    sampling_period: usize,

    // Iteration info
    snapshot: &'ctx Snapshot<F>,
}

impl<'ctx, F: SimpleFloat> ObsCtx<'ctx, F> {
    pub fn config(&self) -> &Config<F> {
        self.config
    }

    pub fn grid(&self) -> &Grid<F> {
        self.grid
    }

    pub fn sigma(&self) -> F {
        self.sigma
    }

    pub fn iter(&self) -> usize {
        self.snapshot.tick
    }

    pub fn time(&self) -> F {
        self.snapshot.time
    }

    pub fn snapshot(&self) -> &Snapshot<F> {
        self.snapshot
    }

    pub fn sampling_period(&self) -> usize {
        self.sampling_period
    }
}

#[allow(unused_variables)]
pub trait Observer<F: SimpleFloat> {
    fn at_startup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        Ok(())
    }
}

impl<F: SimpleFloat, O: Observer<F> + ?Sized> Observer<F> for &mut O {
    fn at_startup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        (**self).at_startup(ctx)
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        (**self).at_each_iteration(ctx)
    }

    fn at_cleanup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        (**self).at_cleanup(ctx)
    }
}

/// Reference loop over the pull API: initializes, steps until the run is
/// finished and hands sampled snapshots to its observers.
pub struct Driver<'d, F: SimpleFloat> {
    config: Config<F>,
    sim: Simulation<F>,
    observers: Vec<Box<dyn Observer<F> + 'd>>,
    sampling_period: usize,
}

impl<'d, F: SimpleFloat> Driver<'d, F> {
    pub fn new(config: Config<F>) -> Self {
        Self {
            sampling_period: 1 + config.step_count / 10,
            config,
            sim: Simulation::new(),
            observers: Vec::new(),
        }
    }

    /// Observers see every `period`-th step, and always the last one.
    pub fn with_sampling_period(mut self, period: usize) -> Self {
        self.sampling_period = period.max(1);
        self
    }

    pub fn with_observer(mut self, observer: impl Observer<F> + 'd) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn simulation(&self) -> &Simulation<F> {
        &self.sim
    }

    pub fn run(&mut self) -> Result<Snapshot<F>, SimError> {
        self.sim.initialize(self.config)?;

        let grid = self.sim.grid().copied().ok_or(SimError::InvalidState(self.sim.status()))?;
        let sigma = grid.cfl(self.config.wave_speed, self.config.time_step);

        let snapshot = self.sim.current_state();
        for o in self.observers.iter_mut() {
            o.at_startup(ObsCtx {
                config: &self.config,
                grid: &grid,
                sigma,
                sampling_period: self.sampling_period,
                snapshot: &snapshot,
            })?;
        }

        while let StepOutcome::Advanced(n) = self.sim.step()? {
            if n % self.sampling_period != 0 && !self.sim.is_finished() {
                continue;
            }

            let snapshot = self.sim.current_state();
            for o in self.observers.iter_mut() {
                o.at_each_iteration(ObsCtx {
                    config: &self.config,
                    grid: &grid,
                    sigma,
                    sampling_period: self.sampling_period,
                    snapshot: &snapshot,
                })?;
            }
        }

        let snapshot = self.sim.current_state();
        for o in self.observers.iter_mut() {
            o.at_cleanup(ObsCtx {
                config: &self.config,
                grid: &grid,
                sigma,
                sampling_period: self.sampling_period,
                snapshot: &snapshot,
            })?;
        }

        Ok(snapshot)
    }
}

pub struct Logger;

impl<F: SimpleFloat> Observer<F> for Logger {
    fn at_startup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "start of simulation (Δx={:e} ({} nodes), Δt={:e} ({} steps), c*Δt/Δx={})",
            ctx.grid().spacing(),
            ctx.grid().node_count(),
            ctx.config().time_step,
            ctx.config().step_count,
            ctx.sigma(),
        );
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        let snapshot = ctx.snapshot();
        tracing::event!(
            tracing::Level::TRACE,
            "step {} (t={:e}): max|u| upwind={:e} leapfrog={:e} lax-friedrichs={:e} lax-wendroff={:e}",
            ctx.iter(),
            ctx.time(),
            snapshot.max_abs(SchemeKind::Upwind),
            snapshot.max_abs(SchemeKind::Leapfrog),
            snapshot.max_abs(SchemeKind::LaxFriedrichs),
            snapshot.max_abs(SchemeKind::LaxWendroff),
        );
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::INFO,
            "finished simulation after {} steps",
            ctx.iter()
        );
        Ok(())
    }
}

/// Keeps every snapshot it is shown, initial condition included.
#[derive(Debug, Default)]
pub struct Recorder<F> {
    snapshots: Vec<Snapshot<F>>,
}

impl<F: SimpleFloat> Recorder<F> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    pub fn snapshots(&self) -> &[Snapshot<F>] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot<F>> {
        self.snapshots
    }
}

impl<F: SimpleFloat> Observer<F> for Recorder<F> {
    fn at_startup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        self.snapshots.clear();
        self.snapshots.push(ctx.snapshot().clone());
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        self.snapshots.push(ctx.snapshot().clone());
        Ok(())
    }
}

/// `max |u|` of each scheme at every sampled step.
#[derive(Debug, Default)]
pub struct Amplitude<F> {
    ticks: Vec<usize>,
    history: [Vec<F>; 4],
}

impl<F: SimpleFloat> Amplitude<F> {
    pub fn new() -> Self {
        Self {
            ticks: Vec::new(),
            history: Default::default(),
        }
    }

    pub fn ticks(&self) -> &[usize] {
        &self.ticks
    }

    pub fn of(&self, kind: SchemeKind) -> &[F] {
        &self.history[Self::index(kind)]
    }

    /// Whether the amplitude of `kind` grew at every sample.
    pub fn strictly_growing(&self, kind: SchemeKind) -> bool {
        self.of(kind).windows(2).all(|w| w[1] > w[0])
    }

    fn index(kind: SchemeKind) -> usize {
        match kind {
            SchemeKind::Upwind => 0,
            SchemeKind::Leapfrog => 1,
            SchemeKind::LaxFriedrichs => 2,
            SchemeKind::LaxWendroff => 3,
        }
    }

    fn record(&mut self, snapshot: &Snapshot<F>) {
        self.ticks.push(snapshot.tick);
        for kind in SchemeKind::ALL {
            self.history[Self::index(kind)].push(snapshot.max_abs(kind));
        }
    }
}

impl<F: SimpleFloat> Observer<F> for Amplitude<F> {
    fn at_startup(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        *self = Self::new();
        self.record(ctx.snapshot());
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx<F>) -> Result<(), SimError> {
        self.record(ctx.snapshot());
        Ok(())
    }
}
