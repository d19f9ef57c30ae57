use faer_core::{zipped, MatMut, MatRef};

use crate::{
    field::History,
    method::{Ctx, Method},
    SimpleFloat,
};

// [u_{i-1}, u_i, u_{i+1}] for i over the `n` interior rows
fn stencil<F: SimpleFloat>(u: MatRef<'_, F>, n: usize) -> [MatRef<'_, F>; 3] {
    [u.subrows(0, n), u.subrows(1, n), u.subrows(2, n)]
}

fn interior<F: SimpleFloat>(v: MatMut<'_, F>, n: usize) -> MatMut<'_, F> {
    v.subrows(1, n)
}

fn upwind<F: SimpleFloat>(ctx: Ctx<F>, u: MatRef<'_, F>, v: MatMut<'_, F>) {
    let n = ctx.grid.interior();
    let [um, u, _] = stencil(u, n);
    let sigma = ctx.sigma;

    // component-wise schema
    let schema = |um: F, u: F| u - sigma * (u - um);

    zipped!(interior(v, n), um, u).for_each(|mut v, um, u| v.write(schema(um.read(), u.read())))
}

/// First-order upwind: forward in time, backward in space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Upwind;

impl<F: SimpleFloat> Method<F> for Upwind {
    fn apply(&mut self, ctx: Ctx<F>, history: History<F>, v: MatMut<F>) {
        upwind(ctx, history.current(), v)
    }

    fn name(&self) -> &'static str {
        "First-order upwind"
    }
}

/// Centered in time and space. Needs two stored levels; the first level
/// is bootstrapped with an upwind step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Leapfrog;

impl<F: SimpleFloat> Method<F> for Leapfrog {
    fn time_levels(&self) -> usize {
        2
    }

    fn apply(&mut self, ctx: Ctx<F>, history: History<F>, v: MatMut<F>) {
        if ctx.n <= 1 {
            return upwind(ctx, history.current(), v);
        }

        let n = ctx.grid.interior();
        let [um, _, up] = stencil(history.current(), n);
        let [_, uo, _] = stencil(history.level(1), n);

        let sigma = ctx.sigma;
        let schema = |uo: F, um: F, up: F| uo - sigma * (up - um);

        zipped!(interior(v, n), uo, um, up)
            .for_each(|mut v, uo, um, up| v.write(schema(uo.read(), um.read(), up.read())))
    }

    fn name(&self) -> &'static str {
        "Leapfrog"
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LaxFriedrichs;

impl<F: SimpleFloat> Method<F> for LaxFriedrichs {
    fn apply(&mut self, ctx: Ctx<F>, history: History<F>, v: MatMut<F>) {
        let n = ctx.grid.interior();
        let [um, _, up] = stencil(history.current(), n);

        let half = F::from_f64(0.5);
        let sigma = ctx.sigma;
        let schema = |um: F, up: F| half * (up + um) - half * sigma * (up - um);

        zipped!(interior(v, n), um, up)
            .for_each(|mut v, um, up| v.write(schema(um.read(), up.read())))
    }

    fn name(&self) -> &'static str {
        "Lax-Friedrichs"
    }
}

/// Second order: centered update plus a curvature correction.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaxWendroff;

impl<F: SimpleFloat> Method<F> for LaxWendroff {
    fn apply(&mut self, ctx: Ctx<F>, history: History<F>, v: MatMut<F>) {
        let n = ctx.grid.interior();
        let [um, u, up] = stencil(history.current(), n);

        let half = F::from_f64(0.5);
        let two = F::from_f64(2.0);
        let sigma = ctx.sigma;
        let schema = |um: F, u: F, up: F| {
            u - half * sigma * (up - um) + half * sigma * sigma * (up - two * u + um)
        };

        zipped!(interior(v, n), um, u, up)
            .for_each(|mut v, um, u, up| v.write(schema(um.read(), u.read(), up.read())))
    }

    fn name(&self) -> &'static str {
        "Lax-Wendroff"
    }
}
