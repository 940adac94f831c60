use std::{cell::Cell, rc::Rc};

use anyhow::bail;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_core::RngCore;

use crate::{
    capabilities::{Evaluator, Initialization, Mutation},
    mopso::{Created, Mopso, MopsoConfig},
    solution::VecSolution,
};

mod properties;
mod velocity;

pub(super) type Sol = VecSolution<u8>;

/// Each slot picks one of `NUM_OPTIONS` rule applications.
pub(super) const NUM_OPTIONS: u8 = 4;

/// Two conflicting objectives: total option index, and squared distance of each
/// option from the last one.
#[derive(Clone, Copy, Default)]
pub(super) struct TradeOff;

impl Evaluator<Sol> for TradeOff {
    fn evaluate_all(&mut self, solutions: &mut [Sol]) -> anyhow::Result<()> {
        for s in solutions.iter_mut() {
            let sum: f64 = s.variables.iter().map(|&v| f64::from(v)).sum();
            let spread: f64 = s
                .variables
                .iter()
                .map(|&v| f64::from(NUM_OPTIONS - 1 - v).powi(2))
                .sum();
            s.objectives = vec![sum, spread];
        }
        Ok(())
    }
}

/// Evaluates like [`TradeOff`] until `remaining_ok` calls have succeeded, then fails.
pub(super) struct FailingAfter {
    pub remaining_ok: usize,
}

impl Evaluator<Sol> for FailingAfter {
    fn evaluate_all(&mut self, solutions: &mut [Sol]) -> anyhow::Result<()> {
        if self.remaining_ok == 0 {
            bail!("objective backend unavailable");
        }
        self.remaining_ok -= 1;
        TradeOff.evaluate_all(solutions)
    }
}

pub(super) struct RandomInit {
    pub count: usize,
    pub num_vars: usize,
}

impl Initialization<Sol> for RandomInit {
    fn initialize(&mut self, rng: &mut dyn RngCore) -> Vec<Sol> {
        (0..self.count)
            .map(|_| {
                VecSolution::new(
                    (0..self.num_vars)
                        .map(|_| rng.random_range(0..NUM_OPTIONS))
                        .collect(),
                )
            })
            .collect()
    }
}

pub(super) struct FixedInit(pub Vec<Vec<u8>>);

impl Initialization<Sol> for FixedInit {
    fn initialize(&mut self, _rng: &mut dyn RngCore) -> Vec<Sol> {
        self.0.iter().cloned().map(VecSolution::new).collect()
    }
}

/// Resets one random slot to a random option and counts its invocations.
#[derive(Clone, Default)]
pub(super) struct CountingReset {
    pub calls: Rc<Cell<usize>>,
}

impl Mutation<Sol> for CountingReset {
    fn evolve(&mut self, mut solution: Sol, rng: &mut dyn RngCore) -> Sol {
        self.calls.set(self.calls.get() + 1);
        let slot = rng.random_range(0..solution.variables.len());
        solution.variables[slot] = rng.random_range(0..NUM_OPTIONS);
        solution
    }
}

pub(super) type TestMopso<I, E> = Mopso<Sol, I, E, StdRng, Created>;

pub(super) fn random_mopso(
    config: MopsoConfig,
    num_vars: usize,
    seed: u64,
) -> TestMopso<RandomInit, TradeOff> {
    let init = RandomInit {
        count: config.swarm_size,
        num_vars,
    };
    Mopso::new(config, init, TradeOff, StdRng::seed_from_u64(seed))
        .expect("valid test configuration")
}
