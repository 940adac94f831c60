//! Capabilities the optimizer consumes from the problem layer.
//!
//! Each trait has a blanket implementation for closures of the matching shape, so a
//! problem can be wired up either with dedicated types or with plain closures.
//! Every stochastic capability receives the optimizer's own random stream, which
//! keeps a seeded run reproducible end to end.

use rand_core::RngCore;

/// Computes objective vectors for a batch of solutions, in place.
///
/// An implementation may evaluate the batch concurrently, but must only return once
/// every solution carries its objectives. An `Err` aborts the current generation.
pub trait Evaluator<S> {
    fn evaluate_all(&mut self, solutions: &mut [S]) -> anyhow::Result<()>;
}

impl<S, F> Evaluator<S> for F
where
    F: FnMut(&mut [S]) -> anyhow::Result<()>,
{
    fn evaluate_all(&mut self, solutions: &mut [S]) -> anyhow::Result<()> {
        self(solutions)
    }
}

/// Produces the initial swarm. Must yield at least `swarm_size` solutions.
pub trait Initialization<S> {
    fn initialize(&mut self, rng: &mut dyn RngCore) -> Vec<S>;
}

impl<S, F> Initialization<S> for F
where
    F: FnMut(&mut dyn RngCore) -> Vec<S>,
{
    fn initialize(&mut self, rng: &mut dyn RngCore) -> Vec<S> {
        self(rng)
    }
}

/// Perturbs a single solution.
pub trait Mutation<S> {
    fn evolve(&mut self, solution: S, rng: &mut dyn RngCore) -> S;
}

impl<S, F> Mutation<S> for F
where
    F: FnMut(S, &mut dyn RngCore) -> S,
{
    fn evolve(&mut self, solution: S, rng: &mut dyn RngCore) -> S {
        self(solution, rng)
    }
}
