use tracing::info;

use crate::{error::MopsoError, mopso::Optimizer, population::NonDominatedPopulation};

/// Why an [`Executor`] run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    MaxIterationsReached,
    MaxEvaluationsReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: usize,
    pub evaluations: usize,
    pub termination: Termination,
}

/// Drives an initialized [`Optimizer`] until an iteration or evaluation budget runs out.
///
/// Budgets are checked before each iteration, so the evaluation budget can be overshot
/// by at most one generation. With no budget configured the run stops immediately.
pub struct Executor<O: Optimizer> {
    optimizer: O,
    max_iterations: Option<usize>,
    max_evaluations: Option<usize>,
}

impl<O: Optimizer> Executor<O> {
    pub fn new(optimizer: O) -> Self {
        Self {
            optimizer,
            max_iterations: None,
            max_evaluations: None,
        }
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = Some(max_evaluations);
        self
    }

    fn termination(&self) -> Option<Termination> {
        if self
            .max_evaluations
            .is_some_and(|max| self.optimizer.evaluations() >= max)
        {
            return Some(Termination::MaxEvaluationsReached);
        }
        match self.max_iterations {
            Some(max) if self.optimizer.iterations() < max => None,
            Some(_) => Some(Termination::MaxIterationsReached),
            None if self.max_evaluations.is_some() => None,
            None => Some(Termination::MaxIterationsReached),
        }
    }

    /// Iterates until a budget is exhausted; an iteration error aborts the run.
    pub fn run(mut self) -> Result<(RunSummary, O), MopsoError> {
        let termination = loop {
            if let Some(termination) = self.termination() {
                break termination;
            }
            self.optimizer.iterate()?;
        };

        let summary = RunSummary {
            iterations: self.optimizer.iterations(),
            evaluations: self.optimizer.evaluations(),
            termination,
        };

        info!(
            iterations = summary.iterations,
            evaluations = summary.evaluations,
            termination = ?summary.termination,
            "run finished"
        );

        Ok((summary, self.optimizer))
    }

    /// Runs to completion and returns only the optimizer's result population.
    pub fn run_to_result(self) -> Result<NonDominatedPopulation<O::Solution>, MopsoError> {
        let (_, optimizer) = self.run()?;
        Ok(optimizer.result())
    }
}
