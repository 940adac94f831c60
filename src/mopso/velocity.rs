use rand::{Rng, seq::SliceRandom};

use crate::solution::Solution;

/// A probabilistic instruction to copy one variable's value from an exemplar
/// (personal best or leader) into a particle.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOperator<V> {
    pub index: usize,
    pub target: V,
    pub probability: f64,
}

impl<V> SwapOperator<V> {
    pub fn new(index: usize, target: V, probability: f64) -> Self {
        Self {
            index,
            target,
            probability,
        }
    }
}

/// When the gamma-driven pruning of swap operators runs relative to the rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VelocityPruning {
    /// Prune right after clearing, i.e. over an empty sequence. Never removes anything
    /// and draws no random numbers.
    #[default]
    BeforeRebuild,
    /// Prune the freshly rebuilt sequence, dropping each operator with probability gamma.
    AfterRebuild,
    /// Skip pruning entirely.
    Disabled,
}

/// The discrete velocity of one particle: an ordered sequence of swap operators.
#[derive(Debug, Clone, PartialEq)]
pub struct Velocity<V> {
    operators: Vec<SwapOperator<V>>,
}

impl<V> Default for Velocity<V> {
    fn default() -> Self {
        Self {
            operators: Vec::new(),
        }
    }
}

impl<V: Clone + PartialEq> Velocity<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operators(&self) -> &[SwapOperator<V>] {
        &self.operators
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn clear(&mut self) {
        self.operators.clear();
    }

    pub fn push(&mut self, operator: SwapOperator<V>) {
        self.operators.push(operator);
    }

    /// Walks the sequence back to front, removing each operator with probability `gamma`.
    pub fn prune<R: Rng + ?Sized>(&mut self, gamma: f64, rng: &mut R) {
        for j in (0..self.operators.len()).rev() {
            if rng.random::<f64>() < gamma {
                self.operators.remove(j);
            }
        }
    }

    /// Appends one operator per slot where `particle` differs from `exemplar`, targeting
    /// the exemplar's value.
    pub fn push_differences<S>(&mut self, particle: &S, exemplar: &S, probability: f64)
    where
        S: Solution<Variable = V>,
    {
        let differing = particle
            .variables()
            .iter()
            .zip(exemplar.variables())
            .enumerate()
            .filter(|(_, (own, theirs))| own != theirs);

        for (index, (_, theirs)) in differing {
            self.push(SwapOperator::new(index, theirs.clone(), probability));
        }
    }

    /// Recomputes the velocity from scratch: clear, optional prune, then one operator per
    /// differing slot towards the personal best (probability `alpha`) followed by one per
    /// differing slot towards the leader (probability `beta`).
    #[allow(clippy::too_many_arguments)]
    pub fn rebuild<S, R>(
        &mut self,
        particle: &S,
        personal_best: &S,
        leader: &S,
        alpha: f64,
        beta: f64,
        gamma: f64,
        pruning: VelocityPruning,
        rng: &mut R,
    ) where
        S: Solution<Variable = V>,
        R: Rng + ?Sized,
    {
        self.clear();

        if pruning == VelocityPruning::BeforeRebuild {
            self.prune(gamma, rng);
        }

        self.push_differences(particle, personal_best, alpha);
        self.push_differences(particle, leader, beta);

        if pruning == VelocityPruning::AfterRebuild {
            self.prune(gamma, rng);
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.operators.shuffle(rng);
    }

    /// Applies the operators in order to `child`. Each fires when a fresh uniform draw
    /// falls below its probability; later operators on the same slot overwrite earlier
    /// ones. Returns how many fired.
    pub fn apply<S, R>(&self, child: &mut S, rng: &mut R) -> usize
    where
        S: Solution<Variable = V>,
        R: Rng + ?Sized,
    {
        let mut fired = 0;
        for op in &self.operators {
            if rng.random::<f64>() < op.probability {
                child.set_variable(op.index, op.target.clone());
                fired += 1;
            }
        }
        fired
    }
}
