use std::{cmp::Ordering, fmt, rc::Rc};

use crate::{
    dominance::{DominanceComparator, ParetoDominance},
    solution::Solution,
};

pub mod truncation;

pub use truncation::{CrowdingDistance, TruncationPolicy, crowding_distance};


/// Objective vectors closer than this (Euclidean) count as the same point.
const DUPLICATE_EPS: f64 = 1e-10;

/// A set of mutually non-dominated solutions.
///
/// Dominance is decided by the population's own comparator, which may differ from the
/// comparators the optimizer uses for leader selection or personal-best acceptance.
/// Capacity is not enforced on insertion; call [`truncate`](Self::truncate).
#[derive(Clone)]
pub struct NonDominatedPopulation<S> {
    members: Vec<S>,
    comparator: Rc<dyn DominanceComparator<S>>,
    truncation: Rc<dyn TruncationPolicy<S>>,
}

impl<S: Solution + 'static> NonDominatedPopulation<S> {
    /// Empty population using Pareto dominance and crowding-distance truncation.
    pub fn new() -> Self {
        Self::with_comparator(ParetoDominance)
    }

    pub fn with_comparator(comparator: impl DominanceComparator<S> + 'static) -> Self {
        Self {
            members: Vec::new(),
            comparator: Rc::new(comparator),
            truncation: Rc::new(CrowdingDistance),
        }
    }
}

impl<S: Solution + 'static> Default for NonDominatedPopulation<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Solution> NonDominatedPopulation<S> {
    /// Replaces the comparator deciding admission and eviction. Existing members are
    /// kept as they are.
    pub fn with_dominance_comparator(
        mut self,
        comparator: impl DominanceComparator<S> + 'static,
    ) -> Self {
        self.comparator = Rc::new(comparator);
        self
    }

    pub fn with_truncation_policy(mut self, policy: impl TruncationPolicy<S> + 'static) -> Self {
        self.truncation = Rc::new(policy);
        self
    }

    /// Offers `solution` to the population.
    ///
    /// Rejected if an existing member dominates it, or if neither dominates the other
    /// and both sit at the same point in objective space. Otherwise every member it
    /// dominates is evicted and it is admitted. Returns whether it was admitted.
    pub fn add(&mut self, solution: S) -> bool {
        let mut dominated = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            match self.comparator.compare(&solution, member) {
                Ordering::Less => dominated.push(i),
                Ordering::Greater => return false,
                Ordering::Equal => {
                    if objective_distance(member.objectives(), solution.objectives())
                        < DUPLICATE_EPS
                    {
                        return false;
                    }
                }
            }
        }

        for i in dominated.into_iter().rev() {
            self.members.remove(i);
        }
        self.members.push(solution);
        true
    }

    /// Offers each solution in turn; returns how many were admitted (some may have
    /// been evicted again by later ones).
    pub fn add_all<I>(&mut self, solutions: I) -> usize
    where
        I: IntoIterator<Item = S>,
    {
        solutions
            .into_iter()
            .map(|solution| self.add(solution))
            .filter(|&admitted| admitted)
            .count()
    }

    /// Shrinks the population to at most `capacity` members using the configured
    /// truncation policy.
    pub fn truncate(&mut self, capacity: usize) {
        self.truncation.truncate(&mut self.members, capacity);
        debug_assert!(self.members.len() <= capacity);
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.members
    }

    pub fn into_vec(self) -> Vec<S> {
        self.members
    }

    /// Per-objective minimum over all members, or `None` when empty.
    pub fn ideal_point(&self) -> Option<Vec<f64>> {
        self.fold_objectives(f64::min)
    }

    /// Per-objective maximum over all members, or `None` when empty.
    pub fn nadir_point(&self) -> Option<Vec<f64>> {
        self.fold_objectives(f64::max)
    }

    fn fold_objectives(&self, f: impl Fn(f64, f64) -> f64) -> Option<Vec<f64>> {
        let (first, rest) = self.members.split_first()?;
        let mut acc = first.objectives().to_vec();
        for member in rest {
            for (a, &v) in acc.iter_mut().zip(member.objectives()) {
                *a = f(*a, v);
            }
        }
        Some(acc)
    }
}

impl<'a, S> IntoIterator for &'a NonDominatedPopulation<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<S: fmt::Debug> fmt::Debug for NonDominatedPopulation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonDominatedPopulation")
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

fn objective_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
