/// A candidate solution: an ordered sequence of decision-variable slots plus
/// the objective vector computed by an [`Evaluator`](crate::capabilities::Evaluator).
///
/// The optimizer never interprets a variable's value. It only needs to test two
/// values for equality and to copy a value from one solution into another, which
/// is what the `Clone + PartialEq` bounds on [`Solution::Variable`] provide.
///
/// All objectives are **minimized**.
pub trait Solution: Clone {
    type Variable: Clone + PartialEq;

    fn variables(&self) -> &[Self::Variable];

    /// Overwrites the variable at `index`.
    ///
    /// Implementations should treat the objective vector as stale afterwards; the
    /// optimizer re-evaluates every particle before reading objectives again.
    fn set_variable(&mut self, index: usize, value: Self::Variable);

    fn objectives(&self) -> &[f64];

    fn num_variables(&self) -> usize {
        self.variables().len()
    }

    fn variable(&self, index: usize) -> &Self::Variable {
        &self.variables()[index]
    }
}

/// Plain vector-backed solution, usable directly when the decision variables are
/// small value types (rule identifiers, enum tags, indices into a rule table...).
#[derive(Debug, Clone, PartialEq)]
pub struct VecSolution<V> {
    pub variables: Vec<V>,
    pub objectives: Vec<f64>,
}

impl<V> VecSolution<V> {
    /// Creates an unevaluated solution; objectives start out empty.
    pub fn new(variables: Vec<V>) -> Self {
        Self {
            variables,
            objectives: Vec::new(),
        }
    }

    pub fn with_objectives(variables: Vec<V>, objectives: Vec<f64>) -> Self {
        Self {
            variables,
            objectives,
        }
    }

    pub fn set_objectives(&mut self, objectives: Vec<f64>) {
        self.objectives = objectives;
    }
}

impl<V: Clone + PartialEq> Solution for VecSolution<V> {
    type Variable = V;

    fn variables(&self) -> &[V] {
        &self.variables
    }

    /// Also clears the objectives, which no longer describe the variables.
    fn set_variable(&mut self, index: usize, value: V) {
        self.variables[index] = value;
        self.objectives.clear();
    }

    fn objectives(&self) -> &[f64] {
        &self.objectives
    }
}
