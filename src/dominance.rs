use std::cmp::Ordering;

use crate::solution::Solution;

/// Compares two solutions for preference.
///
/// `Ordering::Less` means `a` is preferred (dominates `b`), `Ordering::Greater` means
/// `b` is preferred, and `Ordering::Equal` means neither dominates the other.
///
/// Implementations must be deterministic and transitive. Archive composition is
/// unspecified otherwise; the optimizer does not guard against it.
pub trait DominanceComparator<S> {
    fn compare(&self, a: &S, b: &S) -> Ordering;
}

impl<S, F> DominanceComparator<S> for F
where
    F: Fn(&S, &S) -> Ordering,
{
    fn compare(&self, a: &S, b: &S) -> Ordering {
        self(a, b)
    }
}

/// Pareto dominance over minimized objectives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoDominance;

impl<S: Solution> DominanceComparator<S> for ParetoDominance {
    fn compare(&self, a: &S, b: &S) -> Ordering {
        pareto_compare(a.objectives(), b.objectives())
    }
}

/// Pareto comparison of two objective vectors (minimization).
pub fn pareto_compare(a: &[f64], b: &[f64]) -> Ordering {
    debug_assert_eq!(
        a.len(),
        b.len(),
        "objective vectors must have the same length"
    );

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
