use std::cmp::Ordering;

use rand::Rng;

use crate::{
    dominance::DominanceComparator, error::MopsoError, population::NonDominatedPopulation,
    solution::Solution,
};

/// Binary tournament over the leader archive.
///
/// Draws two leaders uniformly with replacement and returns the one `comparator`
/// prefers, or a fair coin flip between them when neither is preferred.
pub fn select_leader<'a, S, R>(
    leaders: &'a NonDominatedPopulation<S>,
    comparator: &dyn DominanceComparator<S>,
    rng: &mut R,
) -> Result<&'a S, MopsoError>
where
    S: Solution,
    R: Rng + ?Sized,
{
    let members = leaders.as_slice();
    if members.is_empty() {
        return Err(MopsoError::EmptyLeaderArchive);
    }

    let leader1 = &members[rng.random_range(0..members.len())];
    let leader2 = &members[rng.random_range(0..members.len())];

    let winner = match comparator.compare(leader1, leader2) {
        Ordering::Less => leader1,
        Ordering::Greater => leader2,
        Ordering::Equal => {
            if rng.random_bool(0.5) {
                leader1
            } else {
                leader2
            }
        }
    };

    Ok(winner)
}
