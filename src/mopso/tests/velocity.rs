use pretty_assertions::assert_eq;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use test_case::test_case;

use super::Sol;
use crate::{
    mopso::velocity::{SwapOperator, Velocity, VelocityPruning},
    solution::VecSolution,
};

fn sol(vars: &[u8]) -> Sol {
    VecSolution::new(vars.to_vec())
}

fn rebuilt(pruning: VelocityPruning, gamma: f64, rng: &mut StdRng) -> Velocity<u8> {
    let particle = sol(&[0, 1, 2]);
    let personal_best = sol(&[0, 3, 2]);
    let leader = sol(&[1, 1, 0]);

    let mut velocity = Velocity::new();
    velocity.push(SwapOperator::new(9, 9, 1.0));
    velocity.rebuild(
        &particle,
        &personal_best,
        &leader,
        0.5,
        0.1,
        gamma,
        pruning,
        rng,
    );
    velocity
}

#[test]
fn rebuild_targets_personal_best_then_leader() {
    let mut rng = StdRng::seed_from_u64(1);
    let velocity = rebuilt(VelocityPruning::BeforeRebuild, 0.9, &mut rng);

    assert_eq!(
        velocity.operators(),
        &[
            SwapOperator::new(1, 3u8, 0.5),
            SwapOperator::new(0, 1u8, 0.1),
            SwapOperator::new(2, 0u8, 0.1),
        ]
    );
}

#[test]
fn identical_exemplars_yield_empty_velocity() {
    let mut rng = StdRng::seed_from_u64(1);
    let s = sol(&[2, 2, 2]);
    let mut velocity = Velocity::new();
    velocity.rebuild(
        &s,
        &s,
        &s,
        0.5,
        0.1,
        0.6,
        VelocityPruning::AfterRebuild,
        &mut rng,
    );
    assert!(velocity.is_empty());
}

#[test]
fn same_slot_can_carry_two_competing_operators() {
    let mut velocity = Velocity::new();
    let particle = sol(&[0]);
    velocity.push_differences(&particle, &sol(&[1]), 0.5);
    velocity.push_differences(&particle, &sol(&[2]), 0.1);

    let indices: Vec<usize> = velocity.operators().iter().map(|op| op.index).collect();
    assert_eq!(indices, vec![0, 0]);
}

#[test]
fn prune_before_rebuild_draws_nothing() {
    let mut used = StdRng::seed_from_u64(99);
    let mut untouched = StdRng::seed_from_u64(99);

    let velocity = rebuilt(VelocityPruning::BeforeRebuild, 1.0, &mut used);

    assert_eq!(velocity.len(), 3);
    assert_eq!(used.next_u64(), untouched.next_u64());
}

#[test_case(VelocityPruning::AfterRebuild, 1.0, 0; "after rebuild, gamma one drops all")]
#[test_case(VelocityPruning::AfterRebuild, 0.0, 3; "after rebuild, gamma zero keeps all")]
#[test_case(VelocityPruning::Disabled, 1.0, 3; "disabled keeps all")]
#[test_case(VelocityPruning::BeforeRebuild, 1.0, 3; "before rebuild is a no-op")]
fn pruning_modes(pruning: VelocityPruning, gamma: f64, expected_len: usize) {
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(rebuilt(pruning, gamma, &mut rng).len(), expected_len);
}

#[test]
fn later_operator_on_same_slot_wins() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut velocity = Velocity::new();
    velocity.push(SwapOperator::new(0, 5, 1.0));
    velocity.push(SwapOperator::new(1, 6, 0.0));
    velocity.push(SwapOperator::new(0, 7, 1.0));

    let mut child = sol(&[0, 0]);
    let fired = velocity.apply(&mut child, &mut rng);

    assert_eq!(fired, 2);
    assert_eq!(child.variables, vec![7, 0]);
}

#[test]
fn shuffle_preserves_operators() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut velocity = Velocity::new();
    for i in 0..10 {
        velocity.push(SwapOperator::new(i, i as u8, 0.5));
    }

    velocity.shuffle(&mut rng);

    let mut indices: Vec<usize> = velocity.operators().iter().map(|op| op.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..10).collect::<Vec<_>>());
}
