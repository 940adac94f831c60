use std::cmp::Ordering;

use crate::{dominance::DominanceComparator, mopso::velocity::Velocity, solution::Solution};

/// Per-slot swarm state. The three vectors always have the same length, fixed at
/// construction.
#[derive(Clone)]
pub struct Swarm<S: Solution> {
    particles: Vec<S>,
    personal_bests: Vec<S>,
    velocities: Vec<Velocity<S::Variable>>,
}

impl<S: Solution> Swarm<S> {
    /// Seeds every slot's particle and personal best with the same solution and gives
    /// it an empty velocity.
    pub fn from_initial(initial: Vec<S>) -> Self {
        let velocities = initial.iter().map(|_| Velocity::new()).collect();
        Self {
            personal_bests: initial.clone(),
            particles: initial,
            velocities,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[S] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [S] {
        &mut self.particles
    }

    pub fn personal_bests(&self) -> &[S] {
        &self.personal_bests
    }

    pub fn velocities(&self) -> &[Velocity<S::Variable>] {
        &self.velocities
    }

    pub fn particle(&self, i: usize) -> &S {
        &self.particles[i]
    }

    pub fn personal_best(&self, i: usize) -> &S {
        &self.personal_bests[i]
    }

    pub(crate) fn velocity_mut(&mut self, i: usize) -> &mut Velocity<S::Variable> {
        &mut self.velocities[i]
    }

    /// Borrows slot `i`'s particle and personal best together with its velocity.
    pub(crate) fn slot_mut(&mut self, i: usize) -> (&S, &S, &mut Velocity<S::Variable>) {
        (
            &self.particles[i],
            &self.personal_bests[i],
            &mut self.velocities[i],
        )
    }

    pub(crate) fn replace_particle(&mut self, i: usize, particle: S) {
        self.particles[i] = particle;
    }

    /// Advances each personal best to the current particle unless the old best strictly
    /// dominates it. Ties and mutual non-domination favour the newer particle.
    /// Returns how many slots were updated.
    pub fn update_personal_bests(&mut self, comparator: &dyn DominanceComparator<S>) -> usize {
        let mut updated = 0;
        for (particle, best) in self.particles.iter().zip(self.personal_bests.iter_mut()) {
            if comparator.compare(particle, best) != Ordering::Greater {
                *best = particle.clone();
                updated += 1;
            }
        }
        updated
    }
}
