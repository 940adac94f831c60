use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::{
    capabilities::{Evaluator, Initialization, Mutation},
    dominance::{DominanceComparator, ParetoDominance},
    error::MopsoError,
    metrics::{MetricsSink, Snapshot},
    population::{NonDominatedPopulation, TruncationPolicy},
    solution::Solution,
};

pub mod config;
pub mod leader;
pub mod swarm;
pub mod velocity;

pub use config::{DEFAULT_COOLING_RATE, MopsoConfig};
pub use leader::select_leader;
pub use swarm::Swarm;
pub use velocity::{SwapOperator, Velocity, VelocityPruning};

#[cfg(test)]
mod tests;

/// An iterative optimizer driven from outside: the caller decides when to stop.
///
/// Initialization is not part of this trait. It is the `Created` to `Initialized`
/// transition of [`Mopso`], so only an initialized optimizer can implement it and
/// iterating an uninitialized one does not compile.
pub trait Optimizer {
    type Solution: Solution;

    /// Runs one complete generation.
    fn iterate(&mut self) -> Result<(), MopsoError>;

    /// Snapshot of the current non-dominated result.
    fn result(&self) -> NonDominatedPopulation<Self::Solution>;

    /// Number of completed iterations.
    fn iterations(&self) -> usize;

    /// Number of solution evaluations requested so far, including initialization.
    fn evaluations(&self) -> usize;
}

/// Typestate: configured but not yet initialized.
pub struct Created;

/// Typestate: swarm and leader archive are populated.
pub struct Initialized<S: Solution> {
    swarm: Swarm<S>,
}

/// Multi-objective particle swarm optimizer over discrete decision variables.
///
/// Velocities are sequences of probabilistic swap operators that copy variable values
/// from a particle's personal best or from a leader drawn from a bounded archive of
/// non-dominated solutions. A cooling parameter (gamma) sets the probability of taking a
/// pure mutation move instead and decays geometrically every iteration.
///
/// Type parameters:
/// - `S`: The solution representation.
/// - `I`: Initialization capability producing the first swarm.
/// - `E`: Evaluation capability computing objective vectors.
/// - `R`: Random number generator; every stochastic decision draws from it.
/// - `St`: Lifecycle state (`Created` or `Initialized<S>`).
pub struct Mopso<S, I, E, R, St> {
    config: MopsoConfig,
    initialization: I,
    evaluator: E,
    rng: R,
    mutation: Option<Box<dyn Mutation<S>>>,
    /// Decides leader tournaments.
    leader_comparator: Box<dyn DominanceComparator<S>>,
    /// Decides personal-best acceptance.
    dominance_comparator: Box<dyn DominanceComparator<S>>,
    leaders: NonDominatedPopulation<S>,
    archive: Option<NonDominatedPopulation<S>>,
    metrics_sink: Option<Box<dyn MetricsSink>>,
    gamma: f64,
    iterations: usize,
    evaluations: usize,
    sink_failures: usize,
    state: St,
}

impl<S, I, E, R> Mopso<S, I, E, R, Created>
where
    S: Solution + 'static,
    I: Initialization<S>,
    E: Evaluator<S>,
    R: Rng,
{
    /// Validates `config` and sets up an optimizer with Pareto comparators, a
    /// crowding-truncated leader archive, no mutation and no external archive.
    pub fn new(
        config: MopsoConfig,
        initialization: I,
        evaluator: E,
        rng: R,
    ) -> Result<Self, MopsoError> {
        config.validate()?;

        Ok(Mopso {
            gamma: config.gamma,
            config,
            initialization,
            evaluator,
            rng,
            mutation: None,
            leader_comparator: Box::new(ParetoDominance),
            dominance_comparator: Box::new(ParetoDominance),
            leaders: NonDominatedPopulation::new(),
            archive: None,
            metrics_sink: None,
            iterations: 0,
            evaluations: 0,
            sink_failures: 0,
            state: Created,
        })
    }

    pub fn with_mutation<M: Mutation<S> + 'static>(mut self, mutation: M) -> Self {
        debug!(mutation = %tynm::type_name::<M>(), "mutation configured");
        self.mutation = Some(Box::new(mutation));
        self
    }

    /// Enables the external archive. It is refilled from the current particles after
    /// every iteration and, when present, is what [`Optimizer::result`] returns.
    pub fn with_archive(mut self, mut archive: NonDominatedPopulation<S>) -> Self {
        archive.clear();
        self.archive = Some(archive);
        self
    }

    /// Replaces the leader archive, e.g. to change its dominance comparator or
    /// truncation policy. Any members are discarded.
    pub fn with_leader_archive(mut self, mut leaders: NonDominatedPopulation<S>) -> Self {
        leaders.clear();
        self.leaders = leaders;
        self
    }

    /// Sets the comparator the leader archive uses to admit and evict members.
    pub fn with_archive_comparator<C: DominanceComparator<S> + 'static>(
        mut self,
        comparator: C,
    ) -> Self {
        debug!(
            comparator = %tynm::type_name::<C>(),
            "leader archive comparator configured"
        );
        self.leaders = std::mem::take(&mut self.leaders).with_dominance_comparator(comparator);
        self
    }

    /// Sets how the leader archive is cut back to `leader_size`.
    pub fn with_truncation_policy<T: TruncationPolicy<S> + 'static>(mut self, policy: T) -> Self {
        debug!(
            policy = %tynm::type_name::<T>(),
            "leader archive truncation configured"
        );
        self.leaders = std::mem::take(&mut self.leaders).with_truncation_policy(policy);
        self
    }

    pub fn with_leader_comparator<C: DominanceComparator<S> + 'static>(
        mut self,
        comparator: C,
    ) -> Self {
        debug!(
            comparator = %tynm::type_name::<C>(),
            "leader comparator configured"
        );
        self.leader_comparator = Box::new(comparator);
        self
    }

    pub fn with_dominance_comparator<C: DominanceComparator<S> + 'static>(
        mut self,
        comparator: C,
    ) -> Self {
        debug!(
            comparator = %tynm::type_name::<C>(),
            "personal-best comparator configured"
        );
        self.dominance_comparator = Box::new(comparator);
        self
    }

    pub fn with_metrics_sink(mut self, sink: impl MetricsSink + 'static) -> Self {
        self.metrics_sink = Some(Box::new(sink));
        self
    }

    /// Builds the first swarm from the initialization capability, evaluates it and
    /// seeds personal bests, leaders and (if configured) the external archive.
    ///
    /// Fails if fewer than `swarm_size` solutions are produced. A surplus is offered to
    /// the archives but only the first `swarm_size` become particles.
    pub fn initialize(mut self) -> Result<Mopso<S, I, E, R, Initialized<S>>, MopsoError> {
        let swarm_size = self.config.swarm_size;

        let mut initial = self.initialization.initialize(&mut self.rng);
        if initial.len() < swarm_size {
            return Err(MopsoError::InsufficientInitialPopulation {
                produced: initial.len(),
                swarm_size,
            });
        }

        self.evaluator.evaluate_all(&mut initial)?;
        self.evaluations += initial.len();

        let swarm = Swarm::from_initial(initial[..swarm_size].to_vec());

        self.leaders.add_all(initial.iter().cloned());
        self.leaders.truncate(self.config.leader_size);

        if let Some(archive) = self.archive.as_mut() {
            archive.add_all(initial);
        }

        info!(
            swarm_size,
            leaders = self.leaders.len(),
            archive = ?self.archive.as_ref().map(|a| a.len()),
            evaluations = self.evaluations,
            evaluator = %tynm::type_name::<E>(),
            "swarm initialized"
        );

        let mut initialized = Mopso {
            config: self.config,
            initialization: self.initialization,
            evaluator: self.evaluator,
            rng: self.rng,
            mutation: self.mutation,
            leader_comparator: self.leader_comparator,
            dominance_comparator: self.dominance_comparator,
            leaders: self.leaders,
            archive: self.archive,
            metrics_sink: self.metrics_sink,
            gamma: self.gamma,
            iterations: self.iterations,
            evaluations: self.evaluations,
            sink_failures: self.sink_failures,
            state: Initialized { swarm },
        };

        let snapshot = Snapshot::of_population(
            0,
            initialized.gamma,
            initialized.evaluations,
            initialized.archive.as_ref().unwrap_or(&initialized.leaders),
        );
        initialized.record_snapshot(snapshot);

        Ok(initialized)
    }
}

impl<S, I, E, R> Mopso<S, I, E, R, Initialized<S>>
where
    S: Solution + 'static,
    E: Evaluator<S>,
    R: Rng,
{
    pub fn swarm(&self) -> &Swarm<S> {
        &self.state.swarm
    }

    /// Rebuilds every slot's velocity against its personal best and a freshly
    /// tournament-selected leader.
    pub fn update_velocities(&mut self) -> Result<(), MopsoError> {
        for i in 0..self.state.swarm.len() {
            self.update_velocity(i)?;
        }
        Ok(())
    }

    pub fn update_velocity(&mut self, i: usize) -> Result<(), MopsoError> {
        let leader = select_leader(&self.leaders, &*self.leader_comparator, &mut self.rng)?;
        let (particle, personal_best, velocity) = self.state.swarm.slot_mut(i);

        velocity.rebuild(
            particle,
            personal_best,
            leader,
            self.config.alpha,
            self.config.beta,
            self.gamma,
            self.config.velocity_pruning,
            &mut self.rng,
        );

        trace!(slot = i, operators = velocity.len(), "velocity rebuilt");
        Ok(())
    }

    pub fn update_positions(&mut self) {
        for i in 0..self.state.swarm.len() {
            self.update_position(i);
        }
    }

    /// Moves slot `i`: with probability gamma the particle is mutated one to three
    /// times (left unchanged when no mutation is configured), otherwise its shuffled
    /// velocity is applied. The velocity is shuffled either way.
    pub fn update_position(&mut self, i: usize) {
        let swarm = &mut self.state.swarm;
        let mut child = swarm.particle(i).clone();

        let velocity = swarm.velocity_mut(i);
        velocity.shuffle(&mut self.rng);

        if self.rng.random::<f64>() < self.gamma {
            let times = self.rng.random_range(1..=3);
            if let Some(mutation) = self.mutation.as_mut() {
                for _ in 0..times {
                    child = mutation.evolve(child, &mut self.rng);
                }
            }
        } else {
            velocity.apply(&mut child, &mut self.rng);
        }

        swarm.replace_particle(i, child);
    }

    /// Accepts each new particle as personal best unless the old best strictly
    /// dominates it.
    pub fn update_local_best(&mut self) -> usize {
        self.state
            .swarm
            .update_personal_bests(&*self.dominance_comparator)
    }

    fn evaluate_particles(&mut self) -> Result<(), MopsoError> {
        let particles = self.state.swarm.particles_mut();
        self.evaluator.evaluate_all(particles)?;
        self.evaluations += particles.len();
        Ok(())
    }

    /// Merges the current particles into the leader archive, truncates it and, when
    /// configured, replaces the external archive's contents with the current particles.
    fn update_archives(&mut self) {
        let particles = self.state.swarm.particles();

        self.leaders.add_all(particles.iter().cloned());
        self.leaders.truncate(self.config.leader_size);

        if let Some(archive) = self.archive.as_mut() {
            archive.clear();
            archive.add_all(particles.iter().cloned());
        }
    }

    pub fn result(&self) -> NonDominatedPopulation<S> {
        let result = self.archive.as_ref().unwrap_or(&self.leaders);
        info!(
            iterations = self.iterations,
            evaluations = self.evaluations,
            size = result.len(),
            from_archive = self.archive.is_some(),
            "result requested"
        );
        result.clone()
    }
}

impl<S, I, E, R> Optimizer for Mopso<S, I, E, R, Initialized<S>>
where
    S: Solution + 'static,
    E: Evaluator<S>,
    R: Rng,
{
    type Solution = S;

    fn iterate(&mut self) -> Result<(), MopsoError> {
        self.update_velocities()?;
        self.update_positions();
        self.evaluate_particles()?;

        let accepted = self.update_local_best();
        self.update_archives();

        self.gamma *= self.config.cooling_rate;
        self.iterations += 1;

        debug!(
            iteration = self.iterations,
            gamma = self.gamma,
            personal_bests_updated = accepted,
            leaders = self.leaders.len(),
            evaluations = self.evaluations,
            "iteration complete"
        );

        let snapshot =
            Snapshot::of_population(self.iterations, self.gamma, self.evaluations, &self.leaders);
        self.record_snapshot(snapshot);

        Ok(())
    }

    fn result(&self) -> NonDominatedPopulation<S> {
        Mopso::result(self)
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}

impl<S, I, E, R, St> Mopso<S, I, E, R, St> {
    pub fn config(&self) -> &MopsoConfig {
        &self.config
    }

    /// Current cooling parameter.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn leaders(&self) -> &NonDominatedPopulation<S> {
        &self.leaders
    }

    pub fn archive(&self) -> Option<&NonDominatedPopulation<S>> {
        self.archive.as_ref()
    }

    /// Number of metrics sink writes that failed so far.
    pub fn sink_failures(&self) -> usize {
        self.sink_failures
    }

    fn record_snapshot(&mut self, snapshot: Snapshot) {
        let Some(sink) = self.metrics_sink.as_mut() else {
            return;
        };
        if let Err(err) = sink.record(&snapshot.to_string()) {
            self.sink_failures += 1;
            warn!(step = snapshot.step, error = %err, "metrics sink write failed");
        }
    }
}
