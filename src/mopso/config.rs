use crate::{error::ConfigError, mopso::velocity::VelocityPruning};

/// The fixed per-iteration decay factor applied to gamma.
pub const DEFAULT_COOLING_RATE: f64 = 0.97;

/// Configuration for the discrete multi-objective particle swarm.
#[derive(Clone, Debug, PartialEq)]
pub struct MopsoConfig {
    /// Number of particles; exactly this many swarm slots exist for the whole run.
    pub swarm_size: usize,

    /// Capacity of the leader archive after each truncation.
    pub leader_size: usize,

    /// Application probability of swap operators towards the personal best.
    pub alpha: f64,

    /// Application probability of swap operators towards the selected leader.
    pub beta: f64,

    /// Initial cooling parameter: the per-particle probability of taking a pure mutation
    /// move instead of applying the velocity.
    pub gamma: f64,

    /// Multiplier applied to gamma after every completed iteration.
    pub cooling_rate: f64,

    /// Where the gamma-driven velocity pruning step runs.
    pub velocity_pruning: VelocityPruning,
}

impl Default for MopsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 100,
            leader_size: 100,
            alpha: 0.5,
            beta: 0.1,
            gamma: 0.6,
            cooling_rate: DEFAULT_COOLING_RATE,
            velocity_pruning: VelocityPruning::BeforeRebuild,
        }
    }
}

impl MopsoConfig {
    pub fn new(swarm_size: usize, leader_size: usize) -> Self {
        Self {
            swarm_size,
            leader_size,
            ..Self::default()
        }
    }

    pub fn with_probabilities(mut self, alpha: f64, beta: f64, gamma: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self.gamma = gamma;
        self
    }

    pub fn with_velocity_pruning(mut self, pruning: VelocityPruning) -> Self {
        self.velocity_pruning = pruning;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swarm_size == 0 {
            return Err(ConfigError::ZeroSwarmSize);
        }
        if self.leader_size == 0 {
            return Err(ConfigError::ZeroLeaderSize);
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.cooling_rate) {
            return Err(ConfigError::CoolingRateOutOfRange(self.cooling_rate));
        }
        Ok(())
    }
}
