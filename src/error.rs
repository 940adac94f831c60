use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Swarm size must be at least 1")]
    ZeroSwarmSize,

    #[error("Leader size must be at least 1")]
    ZeroLeaderSize,

    #[error("{name} must be a probability in [0, 1]; got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("Cooling rate must lie in [0, 1]; got {0}")]
    CoolingRateOutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum MopsoError {
    #[error("Initialization produced {produced} solutions; swarm needs {swarm_size}")]
    InsufficientInitialPopulation { produced: usize, swarm_size: usize },

    #[error("Leader archive is empty; cannot run a leader tournament")]
    EmptyLeaderArchive,

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] anyhow::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
