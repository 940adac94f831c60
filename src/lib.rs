pub mod capabilities;
pub mod dominance;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod mopso;
pub mod population;
pub mod solution;

pub mod prelude {
    pub use crate::{
        capabilities::*,
        dominance::*,
        error::*,
        executor::*,
        metrics::*,
        mopso::{
            Created, Initialized, Mopso, Optimizer, config::*, leader::*, swarm::*, velocity::*,
        },
        population::{truncation::*, *},
        solution::*,
    };

    pub use rand;
}
