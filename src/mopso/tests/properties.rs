use proptest::prelude::*;

use super::*;
use crate::mopso::{DEFAULT_COOLING_RATE, Optimizer};

fn config_strategy() -> impl Strategy<Value = MopsoConfig> {
    (2usize..10, 1usize..6, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(swarm, leaders, alpha, beta, gamma)| {
            MopsoConfig::new(swarm, leaders).with_probabilities(alpha, beta, gamma)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn swarm_shape_and_archive_bounds_hold(
        config in config_strategy(),
        num_vars in 1usize..6,
        seed in any::<u64>(),
        iterations in 1usize..6,
    ) {
        let swarm_size = config.swarm_size;
        let leader_size = config.leader_size;
        let mut mopso = random_mopso(config, num_vars, seed)
            .with_mutation(CountingReset::default())
            .initialize()
            .unwrap();

        for _ in 0..iterations {
            mopso.iterate().unwrap();

            let swarm = mopso.swarm();
            prop_assert_eq!(swarm.particles().len(), swarm_size);
            prop_assert_eq!(swarm.personal_bests().len(), swarm_size);
            prop_assert_eq!(swarm.velocities().len(), swarm_size);
            prop_assert!(!mopso.leaders().is_empty());
            prop_assert!(mopso.leaders().len() <= leader_size);

            for velocity in swarm.velocities() {
                prop_assert!(velocity.operators().iter().all(|op| op.index < num_vars));
            }
        }
    }

    #[test]
    fn gamma_decays_geometrically(
        gamma in 0.0f64..=1.0,
        seed in any::<u64>(),
        iterations in 0usize..12,
    ) {
        let config = MopsoConfig::new(4, 3).with_probabilities(0.5, 0.1, gamma);
        let mut mopso = random_mopso(config, 3, seed).initialize().unwrap();

        let mut expected = gamma;
        for _ in 0..iterations {
            mopso.iterate().unwrap();
            expected *= DEFAULT_COOLING_RATE;
        }

        prop_assert_eq!(mopso.gamma(), expected);
        let closed_form = gamma * DEFAULT_COOLING_RATE.powi(iterations as i32);
        prop_assert!((mopso.gamma() - closed_form).abs() < 1e-12);
    }

    #[test]
    fn same_seed_same_run(seed in any::<u64>(), config in config_strategy()) {
        let run = || {
            let mut mopso = random_mopso(config.clone(), 4, seed)
                .with_mutation(CountingReset::default())
                .initialize()
                .unwrap();
            for _ in 0..4 {
                mopso.iterate().unwrap();
            }
            mopso
        };

        let a = run();
        let b = run();

        prop_assert_eq!(a.swarm().particles(), b.swarm().particles());
        prop_assert_eq!(a.swarm().personal_bests(), b.swarm().personal_bests());
        prop_assert_eq!(a.swarm().velocities(), b.swarm().velocities());
        prop_assert_eq!(a.leaders().as_slice(), b.leaders().as_slice());
        prop_assert_eq!(a.gamma(), b.gamma());
    }
}
