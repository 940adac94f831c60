use discrete_mopso::prelude::{
    rand::{Rng, RngCore, SeedableRng, rngs::StdRng},
    *,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A candidate rule for one processing stage.
#[derive(Debug, Clone, Copy)]
struct Rule {
    name: &'static str,
    cost: f64,
    benefit: f64,
}

const RULES: [Rule; 5] = [
    Rule {
        name: "skip",
        cost: 0.0,
        benefit: 0.0,
    },
    Rule {
        name: "cache",
        cost: 1.0,
        benefit: 2.5,
    },
    Rule {
        name: "inline",
        cost: 2.0,
        benefit: 3.0,
    },
    Rule {
        name: "unroll",
        cost: 4.0,
        benefit: 6.0,
    },
    Rule {
        name: "vectorize",
        cost: 7.0,
        benefit: 8.5,
    },
];

const STAGES: usize = 12;

/// Stage `i` weighs the benefit of its rule by `weights[i]`; cost is additive.
struct RuleCatalog {
    weights: Vec<f64>,
}

impl Evaluator<VecSolution<usize>> for RuleCatalog {
    fn evaluate_all(&mut self, solutions: &mut [VecSolution<usize>]) -> anyhow::Result<()> {
        for s in solutions.iter_mut() {
            let mut cost = 0.0;
            let mut benefit = 0.0;
            for (&rule, weight) in s.variables.iter().zip(&self.weights) {
                let rule = RULES
                    .get(rule)
                    .ok_or_else(|| anyhow::anyhow!("unknown rule index {rule}"))?;
                cost += rule.cost;
                benefit += weight * rule.benefit;
            }
            // both objectives are minimized
            s.set_objectives(vec![cost, -benefit]);
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let seed = 42;
    let config = MopsoConfig::new(60, 30).with_velocity_pruning(VelocityPruning::AfterRebuild);

    let catalog = RuleCatalog {
        weights: (0..STAGES).map(|i| 1.0 + (i % 4) as f64 * 0.5).collect(),
    };

    let swarm_size = config.swarm_size;
    let random_plans = move |rng: &mut dyn RngCore| -> Vec<VecSolution<usize>> {
        (0..swarm_size)
            .map(|_| {
                VecSolution::new(
                    (0..STAGES)
                        .map(|_| rng.random_range(0..RULES.len()))
                        .collect(),
                )
            })
            .collect()
    };

    let swap_one_rule = |mut plan: VecSolution<usize>, rng: &mut dyn RngCore| {
        let stage = rng.random_range(0..plan.variables.len());
        plan.variables[stage] = rng.random_range(0..RULES.len());
        plan
    };

    let mopso = Mopso::new(config, random_plans, catalog, StdRng::seed_from_u64(seed))?
        .with_mutation(swap_one_rule)
        .with_archive(NonDominatedPopulation::new())
        .with_metrics_sink(WriterSink::new(std::io::stderr()))
        .initialize()?;

    let (summary, mopso) = Executor::new(mopso)
        .max_iterations(200)
        .max_evaluations(20_000)
        .run()?;

    info!(
        iterations = summary.iterations,
        evaluations = summary.evaluations,
        gamma = mopso.gamma(),
        "optimization finished"
    );

    let mut front = mopso.result().into_vec();
    front.sort_by(|a, b| a.objectives[0].total_cmp(&b.objectives[0]));

    println!("{:>8} {:>9}  plan", "cost", "benefit");
    for plan in &front {
        let names: Vec<&str> = plan.variables.iter().map(|&r| RULES[r].name).collect();
        println!(
            "{:>8.1} {:>9.2}  {}",
            plan.objectives[0],
            -plan.objectives[1],
            names.join(",")
        );
    }

    Ok(())
}
