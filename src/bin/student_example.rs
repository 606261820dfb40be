use bayesample::network::common::setup::{init_logging, SamplingConfig};
use bayesample::network::scenarios::student::{student_network, student_queries};
use bayesample::network::Estimator;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    println!("Student network, forward sampling vs likelihood weighting");

    let config = SamplingConfig {
        samples: 200_000,
        ..SamplingConfig::default()
    };
    let mut network = student_network(config)?;
    let queries = student_queries();

    let forward = network.batch_query(Estimator::Forward, &queries)?;
    let likelihood = network.batch_query(Estimator::Likelihood, &queries)?;

    println!("===== RESULTS =====");
    for ((query, f), l) in queries.iter().zip(forward).zip(likelihood) {
        let evidence = query
            .evidence
            .as_ref()
            .map(|e| format!(" | {}", e))
            .unwrap_or_default();
        println!("P({}{}) forward = {:.4}, likelihood = {:.4}", query.target, evidence, f?, l?);
    }
    println!("===================");
    Ok(())
}
