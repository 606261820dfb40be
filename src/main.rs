use anyhow::Result;
use bayesample::network::common::loader::{load_model, load_queries, write_results};
use bayesample::network::common::logging::timed;
use bayesample::network::common::setup::parse_configuration_options;
use bayesample::network::{BayesianNetwork, Estimator};
use bayesample::{print_green, print_red, print_yellow};
use std::path::Path;

fn run() -> Result<bool> {
    let options = match parse_configuration_options() {
        Ok(options) => options,
        Err(message) => {
            println!("{}", message);
            return Ok(false);
        }
    };
    if let Err(message) = options.check() {
        println!("{}", message);
        return Ok(false);
    }
    let estimator = Estimator::try_from(options.algorithm)?;

    let definitions = load_model(&options.model_file)?;
    let queries = load_queries(&options.test_file)?;
    let mut network = BayesianNetwork::from_definitions(&definitions, options.sampling.clone())?;

    let results = timed("inference", || network.batch_query(estimator, &queries))?;
    write_results(&options.output_file, &results)?;

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        print_yellow!("{} of {} queries failed, see the output file", failed, results.len());
    }
    print_green!("The inference procedure is successful !!!!!!!");
    let output = Path::new(&options.output_file);
    let output = output.canonicalize().unwrap_or_else(|_| output.to_path_buf());
    println!("Please check output at here: {}", output.display());
    Ok(true)
}

fn main() {
    match timed("main", run) {
        Ok(true) => {}
        // Bad arguments, already reported
        Ok(false) => std::process::exit(2),
        Err(e) => {
            print_red!("Failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
