use crate::network::common::errors::InferenceError;
use crate::network::inference::estimators::Estimator;
use clap::{Arg, Command, ValueEnum, builder::EnumValueParser};
use env_logger::{Builder, Env};
use serde::Deserialize;
use std::{io::Write, path::Path};

/// Number of samples drawn when a query finds no sample store
pub const DEFAULT_SAMPLES: usize = 1_000_000;

/// Inference algorithm named on the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Counting over forward samples
    Forward,
    /// Likelihood weighting
    Likelihood,
    /// Accepted for compatibility, rejected before any work
    Gibbs,
}

impl TryFrom<Algorithm> for Estimator {
    type Error = InferenceError;

    fn try_from(algorithm: Algorithm) -> Result<Self, Self::Error> {
        match algorithm {
            Algorithm::Forward => Ok(Estimator::Forward),
            Algorithm::Likelihood => Ok(Estimator::Likelihood),
            Algorithm::Gibbs => Err(InferenceError::UnsupportedAlgorithm(
                "gibbs sampling is not implemented".to_string(),
            )),
        }
    }
}

/// Sampling parameters used when a network generates its store.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    pub samples: usize,
    pub parallelism: usize,
    /// Master seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            samples: DEFAULT_SAMPLES,
            parallelism: rayon::current_num_threads(),
            seed: None,
        }
    }
}

/// These options define the inputs from the user.
#[derive(Deserialize, Clone, Debug)]
pub struct CommandLineOptions {
    pub model_file: String,
    pub test_file: String,
    pub output_file: String,
    pub algorithm: Algorithm,
    pub sampling: SamplingConfig,
}

impl CommandLineOptions {
    /// Same checks the runner makes before touching the model
    pub fn check(&self) -> Result<(), String> {
        if !Path::new(&self.model_file).exists() {
            return Err(format!("[ERROR] The file {} does not exist.", self.model_file));
        }
        if !Path::new(&self.test_file).exists() {
            return Err(format!("[ERROR] The file {} does not exist.", self.test_file));
        }
        if self.output_file.is_empty() {
            return Err(format!("[ERROR] Invalid output path: {}", self.output_file));
        }
        Ok(())
    }
}

pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .try_init();
}

fn command() -> Command {
    Command::new("BAYESAMPLE")
        .version("1.0")
        .about("Approximate inference over discrete Bayesian networks by sampling.")
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Path to the model file")
                .required(true),
        )
        .arg(
            Arg::new("test")
                .short('t')
                .long("test")
                .value_name("FILE")
                .help("Path to the query file")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path to the output file")
                .default_value("output.txt"),
        )
        .arg(
            Arg::new("algorithm")
                .short('a')
                .long("algorithm")
                .value_parser(EnumValueParser::<Algorithm>::new())
                .help("forward | likelihood | gibbs")
                .default_value("forward"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .value_name("NUMBER")
                .help("Number of samples to generate")
                .default_value("1000000"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("NUMBER")
                .help("Number of sampling batches run in parallel (defaults to the CPU count)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .help("Master seed for reproducible runs (optional)"),
        )
}

/// Build options from an argument list. Logging is left untouched.
pub fn options_from_args<I, T>(args: I) -> Result<CommandLineOptions, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command().try_get_matches_from(args).map_err(|e| e.to_string())?;
    let model_file = matches
        .get_one::<String>("model")
        .cloned()
        .ok_or("model is required")?;
    let test_file = matches
        .get_one::<String>("test")
        .cloned()
        .ok_or("test is required")?;
    let output_file = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_default();
    let algorithm = matches
        .get_one::<Algorithm>("algorithm")
        .copied()
        .unwrap_or(Algorithm::Forward);

    let mut sampling = SamplingConfig::default();
    if let Some(samples) = matches.get_one::<String>("samples") {
        sampling.samples = samples
            .parse()
            .map_err(|_| "samples needs to be a positive integer".to_string())?;
    }
    if let Some(threads) = matches.get_one::<String>("threads") {
        sampling.parallelism = threads
            .parse()
            .map_err(|_| "threads needs to be a positive integer".to_string())?;
    }
    sampling.seed = matches
        .get_one::<String>("seed")
        .map(|v| v.parse())
        .transpose()
        .map_err(|_| "seed needs to be an unsigned integer".to_string())?;

    Ok(CommandLineOptions {
        model_file,
        test_file,
        output_file,
        algorithm,
        sampling,
    })
}

/// Initialise logging and parse the process arguments.
pub fn parse_configuration_options() -> Result<CommandLineOptions, String> {
    init_logging();
    options_from_args(std::env::args_os())
}
