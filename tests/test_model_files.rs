#[cfg(test)]
mod test_model_files {
    use bayesample::network::common::loader::{load_model, load_queries, write_results};
    use bayesample::network::common::setup::{options_from_args, Algorithm};
    use bayesample::network::{BayesianNetwork, Estimator, InferenceError, SamplingConfig};
    use std::fs;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const MODEL: &str = r#"{
        "variables": [
            {"name": "D", "features": ["Easy", "Hard"], "probabilities": [0.6, 0.4], "shape": [1, 2]},
            {"name": "I", "features": ["Low", "High"], "probabilities": [0.7, 0.3], "shape": [1, 2]},
            {"name": "G", "features": ["A", "B", "C"], "conditions": ["I", "D"],
             "probabilities": [0.3, 0.4, 0.3, 0.05, 0.25, 0.7, 0.9, 0.08, 0.02, 0.5, 0.3, 0.2],
             "shape": [2, 2, 3]},
            {"name": "S", "features": ["Low", "High"], "conditions": ["I"],
             "probabilities": [0.95, 0.05, 0.2, 0.8], "shape": [2, 2]},
            {"name": "L", "features": ["Weak", "Strong"], "conditions": ["G"],
             "probabilities": [0.1, 0.9, 0.4, 0.6, 0.99, 0.01], "shape": [3, 2]}
        ]
    }"#;

    const QUERIES: &str = r#"{
        "queries": [
            {"target": {"G": "A"}},
            {"target": {"L": "Strong"}, "evidence": {"I": "Low", "D": "Hard"}},
            {"target": {"D": "Easy"}, "evidence": {"D": "Hard"}},
            {"target": {"S": "Perfect"}},
            {"target": {"D": "Easy"}, "evidence": {"L": "Strong"}}
        ]
    }"#;

    fn temp_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn config() -> SamplingConfig {
        SamplingConfig {
            samples: 50_000,
            parallelism: 4,
            seed: Some(31),
        }
    }

    #[test]
    fn test_end_to_end_pipeline() {
        let model = temp_with(MODEL);
        let queries = temp_with(QUERIES);
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.txt");

        let definitions = load_model(model.path()).unwrap();
        let queries = load_queries(queries.path()).unwrap();
        let mut network = BayesianNetwork::from_definitions(&definitions, config()).unwrap();

        let results = network.batch_query(Estimator::Likelihood, &queries).unwrap();
        write_results(&output, &results).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 5);

        let grade_a: f64 = lines[0].parse().unwrap();
        assert!((grade_a - 0.362).abs() < 0.02);
        assert!(lines[1].parse::<f64>().is_ok());
        assert!(lines[2].starts_with("error: query error"));
        assert!(lines[3].starts_with("error: unknown feature"));
        assert!(lines[4].parse::<f64>().is_ok());
    }

    #[test]
    fn test_same_seed_same_output() {
        let definitions = load_model(temp_with(MODEL).path()).unwrap();
        let queries = load_queries(temp_with(QUERIES).path()).unwrap();

        let run = || {
            let mut network = BayesianNetwork::from_definitions(&definitions, config()).unwrap();
            network
                .batch_query(Estimator::Forward, &queries)
                .unwrap()
                .into_iter()
                .map(|r| r.ok())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_bad_shape_is_configuration_error() {
        let mut definitions = load_model(temp_with(MODEL).path()).unwrap();
        definitions[2].shape = Some(vec![2, 3, 2]);
        assert!(matches!(
            BayesianNetwork::from_definitions(&definitions, config()),
            Err(InferenceError::Configuration(_))
        ));
    }

    #[test]
    fn test_bad_row_fails_before_sampling() {
        let mut definitions = load_model(temp_with(MODEL).path()).unwrap();
        definitions[4].probabilities[0] = 0.2;
        assert!(matches!(
            BayesianNetwork::from_definitions(&definitions, config()),
            Err(InferenceError::Configuration(_))
        ));
    }

    #[test]
    fn test_cyclic_model_fails_at_generation() {
        let mut definitions = load_model(temp_with(MODEL).path()).unwrap();
        // D now depends on L, closing D -> G -> L -> D
        definitions[0].conditions = vec!["L".to_string()];
        definitions[0].probabilities = vec![0.6, 0.4, 0.5, 0.5];
        definitions[0].shape = None;

        let mut network = BayesianNetwork::from_definitions(&definitions, config()).unwrap();
        assert!(matches!(
            network.generate_samples(10, 1),
            Err(InferenceError::Structural(_))
        ));
    }

    #[test]
    fn test_gibbs_rejected_at_the_boundary() {
        let options = options_from_args(["bayesample", "-m", "m.json", "-t", "q.json", "-a", "gibbs"]).unwrap();
        assert_eq!(options.algorithm, Algorithm::Gibbs);
        assert!(matches!(
            Estimator::try_from(options.algorithm),
            Err(InferenceError::UnsupportedAlgorithm(_))
        ));
    }
}
