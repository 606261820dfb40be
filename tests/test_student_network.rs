#[cfg(test)]
mod test_student_network {
    use bayesample::network::scenarios::student::{student_definitions, student_network, student_queries};
    use bayesample::network::{
        Estimator, InferenceError, NetworkPhase, Query, RandomVariable, SamplingConfig,
    };

    fn config(seed: u64) -> SamplingConfig {
        SamplingConfig {
            samples: 200_000,
            parallelism: 4,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_rows_sum_to_one() {
        for definition in student_definitions() {
            let own = definition.features.len();
            assert_eq!(definition.probabilities.len() % own, 0);
            for row in definition.probabilities.chunks(own) {
                let sum: f64 = row.iter().sum();
                assert!((sum - 1.0).abs() < 1e-6, "{} row {:?}", definition.name, row);
            }
        }
    }

    #[test]
    fn test_grade_marginal() {
        let mut network = student_network(config(2024)).unwrap();
        let p = network
            .forward_query(&Query::from_pairs(&[("Grade", "A")], &[]))
            .unwrap();
        assert!((p - 0.362).abs() < 0.01, "P(Grade=A) = {}", p);
        assert_eq!(network.phase(), NetworkPhase::Sampled);
        assert_eq!(network.samples().unwrap().len(), 200_000);
    }

    #[test]
    fn test_letter_given_low_intelligence_hard_course() {
        // P(Grade | Low, Hard) = 0.05, 0.25, 0.7; P(Strong | Grade) = 0.9, 0.6, 0.01
        let exact = 0.05 * 0.9 + 0.25 * 0.6 + 0.7 * 0.01;
        let mut network = student_network(config(7)).unwrap();
        let query = Query::from_pairs(
            &[("Letter", "Strong")],
            &[("Intelligence", "Low"), ("Difficulty", "Hard")],
        );
        let p = network.forward_query(&query).unwrap();
        assert!((p - exact).abs() < 0.02, "forward estimate {} vs {}", p, exact);
    }

    #[test]
    fn test_likelihood_weighting_of_ancestor() {
        // P(Difficulty=Easy | Letter=Strong) by enumeration
        let p_grade_easy = [0.7 * 0.3 + 0.3 * 0.9, 0.7 * 0.4 + 0.3 * 0.08, 0.7 * 0.3 + 0.3 * 0.02];
        let p_grade_hard = [0.7 * 0.05 + 0.3 * 0.5, 0.7 * 0.25 + 0.3 * 0.3, 0.7 * 0.7 + 0.3 * 0.2];
        let strong = [0.9, 0.6, 0.01];
        let easy_strong: f64 = 0.6 * (0..3).map(|g| p_grade_easy[g] * strong[g]).sum::<f64>();
        let hard_strong: f64 = 0.4 * (0..3).map(|g| p_grade_hard[g] * strong[g]).sum::<f64>();
        let exact = easy_strong / (easy_strong + hard_strong);

        let mut network = student_network(config(99)).unwrap();
        let query = Query::from_pairs(&[("Difficulty", "Easy")], &[("Letter", "Strong")]);
        let weighted = network.likelihood_query(&query).unwrap();
        assert!((weighted - exact).abs() < 0.02, "likelihood estimate {} vs {}", weighted, exact);

        let counted = network.forward_query(&query).unwrap();
        assert!((counted - exact).abs() < 0.02, "forward estimate {} vs {}", counted, exact);
    }

    #[test]
    fn test_estimators_agree_without_evidence() {
        let mut network = student_network(config(3)).unwrap();
        for query in student_queries().into_iter().filter(|q| q.evidence.is_none()) {
            let counted = network.query(Estimator::Forward, &query).unwrap();
            let weighted = network.query(Estimator::Likelihood, &query).unwrap();
            assert_eq!(counted, weighted);
        }
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut network = student_network(config(1)).unwrap();
        let query = Query::from_pairs(&[("Grade", "A")], &[("Grade", "B")]);
        for estimator in [Estimator::Forward, Estimator::Likelihood] {
            assert!(matches!(
                network.query(estimator, &query),
                Err(InferenceError::Query(_))
            ));
        }
    }

    #[test]
    fn test_conditions_sampled_before_dependents() {
        let mut network = student_network(SamplingConfig {
            samples: 1_000,
            parallelism: 2,
            seed: Some(5),
        })
        .unwrap();
        let order = network.topological_order().unwrap();
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();
        for name in order.iter() {
            let node = network.variable(name).unwrap();
            for condition in node.conditions() {
                assert!(position(condition.as_str()) < position(name.as_str()));
            }
        }

        network.generate_samples(1_000, 2).unwrap();
        for sample in network.samples().unwrap().iter() {
            assert_eq!(sample.len(), 5);
            for name in order.iter() {
                let value = sample.get(name).unwrap();
                assert!(network.variable(name).unwrap().feature_index(value).is_some());
            }
        }
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_errors() {
        let mut network = student_network(SamplingConfig {
            samples: 20_000,
            parallelism: 2,
            seed: Some(11),
        })
        .unwrap();
        let mut queries = student_queries();
        queries.insert(1, Query::from_pairs(&[("Grade", "A")], &[("Grade", "A")]));
        let results = network.batch_query(Estimator::Forward, &queries).unwrap();

        assert_eq!(results.len(), queries.len());
        assert!(results[1].is_err());
        let total: f64 = [0, 2, 3].iter().map(|&i| *results[i].as_ref().unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-9, "grade marginals sum to {}", total);
    }
}
