//! The five-variable student network (Koller & Friedman, Figure 3.4).
//!
//! Difficulty and Intelligence are roots; Grade depends on both, SAT on
//! Intelligence and Letter on Grade.

use crate::network::common::errors::Result;
use crate::network::common::setup::SamplingConfig;
use crate::network::inference::bayesian_network::BayesianNetwork;
use crate::network::inference::query::Query;
use crate::network::model::definition::VariableDefinition;

pub fn student_definitions() -> Vec<VariableDefinition> {
    let mut grade = VariableDefinition::conditional(
        "Grade",
        &["A", "B", "C"],
        &["Intelligence", "Difficulty"],
        &[
            0.3, 0.4, 0.3, // Low, Easy
            0.05, 0.25, 0.7, // Low, Hard
            0.9, 0.08, 0.02, // High, Easy
            0.5, 0.3, 0.2, // High, Hard
        ],
    );
    grade.shape = Some(vec![2, 2, 3]);

    vec![
        VariableDefinition::unconditional("Difficulty", &["Easy", "Hard"], &[0.6, 0.4]),
        VariableDefinition::unconditional("Intelligence", &["Low", "High"], &[0.7, 0.3]),
        grade,
        VariableDefinition::conditional(
            "SAT",
            &["Low", "High"],
            &["Intelligence"],
            &[0.95, 0.05, 0.2, 0.8],
        ),
        VariableDefinition::conditional(
            "Letter",
            &["Weak", "Strong"],
            &["Grade"],
            &[0.1, 0.9, 0.4, 0.6, 0.99, 0.01],
        ),
    ]
}

pub fn student_network(config: SamplingConfig) -> Result<BayesianNetwork> {
    BayesianNetwork::from_definitions(&student_definitions(), config)
}

/// The queries the demo binary answers
pub fn student_queries() -> Vec<Query> {
    vec![
        Query::from_pairs(&[("Grade", "A")], &[]),
        Query::from_pairs(&[("Grade", "B")], &[]),
        Query::from_pairs(&[("Grade", "C")], &[]),
        Query::from_pairs(&[("Letter", "Strong")], &[("Intelligence", "Low"), ("Difficulty", "Hard")]),
        Query::from_pairs(&[("Letter", "Weak")], &[("Intelligence", "Low"), ("Difficulty", "Hard")]),
        Query::from_pairs(&[("Difficulty", "Easy")], &[("Letter", "Strong")]),
        Query::from_pairs(&[("Difficulty", "Easy")], &[("Letter", "Weak")]),
    ]
}
