use super::assignment::Assignment;
use super::conditional::ConditionalProbability;
use super::distribution::DiscreteDistribution;
use crate::network::common::errors::Result;
use crate::network::common::interface::RandomVariable;
use std::collections::HashMap;

/// A random variable registered in a network.
#[derive(Debug, Clone)]
pub enum Node {
    Unconditional(DiscreteDistribution),
    Conditional(ConditionalProbability),
}

impl Node {
    fn variable(&self) -> &dyn RandomVariable {
        match self {
            Node::Unconditional(d) => d,
            Node::Conditional(c) => c,
        }
    }

    /// Bind condition alphabets on a conditional node. No-op for unconditional ones.
    pub fn bind_conditions(&mut self, alphabets: &HashMap<String, Vec<String>>) -> Result<()> {
        match self {
            Node::Unconditional(_) => Ok(()),
            Node::Conditional(c) => c.bind_conditions_by_name(alphabets),
        }
    }
}

impl From<DiscreteDistribution> for Node {
    fn from(d: DiscreteDistribution) -> Self {
        Node::Unconditional(d)
    }
}

impl From<ConditionalProbability> for Node {
    fn from(c: ConditionalProbability) -> Self {
        Node::Conditional(c)
    }
}

impl RandomVariable for Node {
    fn name(&self) -> &str {
        self.variable().name()
    }

    fn features(&self) -> &[String] {
        self.variable().features()
    }

    fn conditions(&self) -> &[String] {
        self.variable().conditions()
    }

    fn is_bound(&self) -> bool {
        self.variable().is_bound()
    }

    fn binds_alphabet(&self, condition: &str, features: &[String]) -> bool {
        self.variable().binds_alphabet(condition, features)
    }

    fn sample(&self, partial: &Assignment, draw: f64) -> Result<&str> {
        self.variable().sample(partial, draw)
    }

    fn probability_of(&self, assignment: &Assignment, value: &str) -> Result<f64> {
        self.variable().probability_of(assignment, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_node_delegates() {
        let i: Node = DiscreteDistribution::new("I", labels(&["Low", "High"]), vec![0.7, 0.3])
            .unwrap()
            .into();
        let mut s: Node = ConditionalProbability::new(
            "S",
            labels(&["Low", "High"]),
            labels(&["I"]),
            vec![0.95, 0.05, 0.2, 0.8],
        )
        .unwrap()
        .into();

        assert!(!i.is_conditional());
        assert!(s.is_conditional());
        assert!(!s.is_bound());

        let mut alphabets = HashMap::new();
        alphabets.insert("I".to_string(), i.features().to_vec());
        s.bind_conditions(&alphabets).unwrap();
        assert!(s.is_bound());

        let ctx: Assignment = [("I", "High")].into_iter().collect();
        assert_eq!(s.name(), "S");
        assert_eq!(s.conditions(), &["I"]);
        assert_eq!(s.probability_of(&ctx, "High").unwrap(), 0.8);
        assert_eq!(s.sample(&ctx, 0.1).unwrap(), "Low");
        assert_eq!(i.sample(&ctx, 0.8).unwrap(), "High");
    }
}
