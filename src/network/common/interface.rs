use super::errors::Result;
use crate::network::model::assignment::Assignment;

/// Contract every random variable in a network satisfies.
/// Implements Send + Sync so a registry snapshot can be shared with sampling workers.
pub trait RandomVariable: Send + Sync {
    /// Unique identity of the variable
    fn name(&self) -> &str;

    /// Ordered feature labels (the variable's alphabet)
    fn features(&self) -> &[String];

    /// Ordered names of the condition variables, empty when unconditional
    fn conditions(&self) -> &[String];

    fn is_conditional(&self) -> bool {
        !self.conditions().is_empty()
    }

    /// Whether the variable is ready for sampling. Conditional tables need their
    /// condition alphabets bound first.
    fn is_bound(&self) -> bool {
        true
    }

    /// Whether the alphabet bound for `condition` covers exactly `features`.
    /// True when `condition` is not one of this variable's conditions.
    fn binds_alphabet(&self, _condition: &str, _features: &[String]) -> bool {
        true
    }

    fn feature_index(&self, value: &str) -> Option<usize> {
        self.features().iter().position(|f| f == value)
    }

    /// Draw a feature given the values already chosen for the ancestors.
    ///
    /// `draw` is a uniform value in `[0, 1)`.
    fn sample(&self, partial: &Assignment, draw: f64) -> Result<&str>;

    /// Probability of `value` under the conditioning context found in `assignment`.
    fn probability_of(&self, assignment: &Assignment, value: &str) -> Result<f64>;
}
