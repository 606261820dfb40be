use super::assignment::Assignment;
use super::generator::{cumulative, discrete_index};
use super::{validate_features, validate_row};
use crate::network::common::errors::{InferenceError, Result};
use crate::network::common::interface::RandomVariable;
use log::trace;
use std::collections::HashMap;

/// Stride layout fixed when the condition alphabets are bound.
#[derive(Debug, Clone)]
struct BoundLayout {
    /// Per condition: feature label to index
    alphabets: Vec<HashMap<String, usize>>,
    /// Per condition: flat offset contributed by one step of that condition
    strides: Vec<usize>,
    /// Running sums of each row, same flat layout as the table
    cumulative: Vec<f64>,
}

/// Conditional probability table.
///
/// The flat table is row-major over the conditions in declared order, with the
/// variable's own feature varying fastest. For conditions `c_1..c_k` with sizes
/// `n_1..n_k` and `m` own features, the probability of own index `j` given
/// condition indices `i_1..i_k` sits at `sum(i_t * stride_t) + j` where
/// `stride_k = m` and `stride_t = stride_{t+1} * n_{t+1}`.
#[derive(Debug, Clone)]
pub struct ConditionalProbability {
    name: String,
    features: Vec<String>,
    conditions: Vec<String>,
    table: Vec<f64>,
    layout: Option<BoundLayout>,
}

impl ConditionalProbability {
    /// Declare a table. It cannot be sampled until [`bind_conditions`](Self::bind_conditions) runs.
    pub fn new(
        name: impl Into<String>,
        features: Vec<String>,
        conditions: Vec<String>,
        table: Vec<f64>,
    ) -> Result<Self> {
        let name = name.into();
        validate_features(&name, &features)?;
        if conditions.is_empty() {
            return Err(InferenceError::configuration(format!(
                "{}: conditional table declared without conditions",
                name
            )));
        }
        for (idx, condition) in conditions.iter().enumerate() {
            if condition == &name || conditions[..idx].contains(condition) {
                return Err(InferenceError::configuration(format!(
                    "{}: invalid or repeated condition {}",
                    name, condition
                )));
            }
        }
        if table.len() % features.len() != 0 {
            return Err(InferenceError::configuration(format!(
                "{}: table of {} entries is not a whole number of rows of {}",
                name,
                table.len(),
                features.len()
            )));
        }
        Ok(ConditionalProbability {
            name,
            features,
            conditions,
            table,
            layout: None,
        })
    }

    /// Fix the stride layout from the alphabets of the conditions, given in the
    /// same order the conditions were declared. Validates table size and every
    /// row sum.
    pub fn bind_conditions(&mut self, alphabets: &[Vec<String>]) -> Result<()> {
        trace!("bind_conditions - Start: {}", self.name);
        if alphabets.len() != self.conditions.len() {
            return Err(InferenceError::configuration(format!(
                "{}: {} alphabets for {} conditions",
                self.name,
                alphabets.len(),
                self.conditions.len()
            )));
        }

        let own = self.features.len();
        let mut strides = vec![0; alphabets.len()];
        let mut stride = own;
        for (idx, alphabet) in alphabets.iter().enumerate().rev() {
            if alphabet.is_empty() {
                return Err(InferenceError::configuration(format!(
                    "{}: condition {} has an empty alphabet",
                    self.name, self.conditions[idx]
                )));
            }
            strides[idx] = stride;
            stride *= alphabet.len();
        }
        if stride != self.table.len() {
            return Err(InferenceError::configuration(format!(
                "{}: table has {} entries, layout needs {}",
                self.name,
                self.table.len(),
                stride
            )));
        }

        let mut cumulative_table = Vec::with_capacity(self.table.len());
        for row in self.table.chunks(own) {
            validate_row(&self.name, row)?;
            cumulative_table.extend(cumulative(row));
        }

        let alphabets: Vec<HashMap<String, usize>> = alphabets
            .iter()
            .map(|alphabet| {
                alphabet
                    .iter()
                    .enumerate()
                    .map(|(i, label)| (label.clone(), i))
                    .collect()
            })
            .collect();

        self.layout = Some(BoundLayout {
            alphabets,
            strides,
            cumulative: cumulative_table,
        });
        trace!("bind_conditions - End");
        Ok(())
    }

    /// Same as [`bind_conditions`](Self::bind_conditions), looking each condition's
    /// alphabet up by name.
    pub fn bind_conditions_by_name(&mut self, alphabets: &HashMap<String, Vec<String>>) -> Result<()> {
        let ordered = self
            .conditions
            .iter()
            .map(|condition| {
                alphabets.get(condition).cloned().ok_or_else(|| {
                    InferenceError::configuration(format!(
                        "{}: no alphabet for condition {}",
                        self.name, condition
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.bind_conditions(&ordered)
    }

    /// Flat offset of the row selected by the condition values in `assignment`
    fn row_offset(&self, assignment: &Assignment) -> Result<(usize, &BoundLayout)> {
        let layout = self.layout.as_ref().ok_or_else(|| {
            InferenceError::configuration(format!("{}: condition alphabets are not bound", self.name))
        })?;
        let mut offset = 0;
        for (t, condition) in self.conditions.iter().enumerate() {
            let value = assignment
                .get(condition)
                .ok_or_else(|| InferenceError::MissingAncestor {
                    variable: self.name.clone(),
                    condition: condition.clone(),
                })?;
            let idx = layout.alphabets[t]
                .get(value)
                .ok_or_else(|| InferenceError::UnknownFeature {
                    variable: condition.clone(),
                    feature: value.to_string(),
                })?;
            offset += idx * layout.strides[t];
        }
        Ok((offset, layout))
    }
}

impl RandomVariable for ConditionalProbability {
    fn name(&self) -> &str {
        &self.name
    }

    fn features(&self) -> &[String] {
        &self.features
    }

    fn conditions(&self) -> &[String] {
        &self.conditions
    }

    fn is_bound(&self) -> bool {
        self.layout.is_some()
    }

    fn binds_alphabet(&self, condition: &str, features: &[String]) -> bool {
        let Some(t) = self.conditions.iter().position(|c| c == condition) else {
            return true;
        };
        match &self.layout {
            Some(layout) => {
                let alphabet = &layout.alphabets[t];
                alphabet.len() == features.len() && features.iter().all(|f| alphabet.contains_key(f))
            }
            None => false,
        }
    }

    fn sample(&self, partial: &Assignment, draw: f64) -> Result<&str> {
        let (offset, layout) = self.row_offset(partial)?;
        let row = &layout.cumulative[offset..offset + self.features.len()];
        let idx = discrete_index(row, draw)?;
        Ok(&self.features[idx])
    }

    fn probability_of(&self, assignment: &Assignment, value: &str) -> Result<f64> {
        let own = self
            .feature_index(value)
            .ok_or_else(|| InferenceError::UnknownFeature {
                variable: self.name.clone(),
                feature: value.to_string(),
            })?;
        let (offset, _) = self.row_offset(assignment)?;
        Ok(self.table[offset + own])
    }
}
