use crate::network::model::assignment::Assignment;

/// Generated corpus of full joint assignments.
///
/// Order across samples carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: Vec<Assignment>,
}

impl SampleStore {
    pub fn new(samples: Vec<Assignment>) -> Self {
        SampleStore { samples }
    }

    /// Concatenate worker batches
    pub fn from_batches(batches: Vec<Vec<Assignment>>) -> Self {
        let total = batches.iter().map(Vec::len).sum();
        let mut samples = Vec::with_capacity(total);
        for batch in batches {
            samples.extend(batch);
        }
        SampleStore { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.samples.iter()
    }

    /// Samples consistent with every pair of `filter`
    pub fn matching<'a>(&'a self, filter: &'a Assignment) -> impl Iterator<Item = &'a Assignment> {
        self.samples.iter().filter(move |sample| sample.matches(filter))
    }

    pub fn count_matching(&self, filter: &Assignment) -> usize {
        self.matching(filter).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SampleStore {
        let rows = [
            [("D", "Easy"), ("I", "Low")],
            [("D", "Hard"), ("I", "Low")],
            [("D", "Hard"), ("I", "High")],
        ];
        SampleStore::new(rows.iter().map(|r| r.iter().copied().collect()).collect())
    }

    #[test]
    fn test_count_matching() {
        let store = store();
        let hard: Assignment = [("D", "Hard")].into_iter().collect();
        let hard_low: Assignment = [("D", "Hard"), ("I", "Low")].into_iter().collect();
        assert_eq!(store.count_matching(&hard), 2);
        assert_eq!(store.count_matching(&hard_low), 1);
        assert_eq!(store.count_matching(&Assignment::new()), 3);
    }

    #[test]
    fn test_from_batches() {
        let a: Assignment = [("D", "Easy")].into_iter().collect();
        let b: Assignment = [("D", "Hard")].into_iter().collect();
        let store = SampleStore::from_batches(vec![vec![a.clone(), b.clone()], vec![], vec![a]]);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
        assert_eq!(store.iter().filter(|s| s.matches(&b)).count(), 1);
    }
}
