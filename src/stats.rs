/// Running mean and sample variance (Welford's update).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observation(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` until at least one observation was added.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased (n - 1) variance. `None` with fewer than two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    pub fn std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let stats = RunStats::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.sample_variance(), None);
    }

    #[test]
    fn test_single_observation() {
        let mut stats = RunStats::new();
        stats.add_observation(4.0);
        assert_eq!(stats.mean(), Some(4.0));
        assert_eq!(stats.sample_variance(), None);
    }

    #[test]
    fn test_mean_and_variance() {
        let mut stats = RunStats::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.add_observation(v);
        }
        assert_eq!(stats.count(), 8);
        assert!((stats.mean().unwrap() - 5.0).abs() < 1e-12);
        // Sum of squared deviations is 32.
        assert!((stats.sample_variance().unwrap() - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev().unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }
}
