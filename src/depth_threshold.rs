
use statrs::distribution::{Binomial, DiscreteCDF};

use crate::config::FilterConfig;

/// Models spurious alternate reads in a parent as a binomial process over the
/// parent's read depth, and derives how many alternate reads sequencing error
/// alone can plausibly account for.
#[derive(Clone, Copy, Debug)]
pub struct DepthThresholdModel {
    /// assumed per-base probability of a sequencing error
    error_rate: f64,
    /// significance cutoff on the binomial upper tail
    p_cutoff: f64
}

impl DepthThresholdModel {
    /// Creates a model from a validated config; `FilterConfig::validate` must
    /// have passed so the error rate is a usable probability.
    pub fn new(config: &FilterConfig) -> DepthThresholdModel {
        DepthThresholdModel {
            error_rate: config.error_rate,
            p_cutoff: config.p_cutoff
        }
    }

    /// Finds the smallest alternate read count `k` whose upper-tail probability
    /// `P(X >= k)` under Binomial(depth, error_rate) falls below the cutoff,
    /// capped at the depth itself. Counts at or above the returned value are
    /// statistically inconsistent with pure sequencing error.
    ///
    /// Zero depth tolerates zero errors, so the threshold is 0 there.
    pub fn threshold_for_depth(&self, depth: u64) -> u64 {
        if depth == 0 {
            return 0;
        }

        // error_rate was validated into (0, 1), so construction cannot fail
        let binom = Binomial::new(self.error_rate, depth).unwrap();
        for k in 1..=depth {
            // P(X >= k) = 1 - P(X <= k - 1)
            let upper_tail = 1.0 - binom.cdf(k - 1);
            if upper_tail < self.p_cutoff {
                return k;
            }
        }

        // even observing every read as an error is compatible with noise
        depth
    }

    /// Effective threshold for a pair of parental depths, evaluated at the
    /// lower of the two. The threshold is non-decreasing in depth, so this is
    /// the stricter of the two per-parent thresholds.
    pub fn parental_threshold(&self, father_depth: u64, mother_depth: u64) -> u64 {
        self.threshold_for_depth(father_depth.min(mother_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_model(p_cutoff: f64, error_rate: f64) -> DepthThresholdModel {
        DepthThresholdModel::new(&FilterConfig::new(p_cutoff, error_rate))
    }

    #[test]
    fn test_zero_depth() {
        let model = build_model(1e-3, 0.002);
        assert_eq!(model.threshold_for_depth(0), 0);

        let model = build_model(0.05, 0.5);
        assert_eq!(model.threshold_for_depth(0), 0);
    }

    #[test]
    fn test_known_threshold() {
        // at depth 50 with a 0.2% error rate, P(X >= 2) ~= 4.6e-3 and
        // P(X >= 3) ~= 1.5e-4, so three alt reads is the first significant count
        let model = build_model(1e-3, 0.002);
        assert_eq!(model.threshold_for_depth(50), 3);
    }

    #[test]
    fn test_threshold_capped_at_depth() {
        // with a coin-flip error rate nothing is ever significant at depth 1
        let model = build_model(1e-3, 0.5);
        assert_eq!(model.threshold_for_depth(1), 1);
    }

    #[test]
    fn test_bounds() {
        for &error_rate in &[0.001, 0.002, 0.01, 0.1] {
            let model = build_model(1e-3, error_rate);
            for depth in 0..=60 {
                let threshold = model.threshold_for_depth(depth);
                assert!(threshold <= depth, "threshold {} above depth {}", threshold, depth);
            }
        }
    }

    #[test]
    fn test_monotonic_in_depth() {
        let model = build_model(1e-3, 0.002);
        let mut previous = 0;
        for depth in 0..=500 {
            let threshold = model.threshold_for_depth(depth);
            assert!(threshold >= previous, "threshold decreased at depth {}", depth);
            previous = threshold;
        }
    }

    #[test]
    fn test_monotonic_in_error_rate() {
        let mut previous = 0;
        for &error_rate in &[0.0001, 0.001, 0.002, 0.01, 0.05] {
            let threshold = build_model(1e-3, error_rate).threshold_for_depth(100);
            assert!(threshold >= previous, "threshold decreased at error rate {}", error_rate);
            previous = threshold;
        }
    }

    #[test]
    fn test_parental_pair_uses_lower_depth() {
        let model = build_model(1e-3, 0.002);
        assert_eq!(model.parental_threshold(50, 500), model.threshold_for_depth(50));
        assert_eq!(model.parental_threshold(500, 50), model.threshold_for_depth(50));
        assert_eq!(model.parental_threshold(0, 80), 0);
    }
}
