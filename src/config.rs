
use simple_error::bail;

/// Default significance cutoff shared by all of the hypothesis tests
pub const DEFAULT_P_CUTOFF: f64 = 1e-3;
/// Default per-base sequencing error rate for the parental depth threshold model
pub const DEFAULT_ERROR_RATE: f64 = 0.002;

/// The two tunable constants of a filtering run.
/// These are deliberately explicit parameters rather than process-wide state,
/// so callers and tests can override them per run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterConfig {
    /// p-value below which a test outcome counts as a failure
    pub p_cutoff: f64,
    /// assumed per-base probability of a sequencing error
    pub error_rate: f64
}

impl FilterConfig {
    pub fn new(p_cutoff: f64, error_rate: f64) -> FilterConfig {
        FilterConfig { p_cutoff, error_rate }
    }

    /// Checks that both constants are usable probabilities.
    /// # Errors
    /// * if `p_cutoff` is not in the open interval (0, 1)
    /// * if `error_rate` is not in the open interval (0, 1)
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !(self.p_cutoff > 0.0 && self.p_cutoff < 1.0) {
            bail!("p_cutoff must be within (0, 1): {}", self.p_cutoff);
        }
        if !(self.error_rate > 0.0 && self.error_rate < 1.0) {
            bail!("error_rate must be within (0, 1): {}", self.error_rate);
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> FilterConfig {
        FilterConfig {
            p_cutoff: DEFAULT_P_CUTOFF,
            error_rate: DEFAULT_ERROR_RATE
        }
    }
}
