//! Precision configuration.

/// Precision and retry limits carried by every algebraic number.
///
/// Results of operations inherit the configuration of their left operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AlgebraicConfig {
    /// Precision of fresh enclosures, in bits.
    pub working_precision: u32,
    /// Precision ceiling for escalating retries, in bits.
    pub max_precision: u32,
    /// Bound on the number of escalation rounds.
    pub max_iterations: u32,
    /// Numeric budget for projection comparisons before the exact
    /// fallback, in bits.
    pub exact_comparison_bits: u32,
}

impl Default for AlgebraicConfig {
    fn default() -> Self {
        Self {
            working_precision: 64,
            max_precision: 8192,
            max_iterations: 24,
            exact_comparison_bits: 96,
        }
    }
}

impl AlgebraicConfig {
    /// Sets the working precision.
    #[must_use]
    pub fn with_working_precision(mut self, bits: u32) -> Self {
        self.working_precision = bits.max(8);
        self
    }

    /// Sets the precision ceiling.
    #[must_use]
    pub fn with_max_precision(mut self, bits: u32) -> Self {
        self.max_precision = bits;
        self
    }

    /// Sets the bound on escalation rounds.
    #[must_use]
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    /// Sets the numeric budget of projection comparisons.
    #[must_use]
    pub fn with_exact_comparison_bits(mut self, bits: u32) -> Self {
        self.exact_comparison_bits = bits;
        self
    }

    /// Doubling precisions from `start`, capped by `max_precision` and
    /// `max_iterations`. The first value is always produced.
    pub(crate) fn precisions_from(&self, start: u32) -> impl Iterator<Item = u32> {
        let first = start.max(8);
        ladder(first, self.max_precision.max(first)).take(self.max_iterations as usize)
    }

    /// Doubling precisions starting at the working precision.
    pub(crate) fn precisions(&self) -> impl Iterator<Item = u32> {
        self.precisions_from(self.working_precision)
    }

    /// Doubling precisions from the working precision that end exactly at
    /// `end` (or at the working precision if `end` is below it).
    pub(crate) fn precisions_up_to(&self, end: u32) -> impl Iterator<Item = u32> {
        let first = self.working_precision.max(8);
        ladder(first, end.max(first))
    }
}

fn ladder(first: u32, ceiling: u32) -> impl Iterator<Item = u32> {
    std::iter::successors(Some(first), move |&p| {
        (p < ceiling).then(|| p.saturating_mul(2).min(ceiling))
    })
}

/// Budgets for [`guess`](crate::guess::guess).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GuessOptions {
    /// Largest degree of the minimal polynomial to try.
    pub max_degree: usize,
    /// Largest coefficient bit length; `None` derives it from the
    /// enclosure.
    pub max_bits: Option<u32>,
    /// Configuration given to the recovered number and used while
    /// certifying candidates.
    pub config: AlgebraicConfig,
}

impl Default for GuessOptions {
    fn default() -> Self {
        Self {
            max_degree: 4,
            max_bits: None,
            config: AlgebraicConfig::default(),
        }
    }
}

impl GuessOptions {
    /// Options with the given degree bound and a derived bit budget.
    #[must_use]
    pub fn with_max_degree(max_degree: usize) -> Self {
        Self {
            max_degree,
            ..Self::default()
        }
    }

    /// Sets the coefficient bit budget.
    #[must_use]
    pub fn max_bits(mut self, bits: u32) -> Self {
        self.max_bits = Some(bits);
        self
    }

    /// Sets the configuration of the recovered number.
    #[must_use]
    pub fn config(mut self, config: AlgebraicConfig) -> Self {
        self.config = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AlgebraicConfig::default();
        assert_eq!(c.working_precision, 64);
        assert_eq!(c.max_precision, 8192);
        assert_eq!(c.max_iterations, 24);
        assert_eq!(c.exact_comparison_bits, 96);
    }

    #[test]
    fn test_precision_ladder() {
        let c = AlgebraicConfig::default();
        let ladder: Vec<u32> = c.precisions().collect();
        assert_eq!(ladder, vec![64, 128, 256, 512, 1024, 2048, 4096, 8192]);

        let short = c.with_max_iterations(3);
        assert_eq!(short.precisions().collect::<Vec<_>>(), vec![64, 128, 256]);

        let capped = c.with_max_precision(100);
        assert_eq!(capped.precisions().collect::<Vec<_>>(), vec![64, 100]);

        assert_eq!(c.precisions_up_to(96).collect::<Vec<_>>(), vec![64, 96]);
        assert_eq!(c.precisions_up_to(32).collect::<Vec<_>>(), vec![64]);
    }

    #[test]
    fn test_builders_clamp() {
        let c = AlgebraicConfig::default()
            .with_working_precision(2)
            .with_max_iterations(0)
            .with_exact_comparison_bits(0);
        assert_eq!(c.working_precision, 8);
        assert_eq!(c.max_iterations, 1);
        assert_eq!(c.exact_comparison_bits, 0);
        assert_eq!(c.precisions().collect::<Vec<_>>(), vec![8]);
    }

    #[test]
    fn test_guess_options() {
        let config = AlgebraicConfig::default().with_working_precision(128);
        let options = GuessOptions::with_max_degree(6).max_bits(20).config(config);
        assert_eq!(options.max_degree, 6);
        assert_eq!(options.max_bits, Some(20));
        assert_eq!(options.config, config);
        assert_eq!(GuessOptions::default().config, AlgebraicConfig::default());
    }
}
