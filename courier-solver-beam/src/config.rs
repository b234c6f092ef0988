//! Tuning knobs for [`BeamSearchOptimizer`](crate::BeamSearchOptimizer).

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

/// Configuration for [`BeamSearchOptimizer`](crate::BeamSearchOptimizer).
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use courier_solver_beam::BeamSearchConfig;
///
/// let config = BeamSearchConfig::default().with_widening(false);
/// assert_eq!(config.beam_width, BeamSearchConfig::DEFAULT_BEAM_WIDTH);
/// assert!(!config.widening);
///
/// let wide = BeamSearchConfig::with_beam_width(NonZeroUsize::MIN.saturating_add(7));
/// assert_eq!(wide.beam_width.get(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamSearchConfig {
    /// Number of partial routes kept after each expansion step.
    pub beam_width: NonZeroUsize,
    /// Search every width from one up to [`beam_width`](Self::beam_width)
    /// and keep the best completion.
    ///
    /// A wider beam then never returns a longer route than a narrower one,
    /// at the price of repeating the narrower searches.
    pub widening: bool,
}

impl BeamSearchConfig {
    /// Beam width used when none is configured.
    pub const DEFAULT_BEAM_WIDTH: NonZeroUsize = match NonZeroUsize::new(3) {
        Some(width) => width,
        None => NonZeroUsize::MIN,
    };

    /// Default configuration with an explicit beam width.
    #[must_use]
    pub const fn with_beam_width(beam_width: NonZeroUsize) -> Self {
        Self {
            beam_width,
            widening: true,
        }
    }

    /// Enable or disable iterative widening.
    #[must_use]
    pub const fn with_widening(self, widening: bool) -> Self {
        Self { widening, ..self }
    }

    /// Beam widths searched, narrowest first.
    pub(crate) const fn widths(self) -> RangeInclusive<usize> {
        let widest = self.beam_width.get();
        let narrowest = if self.widening { 1 } else { widest };
        narrowest..=widest
    }
}

impl Default for BeamSearchConfig {
    fn default() -> Self {
        Self::with_beam_width(Self::DEFAULT_BEAM_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, vec![1, 2, 3])]
    #[case(false, vec![3])]
    fn widths_follow_widening(#[case] widening: bool, #[case] expected: Vec<usize>) {
        let config = BeamSearchConfig::default().with_widening(widening);
        assert_eq!(config.widths().collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn width_one_searches_once() {
        let config = BeamSearchConfig::with_beam_width(NonZeroUsize::MIN);
        assert_eq!(config.widths().collect::<Vec<_>>(), vec![1]);
    }
}
