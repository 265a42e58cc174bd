use crate::error::ConfigError;

/// Configuration for one filter run.
///
/// Lengths are signed so that out-of-range values coming from the command
/// line reach [`MashOptions::cut_range`] and are reported there, instead of
/// being silently wrapped.
///
/// # Examples
///
/// ```rust
/// use mashlf::MashOptions;
///
/// let options = MashOptions {
///     min_length: 40,
///     max_length: 10,
///     ..Default::default()
/// };
/// let range = options.cut_range().unwrap();
/// assert_eq!((range.min(), range.max()), (10, 40));
/// ```
///
/// # Default
///
/// Lines of 1 to 8191 code points, seed 0, uniform distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MashOptions {
    /// Fewest code points in a produced line (except possibly the last).
    ///
    /// # Default
    ///
    /// `1`
    pub min_length: i64,

    /// Most code points in a produced line.
    ///
    /// # Default
    ///
    /// `8191`
    pub max_length: i64,

    /// Seed for the line length generator. `0` is an ordinary seed.
    ///
    /// # Default
    ///
    /// `0`
    pub seed: u64,

    /// How line lengths are drawn from `[min_length, max_length]`.
    ///
    /// # Default
    ///
    /// [`Distribution::Uniform`]
    pub distribution: Distribution,
}

impl Default for MashOptions {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 8191,
            seed: 0,
            distribution: Distribution::Uniform,
        }
    }
}

impl MashOptions {
    /// Validates the configured bounds and normalizes them into a
    /// [`CutRange`], swapping them when given in reverse.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when either bound is not positive or does not
    /// fit in `usize`.
    pub fn cut_range(&self) -> Result<CutRange, ConfigError> {
        CutRange::new(self.min_length, self.max_length)
    }
}

/// Line length distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Distribution {
    /// Every length in the range is equally likely.
    #[default]
    Uniform,
}

/// Validated, inclusive range of line lengths: `min >= 1`, `span >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutRange {
    min: usize,
    span: usize,
}

impl CutRange {
    /// Builds a range from two positive bounds in either order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveLength`] for a bound `<= 0` and
    /// [`ConfigError::LengthOverflow`] for one that does not fit in `usize`.
    pub fn new(min: i64, max: i64) -> Result<Self, ConfigError> {
        let min = positive("minimum length", min)?;
        let max = positive("maximum length", max)?;
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Ok(Self {
            min,
            span: max - min + 1,
        })
    }

    /// Shortest line length.
    #[must_use]
    pub fn min(&self) -> usize {
        self.min
    }

    /// Longest line length.
    #[must_use]
    pub fn max(&self) -> usize {
        self.min + self.span - 1
    }

    /// Number of distinct lengths, `max - min + 1`.
    #[must_use]
    pub fn span(&self) -> usize {
        self.span
    }

    /// Maps a uniform draw `u` in `[0, 1)` onto `[min, max]`:
    /// `floor(min + u * span)`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn pick(&self, u: f64) -> usize {
        let offset = (u * self.span as f64) as usize;
        // `u` close to 1.0 can round `u * span` up to `span`.
        self.min + offset.min(self.span - 1)
    }
}

fn positive(name: &'static str, value: i64) -> Result<usize, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositiveLength { name, value });
    }
    usize::try_from(value).map_err(|_| ConfigError::LengthOverflow { name, value })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(3, 3, 3, 3)]
    #[case(1, 10, 1, 10)]
    #[case(10, 1, 1, 10)]
    #[case(8191, 1, 1, 8191)]
    fn cut_range_normalizes(
        #[case] min: i64,
        #[case] max: i64,
        #[case] want_min: usize,
        #[case] want_max: usize,
    ) {
        let range = CutRange::new(min, max).unwrap();
        assert_eq!(range.min(), want_min);
        assert_eq!(range.max(), want_max);
        assert_eq!(range.span(), want_max - want_min + 1);
    }

    #[rstest]
    #[case(0, 5, "minimum length", 0)]
    #[case(-4, 5, "minimum length", -4)]
    #[case(5, 0, "maximum length", 0)]
    #[case(5, -1, "maximum length", -1)]
    fn cut_range_rejects_non_positive(
        #[case] min: i64,
        #[case] max: i64,
        #[case] name: &'static str,
        #[case] value: i64,
    ) {
        assert_eq!(
            CutRange::new(min, max),
            Err(ConfigError::NonPositiveLength { name, value })
        );
    }

    #[test]
    fn pick_covers_both_ends() {
        let range = CutRange::new(4, 7).unwrap();
        assert_eq!(range.pick(0.0), 4);
        assert_eq!(range.pick(0.2499), 4);
        assert_eq!(range.pick(0.25), 5);
        assert_eq!(range.pick(0.999_999), 7);
        assert_eq!(range.pick(1.0 - f64::EPSILON), 7);
    }

    #[test]
    fn default_options_are_valid() {
        let range = MashOptions::default().cut_range().unwrap();
        assert_eq!((range.min(), range.max()), (1, 8191));
    }
}
