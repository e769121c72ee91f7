//! Windowed majority correction of per-line boolean signals.

/// Flips isolated false values inside runs of true values.
///
/// For every position that is false or undefined, the window
/// `[i - before, i + after)` (clipped to the column) is inspected; if at least
/// `fraction` of its defined values are true, the position becomes true.
/// Corrections are computed from the input column only, so a flipped value
/// never helps flip its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceSmoother {
    /// Positions inspected before the current one
    pub before: usize,
    /// Exclusive end offset after the current one
    pub after: usize,
    /// Required share of true values among defined ones
    pub fraction: f64,
}

impl Default for ConfidenceSmoother {
    fn default() -> Self {
        Self {
            before: 5,
            after: 6,
            fraction: 0.9,
        }
    }
}

impl ConfidenceSmoother {
    /// Creates a smoother with the given window and majority fraction.
    pub fn new(before: usize, after: usize, fraction: f64) -> Self {
        Self {
            before,
            after,
            fraction,
        }
    }

    /// Smooths a column with undefined entries; undefined entries that are
    /// not corrected come out false.
    pub fn smooth(&self, values: &[Option<bool>]) -> Vec<bool> {
        (0..values.len())
            .map(|i| match values[i] {
                Some(true) => true,
                _ => self.majority_true(values, i),
            })
            .collect()
    }

    /// Smooths a fully defined column.
    pub fn smooth_flags(&self, values: &[bool]) -> Vec<bool> {
        let values: Vec<Option<bool>> = values.iter().copied().map(Some).collect();
        self.smooth(&values)
    }

    fn majority_true(&self, values: &[Option<bool>], i: usize) -> bool {
        let start = i.saturating_sub(self.before);
        let end = (i + self.after).min(values.len());

        let (defined, trues) = values[start..end]
            .iter()
            .flatten()
            .fold((0usize, 0usize), |(defined, trues), v| {
                (defined + 1, trues + usize::from(*v))
            });

        defined > 0 && trues as f64 >= self.fraction * defined as f64
    }
}
