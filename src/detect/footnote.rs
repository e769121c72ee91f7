//! Footnote-run detection.

/// Finds runs of lines opening with small ascending numerals.
///
/// Footnote markers on a page (`1 Bkz. ...`, `2 Aynı eser ...`) ascend by
/// small steps at short line distances. A single numbered line is never
/// flagged: a run is confirmed, and backfilled from its first line, only
/// when a second numeral follows within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootnoteDetector {
    /// Largest allowed ascent between consecutive numerals
    pub max_ascent: u64,
    /// Largest allowed line distance between consecutive numerals
    pub max_line_gap: usize,
}

impl Default for FootnoteDetector {
    fn default() -> Self {
        Self {
            max_ascent: 2,
            max_line_gap: 6,
        }
    }
}

impl FootnoteDetector {
    /// Creates a detector with the given tolerances.
    pub fn new(max_ascent: u64, max_line_gap: usize) -> Self {
        Self {
            max_ascent,
            max_line_gap,
        }
    }

    /// Flags footnote lines given each line's leading integer.
    ///
    /// Single forward pass; `leading` must be in document order.
    pub fn detect(&self, leading: &[Option<u64>]) -> Vec<bool> {
        let mut flags = vec![false; leading.len()];
        // (last numeral, its line index) of the current candidate run
        let mut last: Option<(u64, usize)> = None;

        for (i, number) in leading.iter().enumerate() {
            let Some(current) = *number else {
                continue;
            };

            match last {
                Some((last_number, last_index))
                    if last_number > 0
                        && current > last_number
                        && current - last_number <= self.max_ascent
                        && i - last_index <= self.max_line_gap =>
                {
                    flags[last_index..=i].fill(true);
                    last = Some((current, i));
                }
                Some((_, last_index)) if i == last_index + 1 => {}
                _ => last = Some((current, i)),
            }
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged(flags: &[bool]) -> Vec<usize> {
        flags
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.then_some(i))
            .collect()
    }

    #[test]
    fn test_broken_ascent_starts_new_run() {
        let leading = [5, 6, 9, 19, 20, 21].map(Some);
        let flags = FootnoteDetector::default().detect(&leading);
        assert_eq!(flagged(&flags), vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn test_single_numeral_never_flagged() {
        let leading = [None, Some(12), None, None, None, None, None, None, None, None];
        let flags = FootnoteDetector::default().detect(&leading);
        assert!(flagged(&flags).is_empty());
    }

    #[test]
    fn test_run_backfills_lines_between_numerals() {
        let leading = [Some(1), None, None, Some(2), None, Some(3)];
        let flags = FootnoteDetector::default().detect(&leading);
        assert_eq!(flagged(&flags), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_line_gap_tolerance() {
        let mut leading = vec![None; 9];
        leading[0] = Some(1);
        leading[8] = Some(2);
        assert!(flagged(&FootnoteDetector::default().detect(&leading)).is_empty());
        assert_eq!(
            flagged(&FootnoteDetector::new(2, 8).detect(&leading)),
            (0..=8).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_descending_and_zero_numerals() {
        let leading = [Some(3), Some(2), Some(0), Some(1)];
        assert!(flagged(&FootnoteDetector::default().detect(&leading)).is_empty());
    }
}
