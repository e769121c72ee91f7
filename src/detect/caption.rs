//! Table regions anchored on caption lines.

use std::ops::Range;

/// Expands each caption line into the table region next to it.
///
/// Table rows are short, so the region grows toward the side whose adjacent
/// window has the lower mean token count, one window at a time, for as long
/// as each window stays short and mostly table-like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionExpander {
    /// Lines per walked window
    pub window: usize,
    /// A window with a higher mean token count ends the region
    pub token_threshold: f64,
    /// A window with a lower table-like fraction ends the region
    pub drop_fraction: f64,
    /// More captions than this disables expansion for the document
    pub safety_valve: usize,
}

impl Default for CaptionExpander {
    fn default() -> Self {
        Self {
            window: 5,
            token_threshold: 2.0,
            drop_fraction: 0.5,
            safety_valve: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Before,
    After,
}

impl CaptionExpander {
    /// Flags table-region lines.
    ///
    /// `captions[i]` marks caption lines, `token_counts[i]` is the token
    /// count of line `i` and `table_like[i]` its numeric/table flag. All three
    /// slices have the document's length.
    pub fn expand(
        &self,
        captions: &[bool],
        token_counts: &[usize],
        table_like: &[bool],
    ) -> Vec<bool> {
        let len = captions.len();
        let mut flags = vec![false; len];

        let caption_count = captions.iter().filter(|c| **c).count();
        if caption_count > self.safety_valve {
            tracing::debug!(
                captions = caption_count,
                limit = self.safety_valve,
                "too many captions, skipping table-region expansion"
            );
            return flags;
        }
        if self.window == 0 {
            return flags;
        }

        for anchor in (0..len).filter(|&i| captions[i]) {
            if let Some(region) = self.region(anchor, token_counts, table_like) {
                flags[region].fill(true);
            }
        }

        flags
    }

    /// Lines from the caption through the furthest qualifying window.
    fn region(
        &self,
        anchor: usize,
        token_counts: &[usize],
        table_like: &[bool],
    ) -> Option<Range<usize>> {
        let len = token_counts.len();
        let before = mean_tokens(token_counts, self.window_at(anchor, Direction::Before, 0, len));
        let after = mean_tokens(token_counts, self.window_at(anchor, Direction::After, 0, len));

        let direction = match (before, after) {
            (None, None) => return None,
            (Some(_), None) => Direction::Before,
            (None, Some(_)) => Direction::After,
            (Some(b), Some(a)) if b < a => Direction::Before,
            _ => Direction::After,
        };

        let mut furthest: Option<Range<usize>> = None;
        for step in 0.. {
            let window = self.window_at(anchor, direction, step, len);
            if window.is_empty() || !self.qualifies(&window, token_counts, table_like) {
                break;
            }
            furthest = Some(window);
        }

        furthest.map(|window| match direction {
            Direction::Before => window.start..anchor + 1,
            Direction::After => anchor..window.end,
        })
    }

    /// The `step`-th window on one side of the anchor, clipped to the document.
    fn window_at(
        &self,
        anchor: usize,
        direction: Direction,
        step: usize,
        len: usize,
    ) -> Range<usize> {
        match direction {
            Direction::Before => {
                let end = anchor.saturating_sub(step * self.window);
                end.saturating_sub(self.window)..end
            }
            Direction::After => {
                let start = (anchor + 1 + step * self.window).min(len);
                start..(start + self.window).min(len)
            }
        }
    }

    fn qualifies(
        &self,
        window: &Range<usize>,
        token_counts: &[usize],
        table_like: &[bool],
    ) -> bool {
        let Some(mean) = mean_tokens(token_counts, window.clone()) else {
            return false;
        };
        let table_rows = table_like[window.clone()].iter().filter(|t| **t).count();
        let fraction = table_rows as f64 / window.len() as f64;
        mean <= self.token_threshold && fraction >= self.drop_fraction
    }
}

fn mean_tokens(token_counts: &[usize], window: Range<usize>) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    let total: usize = token_counts[window.clone()].iter().sum();
    Some(total as f64 / window.len() as f64)
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
    fn test_expands_toward_table_rows() {
        // prose, caption, 10 table rows, prose
        let mut tokens = vec![12, 12, 12, 4];
        let mut table = vec![false, false, false, false];
        tokens.extend([2; 10]);
        table.extend([true; 10]);
        tokens.extend([15; 5]);
        table.extend([false; 5]);
        let captions: Vec<bool> = (0..tokens.len()).map(|i| i == 3).collect();

        let flags = CaptionExpander::default().expand(&captions, &tokens, &table);
        assert_eq!(flagged(&flags), (3..14).collect::<Vec<_>>());
    }

    #[test]
    fn test_expands_backwards_when_table_precedes_caption() {
        let mut tokens = vec![1; 5];
        let mut table = vec![true; 5];
        tokens.extend([5, 14, 14, 14, 14, 14]);
        table.extend([false; 6]);
        let captions: Vec<bool> = (0..tokens.len()).map(|i| i == 5).collect();

        let flags = CaptionExpander::default().expand(&captions, &tokens, &table);
        assert_eq!(flagged(&flags), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_prose_neighbourhood_flags_nothing() {
        let tokens = vec![10; 11];
        let table = vec![false; 11];
        let captions: Vec<bool> = (0..11).map(|i| i == 5).collect();
        let flags = CaptionExpander::default().expand(&captions, &tokens, &table);
        assert!(flagged(&flags).is_empty());
    }

    #[test]
    fn test_safety_valve_disables_expansion() {
        let len = 60;
        let tokens = vec![1; len];
        let table = vec![true; len];
        let captions: Vec<bool> = (0..len).map(|i| i % 2 == 0).collect();
        let flags = CaptionExpander::default().expand(&captions, &tokens, &table);
        assert!(flagged(&flags).is_empty());
    }
}
