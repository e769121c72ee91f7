//! Structural detectors.
//!
//! Each detector reads featurizer output for the whole document and returns
//! one flag per line. All of them scan lines in document order.

mod bibliography;
mod caption;
mod footnote;

pub use bibliography::{bibliography_flags, find_onset};
pub use caption::CaptionExpander;
pub use footnote::FootnoteDetector;
