//! Document model.
//!
//! Lines are created once from the extracted text and never reordered or
//! removed; classification only attaches flags and drop reasons to them.

mod document;
mod line;
mod record;

pub use document::*;
pub use line::*;
pub use record::*;
