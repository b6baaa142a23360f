//! Line-level understanding of the .df dump format.
//!
//! Nothing here builds a schema model. The tracker classifies one line at
//! a time into the construct it belongs to, and the matcher picks out the
//! single area-bearing line inside that construct. Everything else in a
//! dump is opaque text to the rest of the crate.

mod matcher;
mod tracker;

pub use matcher::{area_span, AreaSpan};
pub use tracker::Construct;
