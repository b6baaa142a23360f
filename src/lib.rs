//! Areashift: storage-area rewriting for OpenEdge .df schema dumps.
//!
//! Rewrites the `AREA "..."` / `LOB-AREA "..."` assignments embedded in a
//! .df schema dump from a rules file, reverse-engineers such a rules file
//! from an existing dump, or diffs the assignments of two dumps.
//!
//! # Architecture
//!
//! All three commands share one line scanner: [`Construct`] classifies
//! each line into the TABLE/FIELD/INDEX block it belongs to, and
//! [`area_span`] picks out the single area-bearing line inside that
//! block. The commands differ only in what happens at a matched line:
//! [`rewrite`] substitutes the resolved area in place, [`extract`]
//! records it. A dump is never parsed into a schema model; every line the
//! scanner does not positively recognize passes through byte-for-byte.
//!
//! # Example
//!
//! ```
//! use areashift::{diff, extract};
//!
//! let source = [r#"ADD TABLE "Customer""#, r#"  AREA "Schema Area""#];
//! let target = [r#"ADD TABLE "Customer""#, r#"  AREA "Data Area""#];
//!
//! let rows = diff(&extract(&source), &extract(&target));
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].source_area.as_deref(), Some("Schema Area"));
//! assert_eq!(rows[0].target_area.as_deref(), Some("Data Area"));
//! ```

pub mod df;
pub mod diff;
pub mod extract;
pub mod fileio;
pub mod rewrite;
pub mod rules;

// Re-exports
pub use df::{area_span, AreaSpan, Construct};
pub use diff::{diff, plan_tablemoves, DiffRow, TableMove};
pub use extract::{extract, AreaKind, AreaRecord};
pub use rewrite::{is_checksum_line, rewrite};
pub use rules::{
    infer, load_from_path, load_from_str, AreaDefaults, AreaRules, RulesError, RulesFile,
    TableRule,
};
