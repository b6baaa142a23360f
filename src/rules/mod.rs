//! The rules document: loading, validation, area resolution, and
//! reverse-engineering from an existing dump.

mod infer;
mod loader;
mod resolver;
mod schema;

pub use infer::infer;
pub use loader::{load_from_path, load_from_str, RulesError};
pub use schema::{AreaDefaults, AreaRules, RulesFile, TableRule, ValidationError, ValidationIssue};
