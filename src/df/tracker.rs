use regex::Regex;
use std::sync::LazyLock;

static ADD_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^ADD TABLE "([^"]+)""#).expect("hard-coded regex"));
static ADD_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^ADD FIELD "([^"]+)" OF "([^"]+)""#).expect("hard-coded regex")
});
static ADD_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^ADD INDEX "([^"]+)" ON "([^"]+)""#).expect("hard-coded regex")
});
static ADD_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ADD SEQUENCE ").expect("hard-coded regex"));

/// The .df construct the scanner is currently inside, together with the
/// names captured from its header line.
///
/// A dump is a flat sequence of `ADD TABLE` / `ADD FIELD` / `ADD INDEX` /
/// `ADD SEQUENCE` blocks, each terminated by a blank line. The variant
/// payloads encode which names are meaningful for the active block: a
/// field or index block always knows its owning table because the header
/// itself names it (`... OF "<table>"`, `... ON "<table>"`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Construct {
    /// Outside any construct: the initial state, and after a blank line.
    #[default]
    None,
    /// Inside an `ADD TABLE` block.
    Table { table: String },
    /// Inside an `ADD FIELD ... OF ...` block.
    Field { table: String, field: String },
    /// Inside an `ADD INDEX ... ON ...` block.
    Index { table: String, index: String },
    /// Inside a sequence or other unrecognized block; its lines are never
    /// touched.
    Other,
}

impl Construct {
    /// Advance the scanner by one line.
    ///
    /// Header lines switch to the construct they open, a blank line closes
    /// the current construct, and any other line leaves the state
    /// unchanged so that multi-line blocks keep their context until the
    /// area line shows up.
    pub fn observe(&mut self, line: &str) {
        if let Some(caps) = ADD_TABLE.captures(line) {
            let table = caps[1].to_string();
            tracing::debug!(%table, "parsing TABLE");
            *self = Construct::Table { table };
        } else if let Some(caps) = ADD_FIELD.captures(line) {
            let (field, table) = (caps[1].to_string(), caps[2].to_string());
            tracing::debug!(%field, %table, "parsing FIELD");
            *self = Construct::Field { table, field };
        } else if let Some(caps) = ADD_INDEX.captures(line) {
            let (index, table) = (caps[1].to_string(), caps[2].to_string());
            tracing::debug!(%index, %table, "parsing INDEX");
            *self = Construct::Index { table, index };
        } else if ADD_SEQUENCE.is_match(line) {
            *self = Construct::Other;
        } else if line.trim().is_empty() {
            *self = Construct::None;
        }
    }
}
