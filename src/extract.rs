//! Extraction of area assignments from a dump, one ordered record per
//! TABLE/INDEX/LOB construct encountered. Shared by the diff and parse
//! commands; produces no output lines, only records.

use crate::df::{area_span, Construct};
use serde::Serialize;
use std::fmt;

/// Which kind of construct an extracted area belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AreaKind {
    Table,
    Index,
    Lob,
}

impl AreaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AreaKind::Table => "TABLE",
            AreaKind::Index => "INDEX",
            AreaKind::Lob => "LOB",
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One area assignment found in a dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRecord {
    pub kind: AreaKind,
    /// Name as written in the dump: `Customer`, `Customer.CustNum`,
    /// `Item.ItemImage`.
    pub display_name: String,
    /// Case-folded, kind-qualified identity used to match records across
    /// two dumps: `table:customer`, `index:customer.custnum`,
    /// `lob:item.itemimage`.
    pub key: String,
    pub area: String,
}

impl AreaRecord {
    fn table(table: &str, area: &str) -> Self {
        AreaRecord {
            kind: AreaKind::Table,
            display_name: table.to_string(),
            key: format!("table:{}", table.to_lowercase()),
            area: area.to_string(),
        }
    }

    fn index(table: &str, index: &str, area: &str) -> Self {
        AreaRecord {
            kind: AreaKind::Index,
            display_name: format!("{table}.{index}"),
            key: format!(
                "index:{}.{}",
                table.to_lowercase(),
                index.to_lowercase()
            ),
            area: area.to_string(),
        }
    }

    fn lob(table: &str, field: &str, area: &str) -> Self {
        AreaRecord {
            kind: AreaKind::Lob,
            display_name: format!("{table}.{field}"),
            key: format!("lob:{}.{}", table.to_lowercase(), field.to_lowercase()),
            area: area.to_string(),
        }
    }
}

/// Scan `lines` and return every TABLE/INDEX/LOB area assignment in
/// file order. Lines that carry no area information are ignored.
pub fn extract(lines: &[&str]) -> Vec<AreaRecord> {
    let mut records = Vec::new();
    let mut construct = Construct::default();

    for &line in lines {
        construct.observe(line);
        let Some(span) = area_span(&construct, line) else {
            continue;
        };
        match &construct {
            Construct::Table { table } => records.push(AreaRecord::table(table, span.area)),
            Construct::Index { table, index } => {
                records.push(AreaRecord::index(table, index, span.area))
            }
            Construct::Field { table, field } => {
                records.push(AreaRecord::lob(table, field, span.area))
            }
            Construct::None | Construct::Other => {}
        }
    }

    tracing::debug!(constructs = records.len(), "areas extracted");
    records
}
