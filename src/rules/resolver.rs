use crate::rules::schema::{AreaRules, TableRule};
use std::collections::BTreeMap;

impl AreaRules {
    fn table_rule(&self, table: &str) -> Option<&TableRule> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(table))
    }

    /// Effective area for a table: its own override when set and
    /// non-empty, otherwise the table default.
    pub fn table_area(&self, table: &str) -> &str {
        match self.table_rule(table).and_then(|t| t.area.as_deref()) {
            Some(area) if !area.is_empty() => area,
            _ => &self.defaults.table,
        }
    }

    /// Effective area for an index on a table.
    ///
    /// Only an explicit per-index entry overrides the index default; a
    /// table-level `area` override never applies to its indexes.
    pub fn index_area(&self, table: &str, index: &str) -> &str {
        self.table_rule(table)
            .and_then(|t| lookup(&t.indexes, index))
            .unwrap_or(&self.defaults.index)
    }

    /// Effective area for a LOB field on a table.
    pub fn lob_area(&self, table: &str, field: &str) -> &str {
        self.table_rule(table)
            .and_then(|t| lookup(&t.lob, field))
            .unwrap_or(&self.defaults.lob)
    }
}

fn lookup<'a>(map: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
