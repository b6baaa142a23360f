use crate::extract::{AreaKind, AreaRecord};
use crate::rules::schema::{AreaDefaults, AreaRules, RulesFile, TableRule};
use std::collections::HashMap;

/// Reverse-engineer a minimal rules document from an extraction.
///
/// Only assignments that differ (case-insensitively) from the matching
/// default produce entries; a dump that fully matches the defaults yields
/// an empty table list. Tables come out in first-seen order with their
/// original dump casing.
pub fn infer(records: &[AreaRecord], version: f64, defaults: &AreaDefaults) -> RulesFile {
    // Keyed by lowercased table name; `order` keeps first-seen order.
    let mut order: Vec<String> = Vec::new();
    let mut entries: HashMap<String, TableRule> = HashMap::new();

    for record in records {
        match record.kind {
            AreaKind::Table => {
                if record.area.eq_ignore_ascii_case(&defaults.table) {
                    continue;
                }
                let entry = entry_for(&mut entries, &mut order, &record.display_name);
                entry.area = Some(record.area.clone());
                tracing::debug!(table = %record.display_name, area = %record.area, "non-default TABLE area");
            }
            AreaKind::Index => {
                if record.area.eq_ignore_ascii_case(&defaults.index) {
                    continue;
                }
                let Some((table, index)) = record.display_name.split_once('.') else {
                    continue;
                };
                let entry = entry_for(&mut entries, &mut order, table);
                entry
                    .indexes
                    .insert(index.to_string(), record.area.clone());
                tracing::debug!(index = %record.display_name, area = %record.area, "non-default INDEX area");
            }
            AreaKind::Lob => {
                if record.area.eq_ignore_ascii_case(&defaults.lob) {
                    continue;
                }
                let Some((table, field)) = record.display_name.split_once('.') else {
                    continue;
                };
                let entry = entry_for(&mut entries, &mut order, table);
                entry.lob.insert(field.to_string(), record.area.clone());
                tracing::debug!(field = %record.display_name, area = %record.area, "non-default LOB area");
            }
        }
    }

    let tables = order
        .iter()
        .filter_map(|key| entries.remove(key))
        .collect();

    RulesFile {
        areashift: AreaRules {
            version,
            defaults: defaults.clone(),
            tables,
        },
    }
}

fn entry_for<'a>(
    entries: &'a mut HashMap<String, TableRule>,
    order: &mut Vec<String>,
    name: &str,
) -> &'a mut TableRule {
    let key = name.to_lowercase();
    entries.entry(key.clone()).or_insert_with(|| {
        order.push(key);
        TableRule {
            name: name.to_string(),
            ..Default::default()
        }
    })
}
