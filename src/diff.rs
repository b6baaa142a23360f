//! Keyed comparison of the area assignments of two dumps, plus grouping
//! of the differences into per-table storage-migration work.

use crate::extract::{AreaKind, AreaRecord};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One discrepancy between source and target. `None` on either side means
/// the construct is absent from that dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    #[serde(rename = "construct")]
    pub kind: AreaKind,
    pub name: String,
    pub source_area: Option<String>,
    pub target_area: Option<String>,
}

/// Compare two extractions.
///
/// Rows come out in source-file order followed by target-only additions in
/// target-file order. Constructs present on both sides with the same area
/// (case-insensitive) produce no row. Duplicate keys within one dump
/// collapse to the last occurrence when looked up from the other side.
pub fn diff(source: &[AreaRecord], target: &[AreaRecord]) -> Vec<DiffRow> {
    let target_map = last_by_key(target);

    let mut rows = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for record in source {
        seen.insert(record.key.as_str());
        match target_map.get(record.key.as_str()) {
            None => rows.push(DiffRow {
                kind: record.kind,
                name: record.display_name.clone(),
                source_area: Some(record.area.clone()),
                target_area: None,
            }),
            Some(tgt) if !record.area.eq_ignore_ascii_case(&tgt.area) => rows.push(DiffRow {
                kind: record.kind,
                name: record.display_name.clone(),
                source_area: Some(record.area.clone()),
                target_area: Some(tgt.area.clone()),
            }),
            Some(_) => {}
        }
    }

    for record in target {
        if !seen.contains(record.key.as_str()) {
            rows.push(DiffRow {
                kind: record.kind,
                name: record.display_name.clone(),
                source_area: None,
                target_area: Some(record.area.clone()),
            });
        }
    }

    tracing::debug!(differences = rows.len(), "diff complete");
    rows
}

fn last_by_key(records: &[AreaRecord]) -> HashMap<&str, &AreaRecord> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        map.insert(record.key.as_str(), record);
    }
    map
}

/// Storage-migration work for one table, grouped from diff rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMove {
    pub table: String,
    pub table_area: String,
    pub index_area: Option<String>,
    pub lob_area: Option<String>,
}

#[derive(Default)]
struct TableChange {
    table_area: Option<String>,
    index_area: Option<String>,
    lob_area: Option<String>,
    has_index: bool,
    has_lob: bool,
}

/// Group diff rows by table and resolve the areas a `proutil tablemove`
/// for that table needs.
///
/// Rows without a target side are skipped; there is nothing to move to.
/// When a sub-construct carries no target-side change of its own, its
/// area falls back to any assignment found for that table in the target
/// extraction, then the source. An index area is always filled in from
/// the source when nothing else names one, so a moved table keeps its
/// index area.
pub fn plan_tablemoves(
    rows: &[DiffRow],
    source: &[AreaRecord],
    target: &[AreaRecord],
) -> Vec<TableMove> {
    let mut order: Vec<String> = Vec::new();
    let mut changes: HashMap<String, TableChange> = HashMap::new();

    for row in rows {
        let Some(target_area) = &row.target_area else {
            continue;
        };
        let table = match row.kind {
            AreaKind::Table => row.name.as_str(),
            AreaKind::Index | AreaKind::Lob => match row.name.split_once('.') {
                Some((table, _)) => table,
                None => continue,
            },
        };
        let change = changes.entry(table.to_string()).or_insert_with(|| {
            order.push(table.to_string());
            TableChange::default()
        });
        match row.kind {
            AreaKind::Table => change.table_area = Some(target_area.clone()),
            AreaKind::Index => {
                change.index_area = Some(target_area.clone());
                change.has_index = true;
            }
            AreaKind::Lob => {
                change.lob_area = Some(target_area.clone());
                change.has_lob = true;
            }
        }
    }

    order
        .into_iter()
        .map(|table| {
            let change = &changes[&table];
            let table_key = format!("table:{}", table.to_lowercase());
            let index_prefix = format!("index:{}.", table.to_lowercase());
            let lob_prefix = format!("lob:{}.", table.to_lowercase());

            let table_area = change
                .table_area
                .clone()
                .or_else(|| last_area_for(target, &table_key))
                .or_else(|| last_area_for(source, &table_key))
                .unwrap_or_default();

            let index_area = change
                .index_area
                .clone()
                .or_else(|| {
                    change
                        .has_index
                        .then(|| first_area_with_prefix(target, &index_prefix))
                        .flatten()
                })
                .or_else(|| first_area_with_prefix(source, &index_prefix));

            let lob_area = if change.has_lob {
                change
                    .lob_area
                    .clone()
                    .or_else(|| first_area_with_prefix(target, &lob_prefix))
                    .or_else(|| first_area_with_prefix(source, &lob_prefix))
            } else {
                None
            };

            TableMove {
                table,
                table_area,
                index_area,
                lob_area,
            }
        })
        .collect()
}

fn last_area_for(records: &[AreaRecord], key: &str) -> Option<String> {
    records
        .iter()
        .rev()
        .find(|r| r.key == key)
        .map(|r| r.area.clone())
}

fn first_area_with_prefix(records: &[AreaRecord], prefix: &str) -> Option<String> {
    records
        .iter()
        .find(|r| r.key.starts_with(prefix))
        .map(|r| r.area.clone())
}
