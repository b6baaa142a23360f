//! Apply mode: substitute area assignments across a full .df line
//! sequence, leaving every other line untouched.

use crate::df::{area_span, Construct};
use crate::rules::AreaRules;
use regex::Regex;
use std::sync::LazyLock;

static CHECKSUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("hard-coded regex"));

/// True when `line` has the shape of a trailing .df byte-count checksum.
pub fn is_checksum_line(line: &str) -> bool {
    CHECKSUM.is_match(line)
}

/// Rewrite area assignments over `lines`, emitting every line followed by
/// `line_ending`.
///
/// When the last input line is a 10-digit checksum it is stripped before
/// processing and re-appended as the byte count of the rewritten content,
/// zero-padded to 10 digits.
pub fn rewrite(lines: &[&str], rules: &AreaRules, line_ending: &str) -> String {
    let (body, had_checksum) = match lines.split_last() {
        Some((last, rest)) if is_checksum_line(last) => (rest, true),
        _ => (lines, false),
    };
    if had_checksum {
        tracing::debug!("trailing checksum detected, will recompute");
    }

    let mut out = String::new();
    let mut construct = Construct::default();

    for &line in body {
        construct.observe(line);
        match substitute(&construct, line, rules) {
            Some(replaced) => out.push_str(&replaced),
            None => out.push_str(line),
        }
        out.push_str(line_ending);
    }

    if had_checksum {
        let byte_count = out.len();
        out.push_str(&format!("{byte_count:010}{line_ending}"));
        tracing::debug!(byte_count, "checksum recomputed");
    }

    out
}

/// Replace the area on `line` when it is the area line of the active
/// construct. `None` means the line passes through verbatim, including
/// when the resolver comes back empty, since an empty area name would
/// leave the dump unloadable.
fn substitute(construct: &Construct, line: &str, rules: &AreaRules) -> Option<String> {
    let span = area_span(construct, line)?;
    let area = match construct {
        Construct::Table { table } => {
            let area = rules.table_area(table);
            tracing::debug!(%table, %area, "TABLE area replaced");
            area
        }
        Construct::Index { table, index } => {
            let area = rules.index_area(table, index);
            tracing::debug!(%index, %table, %area, "INDEX area replaced");
            area
        }
        Construct::Field { table, field } => {
            let area = rules.lob_area(table, field);
            tracing::debug!(%field, %table, %area, "LOB-AREA replaced");
            area
        }
        Construct::None | Construct::Other => return None,
    };
    if area.is_empty() {
        tracing::debug!("no rule and no default, area left unchanged");
        return None;
    }
    Some(span.replace(area))
}
