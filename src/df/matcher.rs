use super::tracker::Construct;
use regex::Regex;
use std::sync::LazyLock;

static AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^(  AREA ")([^"]+)(".*)$"#).expect("hard-coded regex"));
static LOB_AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)^(  LOB-AREA ")([^"]+)(".*)$"#).expect("hard-coded regex"));

/// The three parts of a matched area line.
///
/// `prefix` runs up to and including the opening quote, `area` is the
/// current value, `suffix` starts at the closing quote and keeps any
/// trailer byte-for-byte, so `prefix + new_area + suffix` is a valid
/// replacement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaSpan<'a> {
    pub prefix: &'a str,
    pub area: &'a str,
    pub suffix: &'a str,
}

impl<'a> AreaSpan<'a> {
    fn capture(re: &Regex, line: &'a str) -> Option<Self> {
        let caps = re.captures(line)?;
        Some(AreaSpan {
            prefix: caps.get(1)?.as_str(),
            area: caps.get(2)?.as_str(),
            suffix: caps.get(3)?.as_str(),
        })
    }

    /// Rebuild the line with a different area name.
    pub fn replace(&self, area: &str) -> String {
        format!("{}{}{}", self.prefix, area, self.suffix)
    }
}

/// Match the area-bearing line for the active construct.
///
/// TABLE and INDEX blocks share the `  AREA "..."` shape; only LOB-typed
/// fields carry `  LOB-AREA "..."`, so plain field lines never match.
/// Outside a recognized construct nothing matches.
pub fn area_span<'a>(construct: &Construct, line: &'a str) -> Option<AreaSpan<'a>> {
    match construct {
        Construct::Table { .. } | Construct::Index { .. } => AreaSpan::capture(&AREA, line),
        Construct::Field { .. } => AreaSpan::capture(&LOB_AREA, line),
        Construct::None | Construct::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Construct {
        Construct::Table {
            table: "Customer".to_string(),
        }
    }

    fn field() -> Construct {
        Construct::Field {
            table: "Item".to_string(),
            field: "ItemImage".to_string(),
        }
    }

    #[test]
    fn test_area_line_splits_into_three_parts() {
        let span = area_span(&table(), r#"  AREA "Schema Area""#).unwrap();
        assert_eq!(span.prefix, r#"  AREA ""#);
        assert_eq!(span.area, "Schema Area");
        assert_eq!(span.suffix, r#"""#);
    }

    #[test]
    fn test_trailer_is_preserved_in_suffix() {
        let span = area_span(&table(), r#"  AREA "Schema Area" LABEL "Cust""#).unwrap();
        assert_eq!(span.suffix, r#"" LABEL "Cust""#);
        assert_eq!(span.replace("Data Area"), r#"  AREA "Data Area" LABEL "Cust""#);
    }

    #[test]
    fn test_index_construct_shares_area_shape() {
        let construct = Construct::Index {
            table: "Customer".to_string(),
            index: "CustNum".to_string(),
        };
        assert!(area_span(&construct, r#"  AREA "Index Area""#).is_some());
    }

    #[test]
    fn test_field_construct_matches_lob_area_only() {
        assert!(area_span(&field(), r#"  LOB-AREA "Lob Area""#).is_some());
        assert!(area_span(&field(), r#"  AREA "Schema Area""#).is_none());
    }

    #[test]
    fn test_table_construct_ignores_lob_area() {
        assert!(area_span(&table(), r#"  LOB-AREA "Lob Area""#).is_none());
    }

    #[test]
    fn test_no_match_outside_constructs() {
        assert!(area_span(&Construct::None, r#"  AREA "Schema Area""#).is_none());
        assert!(area_span(&Construct::Other, r#"  AREA "Schema Area""#).is_none());
    }

    #[test]
    fn test_leading_indent_is_required() {
        assert!(area_span(&table(), r#"AREA "Schema Area""#).is_none());
        assert!(area_span(&table(), r#"   AREA "Schema Area""#).is_none());
    }

    #[test]
    fn test_keyword_matches_case_insensitively() {
        assert!(area_span(&table(), r#"  area "Schema Area""#).is_some());
        assert!(area_span(&field(), r#"  lob-area "Lob Area""#).is_some());
    }
}
