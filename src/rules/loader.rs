use crate::rules::schema::{RulesFile, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read rules file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules TOML")]
    Toml {
        #[from]
        source: toml_edit::de::Error,
    },

    #[error("invalid rules file")]
    Validation {
        #[from]
        source: ValidationError,
    },
}

pub fn load_from_str(input: &str) -> Result<RulesFile, RulesError> {
    let rules: RulesFile = toml_edit::de::from_str(input)?;
    rules.validate()?;
    Ok(rules)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<RulesFile, RulesError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[areashift]
version = 1.0

[areashift.defaults]
table = "Data Area"
index = "Index Area"
lob = "Lob Area"

[[areashift.tables]]
name = "Customer"
area = "Customer Data"

[areashift.tables.indexes]
CustNum = "Customer Index"
"#;

    #[test]
    fn test_load_full_document() {
        let rules = load_from_str(SAMPLE).unwrap().areashift;
        assert_eq!(rules.version, 1.0);
        assert_eq!(rules.defaults.table, "Data Area");
        assert_eq!(rules.tables.len(), 1);
        assert_eq!(rules.tables[0].name, "Customer");
        assert_eq!(rules.tables[0].area.as_deref(), Some("Customer Data"));
        assert_eq!(
            rules.tables[0].indexes.get("CustNum").map(String::as_str),
            Some("Customer Index")
        );
    }

    #[test]
    fn test_load_minimal_document() {
        let rules = load_from_str("[areashift.defaults]\ntable = \"Data Area\"\n")
            .unwrap()
            .areashift;
        assert_eq!(rules.defaults.table, "Data Area");
        assert!(rules.defaults.index.is_empty());
        assert!(rules.tables.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = load_from_str("[areashift\nversion = ").unwrap_err();
        assert!(matches!(err, RulesError::Toml { .. }));
    }

    #[test]
    fn test_unnamed_table_is_a_validation_error() {
        let err = load_from_str("[[areashift.tables]]\narea = \"Data Area\"\n").unwrap_err();
        assert!(matches!(err, RulesError::Validation { .. }));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_from_path("/no/such/rules.toml").unwrap_err();
        assert!(err.to_string().contains("/no/such/rules.toml"));
    }
}
