use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Top-level rules document: a single namespaced section.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct RulesFile {
    #[serde(default)]
    pub areashift: AreaRules,
}

/// The full rule set: global defaults plus per-table overrides.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct AreaRules {
    #[serde(default)]
    pub version: f64,
    #[serde(default)]
    pub defaults: AreaDefaults,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableRule>,
}

/// Fallback area names used when no table-specific rule matches.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct AreaDefaults {
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub lob: String,
}

/// Per-table overrides: the table's own area plus optional per-index and
/// per-LOB-field maps. Name matching is case-insensitive throughout.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct TableRule {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub indexes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lob: BTreeMap<String, String>,
}

impl RulesFile {
    /// Structural checks beyond what serde enforces.
    ///
    /// A table entry without a name can never match and is rejected.
    /// Duplicate case-insensitive names are accepted (resolution is
    /// first-match-wins) but worth a warning since the later entries are
    /// dead weight.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for (pos, table) in self.areashift.tables.iter().enumerate() {
            if table.name.trim().is_empty() {
                issues.push(ValidationIssue::MissingTableName { position: pos });
            }
        }

        for (pos, table) in self.areashift.tables.iter().enumerate() {
            let shadowed = self.areashift.tables[..pos]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&table.name));
            if shadowed && !table.name.trim().is_empty() {
                tracing::warn!(
                    table = %table.name,
                    "duplicate table rule, only the first entry is used"
                );
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    MissingTableName { position: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingTableName { position } => {
                write!(f, "table rule #{} has no name", position + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_empty_rule_set() {
        assert!(RulesFile::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unnamed_table() {
        let rules = RulesFile {
            areashift: AreaRules {
                tables: vec![TableRule::default()],
                ..Default::default()
            },
        };
        let err = rules.validate().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.to_string().contains("has no name"));
    }

    #[test]
    fn test_validate_accepts_duplicate_table_names() {
        let rules = RulesFile {
            areashift: AreaRules {
                tables: vec![
                    TableRule {
                        name: "Customer".to_string(),
                        ..Default::default()
                    },
                    TableRule {
                        name: "CUSTOMER".to_string(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        };
        assert!(rules.validate().is_ok());
    }
}
