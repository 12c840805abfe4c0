//! Rule parsing and name validation.
//!
//! A rule names two columns joined by exactly one operator kind, with optional spaces:
//!
//! ```text
//! <column> <op> <column>      op ∈ { +, -, * }
//! ```
//!
//! [`parse_rule`] normalizes and checks the rule text and resolves both operands against a
//! [`ColumnCatalog`]. [`validate_new_column_name`] and [`check_existing_columns`] cover the
//! checks made on the target column name and on the dataset itself.

mod operator;

use std::fmt;

use crate::error::{VirtualColumnError, VirtualColumnResult};
use crate::types::Schema;

pub use operator::Operator;

/// Characters, besides ASCII letters and digits, that may appear in a column name.
pub const NAME_PUNCTUATION: &[char] = &['_'];

/// Characters, besides those of column names, that may appear in a rule.
pub const RULE_PUNCTUATION: &[char] = &[' ', '+', '-', '*'];

/// Anything that can list its column names.
///
/// Implemented for [`Schema`] and, in [`crate::processing::polars_backend`], for Polars frames.
pub trait ColumnCatalog {
    /// Column names in order.
    fn column_names(&self) -> Vec<&str>;

    /// Returns `true` if a column named `name` exists.
    fn has_column(&self, name: &str) -> bool {
        self.column_names().contains(&name)
    }
}

impl ColumnCatalog for Schema {
    fn column_names(&self) -> Vec<&str> {
        self.field_names().collect()
    }

    fn has_column(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// A rule whose operands are known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub left: String,
    pub operator: Operator,
    pub right: String,
}

impl fmt::Display for ParsedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || NAME_PUNCTUATION.contains(&c)
}

fn is_rule_char(c: char) -> bool {
    is_name_char(c) || RULE_PUNCTUATION.contains(&c)
}

/// Check that no existing column name contains an operator character.
pub fn check_existing_columns<C>(catalog: &C) -> VirtualColumnResult<()>
where
    C: ColumnCatalog + ?Sized,
{
    match catalog
        .column_names()
        .into_iter()
        .find(|name| name.chars().any(|c| Operator::from_symbol(c).is_some()))
    {
        Some(column) => Err(VirtualColumnError::UnsafeExistingColumnName {
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Check the name requested for a new column: non-empty, only `[A-Za-z0-9_]`, at least one `_`.
pub fn validate_new_column_name(name: &str) -> VirtualColumnResult<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if !name.chars().all(is_name_char) {
        Some("only ASCII letters, digits and '_' are allowed")
    } else if !name.contains('_') {
        Some("name must contain '_'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(VirtualColumnError::InvalidNewColumnName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Parse `rule` and resolve its operands against `catalog`.
///
/// Checks run in order and stop at the first failure:
///
/// 1. trim surrounding whitespace;
/// 2. every character must be a name character, a space, or an operator;
/// 3. exactly one operator kind must be present;
/// 4. splitting on that operator must give two non-empty (trimmed) operands;
/// 5. both operands must be columns of `catalog`.
pub fn parse_rule<C>(rule: &str, catalog: &C) -> VirtualColumnResult<ParsedRule>
where
    C: ColumnCatalog + ?Sized,
{
    let trimmed = rule.trim();

    if let Some((position, character)) = trimmed.chars().enumerate().find(|(_, c)| !is_rule_char(*c)) {
        return Err(VirtualColumnError::InvalidRuleCharacter { character, position });
    }

    let present: Vec<Operator> = Operator::ALL
        .into_iter()
        .filter(|op| trimmed.contains(op.symbol()))
        .collect();
    let operator = match present.as_slice() {
        [op] => *op,
        _ => {
            return Err(VirtualColumnError::AmbiguousOrMissingOperator {
                found: present.len(),
            });
        }
    };

    let parts: Vec<&str> = trimmed.split(operator.symbol()).map(str::trim).collect();
    let (left, right) = match parts.as_slice() {
        [left, right] if !left.is_empty() && !right.is_empty() => (*left, *right),
        _ => {
            return Err(VirtualColumnError::MalformedOperands {
                rule: trimmed.to_string(),
            });
        }
    };

    for column in [left, right] {
        if !catalog.has_column(column) {
            return Err(VirtualColumnError::UnknownColumn {
                column: column.to_string(),
            });
        }
    }

    Ok(ParsedRule {
        left: left.to_string(),
        operator,
        right: right.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{check_existing_columns, parse_rule, validate_new_column_name, Operator, ParsedRule};
    use crate::error::VirtualColumnError;
    use crate::types::{DataType, Field, Schema};

    fn schema(names: &[&str]) -> Schema {
        Schema::new(names.iter().map(|n| Field::new(*n, DataType::Int64)).collect())
    }

    fn labels() -> Schema {
        schema(&["label_one", "label_two"])
    }

    #[test]
    fn parses_each_operator() {
        for (rule, op) in [
            ("label_one+label_two", Operator::Add),
            ("label_one - label_two", Operator::Subtract),
            ("label_one * label_two", Operator::Multiply),
        ] {
            let parsed = parse_rule(rule, &labels()).unwrap();
            assert_eq!(
                parsed,
                ParsedRule {
                    left: "label_one".to_string(),
                    operator: op,
                    right: "label_two".to_string(),
                }
            );
        }
    }

    #[test]
    fn tolerates_surrounding_and_inner_whitespace() {
        let tight = parse_rule("label_one+label_two", &labels()).unwrap();
        let loose = parse_rule("  label_one   +  label_two ", &labels()).unwrap();
        assert_eq!(tight, loose);
        assert_eq!(loose.to_string(), "label_one + label_two");
    }

    #[test]
    fn rejects_disallowed_character_with_position() {
        let err = parse_rule("label&one + label_two", &labels()).unwrap_err();
        assert_eq!(
            err,
            VirtualColumnError::InvalidRuleCharacter {
                character: '&',
                position: 5
            }
        );
    }

    #[test]
    fn character_check_runs_before_column_lookup() {
        let err = parse_rule("missing / label_two", &labels()).unwrap_err();
        assert!(matches!(err, VirtualColumnError::InvalidRuleCharacter { character: '/', .. }));
    }

    #[test]
    fn rejects_missing_operator() {
        let err = parse_rule("label_one label_two", &labels()).unwrap_err();
        assert_eq!(err, VirtualColumnError::AmbiguousOrMissingOperator { found: 0 });
    }

    #[test]
    fn rejects_mixed_operator_kinds() {
        let err = parse_rule("label_one + label_two - label_one", &labels()).unwrap_err();
        assert_eq!(err, VirtualColumnError::AmbiguousOrMissingOperator { found: 2 });
    }

    #[test]
    fn rejects_repeated_operator_as_malformed() {
        let err = parse_rule("label_one + label_two + label_one", &labels()).unwrap_err();
        assert!(matches!(err, VirtualColumnError::MalformedOperands { .. }));
    }

    #[test]
    fn rejects_empty_operand() {
        for rule in ["+ label_two", "label_one -", "   *   "] {
            let err = parse_rule(rule, &labels()).unwrap_err();
            assert!(
                matches!(err, VirtualColumnError::MalformedOperands { .. }),
                "rule {rule:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn rejects_unknown_column() {
        let err = parse_rule("label_five + label_two", &labels()).unwrap_err();
        assert_eq!(
            err,
            VirtualColumnError::UnknownColumn {
                column: "label_five".to_string()
            }
        );
    }

    #[test]
    fn operand_with_inner_space_is_looked_up_verbatim() {
        let err = parse_rule("label one + label_two", &labels()).unwrap_err();
        assert_eq!(
            err,
            VirtualColumnError::UnknownColumn {
                column: "label one".to_string()
            }
        );
    }

    #[test]
    fn new_column_name_rules() {
        assert!(validate_new_column_name("label_three").is_ok());
        assert!(validate_new_column_name("_").is_ok());
        assert!(validate_new_column_name("A_1").is_ok());

        for bad in ["", "label3", "label-three", "label three", "łabel_three", "a_b!"] {
            assert!(
                matches!(
                    validate_new_column_name(bad),
                    Err(VirtualColumnError::InvalidNewColumnName { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn existing_columns_must_not_contain_operators() {
        assert!(check_existing_columns(&labels()).is_ok());
        assert!(check_existing_columns(&Schema::default()).is_ok());

        let err = check_existing_columns(&schema(&["ok_col", "a-b"])).unwrap_err();
        assert_eq!(
            err,
            VirtualColumnError::UnsafeExistingColumnName {
                column: "a-b".to_string()
            }
        );
    }
}
