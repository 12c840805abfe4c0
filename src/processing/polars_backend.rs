//! Virtual columns on Polars [`DataFrame`]s.
//!
//! Rules are validated exactly as for [`crate::types::DataSet`]; the arithmetic itself is a
//! Polars expression (`col(left) <op> col(right)`), so dtype promotion and null handling follow
//! Polars.

use polars::prelude::{col, DataFrame, Expr, IntoLazy, PolarsError};

use crate::error::{VirtualColumnError, VirtualColumnResult};
use crate::rule::{check_existing_columns, parse_rule, validate_new_column_name, ColumnCatalog, Operator};

use super::observability::EvaluationStats;
use super::virtual_column::{report, EvaluationOptions};

impl ColumnCatalog for DataFrame {
    fn column_names(&self) -> Vec<&str> {
        self.get_column_names().into_iter().map(|n| n.as_str()).collect()
    }
}

impl From<PolarsError> for VirtualColumnError {
    fn from(e: PolarsError) -> Self {
        VirtualColumnError::Backend {
            message: e.to_string(),
        }
    }
}

/// Returns `df` plus a column `new_column` computed from `rule`, or [`DataFrame::empty`] if
/// anything is rejected.
pub fn add_virtual_column_df(df: &DataFrame, rule: &str, new_column: &str) -> DataFrame {
    try_add_virtual_column_df(df, rule, new_column).unwrap_or_else(|_| DataFrame::empty())
}

/// Returns `df` plus a column `new_column` computed from `rule`.
pub fn try_add_virtual_column_df(
    df: &DataFrame,
    rule: &str,
    new_column: &str,
) -> VirtualColumnResult<DataFrame> {
    try_add_virtual_column_df_with(df, rule, new_column, &EvaluationOptions::default())
}

/// [`try_add_virtual_column_df`] with explicit [`EvaluationOptions`].
///
/// `parallel_min_rows` is ignored; Polars schedules its own work.
pub fn try_add_virtual_column_df_with(
    df: &DataFrame,
    rule: &str,
    new_column: &str,
    options: &EvaluationOptions,
) -> VirtualColumnResult<DataFrame> {
    let outcome = evaluate(df, rule, new_column);
    report(options, rule, new_column, outcome)
}

fn evaluate(
    df: &DataFrame,
    rule: &str,
    new_column: &str,
) -> VirtualColumnResult<(DataFrame, EvaluationStats)> {
    check_existing_columns(df)?;
    validate_new_column_name(new_column)?;
    let parsed = parse_rule(rule, df)?;

    let expr = binary_expr(
        parsed.operator,
        col(parsed.left.as_str()),
        col(parsed.right.as_str()),
    );
    let out = df
        .clone()
        .lazy()
        .with_column(expr.alias(new_column))
        .collect()?;

    let stats = EvaluationStats {
        rows: out.height(),
        operator: parsed.operator,
    };
    Ok((out, stats))
}

fn binary_expr(op: Operator, left: Expr, right: Expr) -> Expr {
    match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
    }
}
