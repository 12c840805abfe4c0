//! Virtual-column evaluation for [`crate::types::DataSet`].

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{VirtualColumnError, VirtualColumnResult};
use crate::rule::{check_existing_columns, parse_rule, validate_new_column_name};
use crate::types::{DataSet, DataType, Field, Value};

use super::observability::{EvaluationContext, EvaluationObserver, EvaluationStats};

/// Options controlling virtual-column evaluation.
#[derive(Clone, Default)]
pub struct EvaluationOptions {
    /// Optional observer notified of every success and rejection.
    pub observer: Option<Arc<dyn EvaluationObserver>>,
    /// Compute the new column on the rayon pool once the dataset has at least this many rows.
    ///
    /// `None` always computes sequentially. Output is identical either way.
    pub parallel_min_rows: Option<usize>,
}

impl fmt::Debug for EvaluationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationOptions")
            .field("observer", &self.observer.is_some())
            .field("parallel_min_rows", &self.parallel_min_rows)
            .finish()
    }
}

/// One virtual column to add: `new_column = rule`.
///
/// Deserializable so definitions can live in configuration, e.g.
/// `{"rule": "price * quantity", "new_column": "line_total"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualColumnSpec {
    pub rule: String,
    pub new_column: String,
}

impl VirtualColumnSpec {
    pub fn new(rule: impl Into<String>, new_column: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            new_column: new_column.into(),
        }
    }
}

/// Returns `dataset` plus a column `new_column` computed from `rule`, or an empty [`DataSet`]
/// if anything is rejected.
///
/// Use [`try_add_virtual_column`] to learn why a rule was rejected.
pub fn add_virtual_column(dataset: &DataSet, rule: &str, new_column: &str) -> DataSet {
    try_add_virtual_column(dataset, rule, new_column).unwrap_or_else(|_| DataSet::empty())
}

/// Returns `dataset` plus a column `new_column` computed from `rule`.
///
/// Checks, in order: existing column names are free of operator characters, `new_column` is a
/// valid name, then the rule itself (see [`crate::rule::parse_rule`]). The input dataset is
/// never modified.
pub fn try_add_virtual_column(
    dataset: &DataSet,
    rule: &str,
    new_column: &str,
) -> VirtualColumnResult<DataSet> {
    try_add_virtual_column_with(dataset, rule, new_column, &EvaluationOptions::default())
}

/// [`try_add_virtual_column`] with explicit [`EvaluationOptions`].
pub fn try_add_virtual_column_with(
    dataset: &DataSet,
    rule: &str,
    new_column: &str,
    options: &EvaluationOptions,
) -> VirtualColumnResult<DataSet> {
    let outcome = evaluate(dataset, rule, new_column, options);
    report(options, rule, new_column, outcome)
}

/// Apply `specs` in order, each rule seeing the columns added before it.
///
/// Returns an empty [`DataSet`] if any spec is rejected.
pub fn add_virtual_columns(dataset: &DataSet, specs: &[VirtualColumnSpec]) -> DataSet {
    try_add_virtual_columns(dataset, specs).unwrap_or_else(|_| DataSet::empty())
}

/// Apply `specs` in order, stopping at the first rejected spec.
pub fn try_add_virtual_columns(
    dataset: &DataSet,
    specs: &[VirtualColumnSpec],
) -> VirtualColumnResult<DataSet> {
    try_add_virtual_columns_with(dataset, specs, &EvaluationOptions::default())
}

/// [`try_add_virtual_columns`] with explicit [`EvaluationOptions`].
pub fn try_add_virtual_columns_with(
    dataset: &DataSet,
    specs: &[VirtualColumnSpec],
    options: &EvaluationOptions,
) -> VirtualColumnResult<DataSet> {
    let mut current: Option<DataSet> = None;
    for spec in specs {
        let base = current.as_ref().unwrap_or(dataset);
        current = Some(try_add_virtual_column_with(
            base,
            &spec.rule,
            &spec.new_column,
            options,
        )?);
    }
    Ok(current.unwrap_or_else(|| dataset.clone()))
}

fn evaluate(
    dataset: &DataSet,
    rule: &str,
    new_column: &str,
    options: &EvaluationOptions,
) -> VirtualColumnResult<(DataSet, EvaluationStats)> {
    check_existing_columns(&dataset.schema)?;
    validate_new_column_name(new_column)?;
    let parsed = parse_rule(rule, &dataset.schema)?;

    let (left_idx, left_type) = resolve(dataset, &parsed.left)?;
    let (right_idx, right_type) = resolve(dataset, &parsed.right)?;
    let op = parsed.operator;

    let cell = move |row: &Vec<Value>| {
        op.apply(
            row.get(left_idx).unwrap_or(&Value::Null),
            row.get(right_idx).unwrap_or(&Value::Null),
        )
    };
    let parallel = options
        .parallel_min_rows
        .is_some_and(|min| dataset.row_count() >= min);
    let cells: Vec<Value> = if parallel {
        dataset.rows.par_iter().map(cell).collect()
    } else {
        dataset.rows.iter().map(cell).collect()
    };

    let field = Field::new(new_column, op.result_type(left_type, right_type));
    let out = dataset.with_column_values(field, cells);
    let stats = EvaluationStats {
        rows: out.row_count(),
        operator: op,
    };
    Ok((out, stats))
}

fn resolve(dataset: &DataSet, column: &str) -> VirtualColumnResult<(usize, DataType)> {
    dataset
        .schema
        .index_of(column)
        .map(|idx| (idx, dataset.schema.fields[idx].data_type))
        .ok_or_else(|| VirtualColumnError::UnknownColumn {
            column: column.to_string(),
        })
}

/// Log the outcome and forward it to the configured observer.
pub(crate) fn report<T>(
    options: &EvaluationOptions,
    rule: &str,
    new_column: &str,
    outcome: VirtualColumnResult<(T, EvaluationStats)>,
) -> VirtualColumnResult<T> {
    let ctx = EvaluationContext {
        rule: rule.to_string(),
        new_column: new_column.to_string(),
    };

    match outcome {
        Ok((out, stats)) => {
            log::debug!(
                "virtual column '{}' = {:?} ({} rows, op {})",
                new_column,
                rule,
                stats.rows,
                stats.operator
            );
            if let Some(obs) = &options.observer {
                obs.on_success(&ctx, stats);
            }
            Ok(out)
        }
        Err(e) => {
            log::debug!("rejected virtual column '{}' = {:?}: {}", new_column, rule, e);
            if let Some(obs) = &options.observer {
                obs.on_failure(&ctx, &e);
            }
            Err(e)
        }
    }
}
