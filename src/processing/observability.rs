use std::fmt;
use std::sync::Arc;

use crate::error::VirtualColumnError;
use crate::rule::Operator;

/// Context about a virtual-column evaluation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationContext {
    /// The rule as supplied by the caller (untrimmed).
    pub rule: String,
    /// Name requested for the new column.
    pub new_column: String,
}

/// Minimal stats reported on successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationStats {
    /// Number of rows in the produced column.
    pub rows: usize,
    /// Operator the rule resolved to.
    pub operator: Operator,
}

/// Observer interface for evaluation outcomes.
///
/// Implementors can record metrics, logs, or collect rejected rules for review.
pub trait EvaluationObserver: Send + Sync {
    /// Called when a virtual column was produced.
    fn on_success(&self, _ctx: &EvaluationContext, _stats: EvaluationStats) {}

    /// Called when the rule or a column name was rejected.
    fn on_failure(&self, _ctx: &EvaluationContext, _error: &VirtualColumnError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn EvaluationObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn EvaluationObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl EvaluationObserver for CompositeObserver {
    fn on_success(&self, ctx: &EvaluationContext, stats: EvaluationStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &EvaluationContext, error: &VirtualColumnError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }
}

/// Logs evaluation events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl EvaluationObserver for StdErrObserver {
    fn on_success(&self, ctx: &EvaluationContext, stats: EvaluationStats) {
        eprintln!(
            "[virtual-column][ok] column={} rule={:?} op={} rows={}",
            ctx.new_column, ctx.rule, stats.operator, stats.rows
        );
    }

    fn on_failure(&self, ctx: &EvaluationContext, error: &VirtualColumnError) {
        eprintln!(
            "[virtual-column][rejected] column={} rule={:?} err={}",
            ctx.new_column, ctx.rule, error
        );
    }
}
