//! Virtual-column evaluation.
//!
//! The processing layer turns a rule such as `"price * quantity"` into a new column of an
//! in-memory table. Two table types are supported:
//!
//! - [`crate::types::DataSet`] via [`add_virtual_column()`] / [`try_add_virtual_column()`]
//! - Polars `DataFrame` via [`add_virtual_column_df()`] / [`try_add_virtual_column_df()`]
//!
//! The `add_*` functions return an empty table when anything is rejected. The `try_*` functions
//! return a [`crate::VirtualColumnError`] naming the reason.
//!
//! ## Example
//!
//! ```rust
//! use rust_virtual_columns::processing::{add_virtual_column, try_add_virtual_column};
//! use rust_virtual_columns::types::{DataSet, DataType, Field, Schema, Value};
//! use rust_virtual_columns::VirtualColumnError;
//!
//! let schema = Schema::new(vec![
//!     Field::new("unit_price", DataType::Int64),
//!     Field::new("qty_sold", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(3), Value::Int64(2)],
//!         vec![Value::Int64(5), Value::Int64(4)],
//!     ],
//! );
//!
//! let out = add_virtual_column(&ds, "unit_price * qty_sold", "line_total");
//! assert_eq!(
//!     out.column("line_total"),
//!     Some(vec![&Value::Int64(6), &Value::Int64(20)])
//! );
//!
//! // No underscore in the new name.
//! assert!(add_virtual_column(&ds, "unit_price * qty_sold", "total").is_empty());
//! assert!(matches!(
//!     try_add_virtual_column(&ds, "unit_price / qty_sold", "line_total"),
//!     Err(VirtualColumnError::InvalidRuleCharacter { character: '/', .. })
//! ));
//! ```

pub mod observability;
pub mod polars_backend;
pub mod virtual_column;

pub use observability::{
    CompositeObserver, EvaluationContext, EvaluationObserver, EvaluationStats, StdErrObserver,
};
pub use polars_backend::{add_virtual_column_df, try_add_virtual_column_df, try_add_virtual_column_df_with};
pub use virtual_column::{
    add_virtual_column, add_virtual_columns, try_add_virtual_column, try_add_virtual_column_with,
    try_add_virtual_columns, try_add_virtual_columns_with, EvaluationOptions, VirtualColumnSpec,
};
