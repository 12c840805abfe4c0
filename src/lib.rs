//! `rust-virtual-columns` adds a derived ("virtual") column to an in-memory table from a rule
//! that combines two existing columns with one arithmetic operator.
//!
//! The primary entrypoint is [`processing::add_virtual_column`], which returns the input
//! [`types::DataSet`] plus the new column, or an empty dataset when the rule or the column name
//! is rejected. [`processing::try_add_virtual_column`] returns the rejection reason instead.
//! Polars users get the same contract through [`processing::add_virtual_column_df`].
//!
//! ## Rules
//!
//! A rule is `<column> <op> <column>` with `op` one of `+`, `-`, `*`:
//!
//! - surrounding whitespace and spaces around the operator are ignored;
//! - the rule may only contain ASCII letters, digits, `_`, spaces and the operators;
//! - exactly one kind of operator may appear, splitting the rule into two non-empty operands;
//! - both operands must name existing columns.
//!
//! The new column name must be non-empty, use only ASCII letters, digits and `_`, and contain
//! at least one `_`. Columns already in the dataset must not contain an operator character.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_virtual_columns::processing::add_virtual_column;
//! use rust_virtual_columns::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("label_one", DataType::Int64),
//!     Field::new("label_two", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(1)],
//!         vec![Value::Int64(1), Value::Int64(1)],
//!     ],
//! );
//!
//! let out = add_virtual_column(&ds, "  label_one + label_two ", "label_three");
//! assert_eq!(
//!     out.column("label_three"),
//!     Some(vec![&Value::Int64(2), &Value::Int64(2)])
//! );
//!
//! // Unknown column -> empty dataset.
//! assert!(add_virtual_column(&ds, "label_five + label_two", "label_three").is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`rule`]: rule parsing, operators and name checks
//! - [`processing`]: virtual-column evaluation, options and observers
//! - [`error`]: the rejection reasons

pub mod error;
pub mod processing;
pub mod rule;
pub mod types;

pub use error::{VirtualColumnError, VirtualColumnResult};
