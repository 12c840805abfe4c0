//! Core data model types.
//!
//! Virtual columns are evaluated against an in-memory [`DataSet`]: a [`Schema`] (a list of typed
//! [`Field`]s) plus row-major [`Value`] storage.

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the columns of a [`DataSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns `true` if a field named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Numeric view of the value, promoting integers to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// A dataset with no columns and no rows.
    ///
    /// Virtual-column evaluation returns this value to signal a rejected rule.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the dataset has neither columns nor rows.
    pub fn is_empty(&self) -> bool {
        self.schema.fields.is_empty() && self.rows.is_empty()
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Values of column `name` in row order, or `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(|row| row.get(idx).unwrap_or(&Value::Null)).collect())
    }

    /// Create a new dataset with `field` set to the value `compute` returns for each row.
    ///
    /// A new field is appended after the existing ones. If a field with the same name already
    /// exists, it is replaced in place (type and values). `self` is left untouched.
    pub fn with_column<F>(&self, field: Field, mut compute: F) -> Self
    where
        F: FnMut(&[Value]) -> Value,
    {
        let cells = self.rows.iter().map(|row| compute(row.as_slice())).collect();
        self.with_column_values(field, cells)
    }

    /// Same as [`DataSet::with_column`], with the new cells already computed in row order.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len()` differs from [`DataSet::row_count`].
    pub fn with_column_values(&self, field: Field, cells: Vec<Value>) -> Self {
        assert!(
            cells.len() == self.rows.len(),
            "column length {} does not match row count {}",
            cells.len(),
            self.rows.len()
        );

        let mut schema = self.schema.clone();
        let replace_at = schema.index_of(&field.name);
        match replace_at {
            Some(idx) => schema.fields[idx] = field,
            None => schema.fields.push(field),
        }

        let rows = self
            .rows
            .iter()
            .zip(cells)
            .map(|(row, cell)| {
                let mut out = row.clone();
                match replace_at {
                    Some(idx) if idx < out.len() => out[idx] = cell,
                    _ => out.push(cell),
                }
                out
            })
            .collect();

        Self { schema, rows }
    }
}
