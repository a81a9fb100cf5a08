use super::error::PipelineError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const DATE_FRAC: &str = "date_frac";
pub const TOTAL_SPOT_NUM: &str = "total_spot_num";
pub const ST_DEV: &str = "st_dev";
pub const OBSERVATION: &str = "observation";
pub const MARKER: &str = "marker";

/// Column layout of the monthly sunspot file, in file order.
pub const OBSERVATION_COLUMNS: [&str; 7] =
    [YEAR, MONTH, DATE_FRAC, TOTAL_SPOT_NUM, ST_DEV, OBSERVATION, MARKER];

/// Column appended by [`rolling_mean`](super::derive::rolling_mean).
pub const ROLLING_AVG: &str = "rolling_avg";
/// Column appended by [`cycle_fold`](super::derive::cycle_fold).
pub const CYCLE: &str = "cycle";

// ---------------------------------------------------------------------------
// CellValue – a single cell in a column
// ---------------------------------------------------------------------------

/// A numeric cell. `Null` is the "no value" marker: an empty source field,
/// a masked sentinel, or a derived value whose window has not filled yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Null,
}

impl CellValue {
    /// Interpret the cell as an `f64`; `None` for `Null`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// `Null` for `None`, `Float` otherwise.
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Float)
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values as optional floats, `None` where the cell is `Null`.
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(CellValue::as_f64).collect()
    }

    /// Promote every integer cell to a float if the column holds any float.
    pub(crate) fn unify_numeric_type(&mut self) {
        let has_float = self
            .values
            .iter()
            .any(|v| matches!(v, CellValue::Float(_)));
        if !has_float {
            return;
        }
        for value in &mut self.values {
            if let CellValue::Integer(i) = *value {
                *value = CellValue::Float(i as f64);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Table – an ordered set of equally long named columns
// ---------------------------------------------------------------------------

/// An in-memory observation table. Every transform returns a new `Table`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns of equal length.
    pub(crate) fn from_columns(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map_or(0, Column::len);
        debug_assert!(columns.iter().all(|c| c.len() == n_rows));
        Self { columns, n_rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column, PipelineError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| PipelineError::ColumnNotFound(name.to_string()))
    }

    /// Shorthand for `column(name)?.numeric_values()`.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>, PipelineError> {
        Ok(self.column(name)?.numeric_values())
    }

    /// New table with only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Table, PipelineError> {
        let columns = names
            .iter()
            .map(|name| self.column(name).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table {
            columns,
            n_rows: self.n_rows,
        })
    }

    /// New table with the rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), indices.iter().map(|&i| c.values[i]).collect()))
            .collect();
        Table {
            columns,
            n_rows: indices.len(),
        }
    }

    /// New table with `column` appended, replacing any column of the same name.
    pub fn with_column(&self, column: Column) -> Table {
        debug_assert_eq!(column.len(), self.n_rows);
        let mut columns = self.columns.clone();
        match columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => columns.push(column),
        }
        Table {
            columns,
            n_rows: self.n_rows,
        }
    }

    /// `[x, y]` pairs for rows where both cells are defined, in row order.
    pub fn xy_points(&self, x: &str, y: &str) -> Result<Vec<[f64; 2]>, PipelineError> {
        let xs = self.column(x)?;
        let ys = self.column(y)?;
        Ok(xs
            .values
            .iter()
            .zip(&ys.values)
            .filter_map(|(xv, yv)| Some([xv.as_f64()?, yv.as_f64()?]))
            .collect())
    }
}
