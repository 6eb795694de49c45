use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// One value in a [`ResultTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Date(NaiveDate),
    Number(f64),
    /// Epoch seconds.
    Integer(i64),
    Text(String),
    /// The service reported no observation.
    Missing,
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Date(d) => write!(f, "{d}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => f.write_str("ND"),
        }
    }
}

/// Inferred type of a column. Every non-missing cell in the column has this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Date,
    Number,
    Integer,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    kind: ColumnType,
    cells: Vec<Cell>,
}

impl Column {
    pub(crate) fn new(name: impl Into<String>, kind: ColumnType, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnType {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Numeric view; `None` marks missing or non-numeric cells.
    pub fn f64_values(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(Cell::as_f64).collect()
    }

    pub fn date_values(&self) -> Vec<Option<NaiveDate>> {
        self.cells.iter().map(Cell::as_date).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }
}

/// Rows × named, typed columns, in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultTable {
    columns: Vec<Column>,
    height: usize,
}

impl ResultTable {
    /// All columns must have the same length.
    pub(crate) fn new(columns: Vec<Column>, height: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.cells.len() == height));
        Self { columns, height }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The first date-typed column, normally `Tarih`.
    pub fn date_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.kind == ColumnType::Date)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        self.column(column)?.cells.get(row)
    }

    /// Cells of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        (row < self.height).then(|| self.columns.iter().map(|c| &c.cells[row]).collect())
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> ResultTable {
        let n = n.min(self.height);
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.kind, c.cells[..n].to_vec()))
            .collect();
        ResultTable::new(columns, n)
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.column_names().join("\t"))?;
        for i in 0..self.height {
            let cells: Vec<String> = self.columns.iter().map(|c| c.cells[i].to_string()).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        write!(f, "[{} rows x {} columns]", self.height, self.width())
    }
}
