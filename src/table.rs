//! Tabular result of a windowing operation.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::na::NA;
use crate::temporal::Temporal;

/// Windowed result: an ordered time index, ordered column names and
/// numeric cells that may be missing
///
/// The index is expected to be ascending; windowing produces it that way,
/// and column-wise concatenation relies on it for alignment.
#[derive(Debug, Clone)]
pub struct ResultTable<T: Temporal> {
    index: Vec<T>,
    columns: Vec<String>,
    cells: Vec<Vec<NA<f64>>>,
}

impl<T: Temporal> ResultTable<T> {
    /// Create a table, validating that the index and every row agree with
    /// the declared shape
    pub fn new(index: Vec<T>, columns: Vec<String>, cells: Vec<Vec<NA<f64>>>) -> Result<Self> {
        if index.len() != cells.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: cells.len(),
            });
        }
        for row in &cells {
            if row.len() != columns.len() {
                return Err(Error::InconsistentRowWidth {
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(ResultTable {
            index,
            columns,
            cells,
        })
    }

    // Internal constructor for callers that uphold the shape invariants
    pub(crate) fn from_parts(
        index: Vec<T>,
        columns: Vec<String>,
        cells: Vec<Vec<NA<f64>>>,
    ) -> Self {
        ResultTable {
            index,
            columns,
            cells,
        }
    }

    /// Create an empty table with no rows and no columns
    pub fn empty() -> Self {
        ResultTable {
            index: Vec::new(),
            columns: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Time index, in order
    pub fn index(&self) -> &[T] {
        &self.index
    }

    /// Cell rows, parallel to the index
    pub fn cells(&self) -> &[Vec<NA<f64>>] {
        &self.cells
    }

    /// Get a single cell by row and column position
    pub fn get(&self, row: usize, col: usize) -> Option<NA<f64>> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Relabel the columns
    ///
    /// Fails when the new label count differs from the column count.
    pub fn set_columns(&mut self, columns: Vec<String>) -> Result<()> {
        if columns.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                expected: self.columns.len(),
                actual: columns.len(),
            });
        }
        self.columns = columns;
        Ok(())
    }

    /// Replace every missing cell with the given value
    pub fn fill_missing(&mut self, value: f64) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                if cell.is_na() {
                    *cell = NA::Value(value);
                }
            }
        }
    }

    /// Check whether any cell is missing
    pub fn has_missing(&self) -> bool {
        self.cells
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_na()))
    }

    /// Export as a plain ordered list of (timestamp, cells) rows
    pub fn to_rows(&self) -> Vec<(T, Vec<Option<f64>>)> {
        self.index
            .iter()
            .cloned()
            .zip(
                self.cells
                    .iter()
                    .map(|row| row.iter().map(|cell| (*cell).into()).collect()),
            )
            .collect()
    }

    /// Export as JSON in split orientation
    ///
    /// `{"columns": [...], "index": [...], "data": [[...]]}` — the split
    /// layout keeps duplicate column labels intact, which a keyed record
    /// layout cannot.
    pub fn to_json(&self) -> Result<String>
    where
        T: Serialize,
    {
        let value = serde_json::json!({
            "columns": self.columns,
            "index": self.index,
            "data": self.cells,
        });
        Ok(serde_json::to_string(&value)?)
    }

    /// Concatenate tables column-wise, aligning rows on the sorted union of
    /// their indices
    ///
    /// Index entries absent from a table become missing cells (or zero when
    /// `fill_missing` is set) for that table's columns. The result columns
    /// are the input tables' columns flattened in order, labels kept as-is.
    ///
    /// Fails with `Error::Alignment` when any input index is unsorted or
    /// contains duplicates, since row alignment is then ambiguous.
    pub fn concat(tables: Vec<ResultTable<T>>, fill_missing: bool) -> Result<ResultTable<T>> {
        if tables.is_empty() {
            return Ok(ResultTable::empty());
        }

        for table in &tables {
            for pair in table.index.windows(2) {
                if pair[1] < pair[0] {
                    return Err(Error::Alignment(
                        "cannot align on an unsorted index".to_string(),
                    ));
                }
                if pair[0] == pair[1] {
                    return Err(Error::Alignment(format!(
                        "cannot align on an index with duplicate entry {:?}",
                        pair[0]
                    )));
                }
            }
        }

        let mut union: Vec<T> = tables
            .iter()
            .flat_map(|table| table.index.iter().cloned())
            .collect();
        union.sort();
        union.dedup();

        let columns: Vec<String> = tables
            .iter()
            .flat_map(|table| table.columns.iter().cloned())
            .collect();

        let absent = if fill_missing { NA::Value(0.0) } else { NA::NA };
        let mut cells = Vec::with_capacity(union.len());
        for ts in &union {
            let mut row = Vec::with_capacity(columns.len());
            for table in &tables {
                match table.index.binary_search(ts) {
                    Ok(pos) => row.extend(table.cells[pos].iter().copied()),
                    Err(_) => row.extend(std::iter::repeat(absent).take(table.columns.len())),
                }
            }
            cells.push(row);
        }

        Ok(ResultTable {
            index: union,
            columns,
            cells,
        })
    }
}

impl<T: Temporal + fmt::Display> fmt::Display for ResultTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self
            .index
            .iter()
            .map(|ts| ts.to_string().len())
            .max()
            .unwrap_or(0);

        write!(f, "{:index_width$}", "")?;
        for name in &self.columns {
            write!(f, "  {:>12}", name)?;
        }
        writeln!(f)?;

        for (ts, row) in self.index.iter().zip(&self.cells) {
            write!(f, "{:index_width$}", ts.to_string())?;
            for cell in row {
                write!(f, "  {:>12}", cell.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
