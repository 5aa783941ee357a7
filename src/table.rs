//! In-memory tabular container with named-column addressing
//!
//! A [`Table`] owns an ordered set of column names and a vector of rows.
//! Every mutation upholds one structural invariant: each row has exactly as
//! many fields as there are columns. Mutations are all-or-nothing; a rejected
//! row or column never partially applies.
//!
//! Column views alias the table's storage on purpose ("edit this column in
//! place"). Any structural mutation — inserting or deleting rows or columns —
//! invalidates outstanding views and row references; the borrow checker
//! enforces this, since views hold a borrow of the table for their whole
//! lifetime.

use indexmap::IndexSet;

use crate::csv::CsvEncoder;
use crate::error::{CsvError, Result};

/// Container of CSV data: insertion-ordered named columns over uniform rows
///
/// # Examples
///
/// ```
/// use csvtable::Table;
///
/// let mut table = Table::new();
/// table.add_column("name", "").unwrap();
/// table.add_column("age", "").unwrap();
/// table.add_row(vec!["Alice".into(), "30".into()]).unwrap();
///
/// assert_eq!(table.get(0, "name").unwrap(), "Alice");
/// let lines: Vec<_> = table.lines().collect();
/// assert_eq!(lines, vec!["name,age", "Alice,30"]);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    // Column name -> position; insertion-ordered, positions stay contiguous
    columns: IndexSet<String>,
    rows: Vec<Vec<String>>,
    encoder: CsvEncoder,
}

impl Table {
    /// Create an empty table rendering with the default `,` and `"`
    pub fn new() -> Self {
        Table {
            columns: IndexSet::new(),
            rows: Vec::new(),
            encoder: CsvEncoder::default(),
        }
    }

    /// Create an empty table rendering with a custom delimiter and quote
    ///
    /// Fails with a configuration error under the same rules as the encoder.
    pub fn with_format(delimiter: &str, quote: char) -> Result<Self> {
        Ok(Table {
            columns: IndexSet::new(),
            rows: Vec::new(),
            encoder: CsvEncoder::new(delimiter, quote)?,
        })
    }

    /// The delimiter used when rendering
    pub fn delimiter(&self) -> &str {
        self.encoder.delimiter()
    }

    /// The quote character used when rendering
    pub fn quote(&self) -> char {
        self.encoder.quote()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in position order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|name| name.as_str())
    }

    /// Zero-based position of a named column
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .get_index_of(name)
            .ok_or_else(|| CsvError::ValidationError(format!("Unknown column: {}", name)))
    }

    /// Borrow one row by position
    pub fn row(&self, index: usize) -> Result<&[String]> {
        self.rows
            .get(index)
            .map(|row| row.as_slice())
            .ok_or_else(|| self.row_range_error(index))
    }

    /// Mutably borrow one row by position
    ///
    /// Returned as a slice so the row's width cannot change.
    pub fn row_mut(&mut self, index: usize) -> Result<&mut [String]> {
        if index >= self.rows.len() {
            return Err(self.row_range_error(index));
        }
        Ok(self.rows[index].as_mut_slice())
    }

    /// Iterate all rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// Read one field by row position and column name
    pub fn get(&self, row: usize, column: &str) -> Result<&str> {
        let position = self.column_position(column)?;
        let row = self.row(row)?;
        Ok(&row[position])
    }

    /// Overwrite one field by row position and column name
    pub fn set(&mut self, row: usize, column: &str, value: impl Into<String>) -> Result<()> {
        let position = self.column_position(column)?;
        let row = self.row_mut(row)?;
        row[position] = value.into();
        Ok(())
    }

    /// Append one row; its width must match the column count exactly
    pub fn add_row(&mut self, row: Vec<String>) -> Result<()> {
        self.check_width(&row)?;
        self.rows.push(row);
        Ok(())
    }

    /// Append several rows at once
    ///
    /// All-or-nothing: every row is validated before any is inserted.
    pub fn add_rows(&mut self, rows: Vec<Vec<String>>) -> Result<()> {
        for row in &rows {
            self.check_width(row)?;
        }
        self.rows.extend(rows);
        Ok(())
    }

    /// Insert one row before position `index`
    pub fn insert_row(&mut self, index: usize, row: Vec<String>) -> Result<()> {
        if index > self.rows.len() {
            return Err(self.row_range_error(index));
        }
        self.check_width(&row)?;
        self.rows.insert(index, row);
        Ok(())
    }

    /// Delete one row by position
    pub fn delete_row(&mut self, index: usize) -> Result<()> {
        if index >= self.rows.len() {
            return Err(self.row_range_error(index));
        }
        self.rows.remove(index);
        Ok(())
    }

    /// Delete the rows in `start..end`
    pub fn delete_rows(&mut self, range: std::ops::Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.rows.len() {
            return Err(CsvError::ValidationError(format!(
                "Row range {}..{} out of range for {} rows",
                range.start,
                range.end,
                self.rows.len()
            )));
        }
        self.rows.drain(range);
        Ok(())
    }

    /// Append a new column at the last position
    ///
    /// `fill` is stored into the new position of every existing row. A name
    /// collision is a validation error and leaves the table unchanged.
    pub fn add_column(&mut self, name: impl Into<String>, fill: &str) -> Result<()> {
        let name = name.into();
        if self.columns.contains(&name) {
            return Err(CsvError::ValidationError(format!(
                "Duplicate column: {}",
                name
            )));
        }
        self.columns.insert(name);
        for row in &mut self.rows {
            row.push(fill.to_string());
        }
        Ok(())
    }

    /// Delete a column and its position from every row
    pub fn delete_column(&mut self, name: &str) -> Result<()> {
        let position = self.column_position(name)?;
        self.columns.shift_remove_index(position);
        for row in &mut self.rows {
            row.remove(position);
        }
        Ok(())
    }

    /// Remove all columns and rows
    pub fn clear(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }

    /// Read-only view of one column across all rows
    pub fn column(&self, name: &str) -> Result<ColumnView<'_>> {
        let position = self.column_position(name)?;
        Ok(ColumnView {
            rows: &self.rows,
            position,
        })
    }

    /// Mutable view of one column, writing through to the table's storage
    ///
    /// The view borrows the table mutably for its whole lifetime, so no
    /// structural mutation can happen while it is alive.
    pub fn column_mut(&mut self, name: &str) -> Result<ColumnViewMut<'_>> {
        let position = self.column_position(name)?;
        Ok(ColumnViewMut {
            rows: &mut self.rows,
            position,
        })
    }

    /// Detached copies of every value in one column, in row order
    pub fn column_values(&self, name: &str) -> Result<Vec<String>> {
        let position = self.column_position(name)?;
        Ok(self.rows.iter().map(|row| row[position].clone()).collect())
    }

    /// The header line: column names in position order, encoded
    pub fn header_line(&self) -> String {
        self.encoder.encode_row(self.columns.iter())
    }

    /// Render the table as text lines: the header first, then one encoded
    /// line per row, all through the table's own delimiter and quote
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.header_line()).chain(self.encoder.encode(self.rows.iter()))
    }

    fn check_width(&self, row: &[String]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CsvError::ValidationError(format!(
                "Row has {} fields but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        Ok(())
    }

    fn row_range_error(&self, index: usize) -> CsvError {
        CsvError::ValidationError(format!(
            "Row index {} out of range for {} rows",
            index,
            self.rows.len()
        ))
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::new()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        // IndexSet equality ignores order; column order matters here
        self.columns.iter().eq(other.columns.iter())
            && self.rows == other.rows
            && self.encoder == other.encoder
    }
}

/// Live read-only projection of one column position across all rows
pub struct ColumnView<'t> {
    rows: &'t [Vec<String>],
    position: usize,
}

impl<'t> ColumnView<'t> {
    /// The column's zero-based position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of values (the table's row count)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at row `index`
    pub fn get(&self, index: usize) -> Option<&'t str> {
        self.rows.get(index).map(|row| row[self.position].as_str())
    }

    /// Iterate the column's values in row order
    pub fn iter(&self) -> impl Iterator<Item = &'t str> + '_ {
        let position = self.position;
        self.rows.iter().map(move |row| row[position].as_str())
    }
}

/// Live mutable projection of one column position across all rows
///
/// Writes go straight into the owning table's storage.
pub struct ColumnViewMut<'t> {
    rows: &'t mut [Vec<String>],
    position: usize,
}

impl ColumnViewMut<'_> {
    /// The column's zero-based position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of values (the table's row count)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at row `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|row| row[self.position].as_str())
    }

    /// Overwrite the value at row `index`
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let len = self.rows.len();
        let row = self.rows.get_mut(index).ok_or_else(|| {
            CsvError::ValidationError(format!(
                "Row index {} out of range for {} rows",
                index, len
            ))
        })?;
        row[self.position] = value.into();
        Ok(())
    }

    /// Iterate the column's values mutably, in row order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut String> + '_ {
        let position = self.position;
        self.rows.iter_mut().map(move |row| &mut row[position])
    }
}
