//! CSV file reading with streaming, multi-line-aware parsing
//!
//! The reader pulls physical lines from a buffered file and feeds them to a
//! parser cursor, so quoted fields spanning several lines come back as one
//! record.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::csv::CsvParser;
use crate::error::{CsvError, Result};
use crate::table::Table;

/// CSV file reader
///
/// Reads records one at a time through an iterator pattern, or loads a whole
/// file into a [`Table`] with [`read_table`](CsvReader::read_table).
///
/// # Examples
///
/// ```no_run
/// use csvtable::CsvReader;
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
/// for row_result in reader.rows() {
///     let row = row_result.unwrap();
///     println!("{:?}", row);
/// }
/// ```
///
/// # Loading into a table
///
/// ```no_run
/// use csvtable::CsvReader;
///
/// let mut reader = CsvReader::open("people.csv")
///     .unwrap()
///     .with_format("|", '"')
///     .unwrap();
/// let table = reader.read_table().unwrap();
/// println!("{} rows", table.row_count());
/// ```
pub struct CsvReader {
    // None once closed
    reader: Option<BufReader<File>>,
    parser: CsvParser,
    line_buffer: String,

    // Caller-supplied column names; empty means derive from the first record
    columns: Vec<String>,
    headers: Vec<String>,
    row_count: u64,
}

impl CsvReader {
    /// Open a CSV file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| CsvError::ReadError(format!("Failed to open CSV file: {}", e)))?;

        Ok(CsvReader {
            reader: Some(BufReader::new(file)),
            parser: CsvParser::default(),
            line_buffer: String::with_capacity(1024),
            columns: Vec::new(),
            headers: Vec::new(),
            row_count: 0,
        })
    }

    /// Set a custom delimiter and quote character (builder pattern)
    ///
    /// Fails with a configuration error if the quote occurs inside the
    /// delimiter or the delimiter is empty.
    pub fn with_format(mut self, delimiter: &str, quote: char) -> Result<Self> {
        self.parser = CsvParser::new(delimiter, quote)?;
        Ok(self)
    }

    /// Supply column names up front (builder pattern)
    ///
    /// With explicit columns, [`read_table`](CsvReader::read_table) treats
    /// the first record as data instead of a header.
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = names.into_iter().map(|name| name.into()).collect();
        self
    }

    /// Column names used by the last [`read_table`](CsvReader::read_table)
    pub fn headers(&self) -> Option<&[String]> {
        if self.headers.is_empty() {
            None
        } else {
            Some(&self.headers)
        }
    }

    /// Number of records read so far
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Read one record
    ///
    /// Consumes as many physical lines as the record spans. Returns
    /// `Ok(None)` at end of file, and a usage error once the reader has been
    /// closed. No header handling or width normalization happens here.
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| CsvError::UsageError("The reader is already closed".to_string()))?;

        let mut cursor = self.parser.cursor();
        loop {
            self.line_buffer.clear();
            let bytes_read = reader
                .read_line(&mut self.line_buffer)
                .map_err(|e| CsvError::ReadError(format!("Failed to read line: {}", e)))?;

            if bytes_read == 0 {
                // EOF; an open enclosure is closed implicitly
                let row = cursor.finish();
                if row.is_some() {
                    self.row_count += 1;
                }
                return Ok(row);
            }

            if self.line_buffer.ends_with('\n') {
                self.line_buffer.pop();
                if self.line_buffer.ends_with('\r') {
                    self.line_buffer.pop();
                }
            }

            if let Some(row) = cursor.feed_line(&self.line_buffer) {
                self.row_count += 1;
                return Ok(Some(row));
            }
        }
    }

    /// Iterate over the remaining records
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvtable::CsvReader;
    ///
    /// let mut reader = CsvReader::open("data.csv").unwrap();
    /// for row_result in reader.rows() {
    ///     println!("{:?}", row_result.unwrap());
    /// }
    /// ```
    pub fn rows(&mut self) -> CsvRowIterator<'_> {
        CsvRowIterator { reader: self }
    }

    /// Read the whole file into a [`Table`]
    ///
    /// Column names come from the first record unless supplied via
    /// [`columns`](CsvReader::columns). Every data record is normalized to
    /// the column count before insertion: padded with empty strings if
    /// short, truncated if long. The table renders with the reader's
    /// delimiter and quote.
    pub fn read_table(&mut self) -> Result<Table> {
        let mut table = Table::with_format(self.parser.delimiter(), self.parser.quote())?;

        let names = if self.columns.is_empty() {
            match self.read_row()? {
                Some(header) => header,
                None => return Ok(table),
            }
        } else {
            self.columns.clone()
        };
        for name in &names {
            table.add_column(name.as_str(), "")?;
        }
        self.headers = names;

        while let Some(mut row) = self.read_row()? {
            row.resize(table.column_count(), String::new());
            table.add_row(row)?;
        }
        Ok(table)
    }

    /// Close the underlying file
    ///
    /// Any read attempted afterwards fails with a usage error.
    pub fn close(&mut self) {
        self.reader = None;
    }
}

/// Iterator over CSV records, created by [`CsvReader::rows`]
pub struct CsvRowIterator<'a> {
    reader: &'a mut CsvReader,
}

impl Iterator for CsvRowIterator<'_> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}
