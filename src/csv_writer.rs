//! CSV file writing
//!
//! Writes encoded lines to a buffered file, either record by record or a
//! whole [`Table`] at once.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::csv::CsvEncoder;
use crate::error::{CsvError, Result};
use crate::table::Table;

/// CSV file writer
///
/// # Examples
///
/// ```no_run
/// use csvtable::CsvWriter;
///
/// let mut writer = CsvWriter::new("output.csv").unwrap();
/// writer.write_row(["Name", "Age", "City"]).unwrap();
/// writer.write_row(["Alice", "30", "NYC"]).unwrap();
/// writer.close().unwrap();
/// ```
///
/// # Writing a table
///
/// ```no_run
/// use csvtable::{CsvWriter, Table};
///
/// let mut table = Table::new();
/// table.add_column("name", "").unwrap();
/// table.add_row(vec!["Alice".into()]).unwrap();
///
/// let mut writer = CsvWriter::new("output.csv").unwrap();
/// writer.write_all(&table).unwrap();
/// ```
pub struct CsvWriter {
    // None once closed
    writer: Option<BufWriter<File>>,
    encoder: CsvEncoder,
    row_count: u64,
}

impl CsvWriter {
    /// Create a CSV file for writing, truncating any existing file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())
            .map_err(|e| CsvError::WriteError(format!("Failed to create CSV file: {}", e)))?;

        Ok(CsvWriter {
            writer: Some(BufWriter::new(file)),
            encoder: CsvEncoder::default(),
            row_count: 0,
        })
    }

    /// Set a custom delimiter and quote character (builder pattern)
    ///
    /// Fails with a configuration error if the quote occurs inside the
    /// delimiter or the delimiter is empty.
    pub fn with_format(mut self, delimiter: &str, quote: char) -> Result<Self> {
        self.encoder = CsvEncoder::new(delimiter, quote)?;
        Ok(self)
    }

    /// Number of lines written so far (header included)
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Encode and write one record followed by a line terminator
    pub fn write_row<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = self.encoder.encode_row(fields);
        self.write_line(&line)
    }

    /// Write a whole table: the header line, then every row, then close
    ///
    /// The writer's own delimiter and quote are used, regardless of the
    /// table's rendering format.
    pub fn write_all(&mut self, table: &Table) -> Result<()> {
        let header = self.encoder.encode_row(table.column_names());
        self.write_line(&header)?;
        for row in table.rows() {
            let line = self.encoder.encode_row(row);
            self.write_line(&line)?;
        }
        self.close()
    }

    /// Flush and close the destination
    ///
    /// Closing twice is fine; writing after a close is a usage error.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| CsvError::WriteError(format!("Failed to flush file: {}", e)))?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| CsvError::UsageError("The writer is already closed".to_string()))?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|e| CsvError::WriteError(format!("Failed to write to file: {}", e)))?;
        self.row_count += 1;
        Ok(())
    }
}
