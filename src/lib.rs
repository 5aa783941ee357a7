//! CSV parsing, encoding and in-memory table manipulation
//!
//! The codec supports delimiters of any length (not just one character), a
//! configurable quote character, quote-doubling escapes and quoted fields
//! spanning several physical lines. Parsed rows can be stored in a [`Table`]
//! with named-column addressing, live column views and structural mutation,
//! or streamed straight back out through the encoder.
//!
//! # Examples
//!
//! ```
//! use csvtable::csv::{CsvEncoder, CsvParser};
//!
//! let parser = CsvParser::new("<|>", '"').unwrap();
//! let rows: Vec<_> = parser.parse(["a<|>\"b<|>c\"", "d<|>e"]).collect();
//! assert_eq!(rows, vec![vec!["a", "b<|>c"], vec!["d", "e"]]);
//!
//! let encoder = CsvEncoder::new("<|>", '"').unwrap();
//! let lines: Vec<_> = encoder.encode(rows.iter()).collect();
//! assert_eq!(lines, vec!["a<|>\"b<|>c\"", "d<|>e"]);
//! ```

pub mod csv;
pub mod csv_reader;
pub mod csv_writer;
pub mod error;
pub mod table;

pub use csv::{CsvEncoder, CsvParser};
pub use csv_reader::CsvReader;
pub use csv_writer::CsvWriter;
pub use error::{CsvError, Result};
pub use table::{ColumnView, ColumnViewMut, Table};
