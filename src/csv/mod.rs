//! CSV field codec: parsing and encoding share one set of quoting rules
//!
//! A field is quote-enclosed on encode iff it contains the quote character,
//! the delimiter sequence or a CR/LF. Inside an enclosure a literal quote is
//! represented by doubling it; no other escaping exists. The delimiter may be
//! any string of one or more characters, the quote is a single character and
//! must not occur inside the delimiter.

mod encoder;
mod parser;

pub use encoder::{CsvEncoder, EncodedLines};
pub use parser::{CsvParser, RowCursor, Rows};

use crate::error::{CsvError, Result};

/// Default field delimiter
pub const DEFAULT_DELIMITER: &str = ",";

/// Default quote character
pub const DEFAULT_QUOTE: char = '"';

/// Validate a delimiter/quote combination. Called once per construction,
/// never per field.
pub(crate) fn validate_format(delimiter: &str, quote: char) -> Result<()> {
    if delimiter.is_empty() {
        return Err(CsvError::ConfigError(
            "The delimiter must be at least one character long".to_string(),
        ));
    }
    if delimiter.contains(quote) {
        return Err(CsvError::ConfigError(
            "The quote character can't be part of the delimiter".to_string(),
        ));
    }
    Ok(())
}
