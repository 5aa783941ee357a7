//! CSV encoding, the inverse of the parser
//!
//! One output line per row; quoting is re-derived from field content, never
//! preserved from any earlier parse.

use crate::csv::{validate_format, DEFAULT_DELIMITER, DEFAULT_QUOTE};
use crate::error::Result;

/// CSV encoder for rendering rows as delimiter-separated text
///
/// # Examples
///
/// ```
/// use csvtable::csv::CsvEncoder;
///
/// let encoder = CsvEncoder::new(",", '"').unwrap();
/// assert_eq!(encoder.encode_row(["a", "b,c"]), r#"a,"b,c""#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsvEncoder {
    delimiter: String,
    quote: char,
}

impl CsvEncoder {
    /// Create an encoder with a custom delimiter and quote character
    ///
    /// Fails with a configuration error if the delimiter is empty or
    /// contains the quote character.
    pub fn new(delimiter: &str, quote: char) -> Result<Self> {
        validate_format(delimiter, quote)?;
        Ok(CsvEncoder {
            delimiter: delimiter.to_string(),
            quote,
        })
    }

    /// The configured delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// The configured quote character
    pub fn quote(&self) -> char {
        self.quote
    }

    /// Encode one row into a single line
    ///
    /// Fields are joined by the delimiter with no leading or trailing
    /// delimiter; no record terminator is appended — the caller adds line
    /// separators when writing.
    pub fn encode_row<I, S>(&self, fields: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = String::new();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                line.push_str(&self.delimiter);
            }
            self.encode_field(field.as_ref(), &mut line);
        }
        line
    }

    /// Encode a sequence of rows into a lazy line iterator
    ///
    /// One line per row, produced on demand. Calling `encode` again with a
    /// fresh source restarts from the beginning with identical output.
    pub fn encode<I, R, S>(&self, rows: I) -> EncodedLines<'_, I::IntoIter>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        EncodedLines {
            encoder: self,
            rows: rows.into_iter(),
        }
    }

    /// Encode one field, enclosing it in quotes when necessary
    fn encode_field(&self, field: &str, line: &mut String) {
        if self.needs_enclosure(field) {
            line.push(self.quote);
            for ch in field.chars() {
                if ch == self.quote {
                    // Escape quotes by doubling
                    line.push(ch);
                }
                line.push(ch);
            }
            line.push(self.quote);
        } else {
            line.push_str(field);
        }
    }

    /// A field must be enclosed iff it contains the quote character, the
    /// delimiter sequence or a line terminator character
    fn needs_enclosure(&self, field: &str) -> bool {
        field.contains(self.quote)
            || field.contains(&self.delimiter)
            || field.chars().any(|ch| ch == '\r' || ch == '\n')
    }
}

impl Default for CsvEncoder {
    fn default() -> Self {
        CsvEncoder {
            delimiter: DEFAULT_DELIMITER.to_string(),
            quote: DEFAULT_QUOTE,
        }
    }
}

/// Lazy iterator of encoded lines, created by [`CsvEncoder::encode`]
pub struct EncodedLines<'e, I> {
    encoder: &'e CsvEncoder,
    rows: I,
}

impl<I, R, S> Iterator for EncodedLines<'_, I>
where
    I: Iterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.rows.next().map(|row| self.encoder.encode_row(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fields() {
        let encoder = CsvEncoder::default();
        assert_eq!(encoder.encode_row(["a", "b", "c"]), "a,b,c");
    }

    #[test]
    fn test_field_with_delimiter() {
        let encoder = CsvEncoder::default();
        assert_eq!(encoder.encode_row(["a,b", "c"]), r#""a,b",c"#);
    }

    #[test]
    fn test_escaped_quotes() {
        let encoder = CsvEncoder::default();
        assert_eq!(
            encoder.encode_row([r#"Say "Hello""#, "world"]),
            r#""Say ""Hello""",world"#
        );
    }

    #[test]
    fn test_newlines_force_enclosure() {
        let encoder = CsvEncoder::default();
        assert_eq!(
            encoder.encode_row(["Line 1\nLine 2", "normal"]),
            "\"Line 1\nLine 2\",normal"
        );
        assert_eq!(encoder.encode_row(["a\rb"]), "\"a\rb\"");
    }

    #[test]
    fn test_empty_fields() {
        let encoder = CsvEncoder::default();
        assert_eq!(encoder.encode_row(["a", "", "c"]), "a,,c");
        assert_eq!(encoder.encode_row(["", "", ""]), ",,");
        assert_eq!(encoder.encode_row::<[&str; 0], &str>([]), "");
    }

    #[test]
    fn test_multichar_delimiter() {
        let encoder = CsvEncoder::new("<|>", '"').unwrap();
        let lines: Vec<_> = encoder
            .encode([
                vec!["val_1<|>", "\"val_2", "val\n3"],
                vec!["v\ral_4", "val_5", "val_6"],
            ])
            .collect();
        assert_eq!(
            lines,
            vec![
                "\"val_1<|>\"<|>\"\"\"val_2\"<|>\"val\n3\"",
                "\"v\ral_4\"<|>val_5<|>val_6"
            ]
        );
    }

    #[test]
    fn test_partial_delimiter_not_enclosed() {
        // Only the full delimiter sequence forces an enclosure
        let encoder = CsvEncoder::new("<|>", '"').unwrap();
        assert_eq!(encoder.encode_row(["a<|b"]), "a<|b");
    }

    #[test]
    fn test_custom_quote() {
        let encoder = CsvEncoder::new(",", '\'').unwrap();
        assert_eq!(encoder.encode_row(["ha 'ha' ha"]), "'ha ''ha'' ha'");
    }

    #[test]
    fn test_restart_produces_identical_lines() {
        let encoder = CsvEncoder::default();
        let rows = [vec!["a", "b,c"], vec!["d", "e"]];
        let first: Vec<_> = encoder.encode(rows.iter()).collect();
        let second: Vec<_> = encoder.encode(rows.iter()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_errors() {
        assert!(CsvEncoder::new("", '"').is_err());
        assert!(CsvEncoder::new("a\"b", '"').is_err());
    }
}
