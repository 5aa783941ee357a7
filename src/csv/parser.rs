//! CSV parsing as an explicit five-state machine
//!
//! The parser consumes physical lines (already stripped of their trailing
//! newline) and produces rows of field strings. A quoted field may span
//! several physical lines; the grammar is total, so there are no row-level
//! parse errors — only the delimiter/quote combination is validated, once,
//! at construction.

use crate::csv::{validate_format, DEFAULT_DELIMITER, DEFAULT_QUOTE};
use crate::error::Result;

/// CSV parser for decoding delimiter-separated text
///
/// Holds configuration only; each pass over a source gets its own cursor, so
/// the same parser can be iterated from the start any number of times with
/// identical results.
///
/// # Examples
///
/// ```
/// use csvtable::csv::CsvParser;
///
/// let parser = CsvParser::new("<|>", '"').unwrap();
/// let rows: Vec<_> = parser.parse(["a<|>b", "c<|>d"]).collect();
/// assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsvParser {
    delimiter: String,
    // Delimiter split into chars for positional matching
    delim_chars: Vec<char>,
    quote: char,
}

impl CsvParser {
    /// Create a parser with a custom delimiter and quote character
    ///
    /// The delimiter may be longer than one character. Fails with a
    /// configuration error if the delimiter is empty or contains the quote
    /// character.
    pub fn new(delimiter: &str, quote: char) -> Result<Self> {
        validate_format(delimiter, quote)?;
        Ok(CsvParser {
            delimiter: delimiter.to_string(),
            delim_chars: delimiter.chars().collect(),
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

    /// Parse a sequence of lines into a lazy row iterator
    ///
    /// Each item of `lines` is one physical line without its trailing
    /// newline. Rows are produced on demand, one per pull.
    pub fn parse<I>(&self, lines: I) -> Rows<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Rows {
            cursor: self.cursor(),
            lines: lines.into_iter(),
            done: false,
        }
    }

    /// Parse a complete text into a lazy row iterator
    ///
    /// Convenience over [`parse`](Self::parse) splitting `text` on line
    /// terminators (`\n` or `\r\n`).
    pub fn parse_str<'p, 't>(&'p self, text: &'t str) -> Rows<'p, std::str::Lines<'t>> {
        self.parse(text.lines())
    }

    /// Create a push-style cursor for feeding lines one at a time
    ///
    /// Used when the line source is not an iterator, e.g. buffered file
    /// reads. Feed every line with [`RowCursor::feed_line`] and call
    /// [`RowCursor::finish`] once at end of input.
    pub fn cursor(&self) -> RowCursor<'_> {
        RowCursor {
            delim: &self.delim_chars,
            quote: self.quote,
            state: State::FieldStart,
            field: String::new(),
            row: Vec::new(),
            matched: 0,
            continuing: false,
        }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        CsvParser {
            delimiter: DEFAULT_DELIMITER.to_string(),
            delim_chars: DEFAULT_DELIMITER.chars().collect(),
            quote: DEFAULT_QUOTE,
        }
    }
}

/// Parser state, advanced one character per transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the very start of a field; a quote here opens an enclosure
    FieldStart,
    /// Inside an unenclosed field; quotes are literal here
    InField,
    /// A prefix of the delimiter has been matched tentatively
    MatchDelimiter,
    /// Inside a quote-enclosed field
    Enclosed,
    /// A quote was seen inside an enclosure: either an escape or the end
    QuoteInEnclosed,
}

/// Incremental row parser over pushed lines
///
/// State is private to one pass; dropping the cursor and creating a new one
/// restarts parsing from scratch.
#[derive(Debug)]
pub struct RowCursor<'p> {
    delim: &'p [char],
    quote: char,
    state: State,
    field: String,
    row: Vec<String>,
    // How many delimiter chars are currently matched tentatively
    matched: usize,
    // An enclosed field is being continued from the previous line
    continuing: bool,
}

impl RowCursor<'_> {
    /// Consume one physical line (without its trailing newline)
    ///
    /// Returns the completed row, or `None` when the line ended inside an
    /// enclosure and the row continues on the next line.
    pub fn feed_line(&mut self, line: &str) -> Option<Vec<String>> {
        self.continuing = false;
        for ch in line.chars() {
            self.step(ch);
        }
        if self.state == State::Enclosed {
            // The enclosure swallows the line break; the field goes on
            self.continuing = true;
            return None;
        }
        if self.state == State::MatchDelimiter {
            self.flush_partial();
        }
        self.push_field();
        self.state = State::FieldStart;
        Some(std::mem::take(&mut self.row))
    }

    /// Signal end of input
    ///
    /// An enclosure left open at end of input is closed implicitly and its
    /// buffered content emitted as the final field; this is tolerated, not
    /// an error. Returns `None` when no row was in progress.
    pub fn finish(&mut self) -> Option<Vec<String>> {
        if !self.continuing {
            return None;
        }
        self.continuing = false;
        self.state = State::FieldStart;
        self.push_field();
        Some(std::mem::take(&mut self.row))
    }

    /// Dispatch one character against the current state
    fn step(&mut self, ch: char) {
        match self.state {
            State::FieldStart => {
                if ch == self.quote {
                    // A quote opens an enclosure only at the field start
                    self.state = State::Enclosed;
                } else {
                    self.state = State::InField;
                    self.accept(ch);
                }
            }
            State::InField => self.accept(ch),
            State::MatchDelimiter => {
                if ch == self.delim[self.matched] {
                    self.matched += 1;
                    if self.matched == self.delim.len() {
                        // Full match: the buffered prefix is discarded
                        self.matched = 0;
                        self.push_field();
                        self.state = State::FieldStart;
                    }
                } else {
                    // Broken match: the buffered prefix is field content and
                    // the breaking character is re-evaluated, not dropped
                    self.flush_partial();
                    self.state = State::InField;
                    self.accept(ch);
                }
            }
            State::Enclosed => {
                if ch == self.quote {
                    self.state = State::QuoteInEnclosed;
                } else {
                    // The delimiter has no effect while enclosed
                    self.field.push(ch);
                }
            }
            State::QuoteInEnclosed => {
                if ch == self.quote {
                    // Doubled quote: one literal quote
                    self.field.push(ch);
                    self.state = State::Enclosed;
                } else {
                    // The enclosure has ended; the character follows the
                    // unenclosed rules (it may start a delimiter match)
                    self.state = State::InField;
                    self.accept(ch);
                }
            }
        }
    }

    /// Handle a character under the unenclosed rules
    fn accept(&mut self, ch: char) {
        if ch == self.delim[0] {
            if self.delim.len() == 1 {
                self.push_field();
                self.state = State::FieldStart;
            } else {
                self.matched = 1;
                self.state = State::MatchDelimiter;
            }
        } else {
            self.field.push(ch);
        }
    }

    /// Move a partially matched delimiter prefix into the field buffer
    fn flush_partial(&mut self) {
        for &ch in &self.delim[..self.matched] {
            self.field.push(ch);
        }
        self.matched = 0;
    }

    fn push_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }
}

/// Lazy iterator of parsed rows
///
/// Pull-based: each `next` consumes as many physical lines as the next row
/// spans. Created by [`CsvParser::parse`].
pub struct Rows<'p, I> {
    cursor: RowCursor<'p>,
    lines: I,
    done: bool,
}

impl<I> Iterator for Rows<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next() {
                Some(line) => {
                    if let Some(row) = self.cursor.feed_line(line.as_ref()) {
                        return Some(row);
                    }
                }
                None => {
                    self.done = true;
                    return self.cursor.finish();
                }
            }
        }
    }
}
