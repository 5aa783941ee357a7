//! Integration tests for csvtable

use csvtable::{CsvEncoder, CsvParser, CsvReader, CsvWriter, Table};
use tempfile::NamedTempFile;

fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|row| row.iter().map(|field| field.to_string()).collect())
        .collect()
}

#[test]
fn test_encode_parse_round_trip() {
    // Exact round trip for rows whose fields hold no line terminators
    let data = rows(&[
        &["plain", "with,comma", "with\"quote"],
        &["", "  spaced  ", "not \"enclosed\""],
        &["a<|b", "<|>", "end"],
    ]);

    for (delimiter, quote) in [(",", '"'), ("<|>", '"'), ("|", '\''), ("ab", '"')] {
        let encoder = CsvEncoder::new(delimiter, quote).unwrap();
        let parser = CsvParser::new(delimiter, quote).unwrap();

        let lines: Vec<String> = encoder.encode(data.iter()).collect();
        let decoded: Vec<Vec<String>> = parser.parse(&lines).collect();
        assert_eq!(decoded, data, "round trip failed for delimiter {delimiter:?}");
    }
}

#[test]
fn test_parser_and_encoder_are_restartable() {
    let parser = CsvParser::new(",", '"').unwrap();
    let lines = ["a,\"b", "c\",d", "e,f"];
    let first: Vec<_> = parser.parse(lines).collect();
    let second: Vec<_> = parser.parse(lines).collect();
    assert_eq!(first, second);

    let encoder = CsvEncoder::new(",", '"').unwrap();
    let data = rows(&[&["x,y", "z"]]);
    let once: Vec<_> = encoder.encode(data.iter()).collect();
    let twice: Vec<_> = encoder.encode(data.iter()).collect();
    assert_eq!(once, twice);
}

#[test]
fn test_file_round_trip_through_table() {
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_path_buf();

    let mut table = Table::with_format("<|>", '"').unwrap();
    table.add_column("id", "").unwrap();
    table.add_column("note", "").unwrap();
    table
        .add_rows(rows(&[
            &["1", "contains <|> itself"],
            &["2", "say \"hi\""],
            &["3", ""],
        ]))
        .unwrap();

    let mut writer = CsvWriter::new(&path)
        .unwrap()
        .with_format("<|>", '"')
        .unwrap();
    writer.write_all(&table).unwrap();

    let mut reader = CsvReader::open(&path)
        .unwrap()
        .with_format("<|>", '"')
        .unwrap();
    let output = reader.read_table().unwrap();

    assert_eq!(output, table);
}

#[test]
fn test_table_edit_then_rewrite() {
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_path_buf();

    std::fs::write(&path, "name,score\nAlice,3\nBob,5\n").unwrap();

    let mut table = CsvReader::open(&path).unwrap().read_table().unwrap();
    table.add_column("passed", "no").unwrap();
    {
        let mut scores = table.column_mut("passed").unwrap();
        scores.set(1, "yes").unwrap();
    }
    table.delete_row(0).unwrap();

    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines, vec!["name,score,passed", "Bob,5,yes"]);
}

#[test]
fn test_multiline_quoted_field_survives_file_io() {
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path().to_path_buf();

    std::fs::write(&path, "\"Once upon \na time\",5\n").unwrap();

    let mut reader = CsvReader::open(&path).unwrap();
    let row = reader.read_row().unwrap().unwrap();
    assert_eq!(row, vec!["Once upon a time", "5"]);
    assert_eq!(reader.read_row().unwrap(), None);
}

#[test]
fn test_rejected_mutations_leave_table_unchanged() {
    let mut table = Table::new();
    table.add_column("a", "").unwrap();
    table.add_column("b", "").unwrap();
    table.add_column("c", "").unwrap();
    table
        .add_row(vec!["1".into(), "2".into(), "3".into()])
        .unwrap();

    assert!(table.add_row(vec!["too".into(), "short".into()]).is_err());
    assert_eq!(table.row_count(), 1);

    assert!(table.delete_column("missing").is_err());
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.row(0).unwrap(), ["1", "2", "3"]);
}

#[test]
fn test_column_view_write_through() {
    let mut table = Table::new();
    table.add_column("v", "").unwrap();
    table.add_row(vec!["old".into()]).unwrap();

    {
        let mut view = table.column_mut("v").unwrap();
        view.set(0, "new").unwrap();
    }
    assert_eq!(table.row(0).unwrap()[0], "new");
}

#[test]
fn test_configuration_errors_at_construction() {
    assert!(CsvParser::new("a\"b", '"').is_err());
    assert!(CsvEncoder::new("a\"b", '"').is_err());
    assert!(Table::with_format("a\"b", '"').is_err());
    assert!(CsvParser::new("", '"').is_err());
}
