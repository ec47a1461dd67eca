use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::error::{DataError, Result};
use super::model::{ColumnType, Row, Table, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Only `.csv` is accepted.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ext != "csv" {
        return Err(DataError::format("not a CSV file"));
    }

    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_csv(file).map_err(|e| match e {
        DataError::Io { source, .. } => DataError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    log::info!(
        "Parsed {}: {} columns, {} rows",
        path.display(),
        table.column_count(),
        table.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Field typing
// ---------------------------------------------------------------------------

/// Type a single field: integer, then float, then text.
///
/// Numeric parsing ignores surrounding whitespace; text keeps the raw token.
pub fn parse_field(token: &str) -> Value {
    let trimmed = token.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(token.to_string())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout:
/// * line 1: column names, none of them numeric
/// * line 2: schema-defining row, fixes each column's type
/// * rest:   rows matching that schema; anything else is skipped
pub fn parse_csv<R: Read>(input: R) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut records = reader.records();

    let header_record = next_record(&mut records)?
        .ok_or_else(|| DataError::format("invalid header"))?;
    let headers = parse_headers(&header_record)?;

    let schema_record = next_record(&mut records)?
        .ok_or_else(|| DataError::format("invalid data"))?;
    if schema_record.len() != headers.len() {
        return Err(DataError::format("invalid data"));
    }
    let first_row: Row = schema_record.iter().map(parse_field).collect();
    let column_types: Vec<ColumnType> = first_row.iter().map(Value::column_type).collect();

    let mut rows = vec![first_row];
    let mut skipped = 0usize;

    while let Some(record) = next_record(&mut records)? {
        match typed_row(&record, &column_types) {
            Some(row) => rows.push(row),
            None => {
                let line = record.position().map_or(0, |p| p.line());
                log::debug!("Skipping line {line}: does not match the column schema");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::info!("Skipped {skipped} malformed rows");
    }

    Ok(Table {
        headers,
        column_types,
        rows,
    })
}

fn next_record<R: Read>(
    records: &mut csv::StringRecordsIter<'_, R>,
) -> Result<Option<StringRecord>> {
    match records.next() {
        None => Ok(None),
        Some(Ok(record)) => Ok(Some(record)),
        Some(Err(e)) => Err(DataError::Io {
            path: Default::default(),
            source: e.into(),
        }),
    }
}

fn parse_headers(record: &StringRecord) -> Result<Vec<String>> {
    record
        .iter()
        .map(|h| match parse_field(h) {
            Value::Text(_) => Ok(h.to_string()),
            _ => Err(DataError::format("invalid header")),
        })
        .collect()
}

/// Type every field of a record against the schema. `None` means the row
/// must be skipped: wrong width, an empty field, or a type mismatch.
fn typed_row(record: &StringRecord, column_types: &[ColumnType]) -> Option<Row> {
    if record.len() != column_types.len() || record.iter().any(str::is_empty) {
        return None;
    }
    record
        .iter()
        .zip(column_types)
        .map(|(field, expected)| {
            let value = parse_field(field);
            (value.column_type() == *expected).then_some(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn parse(text: &str) -> Result<Table> {
        parse_csv(text.as_bytes())
    }

    #[test]
    fn parse_field_cascades_int_float_text() {
        assert_eq!(parse_field("42"), Value::Integer(42));
        assert_eq!(parse_field("-3"), Value::Integer(-3));
        assert_eq!(parse_field("2.5"), Value::Float(2.5));
        assert_eq!(parse_field("1e3"), Value::Float(1000.0));
        assert_eq!(parse_field(" 7 "), Value::Integer(7));
        assert_eq!(parse_field("east"), Value::Text("east".into()));
        assert_eq!(parse_field(""), Value::Text(String::new()));
    }

    #[test]
    fn well_formed_file_keeps_every_row() {
        let table = parse("a,region,b\n1,east,2.5\n2,west,3.0\n3,east,0.5\n").unwrap();
        assert_eq!(table.headers, ["a", "region", "b"]);
        assert_eq!(
            table.column_types,
            [ColumnType::Integer, ColumnType::Text, ColumnType::Float]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[1][1], Value::Text("west".into()));
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let text = "a,region,b\n\
                    1,east,2.5\n\
                    2,west\n\
                    3,,1.0\n\
                    x,east,1.0\n\
                    4,east,7\n\
                    5,west,1.5,9\n\
                    6,west,4.25\n";
        let table = parse(text).unwrap();
        // "4,east,7" has an integer where the schema fixed a float.
        let ids: Vec<&Value> = table.rows.iter().map(|r| &r[0]).collect();
        assert_eq!(ids, [&Value::Integer(1), &Value::Integer(6)]);
    }

    #[test]
    fn numeric_header_is_rejected() {
        let err = parse("a,2,region\n1,2,east\n").unwrap_err();
        assert!(matches!(err, DataError::Format(ref m) if m == "invalid header"));

        let err = parse("a,1.5,region\n1,2,east\n").unwrap_err();
        assert!(matches!(err, DataError::Format(_)));
    }

    #[test]
    fn schema_row_width_must_match_headers() {
        let err = parse("a,region,b\n1,east\n").unwrap_err();
        assert!(matches!(err, DataError::Format(ref m) if m == "invalid data"));
    }

    #[test]
    fn missing_rows_are_format_errors() {
        assert!(matches!(parse("").unwrap_err(), DataError::Format(ref m) if m == "invalid header"));
        assert!(matches!(parse("a,region\n").unwrap_err(), DataError::Format(ref m) if m == "invalid data"));
    }

    #[test]
    fn load_file_rejects_other_extensions() {
        let err = load_file(Path::new("data.txt")).unwrap_err();
        assert!(matches!(err, DataError::Format(ref m) if m == "not a CSV file"));
    }

    #[test]
    fn load_file_reports_missing_file() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().starts_with("couldn't open the file"));
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "region,sales").unwrap();
        writeln!(file, "north,10").unwrap();
        writeln!(file, "south,12").unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.headers, ["region", "sales"]);
        assert_eq!(table.len(), 2);
    }
}
