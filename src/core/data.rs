//! Table model, the data-provider seam, and a buffered CSV loader.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::core::{constants::IGNORE_MARKER, error::MalformedTableError};

// --- Public Model ---

/// Raw cell text plus the "draw no bar here" flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub ignore: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ignore: false,
        }
    }

    pub fn ignored(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ignore: true,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::new(s)
    }
}

/// Everything a rendering pass needs to know about a table.
///
/// Implementors own the structure; the pass only reads cells by position and
/// relies on `validate` having been called first.
pub trait TableSource {
    /// Structural well-formedness: header, body, rows, cells.
    fn validate(&self) -> Result<(), MalformedTableError>;
    /// Number of data columns, taken from the first body row.
    fn column_count(&self) -> usize;
    fn row_count(&self) -> usize;
    /// `None` when a ragged row is shorter than `column`.
    fn cell(&self, row: usize, column: usize) -> Option<&Cell>;
}

/// In-memory table: optional header section, optional body section.
///
/// Sections are optional so that half-built input (e.g. a CSV file holding
/// only a header line) can be represented and rejected by `validate`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub body: Option<Vec<Vec<Cell>>>,
}

impl Table {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: Some(header.into_iter().map(Into::into).collect()),
            body: Some(Vec::new()),
        }
    }

    /// Append one body row; creates the body section if missing.
    #[must_use]
    pub fn row<C: Into<Cell>>(mut self, cells: impl IntoIterator<Item = C>) -> Self {
        self.body
            .get_or_insert_with(Vec::new)
            .push(cells.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        self.body.as_deref().unwrap_or(&[])
    }
}

impl TableSource for Table {
    fn validate(&self) -> Result<(), MalformedTableError> {
        if self.header.is_none() {
            return Err(MalformedTableError::MissingHeader);
        }
        let Some(body) = &self.body else {
            return Err(MalformedTableError::MissingBody);
        };
        if body.is_empty() {
            return Err(MalformedTableError::MissingRows);
        }
        if body.iter().all(Vec::is_empty) {
            return Err(MalformedTableError::MissingCells);
        }
        Ok(())
    }

    fn column_count(&self) -> usize {
        self.rows().first().map_or(0, Vec::len)
    }

    fn row_count(&self) -> usize {
        self.rows().len()
    }

    fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows().get(row)?.get(column)
    }
}

// --- Error Handling ---

#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseTableError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(csv::Error),
}

impl From<csv::Error> for ParseTableError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .map_or(0, |p| usize::try_from(p.line()).unwrap_or(usize::MAX));
        Self {
            line,
            kind: ParseErrorKind::Csv(err),
        }
    }
}

// --- Helpers ---

#[inline]
fn to_cell(field: &str) -> Cell {
    match field.strip_prefix(IGNORE_MARKER) {
        Some(rest) => Cell::ignored(rest.trim_start()),
        None => Cell::new(field),
    }
}

/// A whitespace-only line comes back as one empty field.
#[inline]
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0) == Some("")
}

/// Whether anything follows the header record's line terminator.
///
/// `header_end` may sit before the terminator, after it, or between the `\r`
/// and `\n` of a CRLF pair.
fn opens_body(bytes: &[u8], header_end: usize) -> bool {
    let (done, rest) = bytes.split_at(header_end.min(bytes.len()));
    let rest = match done.last() {
        Some(b'\n') => rest,
        Some(b'\r') => rest.strip_prefix(b"\n").unwrap_or(rest),
        _ => rest
            .strip_prefix(b"\r\n")
            .or_else(|| rest.strip_prefix(b"\n"))
            .unwrap_or(rest),
    };
    !rest.is_empty()
}

// --- Buffered CSV ingest ---
const BUF_CAP: usize = 1 << 16; // 64 KiB

/// Read a CSV table.
///
/// * `#` lines are comments; fields are trimmed; rows may be ragged.
/// * The first remaining record is the header.
/// * Any line after the header, blank or not, opens the body section; only
///   non-blank records become rows.
/// * A field starting with `!` is flagged ignorable (marker stripped).
///
/// Structural problems are left for [`TableSource::validate`].
pub fn read_table<R: Read>(src: R) -> Result<Table, ParseTableError> {
    let mut bytes = Vec::new();
    BufReader::with_capacity(BUF_CAP, src)
        .read_to_end(&mut bytes)
        .map_err(|e| ParseTableError {
            line: 0,
            kind: ParseErrorKind::Io(e),
        })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(bytes.as_slice());

    let mut table = Table::default();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        if is_blank(&record) {
            continue;
        }
        if table.header.is_none() {
            table.header = Some(record.iter().map(str::to_owned).collect());
            let end = usize::try_from(rdr.position().byte()).unwrap_or(usize::MAX);
            if opens_body(&bytes, end) {
                table.body = Some(Vec::new());
            }
            continue;
        }
        table
            .body
            .get_or_insert_with(Vec::new)
            .push(record.iter().map(to_cell).collect());
    }
    Ok(table)
}

pub fn read_table_from_path(path: impl AsRef<Path>) -> Result<Table, ParseTableError> {
    let path = path.as_ref();
    if path == Path::new("-") {
        read_table(std::io::stdin())
    } else {
        read_table(File::open(path).map_err(|e| ParseTableError {
            line: 0,
            kind: ParseErrorKind::Io(e),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Table {
        read_table(text.as_bytes()).unwrap()
    }

    #[test]
    fn header_and_rows() {
        let t = load("name,q1,q2\nfoo,1,2\nbar,3,4\n");
        assert_eq!(
            t.header,
            Some(vec!["name".to_owned(), "q1".to_owned(), "q2".to_owned()])
        );
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.cell(1, 2), Some(&Cell::new("4")));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn comments_crlf_and_blank_lines() {
        let t = load("# exported\r\na,b\r\n\r\n1,2\r\n");
        assert_eq!(t.row_count(), 1);
        assert_eq!(t.cell(0, 1), Some(&Cell::new("2")));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let t = load("item,price\n\"widget, large\",\"1,250\"\nsay \"\"hi\"\",\"a\"\"b\"\n");
        assert_eq!(t.cell(0, 0).unwrap().text, "widget, large");
        assert_eq!(t.cell(0, 1).unwrap().text, "1,250");
        assert_eq!(t.cell(1, 1).unwrap().text, "a\"b");
    }

    #[test]
    fn fields_trimmed_rows_ragged() {
        let t = load("a , b\n 1 ,  2 \n   \n3,4,5\n");
        assert_eq!(t.header, Some(vec!["a".to_owned(), "b".to_owned()]));
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.cell(0, 1), Some(&Cell::new("2")));
        assert_eq!(t.cell(1, 2), Some(&Cell::new("5")));
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let err = read_table(&b"a,b\n1,\xff\n"[..]).unwrap_err();
        assert!(err.line > 0);
        assert!(matches!(err.kind, ParseErrorKind::Csv(_)));
    }

    #[test]
    fn header_terminator_alone_opens_no_body() {
        assert!(!opens_body(b"a,b\r\n", 4));
        assert!(!opens_body(b"a,b\r\n", 5));
        assert!(!opens_body(b"a,b\n", 3));
        assert!(opens_body(b"a,b\n\n", 4));
        assert!(opens_body(b"a,b\r\n\r\n", 4));
    }

    #[test]
    fn ignore_marker() {
        let t = load("a,b\n!12,13\n");
        assert_eq!(t.cell(0, 0), Some(&Cell::ignored("12")));
        assert_eq!(t.cell(0, 1), Some(&Cell::new("13")));
    }

    #[test]
    fn structural_faults() {
        assert_eq!(load("").validate(), Err(MalformedTableError::MissingHeader));
        assert_eq!(load("# only a comment\n").validate(), Err(MalformedTableError::MissingHeader));
        assert_eq!(load("a,b").validate(), Err(MalformedTableError::MissingBody));
        assert_eq!(load("a,b\n").validate(), Err(MalformedTableError::MissingBody));
        assert_eq!(load("a,b\n\n").validate(), Err(MalformedTableError::MissingRows));
        let no_cells = Table::new(["a"]).row(Vec::<Cell>::new());
        assert_eq!(no_cells.validate(), Err(MalformedTableError::MissingCells));
    }

    #[test]
    fn ragged_rows() {
        let t = Table::new(["a", "b"]).row(["1", "2"]).row(["3"]);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.cell(1, 1), None);
    }
}
