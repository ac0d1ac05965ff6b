//! Line-oriented reader for delimited registrar files.
//!
//! Each source file is a sequence of single-character-delimited records
//! with a fixed field count. [`RecordReader`] iterates over the rows of
//! one file, splitting each line and rejecting any line whose field count
//! does not match the contract. No entity-specific logic here.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{ContentError, ContentResult};

/// One record of a source file: the split field values plus the 1-based
/// line number they came from, for error reporting downstream.
#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based line number within the source file.
    pub line: usize,
    /// Field values in file order.
    pub values: Vec<String>,
}

impl Row {
    /// Field value by position; out of range reads as empty.
    pub fn field(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or_default()
    }
}

/// Reject a row containing any blank field.
pub fn ensure_filled(file: &str, row: &Row) -> ContentResult<()> {
    if row.values.iter().any(|value| value.is_empty()) {
        return Err(ContentError::BlankField {
            file: file.to_string(),
            line: row.line,
        });
    }
    Ok(())
}

/// Iterator over the fixed-arity records of one delimited text file.
///
/// # Example
/// ```ignore
/// let reader = RecordReader::open(path, 3, '\t', true)?;
/// for row in reader {
///     let row = row?;
///     let (major, marker, course) = (row.field(0), row.field(1), row.field(2));
/// }
/// ```
pub struct RecordReader {
    file_name: String,
    fields: usize,
    delimiter: char,
    skip_header: bool,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl RecordReader {
    /// Open a source file for record iteration.
    ///
    /// `fields` is the exact field count every record must have;
    /// `skip_header` drops the first line without validating its content.
    pub fn open(
        path: &Path,
        fields: usize,
        delimiter: char,
        skip_header: bool,
    ) -> ContentResult<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let file = File::open(path).map_err(|source| ContentError::Io {
            file: file_name.clone(),
            source,
        })?;

        Ok(Self {
            file_name,
            fields,
            delimiter,
            skip_header,
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }

    /// Name of the file being read, for error context.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn split(&self, line: &str) -> ContentResult<Vec<String>> {
        let values: Vec<String> = line.split(self.delimiter).map(str::to_string).collect();

        if values.len() != self.fields {
            return Err(ContentError::FieldCount {
                file: self.file_name.clone(),
                line: self.line_no,
                found: values.len(),
                expected: self.fields,
            });
        }

        Ok(values)
    }
}

impl Iterator for RecordReader {
    type Item = ContentResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(ContentError::Io {
                        file: self.file_name.clone(),
                        source,
                    }));
                }
            };
            self.line_no += 1;

            // The header line is dropped unvalidated; its arity may differ.
            if self.line_no == 1 && self.skip_header {
                continue;
            }

            return Some(self.split(&line).map(|values| Row {
                line: self.line_no,
                values,
            }));
        }
    }
}
