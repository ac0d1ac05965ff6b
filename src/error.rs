//! Error types for repository construction.
//!
//! This module defines the two fatal error kinds surfaced by
//! [`crate::repository::University::from_directory`]:
//!
//! - [`SetupError`] - the data directory or a required source file is missing
//! - [`ContentError`] - a record inside a source file is invalid
//!
//! Both kinds abort construction entirely; there is no partial repository.
//! [`RepositoryError`] wraps them so callers can match the kinds distinctly.
//! Error conversion is automatic via `From` implementations, allowing `?`
//! to work across loader boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Setup Errors
// =============================================================================

/// Errors raised before any record is parsed.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The data directory does not exist.
    #[error("\"{}\" is not a valid directory", path.display())]
    InvalidDirectory { path: PathBuf },

    /// One or more required source files are absent from the directory.
    #[error("{} missing from \"{}\"", missing.join(", "), directory.display())]
    MissingFiles {
        directory: PathBuf,
        /// File names that were not found, in required-file order.
        missing: Vec<String>,
    },
}

// =============================================================================
// Content Errors
// =============================================================================

/// Errors raised by a record inside a source file.
///
/// Every variant names the offending file; line numbers and offending
/// values are included where the loader has them.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Failed to read a source file that existed at setup time.
    #[error("cannot read '{file}': {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A record had the wrong number of fields.
    #[error("'{file}' has {found} fields on line {line} but expected {expected}")]
    FieldCount {
        file: String,
        line: usize,
        found: usize,
        expected: usize,
    },

    /// A record contained a blank field.
    #[error("'{file}' line {line}: missing value(s) in record")]
    BlankField { file: String, line: usize },

    /// A major's required/elective marker was neither "R" nor "E".
    #[error("'{file}' line {line}: invalid requirement marker '{marker}'")]
    InvalidMarker {
        file: String,
        line: usize,
        marker: String,
    },

    /// A course was registered twice under the same major.
    #[error("'{file}' line {line}: course '{course}' already registered for major '{major}'")]
    DuplicateCourse {
        file: String,
        line: usize,
        major: String,
        course: String,
    },

    /// Two student records shared a cwid.
    #[error("'{file}' line {line}: duplicate student {cwid}")]
    DuplicateStudent {
        file: String,
        line: usize,
        cwid: String,
    },

    /// Two instructor records shared a cwid.
    #[error("'{file}' line {line}: duplicate instructor {cwid}")]
    DuplicateInstructor {
        file: String,
        line: usize,
        cwid: String,
    },

    /// A student referenced a major that was never declared.
    #[error("'{file}' line {line}: unknown major '{major}'")]
    UnknownMajor {
        file: String,
        line: usize,
        major: String,
    },

    /// An instructor referenced a department outside the major namespace.
    #[error("'{file}' line {line}: unknown department '{department}'")]
    UnknownDepartment {
        file: String,
        line: usize,
        department: String,
    },

    /// A grade record referenced a student that does not exist.
    #[error("'{file}' line {line}: no student {cwid} for grade record")]
    UnknownStudent {
        file: String,
        line: usize,
        cwid: String,
    },

    /// A grade record referenced an instructor that does not exist.
    #[error("'{file}' line {line}: no instructor {cwid} for grade record")]
    UnknownInstructor {
        file: String,
        line: usize,
        cwid: String,
    },

    /// A letter grade was outside the known value table.
    #[error("'{file}' line {line}: unknown letter grade '{grade}'")]
    UnknownGrade {
        file: String,
        line: usize,
        grade: String,
    },
}

// =============================================================================
// Repository Errors (top-level)
// =============================================================================

/// Top-level repository construction errors.
///
/// This is the error type returned by
/// [`crate::repository::University::from_directory`]. Callers that need to
/// treat the kinds differently match on the variants; both abort the whole
/// construction.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Setup-level failure: missing directory or missing source files.
    #[error("{0}")]
    Setup(#[from] SetupError),

    /// Data-content failure inside a source file.
    #[error("{0}")]
    Content(#[from] ContentError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for record-level operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Result type for repository construction.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
