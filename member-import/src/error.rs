//! Structural import errors
//!
//! These abort an import before any row is processed. Per-row problems are
//! never raised as errors; they are collected as [`RowError`](crate::RowError)s
//! in the [`ImportReport`](crate::ImportReport).

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Import error types
#[derive(Debug, Error)]
pub enum ImportError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Extension is not .xlsx, .xls or .csv
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Upload exceeds the configured limit
    #[error("File too large ({size} bytes, max {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// Zero-byte upload
    #[error("Empty file provided")]
    EmptyFile,

    /// Workbook has no sheet or the first sheet has no cells
    #[error("Worksheet is empty")]
    EmptySheet,

    /// Sheet has cells but nothing below the header
    #[error("No data rows found")]
    NoDataRows,

    /// xlsx/xls decoding failure
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// csv decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Export writer failure
    #[error("Export failed: {0}")]
    Export(String),
}

impl ImportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) | Self::Workbook(_) | Self::Csv(_) => ErrorCode::SpreadsheetUnreadable,
            Self::UnsupportedFormat(_) => ErrorCode::UnsupportedFileFormat,
            Self::FileTooLarge { .. } => ErrorCode::FileTooLarge,
            Self::EmptyFile => ErrorCode::EmptyFile,
            Self::EmptySheet => ErrorCode::EmptySheet,
            Self::NoDataRows => ErrorCode::NoDataRows,
            Self::Export(_) => ErrorCode::ExportFailed,
        }
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        let code = err.code();
        match &err {
            ImportError::FileTooLarge { size, limit } => AppError::with_message(code, err.to_string())
                .with_detail("size", *size)
                .with_detail("limit", *limit),
            ImportError::UnsupportedFormat(ext) => {
                AppError::with_message(code, err.to_string()).with_detail("extension", ext.clone())
            }
            _ => AppError::with_message(code, err.to_string()),
        }
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ImportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
