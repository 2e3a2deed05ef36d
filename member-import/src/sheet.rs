//! Spreadsheet decoding
//!
//! Turns uploaded `.xlsx` / `.xls` / `.csv` bytes into a [`Grid`] of
//! [`Cell`]s. Only the first worksheet of a workbook is read.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ImportError, ImportResult};

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

/// Parsed worksheet, row-major
pub type Grid = Vec<Vec<Cell>>;

impl Cell {
    /// Text rendering used by the row mapper
    ///
    /// Whole numbers print without a decimal point so that national IDs and
    /// phone numbers stored as numeric cells keep their digits.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Number(f)
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) => Cell::from(s.as_str()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => dt
                .as_datetime()
                .map(Cell::DateTime)
                .unwrap_or(Cell::Number(dt.as_f64())),
            Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
                .map(Cell::DateTime)
                .unwrap_or_else(|| Cell::from(s.as_str())),
            Data::DurationIso(s) => Cell::from(s.as_str()),
        }
    }
}

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SheetFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> ImportResult<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            "csv" => Ok(Self::Csv),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }
}

/// Read and decode a spreadsheet file
pub fn read_file(path: &Path, max_bytes: u64) -> ImportResult<Grid> {
    let format = SheetFormat::from_path(path)?;
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(ImportError::FileTooLarge {
            size,
            limit: max_bytes,
        });
    }
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), size, "Read spreadsheet file");
    decode(&bytes, format, max_bytes)
}

/// Decode spreadsheet bytes into a grid
pub fn decode(bytes: &[u8], format: SheetFormat, max_bytes: u64) -> ImportResult<Grid> {
    if bytes.is_empty() {
        return Err(ImportError::EmptyFile);
    }
    if bytes.len() as u64 > max_bytes {
        return Err(ImportError::FileTooLarge {
            size: bytes.len() as u64,
            limit: max_bytes,
        });
    }

    let grid = match format {
        SheetFormat::Xlsx | SheetFormat::Xls => decode_workbook(bytes)?,
        SheetFormat::Csv => decode_csv(bytes)?,
    };

    if grid.iter().all(|row| row.iter().all(Cell::is_blank)) {
        return Err(ImportError::EmptySheet);
    }
    Ok(grid)
}

fn decode_workbook(bytes: &[u8]) -> ImportResult<Grid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptySheet)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect())
}

fn decode_csv(bytes: &[u8]) -> ImportResult<Grid> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .from_reader(bytes);

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(Cell::from).collect());
    }
    Ok(grid)
}
