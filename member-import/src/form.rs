//! Single-record import
//!
//! Reads only the first non-blank data row of an upload and turns it into
//! form state. Submitting the form runs the stricter full-form validation.

use std::path::Path;

use serde::Serialize;
use shared::models::{MemberField, MemberRecord};

use crate::draft::{ImportClock, MemberDraft};
use crate::error::{ImportError, ImportResult};
use crate::header::HeaderRowDetector;
use crate::mapper::{first_data_row, map_row};
use crate::sheet::{self, Cell};
use crate::validate::{RowError, ValidationMode, validate_draft};

/// Form state prefilled from a spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPrefill {
    pub draft: MemberDraft,
    /// 0-based sheet row the values came from
    pub source_row: usize,
    /// Header row index, -1 when positional mapping was used
    pub header_row: isize,
    /// Fields that received a value from the sheet
    pub filled: Vec<MemberField>,
}

/// Prefill the form from the first data row of a decoded grid
pub fn prefill_from_grid(
    grid: &[Vec<Cell>],
    detector: &HeaderRowDetector,
    clock: &ImportClock,
) -> ImportResult<FormPrefill> {
    if grid.iter().all(|row| row.iter().all(Cell::is_blank)) {
        return Err(ImportError::EmptySheet);
    }

    let detection = detector.detect(grid);
    let (source_row, row) = first_data_row(grid, &detection).ok_or(ImportError::NoDataRows)?;
    let mapped = map_row(row, &detection.columns);

    tracing::info!(
        row = source_row,
        header_row = detection.header_index(),
        filled = mapped.len(),
        "Form prefilled from sheet"
    );

    Ok(FormPrefill {
        draft: MemberDraft::from_mapped(&mapped, clock),
        source_row,
        header_row: detection.header_index(),
        filled: mapped.keys().copied().collect(),
    })
}

/// Read a spreadsheet file and prefill the form from it
pub fn prefill_from_file(
    path: &Path,
    detector: &HeaderRowDetector,
    max_bytes: u64,
    clock: &ImportClock,
) -> ImportResult<FormPrefill> {
    let grid = sheet::read_file(path, max_bytes)?;
    prefill_from_grid(&grid, detector, clock)
}

/// Validate a filled-in form; errors are reported against row 1
pub fn submit_form(draft: &MemberDraft, clock: &ImportClock) -> Result<MemberRecord, RowError> {
    validate_draft(1, draft, ValidationMode::FullForm, clock.now)
}
