//! Batch import
//!
//! Drives every candidate row through normalization, validation and duplicate
//! detection. One bad row never stops the rest of the sheet; the report
//! accounts for every input row exactly once.

use std::path::Path;

use serde::Serialize;
use shared::models::MemberRecord;

use crate::alias::ColumnAliasResolver;
use crate::config::ImportConfig;
use crate::draft::{ImportClock, MemberDraft};
use crate::error::{ImportError, ImportResult};
use crate::header::HeaderRowDetector;
use crate::mapper::{data_rows, map_row};
use crate::sheet::{self, Cell, SheetFormat};
use crate::store::MemberStore;
use crate::validate::{RowError, ValidationMode, validate_draft};

/// Aggregate outcome of one import invocation
///
/// Serializes as `{ "success", "errors", "duplicates" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    /// Accepted rows
    pub success: usize,
    /// One localized message per rejected row, duplicates included, in row order
    pub errors: Vec<String>,
    /// Rows rejected because an identity field was already taken
    pub duplicates: usize,
    /// Records accepted by this run, ready for submission
    #[serde(skip)]
    pub accepted: Vec<MemberRecord>,
    /// Structured form of `errors`
    #[serde(skip)]
    pub row_errors: Vec<RowError>,
}

impl ImportReport {
    /// Rows seen by the importer
    pub fn total(&self) -> usize {
        self.success + self.row_errors.len()
    }

    /// Rejected rows that were not duplicates
    pub fn invalid(&self) -> usize {
        self.row_errors.len() - self.duplicates
    }

    fn reject(&mut self, err: RowError) {
        tracing::debug!(row = err.row, code = %err.code, "Row rejected: {}", err.message);
        self.errors.push(err.to_string());
        self.row_errors.push(err);
    }
}

/// Bulk import entry point
#[derive(Debug, Clone)]
pub struct BatchImporter {
    detector: HeaderRowDetector,
    mode: ValidationMode,
    max_import_bytes: u64,
}

impl BatchImporter {
    pub fn new(detector: HeaderRowDetector, mode: ValidationMode, max_import_bytes: u64) -> Self {
        Self {
            detector,
            mode,
            max_import_bytes,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        let detector = HeaderRowDetector::new(
            ColumnAliasResolver::default(),
            config.header_scan_rows,
            config.header_min_matches,
        );
        Self::new(detector, ValidationMode::QuickImport, config.max_import_bytes)
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn detector(&self) -> &HeaderRowDetector {
        &self.detector
    }

    /// Import already-parsed candidates
    ///
    /// Rows are numbered from 1 in sequence order. Accepted records go into
    /// `store` immediately so later rows of the same batch see them.
    pub fn import_drafts<S>(
        &self,
        drafts: impl IntoIterator<Item = MemberDraft>,
        store: &mut S,
        clock: &ImportClock,
    ) -> ImportReport
    where
        S: MemberStore + ?Sized,
    {
        let mut report = ImportReport::default();

        for (idx, draft) in drafts.into_iter().enumerate() {
            let row = idx + 1;
            let record = match validate_draft(row, &draft, self.mode, clock.now) {
                Ok(record) => record,
                Err(err) => {
                    report.reject(err);
                    continue;
                }
            };

            if let Some(field) = store.find_conflict(&record) {
                report.duplicates += 1;
                report.reject(RowError::duplicate(row, field));
                continue;
            }

            store.insert(record.clone());
            report.success += 1;
            report.accepted.push(record);
        }

        tracing::info!(
            success = report.success,
            duplicates = report.duplicates,
            invalid = report.invalid(),
            total = report.total(),
            "Batch import finished"
        );
        report
    }

    /// Import every non-blank data row of a decoded grid
    pub fn import_grid<S>(
        &self,
        grid: &[Vec<Cell>],
        store: &mut S,
        clock: &ImportClock,
    ) -> ImportResult<ImportReport>
    where
        S: MemberStore + ?Sized,
    {
        if grid.iter().all(|row| row.iter().all(Cell::is_blank)) {
            tracing::warn!("Import aborted: worksheet is empty");
            return Err(ImportError::EmptySheet);
        }

        let detection = self.detector.detect(grid);
        let drafts: Vec<MemberDraft> = data_rows(grid, &detection)
            .map(|(_, row)| MemberDraft::from_mapped(&map_row(row, &detection.columns), clock))
            .collect();
        if drafts.is_empty() {
            tracing::warn!(
                header_row = detection.header_index(),
                "Import aborted: no data rows below the header"
            );
            return Err(ImportError::NoDataRows);
        }

        tracing::info!(
            header_row = detection.header_index(),
            columns = detection.columns.len(),
            rows = drafts.len(),
            "Importing sheet"
        );
        Ok(self.import_drafts(drafts, store, clock))
    }

    /// Decode spreadsheet bytes and import them
    pub fn import_bytes<S>(
        &self,
        bytes: &[u8],
        format: SheetFormat,
        store: &mut S,
        clock: &ImportClock,
    ) -> ImportResult<ImportReport>
    where
        S: MemberStore + ?Sized,
    {
        let grid = sheet::decode(bytes, format, self.max_import_bytes)?;
        self.import_grid(&grid, store, clock)
    }

    /// Read a spreadsheet file and import it
    pub fn import_file<S>(
        &self,
        path: &Path,
        store: &mut S,
        clock: &ImportClock,
    ) -> ImportResult<ImportReport>
    where
        S: MemberStore + ?Sized,
    {
        let grid = sheet::read_file(path, self.max_import_bytes)?;
        self.import_grid(&grid, store, clock)
    }
}

impl Default for BatchImporter {
    fn default() -> Self {
        Self::from_config(&ImportConfig::default())
    }
}
