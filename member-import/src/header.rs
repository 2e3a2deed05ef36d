//! Header row detection
//!
//! Two phases: content-based detection over the first rows of the sheet,
//! then a positional fallback when no row looks like a header.

use std::collections::BTreeMap;

use shared::models::MemberField;

use crate::alias::ColumnAliasResolver;
use crate::config::{DEFAULT_HEADER_MIN_MATCHES, DEFAULT_HEADER_SCAN_ROWS};
use crate::sheet::Cell;

/// Column index → canonical field
pub type ColumnMap = BTreeMap<usize, MemberField>;

/// Outcome of header detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDetection {
    /// Index of the header row; `None` when the positional fallback was used
    pub header_row: Option<usize>,
    pub columns: ColumnMap,
}

impl HeaderDetection {
    /// Row index where data starts
    pub fn first_data_row(&self) -> usize {
        self.header_row.map_or(0, |i| i + 1)
    }

    /// Header index with -1 for "no header found"
    pub fn header_index(&self) -> isize {
        self.header_row.map_or(-1, |i| i as isize)
    }
}

/// Finds the header row of a sheet
#[derive(Debug, Clone)]
pub struct HeaderRowDetector {
    resolver: ColumnAliasResolver,
    scan_rows: usize,
    min_matches: usize,
}

impl HeaderRowDetector {
    pub fn new(resolver: ColumnAliasResolver, scan_rows: usize, min_matches: usize) -> Self {
        Self {
            resolver,
            scan_rows,
            min_matches: min_matches.max(1),
        }
    }

    pub fn resolver(&self) -> &ColumnAliasResolver {
        &self.resolver
    }

    /// Map one row's cells to fields; the first column claiming a field wins
    pub fn map_row(&self, row: &[Cell]) -> ColumnMap {
        let mut columns = ColumnMap::new();
        let mut seen = Vec::new();
        for (idx, cell) in row.iter().enumerate() {
            if let Some(field) = self.resolver.resolve_cell(cell)
                && !seen.contains(&field)
            {
                seen.push(field);
                columns.insert(idx, field);
            }
        }
        columns
    }

    /// Scan the grid; the first row reaching the threshold is the header
    pub fn detect(&self, grid: &[Vec<Cell>]) -> HeaderDetection {
        for (row_idx, row) in grid.iter().take(self.scan_rows).enumerate() {
            let columns = self.map_row(row);
            if columns.len() >= self.min_matches {
                tracing::debug!(
                    row = row_idx,
                    matched = columns.len(),
                    "Header row detected"
                );
                return HeaderDetection {
                    header_row: Some(row_idx),
                    columns,
                };
            }
        }

        tracing::debug!(
            scanned = grid.len().min(self.scan_rows),
            "No header row found, using positional mapping"
        );
        HeaderDetection {
            header_row: None,
            columns: positional_map(),
        }
    }
}

impl Default for HeaderRowDetector {
    fn default() -> Self {
        Self::new(
            ColumnAliasResolver::default(),
            DEFAULT_HEADER_SCAN_ROWS,
            DEFAULT_HEADER_MIN_MATCHES,
        )
    }
}

/// Column i → i-th field in declared order
pub fn positional_map() -> ColumnMap {
    MemberField::ALL.iter().copied().enumerate().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    #[test]
    fn test_detects_header_after_title_rows() {
        let grid = vec![
            row(&["كشف أعضاء الوحدة"]),
            row(&[]),
            row(&["الاسم", "الرقم القومي", "ملاحظات", "الجنس", "رقم الهاتف", "email"]),
            row(&["أحمد", "12345678901234", "", "ذكر", "01012345678", "a@b.co"]),
        ];
        let detection = HeaderRowDetector::default().detect(&grid);
        assert_eq!(detection.header_row, Some(2));
        assert_eq!(detection.first_data_row(), 3);
        assert_eq!(detection.columns.len(), 5);
        assert_eq!(detection.columns.get(&0), Some(&MemberField::Name));
        assert_eq!(detection.columns.get(&2), None);
        assert_eq!(detection.columns.get(&5), Some(&MemberField::Email));
    }

    #[test]
    fn test_first_qualifying_row_wins() {
        let grid = vec![
            row(&["name", "national id", "gender", "religion", "age"]),
            row(&[
                "name", "national id", "gender", "religion", "age", "phone", "email", "job",
            ]),
        ];
        let detection = HeaderRowDetector::default().detect(&grid);
        assert_eq!(detection.header_row, Some(0));
        assert_eq!(detection.columns.len(), 5);
    }

    #[test]
    fn test_duplicate_columns_keep_first() {
        let detector = HeaderRowDetector::default();
        let columns = detector.map_row(&row(&["email", "name", "E-mail", "الايميل"]));
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.get(&0), Some(&MemberField::Email));
        assert_eq!(columns.get(&2), None);
    }

    #[test]
    fn test_four_matches_is_not_a_header() {
        let grid = vec![
            row(&["name", "national id", "gender", "religion"]),
            row(&["أحمد", "12345678901234", "ذكر", "مسلم"]),
        ];
        let detection = HeaderRowDetector::default().detect(&grid);
        assert_eq!(detection.header_row, None);
        assert_eq!(detection.header_index(), -1);
        assert_eq!(detection.first_data_row(), 0);
        assert_eq!(detection.columns, positional_map());
    }

    #[test]
    fn test_header_beyond_scan_window_is_ignored() {
        let mut grid: Vec<Vec<Cell>> = (0..20).map(|_| row(&["x"])).collect();
        grid.push(row(&["name", "national id", "gender", "religion", "age"]));
        let detection = HeaderRowDetector::default().detect(&grid);
        assert_eq!(detection.header_row, None);

        let wider = HeaderRowDetector::new(ColumnAliasResolver::default(), 21, 5);
        assert_eq!(wider.detect(&grid).header_row, Some(20));
    }

    #[test]
    fn test_positional_map_order() {
        let map = positional_map();
        assert_eq!(map.get(&0), Some(&MemberField::Name));
        assert_eq!(map.get(&1), Some(&MemberField::NationalId));
        assert_eq!(map.get(&2), Some(&MemberField::Gender));
        assert_eq!(map.len(), MemberField::ALL.len());
    }
}
