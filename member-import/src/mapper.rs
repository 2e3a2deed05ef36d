//! Row mapping
//!
//! Applies a [`ColumnMap`] to raw rows, producing sparse field → text maps.

use std::collections::BTreeMap;

use shared::models::MemberField;

use crate::header::{ColumnMap, HeaderDetection};
use crate::sheet::Cell;

/// Sparse canonical field → trimmed text
///
/// Unmapped columns and blank cells are absent, never empty strings.
pub type MappedRow = BTreeMap<MemberField, String>;

/// Map one raw row
pub fn map_row(row: &[Cell], columns: &ColumnMap) -> MappedRow {
    columns
        .iter()
        .filter_map(|(idx, field)| {
            let text = row.get(*idx)?.as_text();
            (!text.is_empty()).then_some((*field, text))
        })
        .collect()
}

/// Non-blank data rows below the header, with their sheet row index
pub fn data_rows<'a>(
    grid: &'a [Vec<Cell>],
    detection: &HeaderDetection,
) -> impl Iterator<Item = (usize, &'a [Cell])> + 'a {
    grid.iter()
        .enumerate()
        .skip(detection.first_data_row())
        .filter(|(_, row)| !row.iter().all(Cell::is_blank))
        .map(|(idx, row)| (idx, row.as_slice()))
}

/// First non-blank data row, used by the single-record form import
pub fn first_data_row<'a>(
    grid: &'a [Vec<Cell>],
    detection: &HeaderDetection,
) -> Option<(usize, &'a [Cell])> {
    data_rows(grid, detection).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::positional_map;

    #[test]
    fn test_map_row_is_sparse_and_trimmed() {
        let mut columns = ColumnMap::new();
        columns.insert(0, MemberField::Name);
        columns.insert(2, MemberField::Email);
        columns.insert(5, MemberField::Job);

        let row = vec![
            Cell::from("  منى حسن "),
            Cell::from("ignored"),
            Cell::Empty,
        ];
        let mapped = map_row(&row, &columns);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped.get(&MemberField::Name).unwrap(), "منى حسن");
        assert!(!mapped.contains_key(&MemberField::Email));
        assert!(!mapped.contains_key(&MemberField::Job));
    }

    #[test]
    fn test_numeric_cells_keep_digits() {
        let mut columns = ColumnMap::new();
        columns.insert(0, MemberField::NationalId);
        let mapped = map_row(&[Cell::Number(29001011234567.0)], &columns);
        assert_eq!(mapped.get(&MemberField::NationalId).unwrap(), "29001011234567");
    }

    #[test]
    fn test_first_data_row_skips_blank_rows() {
        let detection = HeaderDetection {
            header_row: Some(0),
            columns: positional_map(),
        };
        let grid = vec![
            vec![Cell::from("الاسم")],
            vec![Cell::Empty, Cell::from(" ")],
            vec![Cell::from("أحمد")],
            vec![Cell::from("منى")],
        ];
        let (idx, row) = first_data_row(&grid, &detection).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(row[0], Cell::from("أحمد"));
        assert_eq!(data_rows(&grid, &detection).count(), 2);
    }

    #[test]
    fn test_no_header_starts_at_row_zero() {
        let detection = HeaderDetection {
            header_row: None,
            columns: positional_map(),
        };
        let grid = vec![vec![Cell::from("أحمد")]];
        assert_eq!(first_data_row(&grid, &detection).unwrap().0, 0);
    }
}
