// member-import/tests/sheet_files.rs
// 真实文件解码测试

use std::io::Write;

use chrono::{NaiveDate, TimeZone, Utc};
use member_import::export::{template_xlsx_bytes, to_csv_bytes, to_xlsx_bytes};
use member_import::{
    BatchImporter, Cell, HeaderRowDetector, ImportClock, ImportError, InMemoryStore, SheetFormat,
    prefill_from_file, sheet,
};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

fn clock() -> ImportClock {
    ImportClock::at(Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap())
}

/// Sheet with a title row, numeric IDs/phones and a real date cell for DOB
fn build_xlsx() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date = Format::new().set_num_format("yyyy-mm-dd");

    worksheet.write_string(0, 0, "كشف الأعضاء").unwrap();
    let header = ["الاسم", "الرقم القومي", "رقم الهاتف", "البريد الإلكتروني", "تاريخ الميلاد", "الجنس"];
    for (col, label) in header.iter().enumerate() {
        worksheet.write_string(2, col as u16, *label).unwrap();
    }

    worksheet.write_string(3, 0, "منى حسن").unwrap();
    worksheet.write_number(3, 1, 29001011234567.0).unwrap();
    worksheet.write_string(3, 2, "01112223333").unwrap();
    worksheet.write_string(3, 3, "Mona@Example.com").unwrap();
    let dob = ExcelDateTime::from_ymd(1990, 1, 1).unwrap();
    worksheet.write_datetime_with_format(3, 4, &dob, &date).unwrap();
    worksheet.write_string(3, 5, "أنثى").unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn test_xlsx_decoding_keeps_numbers_and_dates() {
    let grid = sheet::decode(&build_xlsx(), SheetFormat::Xlsx, 1 << 20).unwrap();
    assert_eq!(grid[3][1].as_text(), "29001011234567");
    let dob = NaiveDate::from_ymd_opt(1990, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(grid[3][4], Cell::DateTime(dob));
}

#[test]
fn test_xlsx_file_import() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("members.xlsx");
    std::fs::write(&path, build_xlsx()).unwrap();

    let mut store = InMemoryStore::new();
    let report = BatchImporter::default()
        .import_file(&path, &mut store, &clock())
        .unwrap();
    assert_eq!(report.success, 1, "errors: {:?}", report.errors);
    let record = &report.accepted[0];
    assert_eq!(record.national_id, "29001011234567");
    assert_eq!(record.email, "mona@example.com");
    assert_eq!(record.age, 36);
}

#[test]
fn test_csv_file_import_with_arabic_digits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("members.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        "\u{feff}name,national id,gender,phone,email\n\
         منى حسن,٢٩٠٠١٠١١٢٣٤٥٦٧,انثى,٠١١١٢٢٢٣٣٣٣,mona@example.com\n"
            .as_bytes(),
    )
    .unwrap();
    drop(file);

    let mut store = InMemoryStore::new();
    let report = BatchImporter::default()
        .import_file(&path, &mut store, &clock())
        .unwrap();
    assert_eq!(report.success, 1, "errors: {:?}", report.errors);
    assert_eq!(report.accepted[0].phone_number, "01112223333");
}

#[test]
fn test_structural_failures() {
    let dir = TempDir::new().unwrap();
    let importer = BatchImporter::default();
    let mut store = InMemoryStore::new();

    let pdf = dir.path().join("members.pdf");
    std::fs::write(&pdf, b"%PDF").unwrap();
    assert!(matches!(
        importer.import_file(&pdf, &mut store, &clock()),
        Err(ImportError::UnsupportedFormat(_))
    ));

    assert!(matches!(
        importer.import_bytes(b"", SheetFormat::Csv, &mut store, &clock()),
        Err(ImportError::EmptyFile)
    ));

    assert!(matches!(
        importer.import_bytes(b"not a zip", SheetFormat::Xlsx, &mut store, &clock()),
        Err(ImportError::Workbook(_))
    ));

    let template = template_xlsx_bytes().unwrap();
    assert!(matches!(
        importer.import_bytes(&template, SheetFormat::Xlsx, &mut store, &clock()),
        Err(ImportError::NoDataRows)
    ));
}

#[test]
fn test_file_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.csv");
    std::fs::write(&path, vec![b'a'; 2048]).unwrap();

    let grid = sheet::read_file(&path, 1024);
    assert!(matches!(
        grid,
        Err(ImportError::FileTooLarge { size: 2048, limit: 1024 })
    ));
}

#[test]
fn test_export_reimports_as_duplicates() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("members.xlsx");
    std::fs::write(&source, build_xlsx()).unwrap();

    let importer = BatchImporter::default();
    let mut store = InMemoryStore::new();
    let first = importer.import_file(&source, &mut store, &clock()).unwrap();
    assert_eq!(first.success, 1);

    for (bytes, format) in [
        (to_xlsx_bytes(&first.accepted).unwrap(), SheetFormat::Xlsx),
        (to_csv_bytes(&first.accepted).unwrap(), SheetFormat::Csv),
    ] {
        let mut fresh = InMemoryStore::new();
        let report = importer.import_bytes(&bytes, format, &mut fresh, &clock()).unwrap();
        assert_eq!(report.accepted, first.accepted, "{format:?}");

        let again = importer.import_bytes(&bytes, format, &mut store, &clock()).unwrap();
        assert_eq!(again.duplicates, 1);
    }
}

#[test]
fn test_prefill_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("member.xlsx");
    std::fs::write(&path, build_xlsx()).unwrap();

    let prefill =
        prefill_from_file(&path, &HeaderRowDetector::default(), 1 << 20, &clock()).unwrap();
    assert_eq!(prefill.header_row, 2);
    assert_eq!(prefill.draft.name, "منى حسن");
    assert_eq!(prefill.draft.age, 36);
}
