//! Member export
//!
//! Writes records back out as CSV or XLSX using the Arabic column labels, so
//! an exported file can be re-imported unchanged. Also builds the empty
//! import template.

use std::io::Write;

use rust_xlsxwriter::{Color, DataValidation, Format, FormatPattern, Workbook, Worksheet};
use shared::models::{Gender, MemberField, MemberRecord, MembershipType, PartyUnit, Religion};

use crate::error::ImportResult;

/// Exported columns, in order; date of birth is import-only
pub fn export_fields() -> impl Iterator<Item = MemberField> {
    MemberField::ALL
        .into_iter()
        .filter(|f| *f != MemberField::DateOfBirth)
}

/// Header row of exported sheets
pub fn export_header() -> Vec<&'static str> {
    export_fields().map(|f| f.label_ar()).collect()
}

/// Text form of one record field
pub fn field_text(record: &MemberRecord, field: MemberField) -> String {
    match field {
        MemberField::Name => record.name.clone(),
        MemberField::NationalId => record.national_id.clone(),
        MemberField::Gender => record.gender.label_ar().to_string(),
        MemberField::Religion => record.religion.as_str().to_string(),
        MemberField::Age => record.age.to_string(),
        MemberField::PhoneNumber => record.phone_number.clone(),
        MemberField::Email => record.email.clone(),
        MemberField::Job => record.job.clone(),
        MemberField::Address => record.address.clone(),
        MemberField::PartyUnit => record.party_unit.as_str().to_string(),
        MemberField::MembershipNumber => record.membership_number.clone(),
        MemberField::MembershipType => record.membership_type.as_str().to_string(),
        MemberField::RegistrationDate => record.registration_date.clone(),
        MemberField::DateOfBirth => String::new(),
    }
}

/// Write records as UTF-8 CSV with a BOM (spreadsheet apps need it for Arabic)
pub fn write_csv<W: Write>(records: &[MemberRecord], mut writer: W) -> ImportResult<()> {
    writer.write_all(b"\xEF\xBB\xBF")?;
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(export_header())?;
    for record in records {
        out.write_record(export_fields().map(|f| field_text(record, f)))?;
    }
    out.flush()?;
    tracing::debug!(rows = records.len(), "CSV export written");
    Ok(())
}

/// CSV export as bytes
pub fn to_csv_bytes(records: &[MemberRecord]) -> ImportResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xE6F7FF))
        .set_pattern(FormatPattern::Solid)
}

fn write_header(worksheet: &mut Worksheet) -> ImportResult<()> {
    let format = header_format();
    worksheet.set_right_to_left(true);
    for (col, label) in export_header().into_iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, label, &format)?;
        worksheet.set_column_width(col, 20)?;
    }
    Ok(())
}

/// XLSX export as bytes; age is written as a number, everything else as text
pub fn to_xlsx_bytes(records: &[MemberRecord]) -> ImportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("الأعضاء")?;
    write_header(worksheet)?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, field) in export_fields().enumerate() {
            let col = col as u16;
            if field == MemberField::Age {
                worksheet.write_number(row, col, f64::from(record.age))?;
            } else {
                worksheet.write_string(row, col, field_text(record, field))?;
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(rows = records.len(), size = bytes.len(), "XLSX export written");
    Ok(bytes)
}

/// Rows covered by the template's dropdown lists
const TEMPLATE_ROWS: u32 = 1000;

fn choices(field: MemberField) -> Vec<&'static str> {
    match field {
        MemberField::Gender => [Gender::Male, Gender::Female]
            .iter()
            .map(|g| g.label_ar())
            .collect(),
        MemberField::Religion => [Religion::Muslim, Religion::Christian]
            .iter()
            .map(|r| r.as_str())
            .collect(),
        MemberField::PartyUnit => PartyUnit::ALL.iter().map(|u| u.as_str()).collect(),
        MemberField::MembershipType => MembershipType::ALL.iter().map(|t| t.as_str()).collect(),
        _ => Vec::new(),
    }
}

/// Empty import template: header row plus dropdowns for the closed-set columns
pub fn template_xlsx_bytes() -> ImportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("قالب الاستيراد")?;
    write_header(worksheet)?;

    for (col, field) in export_fields().enumerate() {
        let list = choices(field);
        if list.is_empty() {
            continue;
        }
        let validation = DataValidation::new().allow_list_strings(list.as_slice())?;
        worksheet.add_data_validation(1, col as u16, TEMPLATE_ROWS, col as u16, &validation)?;
    }

    Ok(workbook.save_to_buffer()?)
}
