//! Upload decoding: base64 → xlsx workbook → string grid → records.

use std::collections::HashMap;
use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use calamine::{open_workbook_from_rs, Reader, Xlsx, XlsxError};
use thiserror::Error;

use crate::models::record::UserRecord;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Error in decoding file: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to read Excel sheet: {0}")]
    Workbook(#[from] XlsxError),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Sheet has no rows")]
    Empty,
}

/// A recognised column. Header matching is on the trimmed, lower-cased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Experience,
    Location,
    MobileNo,
    Email,
    Designation,
    Company,
    LinkedinUrl,
    CompanyUrl,
}

impl Column {
    const ALL: [Column; 9] = [
        Column::Name,
        Column::Experience,
        Column::Location,
        Column::MobileNo,
        Column::Email,
        Column::Designation,
        Column::Company,
        Column::LinkedinUrl,
        Column::CompanyUrl,
    ];

    const fn header(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Experience => "experience",
            Column::Location => "location",
            Column::MobileNo => "mobile no",
            Column::Email => "email",
            Column::Designation => "designation",
            Column::Company => "company",
            Column::LinkedinUrl => "linkedin url",
            Column::CompanyUrl => "company url",
        }
    }

    fn field_mut(self, record: &mut UserRecord) -> &mut String {
        match self {
            Column::Name => &mut record.name,
            Column::Experience => &mut record.experience,
            Column::Location => &mut record.location,
            Column::MobileNo => &mut record.mobile_no,
            Column::Email => &mut record.email,
            Column::Designation => &mut record.designation,
            Column::Company => &mut record.company,
            Column::LinkedinUrl => &mut record.linkedin_url,
            Column::CompanyUrl => &mut record.company_website,
        }
    }
}

/// Decodes the base64 payload and returns the first worksheet as strings.
///
/// The grid covers the sheet's used range only, so leading blank rows and
/// columns are dropped and the header is the first non-empty row.
pub fn decode_upload(file_data: &str) -> Result<Vec<Vec<String>>, SheetError> {
    let bytes = STANDARD.decode(file_data.trim())?;
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect())
}

/// Maps a string grid to records. The first row is the header; unknown
/// headers are ignored and missing ones leave the field empty. Fully blank
/// rows are skipped.
pub fn parse_records(rows: &[Vec<String>]) -> Result<Vec<UserRecord>, SheetError> {
    let (header, body) = rows.split_first().ok_or(SheetError::Empty)?;

    // Later duplicates win, matching a plain map insert.
    let index: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let columns: Vec<(Column, usize)> = Column::ALL
        .iter()
        .filter_map(|&c| index.get(c.header()).map(|&i| (c, i)))
        .collect();

    Ok(body
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            let mut record = UserRecord::default();
            for &(column, i) in &columns {
                if let Some(cell) = row.get(i) {
                    *column.field_mut(&mut record) = cell.trim().to_string();
                }
            }
            record
        })
        .collect())
}

pub fn records_from_upload(file_data: &str) -> Result<Vec<UserRecord>, SheetError> {
    parse_records(&decode_upload(file_data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::xlsx_upload;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_headers_are_trimmed_and_case_insensitive() {
        let rows = grid(&[
            &["  NAME ", "Email", "LinkedIn URL", "Company URL", "Mobile No"],
            &["Ada Lovelace", "ada@acme.io", "https://li/ada", "https://acme.io", "555"],
        ]);
        let records = parse_records(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada Lovelace");
        assert_eq!(records[0].email, "ada@acme.io");
        assert_eq!(records[0].linkedin_url, "https://li/ada");
        assert_eq!(records[0].company_website, "https://acme.io");
        assert_eq!(records[0].mobile_no, "555");
    }

    #[test]
    fn test_missing_column_leaves_field_empty() {
        let rows = grid(&[&["name", "company"], &["Ada", "Acme"]]);
        let records = parse_records(&rows).unwrap();
        assert_eq!(records[0].company, "Acme");
        assert_eq!(records[0].designation, "");
        assert_eq!(records[0].email, "");
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let rows = grid(&[&["favourite colour", "name"], &["blue", "Ada"]]);
        let records = parse_records(&rows).unwrap();
        assert_eq!(records[0].name, "Ada");
    }

    #[test]
    fn test_short_row_does_not_error() {
        let rows = grid(&[&["name", "designation", "location"], &["Ada"]]);
        let records = parse_records(&rows).unwrap();
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].location, "");
    }

    #[test]
    fn test_empty_sheet_fails() {
        assert!(matches!(parse_records(&[]), Err(SheetError::Empty)));
    }

    #[test]
    fn test_header_only_sheet_yields_no_records() {
        let rows = grid(&[&["name", "email"]]);
        assert!(parse_records(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let rows = grid(&[&["name"], &["  "], &["Ada"], &[""]]);
        let records = parse_records(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        assert!(matches!(
            decode_upload("not base64 at all!!"),
            Err(SheetError::Base64(_))
        ));
    }

    #[test]
    fn test_non_xlsx_payload_is_rejected() {
        let payload = STANDARD.encode(b"name,email\nAda,ada@acme.io\n");
        assert!(matches!(decode_upload(&payload), Err(SheetError::Workbook(_))));
    }

    #[test]
    fn test_workbook_rows_become_records() {
        let payload = xlsx_upload(
            1,
            &[
                &["Name", "Email", "LinkedIn URL"],
                &["Ada Lovelace", "ada@acme.io", "https://li/ada"],
            ],
        );
        let records = records_from_upload(&payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada Lovelace");
        assert_eq!(records[0].linkedin_url, "https://li/ada");
    }

    #[test]
    fn test_header_is_first_non_empty_row() {
        let payload = xlsx_upload(2, &[&["Name", "Company"], &["Ada", "Acme"]]);

        let rows = decode_upload(&payload).unwrap();
        assert_eq!(rows[0], ["Name", "Company"]);

        let records = parse_records(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ada");
        assert_eq!(records[0].company, "Acme");
    }
}
