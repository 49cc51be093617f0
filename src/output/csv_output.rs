//! CSV result sink
//!
//! Writes the deduplicated record set as UTF-8 CSV with a header row. An
//! empty record set writes nothing; no file is created.

use crate::output::store::EmailRecord;
use crate::output::OutputError;
use std::path::Path;

/// Column order of the result file
const HEADER: [&str; 4] = ["organization", "email", "page_url", "page_type"];

/// Writes records to a CSV file at the given path
///
/// # Arguments
///
/// * `path` - Destination file path
/// * `records` - The records to write, one row each
///
/// # Returns
///
/// * `Ok(())` - File written, or nothing to write
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_csv(path: &Path, records: &[EmailRecord]) -> Result<(), OutputError> {
    if records.is_empty() {
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;

    for record in records {
        writer.write_record([
            record.organization.as_str(),
            record.email.as_str(),
            record.page_url.as_str(),
            record.page_type.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(org: &str, email: &str) -> EmailRecord {
        EmailRecord {
            organization: org.to_string(),
            email: email.to_string(),
            page_url: "https://www.gov.mn/mn/organization/foo".to_string(),
            page_type: "main".to_string(),
        }
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.csv");

        let records = vec![record("Foo Agency", "info@foo.gov.mn")];
        write_csv(&path, &records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("organization,email,page_url,page_type"));
        assert_eq!(
            lines.next(),
            Some("Foo Agency,info@foo.gov.mn,https://www.gov.mn/mn/organization/foo,main")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_records_write_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.csv");

        write_csv(&path, &[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.csv");

        let records = vec![record("Ministry of Roads, Transport", "press@mrt.gov.mn")];
        write_csv(&path, &records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Ministry of Roads, Transport\""));
    }
}
