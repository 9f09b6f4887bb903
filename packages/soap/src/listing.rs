//! Remote file listings (`ListTemplates`, `ListImages`).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, SoapError};

/// A template or image stored on the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteFile {
    pub filename: String,
    pub file_size: u64,
    pub create_time: DateTime<Utc>,
    pub modify_time: DateTime<Utc>,
}

impl RemoteFile {
    /// Parse one listing row: `[filename, modified, size, created]`, with
    /// both dates in RFC 1123 form.
    pub fn from_row(row: &[String]) -> Result<Self> {
        let [filename, modified, size, created] = row else {
            return Err(SoapError::malformed(format!(
                "listing row has {} columns, expected 4",
                row.len()
            )));
        };

        let file_size = size.trim().parse().map_err(|_| {
            SoapError::malformed(format!("file size of '{}' is not a number: '{}'", filename, size))
        })?;

        Ok(Self {
            filename: filename.clone(),
            file_size,
            create_time: parse_date(created)?,
            modify_time: parse_date(modified)?,
        })
    }

    /// Parse every row of a listing, keeping service order.
    pub fn from_table(rows: &[Vec<String>]) -> Result<Vec<Self>> {
        rows.iter().map(|row| Self::from_row(row)).collect()
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| SoapError::malformed(format!("invalid date '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_listing_row() {
        let file = RemoteFile::from_row(&row(&[
            "invoice.docx",
            "Mon, 02 Mar 2009 10:15:00 GMT",
            "20480",
            "Sun, 01 Mar 2009 08:00:00 GMT",
        ]))
        .unwrap();

        assert_eq!(file.filename, "invoice.docx");
        assert_eq!(file.file_size, 20480);
        assert_eq!(file.create_time, Utc.with_ymd_and_hms(2009, 3, 1, 8, 0, 0).unwrap());
        assert_eq!(file.modify_time, Utc.with_ymd_and_hms(2009, 3, 2, 10, 15, 0).unwrap());
    }

    #[test]
    fn rejects_short_rows_and_bad_values() {
        assert!(RemoteFile::from_row(&row(&["a.docx", "1"])).is_err());
        assert!(RemoteFile::from_row(&row(&[
            "a.docx",
            "Mon, 02 Mar 2009 10:15:00 GMT",
            "big",
            "Sun, 01 Mar 2009 08:00:00 GMT",
        ]))
        .is_err());
        assert!(RemoteFile::from_row(&row(&["a.docx", "yesterday", "1", "today"])).is_err());
    }

    #[test]
    fn empty_listing_is_empty() {
        assert!(RemoteFile::from_table(&[]).unwrap().is_empty());
    }
}
