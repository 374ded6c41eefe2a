//! Spreadsheet uploads forwarded verbatim to the API.

use actix_multipart::form::{MultipartForm, tempfile::TempFile};

use crate::forms::FormError;
use crate::repository::UploadFile;

const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

#[derive(MultipartForm)]
pub struct UploadSpreadsheetForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

/// Checks the file name and reads the spooled upload into memory.
pub fn spreadsheet(
    file_name: Option<&str>,
    content_type: Option<String>,
    bytes: Vec<u8>,
) -> Result<UploadFile, FormError> {
    let file_name = file_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(FormError::MissingFile)?;
    if bytes.is_empty() {
        return Err(FormError::MissingFile);
    }
    let accepted = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if !accepted {
        return Err(FormError::UnsupportedFile);
    }
    Ok(UploadFile {
        file_name: file_name.to_string(),
        content_type,
        bytes,
    })
}

impl TryFrom<UploadSpreadsheetForm> for UploadFile {
    type Error = FormError;

    fn try_from(form: UploadSpreadsheetForm) -> Result<Self, Self::Error> {
        let bytes = std::fs::read(form.file.file.path())
            .map_err(|err| FormError::UnreadableFile(err.to_string()))?;
        spreadsheet(
            form.file.file_name.as_deref(),
            form.file.content_type.map(|mime| mime.to_string()),
            bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_excel_files_pass() {
        let file = spreadsheet(Some("members.XLSX"), None, vec![1, 2, 3]).unwrap();
        assert_eq!(file.file_name, "members.XLSX");

        assert!(matches!(
            spreadsheet(Some("members.csv"), None, vec![1]),
            Err(FormError::UnsupportedFile)
        ));
        assert!(matches!(
            spreadsheet(None, None, vec![1]),
            Err(FormError::MissingFile)
        ));
        assert!(matches!(
            spreadsheet(Some("empty.xls"), None, Vec::new()),
            Err(FormError::MissingFile)
        ));
    }

    #[test]
    fn spooled_upload_is_read_into_memory() {
        use std::io::Write;

        let mut spooled = tempfile::NamedTempFile::new().unwrap();
        spooled.write_all(b"PK\x03\x04").unwrap();
        let form = UploadSpreadsheetForm {
            file: TempFile {
                file: spooled,
                content_type: None,
                file_name: Some("expenses.xlsx".into()),
                size: 4,
            },
        };

        let upload = UploadFile::try_from(form).unwrap();
        assert_eq!(upload.file_name, "expenses.xlsx");
        assert_eq!(upload.bytes, b"PK\x03\x04");
    }
}
