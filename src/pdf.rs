//! PDF upload checks shared by the upload endpoint and the client
//!
//! Both sides refuse anything that is not `application/pdf` or is larger than
//! 10 MB; the server additionally checks the `%PDF-` magic bytes and counts
//! pages by scanning for `/Type /Page` objects.

use thiserror::Error;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Upload limit: 10 MB
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please upload a PDF file")]
    NotPdf,

    #[error("File size must be less than 10MB")]
    TooLarge,

    #[error("No file provided")]
    Empty,
}

/// Check the declared content type and size
pub fn validate_upload(content_type: Option<&str>, len: usize, limit: usize) -> Result<(), UploadError> {
    let is_pdf = content_type
        .map(|ct| ct.split(';').next().unwrap_or("").trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        .unwrap_or(false);
    if !is_pdf {
        return Err(UploadError::NotPdf);
    }
    if len == 0 {
        return Err(UploadError::Empty);
    }
    if len > limit {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

/// True if the bytes start with the PDF header
pub fn has_pdf_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Count `/Type /Page` objects, skipping the `/Pages` tree nodes
pub fn count_pages(bytes: &[u8]) -> u32 {
    const TYPE: &[u8] = b"/Type";
    const PAGE: &[u8] = b"/Page";

    let mut pages = 0;
    let mut i = 0;
    while i + TYPE.len() <= bytes.len() {
        if &bytes[i..i + TYPE.len()] != TYPE {
            i += 1;
            continue;
        }

        let mut j = i + TYPE.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }

        if bytes[j..].starts_with(PAGE) {
            let next = bytes.get(j + PAGE.len()).copied();
            if !matches!(next, Some(c) if c.is_ascii_alphanumeric()) {
                pages += 1;
            }
        }
        i = j;
    }
    pages
}

/// Display title for an uploaded file: its name without the `.pdf` suffix
pub fn title_from_filename(filename: Option<&str>) -> String {
    let name = filename
        .map(|f| f.rsplit(['/', '\\']).next().unwrap_or(f).trim())
        .unwrap_or("");

    let stem = match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".pdf") => {
            &name[..cut]
        }
        _ => name,
    };

    if stem.is_empty() {
        "Untitled document".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload(Some("application/pdf"), 1024, MAX_PDF_BYTES).is_ok());
        assert!(validate_upload(Some("application/pdf; charset=binary"), 1, MAX_PDF_BYTES).is_ok());

        assert_eq!(
            validate_upload(Some("image/png"), 1024, MAX_PDF_BYTES),
            Err(UploadError::NotPdf)
        );
        assert_eq!(validate_upload(None, 1024, MAX_PDF_BYTES), Err(UploadError::NotPdf));
        assert_eq!(
            validate_upload(Some("application/pdf"), MAX_PDF_BYTES + 1, MAX_PDF_BYTES),
            Err(UploadError::TooLarge)
        );
        assert!(validate_upload(Some("application/pdf"), MAX_PDF_BYTES, MAX_PDF_BYTES).is_ok());
        assert_eq!(
            validate_upload(Some("application/pdf"), 0, MAX_PDF_BYTES),
            Err(UploadError::Empty)
        );
    }

    #[test]
    fn test_upload_error_messages() {
        assert_eq!(UploadError::NotPdf.to_string(), "Please upload a PDF file");
        assert_eq!(UploadError::TooLarge.to_string(), "File size must be less than 10MB");
    }

    #[test]
    fn test_count_pages() {
        let doc = b"%PDF-1.4\n1 0 obj << /Type /Pages /Kids [2 0 R 3 0 R] /Count 2 >> endobj\n\
                    2 0 obj << /Type /Page /Parent 1 0 R >> endobj\n\
                    3 0 obj << /Type/Page /Parent 1 0 R >> endobj\n%%EOF";
        assert_eq!(count_pages(doc), 2);
        assert_eq!(count_pages(b"%PDF-1.4\n%%EOF"), 0);
        assert_eq!(count_pages(b"/Type"), 0);
    }

    #[test]
    fn test_magic() {
        assert!(has_pdf_magic(b"%PDF-1.7 rest"));
        assert!(!has_pdf_magic(b"PK\x03\x04"));
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename(Some("lecture-notes.pdf")), "lecture-notes");
        assert_eq!(title_from_filename(Some("C:\\docs\\Paper.PDF")), "Paper");
        assert_eq!(title_from_filename(Some("readme")), "readme");
        assert_eq!(title_from_filename(Some(".pdf")), "Untitled document");
        assert_eq!(title_from_filename(None), "Untitled document");
    }
}
