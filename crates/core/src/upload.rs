//! Uploaded image files.
//!
//! Uploads are read fully into memory and stored as opaque bytes. The
//! content type is never trusted for serving; it is sniffed from the
//! stored bytes instead.

/// Fallback content type for bytes that are not a recognised image format.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file received with a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Build an upload from a received file part.
    ///
    /// Browsers submit an empty part (no file name, no content) when the
    /// file input was left blank. That is treated as "no upload" so the
    /// caller can keep whatever image is already stored.
    pub fn from_part(
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Option<Self> {
        let file_name = file_name.unwrap_or_default().trim();
        if file_name.is_empty() && bytes.is_empty() {
            return None;
        }

        Some(Self {
            file_name: file_name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Guess the MIME type of stored image bytes from their header.
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn blank_file_input_is_no_upload() {
        assert_eq!(Upload::from_part(Some(""), Some(OCTET_STREAM), Vec::new()), None);
        assert_eq!(Upload::from_part(None, None, Vec::new()), None);
    }

    #[test]
    fn named_empty_file_is_still_an_upload() {
        let upload = Upload::from_part(Some("empty.png"), None, Vec::new()).unwrap();
        assert!(upload.is_empty());
        assert_eq!(upload.file_name, "empty.png");
    }

    #[test]
    fn upload_keeps_bytes_verbatim() {
        let upload =
            Upload::from_part(Some(" cover.png "), Some("image/png"), PNG_HEADER.to_vec()).unwrap();
        assert_eq!(upload.file_name, "cover.png");
        assert_eq!(upload.content_type.as_deref(), Some("image/png"));
        assert_eq!(upload.len(), PNG_HEADER.len());
        assert_eq!(upload.into_bytes(), PNG_HEADER);
    }

    #[test]
    fn sniffs_png() {
        assert_eq!(sniff_content_type(PNG_HEADER), "image/png");
    }

    #[test]
    fn sniffs_jpeg() {
        assert_eq!(sniff_content_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]), "image/jpeg");
    }

    #[test]
    fn unknown_bytes_fall_back_to_octet_stream() {
        assert_eq!(sniff_content_type(b"plain text"), OCTET_STREAM);
        assert_eq!(sniff_content_type(&[]), OCTET_STREAM);
    }
}
