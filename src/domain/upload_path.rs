use std::fmt;

use super::UploadId;

/// Store-relative location of an uploaded or derived file,
/// `<upload uuid>/<filename>`.
///
/// The filename is sanitized on construction so the same string addresses
/// the object store and the host filesystem without any path encoding in
/// between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPath(String);

impl UploadPath {
    pub fn new(upload_id: &UploadId, filename: &str) -> Self {
        Self(format!(
            "{}/{}",
            upload_id.as_uuid(),
            sanitize_filename(filename)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reduces a browser-supplied filename to its final path component and a
/// conservative character set (`A-Z a-z 0-9 . - _`). Anything else becomes
/// `_`, which keeps the stored name identical to the on-disk name.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

impl fmt::Display for UploadPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
