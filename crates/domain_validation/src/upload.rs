//! File upload gate
//!
//! Uploads are checked separately from field rules: a file must be attached,
//! must not exceed the size ceiling, and must declare an allowed content
//! type. Checks run in that order and the first failure is reported.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default upload ceiling (5 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Content types accepted by default: PDF, JPEG, PNG, DOC, DOCX
pub const DEFAULT_ALLOWED_TYPES: [&str; 5] = [
    "application/pdf",
    "image/jpeg",
    "image/png",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Metadata of an uploaded file as declared by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
        }
    }
}

/// Reason an upload was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("No file uploaded")]
    Missing,

    #[error("File size exceeds {} limit", size_label(.max_bytes))]
    TooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("Invalid file type. Only PDF, JPEG, PNG, DOC and DOCX files are allowed")]
    UnsupportedType { content_type: String },
}

/// Whole megabytes when exact, otherwise kilobytes or bytes
fn size_label(bytes: &u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    match *bytes {
        b if b >= MIB && b % MIB == 0 => format!("{}MB", b / MIB),
        b if b >= MIB => format!("{:.1}MB", b as f64 / MIB as f64),
        b if b >= KIB && b % KIB == 0 => format!("{}KB", b / KIB),
        b => format!("{} bytes", b),
    }
}

/// Size ceiling and content-type allow-list for uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConstraints {
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadConstraints {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadConstraints {
    /// Checks an optional upload against the constraints
    pub fn check(&self, file: Option<&FileUpload>) -> Result<(), UploadRejection> {
        let file = file.ok_or(UploadRejection::Missing)?;

        if file.size_bytes > self.max_bytes {
            debug!(file = %file.file_name, size = file.size_bytes, "Upload exceeds size limit");
            return Err(UploadRejection::TooLarge {
                size_bytes: file.size_bytes,
                max_bytes: self.max_bytes,
            });
        }

        if !self.is_allowed(&file.content_type) {
            debug!(file = %file.file_name, content_type = %file.content_type, "Upload type not allowed");
            return Err(UploadRejection::UnsupportedType {
                content_type: file.content_type.clone(),
            });
        }

        Ok(())
    }

    /// Compares by MIME essence, ignoring parameters and case
    pub fn is_allowed(&self, content_type: &str) -> bool {
        let Ok(parsed) = content_type.trim().parse::<mime::Mime>() else {
            return false;
        };
        let essence = parsed.essence_str();
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    }
}
