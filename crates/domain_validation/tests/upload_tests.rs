//! Tests for the file upload gate

use domain_validation::{FileUpload, UploadConstraints, UploadRejection, MAX_UPLOAD_BYTES};

const MIB: u64 = 1024 * 1024;

#[test]
fn test_missing_file_rejected() {
    let result = UploadConstraints::default().check(None);
    assert_eq!(result, Err(UploadRejection::Missing));
    assert_eq!(UploadRejection::Missing.to_string(), "No file uploaded");
}

#[test]
fn test_six_mib_file_rejected_with_size_message() {
    let file = FileUpload::new("scan.pdf", "application/pdf", 6 * MIB);

    let rejection = UploadConstraints::default().check(Some(&file)).unwrap_err();

    assert_eq!(
        rejection,
        UploadRejection::TooLarge { size_bytes: 6 * MIB, max_bytes: MAX_UPLOAD_BYTES }
    );
    assert_eq!(rejection.to_string(), "File size exceeds 5MB limit");
}

#[test]
fn test_text_file_rejected_with_type_message() {
    let file = FileUpload::new("notes.txt", "text/plain", 1024);

    let rejection = UploadConstraints::default().check(Some(&file)).unwrap_err();

    assert!(matches!(rejection, UploadRejection::UnsupportedType { .. }));
    assert_eq!(
        rejection.to_string(),
        "Invalid file type. Only PDF, JPEG, PNG, DOC and DOCX files are allowed"
    );
}

#[test]
fn test_one_mib_pdf_accepted() {
    let file = FileUpload::new("invoice.pdf", "application/pdf", MIB);
    assert!(UploadConstraints::default().check(Some(&file)).is_ok());
}

#[test]
fn test_all_default_types_accepted() {
    let constraints = UploadConstraints::default();
    for content_type in [
        "application/pdf",
        "image/jpeg",
        "image/png",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ] {
        let file = FileUpload::new("f", content_type, 10);
        assert!(constraints.check(Some(&file)).is_ok(), "{} should be allowed", content_type);
    }
}

#[test]
fn test_custom_ceiling_reflected_in_message() {
    let constraints = UploadConstraints {
        max_bytes: 2 * MIB,
        ..Default::default()
    };
    let file = FileUpload::new("photo.png", "image/png", 3 * MIB);

    let rejection = constraints.check(Some(&file)).unwrap_err();
    assert_eq!(rejection.to_string(), "File size exceeds 2MB limit");
}
