//! Pre-built Test Fixtures
//!
//! Payloads that satisfy the built-in rule sets, and uploads on either side
//! of the upload gate.

use domain_validation::FileUpload;
use serde_json::{json, Value};

/// One mebibyte
pub const MIB: u64 = 1024 * 1024;

/// Fixture for request payloads
pub struct PayloadFixtures;

impl PayloadFixtures {
    /// A partial warranty claim, as saved from the draft form
    pub fn warranty_draft() -> Value {
        json!({
            "vehicleNumber": "MH02AB1234",
            "description": "Clutch slipping in third gear",
            "dealerCode": "DLR-0192"
        })
    }

    /// A complete warranty claim
    pub fn warranty_submission() -> Value {
        json!({
            "vehicleNumber": "MH02AB1234",
            "customerName": "Asha Patel",
            "customerPhone": "9876543210",
            "description": "Clutch slipping in third gear under load",
            "purchaseDate": "2024-03-15"
        })
    }

    pub fn hsrp_request() -> Value {
        json!({
            "vehicleNumber": "DL8CAF5030",
            "ownerName": "Rohit Sharma",
            "mobileNumber": "9811122233",
            "chassisNumber": "MA3EYD81S00123456",
            "engineNumber": "K12MN1234567",
            "vehicleType": "four_wheeler"
        })
    }

    pub fn rsa_request() -> Value {
        json!({
            "vehicleNumber": "KA01AB1234",
            "contactNumber": "9876543210",
            "location": "MG Road, Bengaluru",
            "issueType": "flat_tyre"
        })
    }

    pub fn spare_part_request() -> Value {
        json!({
            "partNumber": "BRK-2045",
            "partName": "Brake pad set",
            "quantity": 4,
            "vehicleModel": "Swift VXi",
            "urgency": "medium"
        })
    }

    pub fn die_plan() -> Value {
        json!({
            "dieCode": "DIE-0042",
            "partNumber": "PN-778",
            "plannedDate": "2025-01-10",
            "quantity": 500,
            "shift": "A"
        })
    }
}

/// Fixture for uploaded file metadata
pub struct UploadFixtures;

impl UploadFixtures {
    /// 1 MiB PDF, accepted
    pub fn small_pdf() -> FileUpload {
        FileUpload::new("invoice.pdf", "application/pdf", MIB)
    }

    /// 6 MiB PDF, over the limit
    pub fn oversized_pdf() -> FileUpload {
        FileUpload::new("scan.pdf", "application/pdf", 6 * MIB)
    }

    /// Plain text file, wrong type
    pub fn text_file() -> FileUpload {
        FileUpload::new("notes.txt", "text/plain", 2048)
    }
}
