//! Service request intake tests

use serde_json::json;

use domain_validation::UploadRejection;
use domain_warranty::{ServiceRequestKind, WarrantyError};
use test_utils::{assert_validation_error, in_memory_intake, PayloadFixtures, UploadFixtures};

#[tokio::test]
async fn test_hsrp_with_pdf_is_accepted() {
    let (intake, store) = in_memory_intake();

    let request = intake
        .submit(
            ServiceRequestKind::Hsrp,
            PayloadFixtures::hsrp_request(),
            Some(UploadFixtures::small_pdf()),
        )
        .await
        .unwrap();

    assert_eq!(request.kind, ServiceRequestKind::Hsrp);
    assert_eq!(request.attachment, Some(UploadFixtures::small_pdf()));
    assert_eq!(request.fields["ownerName"], json!("Rohit Sharma"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_missing_document_is_rejected() {
    let (intake, store) = in_memory_intake();

    let err = intake
        .submit(ServiceRequestKind::Rsa, PayloadFixtures::rsa_request(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, WarrantyError::Upload(UploadRejection::Missing)));
    assert_eq!(err.to_string(), "No file uploaded");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_oversized_document_is_rejected() {
    let (intake, store) = in_memory_intake();

    let err = intake
        .submit(
            ServiceRequestKind::SparePart,
            PayloadFixtures::spare_part_request(),
            Some(UploadFixtures::oversized_pdf()),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "File size exceeds 5MB limit");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_text_document_is_rejected() {
    let (intake, _store) = in_memory_intake();

    let err = intake
        .submit(
            ServiceRequestKind::Hsrp,
            PayloadFixtures::hsrp_request(),
            Some(UploadFixtures::text_file()),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WarrantyError::Upload(UploadRejection::UnsupportedType { .. })
    ));
}

#[tokio::test]
async fn test_upload_gate_runs_before_field_rules() {
    let (intake, _store) = in_memory_intake();

    let err = intake
        .submit(ServiceRequestKind::Hsrp, json!({}), Some(UploadFixtures::text_file()))
        .await
        .unwrap_err();

    assert!(matches!(err, WarrantyError::Upload(_)));
}

#[tokio::test]
async fn test_invalid_fields_are_rejected_with_valid_document() {
    let (intake, store) = in_memory_intake();
    let mut payload = PayloadFixtures::hsrp_request();
    payload["mobileNumber"] = json!("12345");
    payload["vehicleType"] = json!("hovercraft");

    let err = intake
        .submit(ServiceRequestKind::Hsrp, payload, Some(UploadFixtures::small_pdf()))
        .await
        .unwrap_err();

    assert_validation_error(&err, "mobileNumber");
    assert_validation_error(&err, "vehicleType");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_die_plan_needs_no_document() {
    let (intake, _store) = in_memory_intake();

    let request = intake
        .submit(
            ServiceRequestKind::DiePlan,
            PayloadFixtures::die_plan(),
            Some(UploadFixtures::oversized_pdf()),
        )
        .await
        .unwrap();

    assert_eq!(request.kind, ServiceRequestKind::DiePlan);
    assert!(request.attachment.is_none());
}

#[tokio::test]
async fn test_list_filters_by_kind_newest_first() {
    let (intake, _store) = in_memory_intake();
    let first = intake
        .submit(ServiceRequestKind::DiePlan, PayloadFixtures::die_plan(), None)
        .await
        .unwrap();
    intake
        .submit(
            ServiceRequestKind::Rsa,
            PayloadFixtures::rsa_request(),
            Some(UploadFixtures::small_pdf()),
        )
        .await
        .unwrap();
    let second = intake
        .submit(ServiceRequestKind::DiePlan, PayloadFixtures::die_plan(), None)
        .await
        .unwrap();

    let plans = intake.list(Some(ServiceRequestKind::DiePlan)).await.unwrap();
    assert_eq!(
        plans.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
    assert_eq!(intake.list(None).await.unwrap().len(), 3);
}
