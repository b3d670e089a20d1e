//! Unit tests for the Identifiers module
//!
//! Covers creation, parsing with and without the display prefix,
//! conversion, and JSON representation.

use core_kernel::{ClaimId, ServiceRequestId};
use proptest::prelude::*;
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClaimId::new_v7();
        let id2 = ClaimId::new_v7();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = ClaimId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_default_is_time_ordered() {
        let id = ClaimId::default();
        assert_eq!(id.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ClaimId::prefix(), "WCL");
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = ClaimId::new_v7();
        let parsed: ClaimId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ClaimId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("not-an-id".parse::<ClaimId>().is_err());
        assert!("".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_json_is_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = ClaimId::from_uuid(uuid);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(uuid.to_string()));
    }
}

mod service_request_id_tests {
    use super::*;

    #[test]
    fn test_prefix_and_display() {
        assert_eq!(ServiceRequestId::prefix(), "SRQ");
        assert!(ServiceRequestId::new().to_string().starts_with("SRQ-"));
    }

    #[test]
    fn test_other_prefix_is_not_stripped() {
        let claim = ClaimId::new_v7();
        assert!(claim.to_string().parse::<ServiceRequestId>().is_err());
    }
}

proptest! {
    #[test]
    fn prop_parse_accepts_any_uuid(bytes in any::<[u8; 16]>()) {
        let uuid = Uuid::from_bytes(bytes);
        let parsed: ClaimId = format!("WCL-{}", uuid).parse().unwrap();
        prop_assert_eq!(Uuid::from(parsed), uuid);
    }
}
