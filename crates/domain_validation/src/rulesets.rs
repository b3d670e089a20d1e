//! Built-in rule sets for the portal's request shapes
//!
//! Each rule set is built once and shared. Field names follow the JSON
//! payloads sent by the portal front-ends (camelCase).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::gate::RuleSet;
use crate::rule::{Pattern, PhoneLocale, Rule};

/// Registration plate shape, e.g. `MH02AB1234`
static VEHICLE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z]{2}[0-9]{1,2}[A-Z]{0,3}[0-9]{4}$").expect("vehicle number pattern")
});

static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("alphanumeric pattern"));

static PART_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{3,30}$").expect("part number pattern"));

static DIE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^DIE-[0-9]{3,6}$").expect("die code pattern"));

fn vehicle_number() -> Pattern {
    Pattern::from_regex(VEHICLE_NUMBER.clone())
}

static WARRANTY_DRAFT: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("warranty_draft")
        .rule(Rule::pattern("vehicleNumber", vehicle_number(), "Invalid vehicle number format"))
        .rule(Rule::phone("customerPhone", PhoneLocale::EnIn, "Invalid phone number"))
        .rule(Rule::iso_date("purchaseDate", "Purchase date must be a valid date"))
        .rule(Rule::max_length("description", 1000, "Description cannot exceed 1000 characters"))
});

static WARRANTY_SUBMISSION: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("warranty_submission")
        .rule(Rule::required("vehicleNumber", "Vehicle number is required"))
        .rule(Rule::pattern("vehicleNumber", vehicle_number(), "Invalid vehicle number format"))
        .rule(Rule::required("customerName", "Customer name is required"))
        .rule(Rule::length("customerName", 2, 100, "Customer name must be between 2 and 100 characters"))
        .rule(Rule::required("customerPhone", "Customer phone is required"))
        .rule(Rule::phone("customerPhone", PhoneLocale::EnIn, "Invalid phone number"))
        .rule(Rule::required("description", "Description is required"))
        .rule(Rule::length("description", 10, 1000, "Description must be between 10 and 1000 characters"))
        .rule(Rule::iso_date("purchaseDate", "Purchase date must be a valid date"))
});

static HSRP_REQUEST: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("hsrp_request")
        .rule(Rule::required("vehicleNumber", "Vehicle number is required"))
        .rule(Rule::pattern("vehicleNumber", vehicle_number(), "Invalid vehicle number format"))
        .rule(Rule::required("ownerName", "Owner name is required"))
        .rule(Rule::length("ownerName", 2, 100, "Owner name must be between 2 and 100 characters"))
        .rule(Rule::required("mobileNumber", "Mobile number is required"))
        .rule(Rule::phone("mobileNumber", PhoneLocale::EnIn, "Invalid mobile number"))
        .rule(Rule::required("chassisNumber", "Chassis number is required"))
        .rule(Rule::length("chassisNumber", 17, 17, "Chassis number must be 17 characters"))
        .rule(Rule::pattern(
            "chassisNumber",
            Pattern::from_regex(ALPHANUMERIC.clone()),
            "Chassis number must be alphanumeric",
        ))
        .rule(Rule::required("engineNumber", "Engine number is required"))
        .rule(Rule::length("engineNumber", 5, 20, "Engine number must be between 5 and 20 characters"))
        .rule(Rule::required("vehicleType", "Vehicle type is required"))
        .rule(Rule::one_of(
            "vehicleType",
            ["two_wheeler", "three_wheeler", "four_wheeler", "commercial"],
            "Invalid vehicle type",
        ))
});

static RSA_REQUEST: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("rsa_request")
        .rule(Rule::required("vehicleNumber", "Vehicle number is required"))
        .rule(Rule::pattern("vehicleNumber", vehicle_number(), "Invalid vehicle number format"))
        .rule(Rule::required("contactNumber", "Contact number is required"))
        .rule(Rule::phone("contactNumber", PhoneLocale::EnIn, "Invalid contact number"))
        .rule(Rule::required("location", "Location is required"))
        .rule(Rule::length("location", 5, 250, "Location must be between 5 and 250 characters"))
        .rule(Rule::required("issueType", "Issue type is required"))
        .rule(Rule::one_of(
            "issueType",
            ["breakdown", "flat_tyre", "battery", "fuel", "towing", "accident", "other"],
            "Invalid issue type",
        ))
        .rule(Rule::iso_date("preferredDate", "Preferred date must be a valid date"))
});

static SPARE_PART_REQUEST: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("spare_part_request")
        .rule(Rule::required("partNumber", "Part number is required"))
        .rule(Rule::pattern(
            "partNumber",
            Pattern::from_regex(PART_NUMBER.clone()),
            "Invalid part number format",
        ))
        .rule(Rule::required("partName", "Part name is required"))
        .rule(Rule::length("partName", 2, 100, "Part name must be between 2 and 100 characters"))
        .rule(Rule::required("quantity", "Quantity is required"))
        .rule(Rule::range("quantity", 1.0, 1000.0, "Quantity must be between 1 and 1000"))
        .rule(Rule::required("vehicleModel", "Vehicle model is required"))
        .rule(Rule::one_of("urgency", ["low", "medium", "high"], "Invalid urgency level"))
});

static DIE_PLAN: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("die_plan")
        .rule(Rule::required("dieCode", "Die code is required"))
        .rule(Rule::pattern(
            "dieCode",
            Pattern::from_regex(DIE_CODE.clone()),
            "Die code must look like DIE-0001",
        ))
        .rule(Rule::required("partNumber", "Part number is required"))
        .rule(Rule::required("plannedDate", "Planned date is required"))
        .rule(Rule::iso_date("plannedDate", "Planned date must be a valid date"))
        .rule(Rule::required("quantity", "Quantity is required"))
        .rule(Rule::range("quantity", 1.0, 100_000.0, "Quantity must be between 1 and 100000"))
        .rule(Rule::one_of("shift", ["A", "B", "C"], "Shift must be A, B or C"))
});

static ADMIN_OPERATION: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new("admin_operation")
        .rule(Rule::required("action", "Action is required"))
        .rule(Rule::one_of(
            "action",
            ["approve", "reject", "delete", "update"],
            "Invalid action",
        ))
        .rule(Rule::required("reason", "Reason is required when rejecting").when("action", "reject"))
        .rule(Rule::max_length("reason", 500, "Reason cannot exceed 500 characters"))
});

/// Lenient rules applied when a warranty claim is saved as a draft
pub fn warranty_draft() -> &'static RuleSet {
    &WARRANTY_DRAFT
}

/// Rules for a warranty claim submitted directly for review
pub fn warranty_submission() -> &'static RuleSet {
    &WARRANTY_SUBMISSION
}

pub fn hsrp_request() -> &'static RuleSet {
    &HSRP_REQUEST
}

pub fn rsa_request() -> &'static RuleSet {
    &RSA_REQUEST
}

pub fn spare_part_request() -> &'static RuleSet {
    &SPARE_PART_REQUEST
}

pub fn die_plan() -> &'static RuleSet {
    &DIE_PLAN
}

/// Approve/reject/delete/update operations; `reason` is only required on reject
pub fn admin_operation() -> &'static RuleSet {
    &ADMIN_OPERATION
}
