/// Contract tests for host-value conversion: the registered scalar
/// mappings, the strict integer range bound, optional handling, and the
/// closed capability-set dispatch.
use chrono::{DateTime, Utc};
use serde_json::json;
use stencil_core::{convert, ConvertError, Document, HostValue, Scalar, ToDocument};
use uuid::Uuid;

// ============================================================================
// Scalar mappings
// ============================================================================

#[test]
fn bool_converts_directly() {
    assert_eq!(true.to_document().unwrap(), Document::Bool(true));
}

#[test]
fn strings_convert_directly() {
    assert_eq!(
        "hello".to_document().unwrap(),
        Document::String("hello".into())
    );
    assert_eq!(
        String::from("owned").to_document().unwrap(),
        Document::String("owned".into())
    );
}

#[test]
fn floats_convert_to_double() {
    assert_eq!(2.5f64.to_document().unwrap(), Document::Double(2.5));
    assert_eq!(0.5f32.to_document().unwrap(), Document::Double(0.5));
}

#[test]
fn dates_convert_to_epoch_seconds() {
    let date = DateTime::<Utc>::from_timestamp(1609459200, 0).unwrap();
    assert_eq!(date.to_document().unwrap(), Document::Double(1609459200.0));
}

#[test]
fn dates_preserve_fractional_seconds() {
    let date = DateTime::<Utc>::from_timestamp(10, 500_000_000).unwrap();
    assert_eq!(date.to_document().unwrap(), Document::Double(10.5));
}

#[test]
fn uuids_convert_to_canonical_strings() {
    let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
    assert_eq!(
        id.to_document().unwrap(),
        Document::String("67e55044-10b1-426f-9247-bb680e5fe0c8".into())
    );
}

// ============================================================================
// Integer range — the bound is strict at both ends
// ============================================================================

#[test]
fn interior_integers_convert() {
    assert_eq!(42i64.to_document().unwrap(), Document::Int(42));
    assert_eq!((-42i64).to_document().unwrap(), Document::Int(-42));
    assert_eq!(
        (i64::MAX - 1).to_document().unwrap(),
        Document::Int(i64::MAX - 1)
    );
    assert_eq!(
        (i64::MIN + 1).to_document().unwrap(),
        Document::Int(i64::MIN + 1)
    );
}

#[test]
fn exact_maximum_is_rejected() {
    let err = i64::MAX.to_document().unwrap_err();
    assert!(matches!(err, ConvertError::IntegerRange { .. }));
}

#[test]
fn exact_minimum_is_rejected() {
    let err = i64::MIN.to_document().unwrap_err();
    assert!(matches!(err, ConvertError::IntegerRange { .. }));
}

#[test]
fn unsigned_values_at_or_past_the_maximum_are_rejected() {
    assert!(matches!(
        (i64::MAX as u64).to_document().unwrap_err(),
        ConvertError::IntegerRange { .. }
    ));
    assert!(matches!(
        u64::MAX.to_document().unwrap_err(),
        ConvertError::IntegerRange { .. }
    ));
}

#[test]
fn narrow_widths_always_convert() {
    assert_eq!(i8::MIN.to_document().unwrap(), Document::Int(-128));
    assert_eq!(u8::MAX.to_document().unwrap(), Document::Int(255));
    assert_eq!(u32::MAX.to_document().unwrap(), Document::Int(4294967295));
}

#[test]
fn range_error_names_the_value() {
    let err = u64::MAX.to_document().unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("integer {} cannot be represented by a document int", u64::MAX)
    );
}

// ============================================================================
// Optionals
// ============================================================================

#[test]
fn absent_optional_converts_to_null() {
    let value: Option<i64> = None;
    assert_eq!(value.to_document().unwrap(), Document::Null);
}

#[test]
fn present_optional_matches_direct_conversion() {
    assert_eq!(Some(42i64).to_document().unwrap(), 42i64.to_document().unwrap());
    assert_eq!(
        Some("x").to_document().unwrap(),
        "x".to_document().unwrap()
    );
}

#[test]
fn nested_optionals_unwrap_recursively() {
    let value: Option<Option<i64>> = Some(None);
    assert_eq!(value.to_document().unwrap(), Document::Null);
    let value: Option<Option<i64>> = Some(Some(3));
    assert_eq!(value.to_document().unwrap(), Document::Int(3));
}

#[test]
fn present_optional_propagates_range_errors() {
    assert!(matches!(
        Some(i64::MAX).to_document().unwrap_err(),
        ConvertError::IntegerRange { .. }
    ));
}

// ============================================================================
// Capability-set dispatch
// ============================================================================

#[test]
fn scalar_capability_converts_directly() {
    let doc = convert(HostValue::Scalar(Scalar::Text("hi".into()))).unwrap();
    assert_eq!(doc, Document::String("hi".into()));
}

#[test]
fn scalar_capability_enforces_the_integer_bound() {
    let err = convert(HostValue::Scalar(Scalar::Int(i64::MAX))).unwrap_err();
    assert!(matches!(err, ConvertError::IntegerRange { .. }));
}

#[test]
fn absent_optional_capability_converts_to_null() {
    assert_eq!(
        convert(HostValue::Optional(None)).unwrap(),
        Document::Null
    );
}

#[test]
fn present_optional_capability_recurses() {
    let inner = HostValue::Scalar(Scalar::Bool(true));
    assert_eq!(
        convert(HostValue::Optional(Some(Box::new(inner)))).unwrap(),
        Document::Bool(true)
    );
}

#[test]
fn encodable_capability_routes_through_the_encoder() {
    let doc = convert(HostValue::Encodable(json!({"n": 1, "s": ["a"]}))).unwrap();
    assert_eq!(doc.get("n"), Some(&Document::Int(1)));
    assert_eq!(
        doc.get("s"),
        Some(&Document::Array(vec![Document::String("a".into())]))
    );
}

// ============================================================================
// Error taxonomy
// ============================================================================

#[test]
fn optional_not_convertible_names_the_payload_type() {
    let err = ConvertError::optional_not_convertible("ffi::Handle");
    assert_eq!(
        err.to_string(),
        "optional payload of type `ffi::Handle` is not convertible to a document"
    );
}

#[test]
fn future_not_convertible_names_the_payload_type() {
    let err = ConvertError::future_not_convertible("ffi::Handle");
    assert_eq!(
        err.to_string(),
        "deferred payload of type `ffi::Handle` is not convertible to a document"
    );
}
