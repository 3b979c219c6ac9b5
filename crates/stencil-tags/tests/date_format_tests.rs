/// Contract tests for the `dateFormat` tag renderer: default and custom
/// patterns, lenient parameter reads, and arity failures.
use stencil_core::{Document, ToDocument};
use stencil_tags::{DateFormat, TagContext, TagRenderer};

fn render(parameters: Vec<Document>) -> Result<Document, stencil_tags::TagError> {
    let deferred = DateFormat::new().render(TagContext::new("dateFormat", parameters))?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    Ok(runtime.block_on(deferred.resolve()).unwrap())
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn one_numeric_parameter_uses_the_default_pattern() {
    let doc = render(vec![Document::Double(1609459200.0)]).unwrap();
    assert_eq!(doc, Document::String("2021-01-01 00:00:00".into()));
}

#[test]
fn int_timestamps_are_widened_leniently() {
    let doc = render(vec![Document::Int(1609459200)]).unwrap();
    assert_eq!(doc, Document::String("2021-01-01 00:00:00".into()));
}

#[test]
fn second_parameter_overrides_the_pattern() {
    let doc = render(vec![
        Document::Double(1609459200.0),
        Document::String("%Y".into()),
    ])
    .unwrap();
    assert_eq!(doc, Document::String("2021".into()));
}

#[test]
fn fractional_seconds_do_not_shift_the_rendered_instant() {
    let doc = render(vec![Document::Double(1609459200.75)]).unwrap();
    assert_eq!(doc, Document::String("2021-01-01 00:00:00".into()));
}

#[test]
fn converted_dates_round_trip_through_the_tag() {
    // A date converted to its epoch-seconds document renders back to the
    // same instant.
    let date = chrono::DateTime::<chrono::Utc>::from_timestamp(946684800, 0).unwrap();
    let doc = render(vec![date.to_document().unwrap()]).unwrap();
    assert_eq!(doc, Document::String("2000-01-01 00:00:00".into()));
}

// ============================================================================
// Lenient parameter reads
// ============================================================================

#[test]
fn non_numeric_timestamp_yields_null() {
    let doc = render(vec![Document::String("yesterday".into())]).unwrap();
    assert_eq!(doc, Document::Null);
}

#[test]
fn null_timestamp_yields_null() {
    let doc = render(vec![Document::Null]).unwrap();
    assert_eq!(doc, Document::Null);
}

#[test]
fn non_string_pattern_falls_back_to_the_default() {
    let doc = render(vec![Document::Double(1609459200.0), Document::Int(5)]).unwrap();
    assert_eq!(doc, Document::String("2021-01-01 00:00:00".into()));
}

#[test]
fn out_of_range_timestamp_yields_null() {
    let doc = render(vec![Document::Double(f64::MAX)]).unwrap();
    assert_eq!(doc, Document::Null);
}

// ============================================================================
// Arity
// ============================================================================

#[test]
fn zero_parameters_is_a_hard_error() {
    let err = DateFormat::new()
        .render(TagContext::new("dateFormat", vec![]))
        .unwrap_err();
    assert_eq!(err.reason, "Invalid parameter count: 0. 1 or 2 required.");
    assert_eq!(err.tag, "dateFormat");
}

#[test]
fn three_parameters_is_a_hard_error() {
    let parameters = vec![
        Document::Double(0.0),
        Document::String("%Y".into()),
        Document::Bool(true),
    ];
    let err = DateFormat::new()
        .render(TagContext::new("dateFormat", parameters))
        .unwrap_err();
    assert_eq!(err.reason, "Invalid parameter count: 3. 1 or 2 required.");
}

#[test]
fn arity_errors_fail_synchronously_without_a_runtime() {
    // No runtime exists here; the arity check must not touch the
    // deferred machinery.
    assert!(DateFormat::new()
        .render(TagContext::new("dateFormat", vec![]))
        .is_err());
}
