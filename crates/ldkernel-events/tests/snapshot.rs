use ldkernel_canonical::stable_stringify;
use ldkernel_core::{ErrorCode, OutputKind, PipelineConfig, RuleName};
use ldkernel_events::event_pipeline;
use serde_json::{json, Value};

const INPUT: &str = include_str!("fixtures/event-input.jsonld");
const EXPECTED: &str = include_str!("fixtures/event-expected.jsonld");

fn parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn event_output_matches_expected_fixture() {
    let pipeline = event_pipeline(PipelineConfig::default()).unwrap();
    let actual = pipeline.transform_to_value(&parse(INPUT));

    let actual_text = stable_stringify(&actual, true).unwrap();
    let expected_text = stable_stringify(&parse(EXPECTED), true).unwrap();
    assert_eq!(actual_text, expected_text, "\nexpected:\n{expected_text}\nactual:\n{actual_text}");
}

#[test]
fn event_transform_is_deterministic_and_leaves_input_alone() {
    let pipeline = event_pipeline(PipelineConfig::default()).unwrap();
    let input = parse(INPUT);
    let first = pipeline.transform(&input).unwrap();
    let second = pipeline.transform(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(input, parse(INPUT));
    assert_eq!(input["name"], "quarterly PLANNING   meeting");
}

#[test]
fn second_pass_records_no_rules() {
    let pipeline = event_pipeline(PipelineConfig::default()).unwrap();
    let once = pipeline.transform_to_value(&parse(INPUT));
    let twice = pipeline.transform(&once).unwrap();
    assert!(twice.provenance().rules_applied().is_empty());
    assert_eq!(twice.document().as_map(), once.as_object().unwrap());
}

#[test]
fn minimal_event_only_gets_date_annotations() {
    let pipeline = event_pipeline(PipelineConfig::default()).unwrap();
    let out = pipeline
        .transform(&json!({"@context": "https://schema.org", "@type": "Event", "name": "Launch"}))
        .unwrap();
    let names: Vec<&str> = out.provenance().rules_applied().iter().map(RuleName::as_str).collect();
    assert_eq!(names, vec!["annotate-missing-end-date", "annotate-missing-duration"]);
}

#[test]
fn invalid_events_reuse_kernel_error_codes() {
    let pipeline = event_pipeline(PipelineConfig::default()).unwrap();
    let err = pipeline.transform(&json!(["not", "an", "event"])).unwrap_err();
    assert_eq!(err.code(), &ErrorCode::InvalidInput);
    let err = pipeline.transform(&json!({"@type": "Event"})).unwrap_err();
    assert_eq!(err.code(), &ErrorCode::InvalidContext);
    assert_eq!(OutputKind::classify(&err.to_value()), OutputKind::Error);
}

#[test]
fn event_sources_avoid_nondeterministic_apis() {
    let source = include_str!("../src/lib.rs");
    for pattern in ["std::time", "std::env", "std::fs", "std::io", "std::net", "rand::", "static mut"] {
        assert!(!source.contains(pattern), "event rules reference `{pattern}`");
    }
}
