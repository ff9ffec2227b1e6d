//! Event normalization for Schema.org `Event` documents.
//!
//! A reference consumer of the kernel pipeline: each rule is a plain
//! function paired with a name, and [`event_pipeline`] strings them together
//! in order. The rules operate on the literal input graph; contexts are never
//! expanded or fetched.
//!
//! Rules, in evaluation order:
//!
//! | name | effect |
//! |------|--------|
//! | `normalize-event-name` | title-case `name` |
//! | `trim-description` | strip surrounding whitespace from `description` |
//! | `infer-location-type` | add `@type: Place` to `location` |
//! | `infer-address-type` | add `@type: PostalAddress` to `location.address` |
//! | `normalize-organizer-name` | title-case `organizer.name` |
//! | `normalize-event-status` | map status words to `EventStatusType` URIs |
//! | `annotate-missing-end-date` | set `endDate: null` when absent |
//! | `annotate-missing-duration` | mark `duration` as unknown when `endDate` is null |
//!
//! Each rule reports whether it changed the document, so a second pass over
//! an already-normalized event records no rules.
#![deny(missing_docs)]

use ldkernel_core::{
    Document, FnRule, KernelError, Pipeline, PipelineConfig, Uncertainty, UncertaintyStatus,
    TYPE_KEY,
};
use serde_json::{Map, Value};

/// Signature shared by every event rule.
pub type RuleFn = fn(&mut Document) -> bool;

/// The event rule set, in evaluation order.
pub const EVENT_RULES: &[(&str, RuleFn)] = &[
    ("normalize-event-name", normalize_event_name),
    ("trim-description", trim_description),
    ("infer-location-type", infer_location_type),
    ("infer-address-type", infer_address_type),
    ("normalize-organizer-name", normalize_organizer_name),
    ("normalize-event-status", normalize_event_status),
    ("annotate-missing-end-date", annotate_missing_end_date),
    ("annotate-missing-duration", annotate_missing_duration),
];

const STATUS_URIS: &[(&str, &str)] = &[
    ("scheduled", "https://schema.org/EventScheduled"),
    ("cancelled", "https://schema.org/EventCancelled"),
    ("postponed", "https://schema.org/EventPostponed"),
    ("rescheduled", "https://schema.org/EventRescheduled"),
    ("movedonline", "https://schema.org/EventMovedOnline"),
];

/// Builds the kernel pipeline carrying [`EVENT_RULES`].
pub fn event_pipeline(config: PipelineConfig) -> Result<Pipeline, KernelError> {
    EVENT_RULES
        .iter()
        .fold(Pipeline::builder(config), |builder, &(name, rule)| {
            builder.rule(FnRule::new(name, rule))
        })
        .build()
}

/// Title-cases whitespace-separated words and collapses runs of whitespace:
/// `"quarterly PLANNING  meeting"` becomes `"Quarterly Planning Meeting"`.
pub fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Schema.org `EventStatusType` URI for a status word, case-insensitively.
pub fn status_uri(status: &str) -> Option<&'static str> {
    let lowered = status.to_lowercase();
    STATUS_URIS
        .iter()
        .find(|(word, _)| *word == lowered)
        .map(|(_, uri)| *uri)
}

fn replace_string(slot: &mut Value, rewrite: impl FnOnce(&str) -> String) -> bool {
    let Value::String(current) = slot else {
        return false;
    };
    let rewritten = rewrite(current.as_str());
    if rewritten == *current {
        return false;
    }
    *current = rewritten;
    true
}

fn ensure_type(node: &mut Map<String, Value>, type_name: &str) -> bool {
    if node.contains_key(TYPE_KEY) {
        return false;
    }
    node.insert(TYPE_KEY.to_string(), Value::String(type_name.to_string()));
    true
}

/// `normalize-event-name`: title-cases a string `name`.
pub fn normalize_event_name(doc: &mut Document) -> bool {
    doc.get_mut("name")
        .map_or(false, |name| replace_string(name, title_case))
}

/// `trim-description`: strips surrounding whitespace from a string `description`.
pub fn trim_description(doc: &mut Document) -> bool {
    doc.get_mut("description")
        .map_or(false, |description| replace_string(description, |s| s.trim().to_string()))
}

/// `infer-location-type`: types an untyped `location` object as `Place`.
pub fn infer_location_type(doc: &mut Document) -> bool {
    doc.object_mut("location")
        .map_or(false, |location| ensure_type(location, "Place"))
}

/// `infer-address-type`: types an untyped `location.address` object as
/// `PostalAddress`.
pub fn infer_address_type(doc: &mut Document) -> bool {
    doc.object_mut("location")
        .and_then(|location| location.get_mut("address"))
        .and_then(Value::as_object_mut)
        .map_or(false, |address| ensure_type(address, "PostalAddress"))
}

/// `normalize-organizer-name`: title-cases `organizer.name`.
pub fn normalize_organizer_name(doc: &mut Document) -> bool {
    doc.object_mut("organizer")
        .and_then(|organizer| organizer.get_mut("name"))
        .map_or(false, |name| replace_string(name, title_case))
}

/// `normalize-event-status`: replaces a known status word with its URI.
/// Unknown strings and non-strings are left alone.
pub fn normalize_event_status(doc: &mut Document) -> bool {
    doc.get_mut("eventStatus").map_or(false, |status| {
        replace_string(status, |s| status_uri(s).map_or_else(|| s.to_string(), str::to_string))
    })
}

/// `annotate-missing-end-date`: records an absent `endDate` as explicit `null`.
pub fn annotate_missing_end_date(doc: &mut Document) -> bool {
    if doc.contains_key("endDate") {
        return false;
    }
    doc.insert("endDate", Value::Null);
    true
}

/// `annotate-missing-duration`: when `duration` is absent and `endDate` is
/// null, places an `unknown` uncertainty annotation at `duration`.
pub fn annotate_missing_duration(doc: &mut Document) -> bool {
    if doc.contains_key("duration") || doc.get("endDate") != Some(&Value::Null) {
        return false;
    }
    let uncertainty = Uncertainty::new(
        UncertaintyStatus::Unknown,
        "Cannot compute duration without endDate",
        ["endDate"],
    );
    doc.insert("duration", uncertainty.to_annotation());
    true
}
