//! Rule authoring interface.
//!
//! A rule is a named, pure function over a [`Document`]. It inspects the
//! working copy, decides for itself whether it applies, and records its name
//! in the [`RuleTrail`] when it changes something. Rules must not read
//! anything but the document they are given and must not panic; a rule that
//! does either violates its contract and the pipeline does not recover.

use crate::document::Document;
use crate::identifiers::RuleName;
use crate::provenance::RuleTrail;

/// Name of the rule that stamps provenance without changing the document.
pub const IDENTITY_RULE: &str = "identity";

/// A pure document rewrite.
pub trait Rule: Send + Sync {
    /// Name recorded in provenance when the rule fires.
    fn name(&self) -> &RuleName;

    /// Applies the rule to the working copy.
    ///
    /// Record `self.name()` in `trail` exactly when the document changed. A
    /// rule standing for several sub-rules may record more than once.
    fn apply(&self, doc: &mut Document, trail: &mut RuleTrail);
}

/// Rule built from a closure that reports whether it changed the document.
pub struct FnRule<F> {
    name: RuleName,
    rewrite: F,
}

impl<F> FnRule<F>
where
    F: Fn(&mut Document) -> bool + Send + Sync,
{
    /// Wraps `rewrite` under `name`. The name is validated when the pipeline
    /// is built.
    pub fn new(name: impl Into<String>, rewrite: F) -> Self {
        Self {
            name: RuleName::new(name.into()),
            rewrite,
        }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&mut Document) -> bool + Send + Sync,
{
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn apply(&self, doc: &mut Document, trail: &mut RuleTrail) {
        if (self.rewrite)(doc) {
            trail.record(&self.name);
        }
    }
}

/// The template rule: leaves the document untouched and always records
/// `identity`, marking that the kernel ran.
#[derive(Debug)]
pub struct IdentityRule {
    name: RuleName,
}

impl Default for IdentityRule {
    fn default() -> Self {
        Self {
            name: RuleName::new(IDENTITY_RULE.to_string()),
        }
    }
}

impl Rule for IdentityRule {
    fn name(&self) -> &RuleName {
        &self.name
    }

    fn apply(&self, _doc: &mut Document, trail: &mut RuleTrail) {
        trail.record(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        Document::from_input(&json!({"@context": "x", "n": 1})).unwrap()
    }

    #[test]
    fn fn_rule_records_only_on_change() {
        let rule = FnRule::new("bump", |doc: &mut Document| {
            if doc.get("n") == Some(&json!(1)) {
                doc.insert("n", json!(2));
                true
            } else {
                false
            }
        });
        let mut doc = doc();
        let mut trail = RuleTrail::new();
        rule.apply(&mut doc, &mut trail);
        rule.apply(&mut doc, &mut trail);
        assert_eq!(doc.get("n"), Some(&json!(2)));
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.names()[0].as_str(), "bump");
    }

    #[test]
    fn identity_always_records() {
        let mut doc = doc();
        let before = doc.clone();
        let mut trail = RuleTrail::new();
        IdentityRule::default().apply(&mut doc, &mut trail);
        assert_eq!(doc, before);
        assert_eq!(trail.names()[0].as_str(), IDENTITY_RULE);
    }
}
