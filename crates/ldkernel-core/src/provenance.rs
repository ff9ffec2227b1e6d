use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::{KernelVersion, RuleName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ProvenanceType {
    Provenance,
}

/// Record of which rules fired, in evaluation order. Carries no timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    #[serde(rename = "@type")]
    kind: ProvenanceType,
    kernel_version: KernelVersion,
    rules_applied: Vec<RuleName>,
}

impl Provenance {
    /// Creates a provenance record.
    pub fn new(kernel_version: KernelVersion, rules_applied: Vec<RuleName>) -> Self {
        Self {
            kind: ProvenanceType::Provenance,
            kernel_version,
            rules_applied,
        }
    }

    /// Version stamped by the pipeline that produced this record.
    pub fn kernel_version(&self) -> &KernelVersion {
        &self.kernel_version
    }

    /// Names of the rules that changed the document, in application order.
    pub fn rules_applied(&self) -> &[RuleName] {
        &self.rules_applied
    }

    /// The record as a JSON object.
    pub fn to_value(&self) -> Value {
        let rules: Vec<Value> = self
            .rules_applied
            .iter()
            .map(|name| Value::String(name.as_str().to_string()))
            .collect();
        serde_json::json!({
            "@type": "Provenance",
            "kernelVersion": self.kernel_version.as_str(),
            "rulesApplied": rules,
        })
    }
}

/// Append-only list of rule names accumulated during one transform.
///
/// Rules record their own name when they change the document. Earlier
/// entries can never be removed or reordered.
#[derive(Debug, Default)]
pub struct RuleTrail {
    names: Vec<RuleName>,
}

impl RuleTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule name.
    pub fn record(&mut self, name: &RuleName) {
        self.names.push(name.clone());
    }

    /// Names recorded so far.
    pub fn names(&self) -> &[RuleName] {
        &self.names
    }

    /// Number of names recorded.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn into_names(self) -> Vec<RuleName> {
        self.names
    }
}
