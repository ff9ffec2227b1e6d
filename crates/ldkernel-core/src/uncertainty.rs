use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key under which an annotation sits at the field position.
pub const UNCERTAINTY_KEY: &str = "uncertainty";

/// How an undetermined value was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UncertaintyStatus {
    /// Resolution postponed to a later stage.
    Deferred,
    /// A value was assumed rather than derived.
    Assumed,
    /// No value could be determined.
    Unknown,
}

impl UncertaintyStatus {
    /// Wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            UncertaintyStatus::Deferred => "deferred",
            UncertaintyStatus::Assumed => "assumed",
            UncertaintyStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum UncertaintyType {
    Uncertainty,
}

/// Marker placed where a field's value could not be determined.
///
/// Immutable once built: rules create annotations, downstream readers consume
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uncertainty {
    #[serde(rename = "@type")]
    kind: UncertaintyType,
    status: UncertaintyStatus,
    reason: String,
    references: Vec<String>,
}

impl Uncertainty {
    /// Creates an annotation. `references` name the fields the decision
    /// depended on.
    pub fn new<I, S>(status: UncertaintyStatus, reason: impl Into<String>, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: UncertaintyType::Uncertainty,
            status,
            reason: reason.into(),
            references: references.into_iter().map(Into::into).collect(),
        }
    }

    /// Status classification.
    pub fn status(&self) -> UncertaintyStatus {
        self.status
    }

    /// Human-readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Fields the decision depended on.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Field-position value: `{"uncertainty": {...}}`.
    pub fn to_annotation(&self) -> Value {
        serde_json::json!({
            UNCERTAINTY_KEY: {
                "@type": "Uncertainty",
                "status": self.status.as_str(),
                "reason": self.reason,
                "references": self.references,
            }
        })
    }

    /// Reads an annotation back from a field value, if it holds one.
    pub fn from_annotation(value: &Value) -> Option<Self> {
        let inner = value.as_object()?.get(UNCERTAINTY_KEY)?;
        serde_json::from_value(inner.clone()).ok()
    }
}
