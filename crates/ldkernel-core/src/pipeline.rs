//! The fixed transform shell: validate → clone → apply rules → attach provenance.

use std::collections::HashSet;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::PipelineConfig;
use crate::document::{Document, PROVENANCE_KEY, TYPE_KEY};
use crate::errors::{KernelError, TransformError};
use crate::identifiers::RuleName;
use crate::provenance::{Provenance, RuleTrail};
use crate::rule::{IdentityRule, Rule};

/// Successful transform: the rewritten document plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    document: Document,
    provenance: Provenance,
}

impl TransformOutput {
    /// The rewritten document, without provenance.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Provenance for this invocation.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// The document with its `provenance` member attached.
    pub fn into_value(self) -> Value {
        let mut map = self.document.into_map();
        map.insert(PROVENANCE_KEY.to_string(), self.provenance.to_value());
        Value::Object(map)
    }

    /// Like [`into_value`](Self::into_value) without consuming the output.
    pub fn to_value(&self) -> Value {
        self.clone().into_value()
    }
}

impl Serialize for TransformOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let members = self.document.as_map();
        let len = members.len() + usize::from(!members.contains_key(PROVENANCE_KEY));
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in members {
            if key != PROVENANCE_KEY {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry(PROVENANCE_KEY, &self.provenance)?;
        map.end()
    }
}

/// Which family a transform result belongs to, judged by its shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// A document carrying a `provenance` record.
    Success,
    /// An error document (`"@type": "Error"` with an `errorCode`).
    Error,
    /// Neither: not produced by a pipeline.
    Unrecognized,
}

impl OutputKind {
    /// Classifies a transform result by its `@type` tag.
    ///
    /// Only the shape is inspected. A success document whose input already
    /// carried `"@type": "Error"` and a string `errorCode` is therefore
    /// classified as [`OutputKind::Error`]; callers that need to tell the two
    /// apart must keep the `Result` from [`Pipeline::transform`].
    pub fn classify(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return OutputKind::Unrecognized;
        };
        let has_provenance = map
            .get(PROVENANCE_KEY)
            .and_then(|p| p.get(TYPE_KEY))
            .and_then(Value::as_str)
            == Some("Provenance");
        if !has_provenance {
            return OutputKind::Unrecognized;
        }
        let is_error = map.get(TYPE_KEY).and_then(Value::as_str) == Some("Error")
            && map.get("errorCode").map_or(false, Value::is_string);
        if is_error {
            OutputKind::Error
        } else {
            OutputKind::Success
        }
    }
}

/// An ordered rule list behind the fixed transform shell.
///
/// `Pipeline` holds no mutable state, so one instance can serve concurrent
/// callers; every call works on its own copy of the input.
pub struct Pipeline {
    config: PipelineConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("rules", &self.rule_names().collect::<Vec<_>>())
            .finish()
    }
}

impl Pipeline {
    /// Starts a pipeline with an empty rule list.
    pub fn builder(config: PipelineConfig) -> PipelineBuilder {
        PipelineBuilder {
            config,
            rules: Vec::new(),
        }
    }

    /// The template pipeline: a single [`IdentityRule`].
    pub fn identity(config: PipelineConfig) -> Self {
        Self {
            config,
            rules: vec![Box::new(IdentityRule::default())],
        }
    }

    /// Configuration this pipeline stamps into its records.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name().as_str())
    }

    /// Runs the pipeline over `input`.
    ///
    /// Total for every JSON value: invalid input yields a [`TransformError`]
    /// and no rule runs. `input` is never modified.
    pub fn transform(&self, input: &Value) -> Result<TransformOutput, TransformError> {
        let mut document = match Document::from_input(input) {
            Ok(document) => document,
            Err(rejection) => {
                debug!(code = %rejection.code(), "input rejected");
                return Err(TransformError::from_input(&self.config, &rejection));
            }
        };

        let mut trail = RuleTrail::new();
        for rule in &self.rules {
            let before = trail.len();
            rule.apply(&mut document, &mut trail);
            if trail.len() > before {
                trace!(rule = %rule.name(), "rule fired");
            }
        }

        let provenance = Provenance::new(self.config.kernel_version.clone(), trail.into_names());
        debug!(rules_applied = provenance.rules_applied().len(), "transform complete");
        Ok(TransformOutput {
            document,
            provenance,
        })
    }

    /// [`transform`](Self::transform) flattened to a single JSON value: the
    /// success document or the error document.
    pub fn transform_to_value(&self, input: &Value) -> Value {
        match self.transform(input) {
            Ok(output) => output.into_value(),
            Err(error) => error.to_value(),
        }
    }
}

/// Collects rules in evaluation order.
pub struct PipelineBuilder {
    config: PipelineConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl PipelineBuilder {
    /// Appends a rule; rules run in the order they are added.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends an already boxed rule.
    pub fn boxed_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validates rule names and freezes the rule list.
    pub fn build(self) -> Result<Pipeline, KernelError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            let name = RuleName::parse(rule.name().as_str())?;
            if !seen.insert(name) {
                return Err(KernelError::DuplicateRule(rule.name().to_string()));
            }
        }
        Ok(Pipeline {
            config: self.config,
            rules: self.rules,
        })
    }
}
