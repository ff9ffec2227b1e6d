use serde::{Deserialize, Serialize};

use crate::errors::KernelError;
use crate::identifiers::KernelVersion;

/// Version stamped into records when no configuration overrides it. Bump on
/// incompatible changes to the rule set or pipeline shape.
pub const DEFAULT_KERNEL_VERSION: &str = "0.1.0";

/// `@context` of error documents.
pub const DEFAULT_ERROR_CONTEXT: &str = "https://schema.org";

/// Immutable settings threaded into a pipeline at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Version stamped into every provenance and error record.
    pub kernel_version: KernelVersion,
    /// `@context` value written into error documents.
    pub error_context: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            kernel_version: KernelVersion::new(DEFAULT_KERNEL_VERSION.to_string()),
            error_context: DEFAULT_ERROR_CONTEXT.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, KernelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replaces the stamped version.
    pub fn with_kernel_version(mut self, version: KernelVersion) -> Self {
        self.kernel_version = version;
        self
    }
}
