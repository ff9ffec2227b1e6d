use ldkernel_canonical::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Borrows the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    RuleName,
    "Kebab-case rule identifier recorded in provenance (e.g. `trim-description`).",
    r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$"
);
newtype!(
    KernelVersion,
    "Semantic version stamped into every provenance and error record.",
    r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(-[0-9A-Za-z.-]+)?$"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_are_kebab_case() {
        assert!(RuleName::parse("identity").is_ok());
        assert!(RuleName::parse("annotate-missing-end-date").is_ok());
        assert!(RuleName::parse("Trim").is_err());
        assert!(RuleName::parse("trim_description").is_err());
        assert!(RuleName::parse("-leading").is_err());
        assert!(RuleName::parse("").is_err());
    }

    #[test]
    fn kernel_versions_are_semver() {
        assert!(KernelVersion::parse("0.1.0").is_ok());
        assert!(KernelVersion::parse("2.10.3-rc.1").is_ok());
        assert!(KernelVersion::parse("01.0.0").is_err());
        assert!(KernelVersion::parse("1.0").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: KernelVersion = serde_json::from_str("\"1.2.3\"").unwrap();
        assert_eq!(ok.as_str(), "1.2.3");
        assert!(serde_json::from_str::<KernelVersion>("\"latest\"").is_err());
        assert!(serde_json::from_str::<RuleName>("\"Not A Rule\"").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let name = RuleName::new("identity".into());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"identity\"");
    }
}
