use serde::{Deserialize, Serialize};

/// The configured value of a single flag within a [crate::FeatureStore].
///
/// In serialized form a JSON boolean is a [FlagValue::Bool] and a JSON string is a
/// [FlagValue::VersionGate]; any other JSON type is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// The flag is on or off regardless of the application version.
    Bool(bool),
    /// The flag is on when the application version is at or below this version.
    VersionGate(String),
}

impl From<bool> for FlagValue {
    fn from(b: bool) -> FlagValue {
        FlagValue::Bool(b)
    }
}

impl From<String> for FlagValue {
    fn from(s: String) -> FlagValue {
        FlagValue::VersionGate(s)
    }
}

impl From<&str> for FlagValue {
    fn from(s: &str) -> FlagValue {
        FlagValue::VersionGate(s.to_owned())
    }
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(b) => Some(*b),
            FlagValue::VersionGate(_) => None,
        }
    }

    pub fn as_version_gate(&self) -> Option<&str> {
        match self {
            FlagValue::VersionGate(s) => Some(s),
            FlagValue::Bool(_) => None,
        }
    }
}
