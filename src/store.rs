use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::flag_value::FlagValue;

/// A named collection of flag values, checked in order of priority by the [crate::Evaluator].
///
/// A store with a lower [FeatureStore::order] is checked first. For example, bundled defaults
/// could use an order of 99 so that flags fetched later at an order of 1 take priority over them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FeatureStore {
    /// Priority of the store; lower values are checked first. Orders need not be unique.
    pub order: f32,
    /// Identifies the store. Adding a store with the name of an existing one replaces it.
    pub name: String,
    #[serde(default)]
    pub flags: HashMap<String, FlagValue>,
}

impl FeatureStore {
    /// Create an empty store.
    pub fn new(name: impl Into<String>, order: f32) -> Self {
        Self {
            order,
            name: name.into(),
            flags: HashMap::new(),
        }
    }

    /// Parse a store from its JSON representation, e.g.
    /// `{"order": 99, "name": "Default", "flags": {"new-ui": true, "sync-v2": "5.27.0"}}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add or overwrite the flag `key`.
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    /// Retrieve the value configured for `key`, if this store defines it.
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    // NaN orders are placed after every other store rather than poisoning the sort.
    pub(crate) fn priority(&self) -> f32 {
        if self.order.is_nan() {
            f32::INFINITY
        } else {
            self.order
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_common::default_store;
    use assert_json_diff::assert_json_eq;
    use maplit::hashmap;
    use serde_json::json;
    use spectral::prelude::*;

    #[test]
    fn parse_store_from_json() {
        let store = FeatureStore::from_json(
            r#"{"order": 1, "name": "Remote", "flags": {"a": true, "b": "1.2.0"}}"#,
        )
        .unwrap();

        assert_eq!(
            store,
            FeatureStore {
                order: 1.0,
                name: "Remote".to_string(),
                flags: hashmap! {
                    "a".to_string() => FlagValue::Bool(true),
                    "b".to_string() => FlagValue::VersionGate("1.2.0".to_string()),
                },
            }
        );
    }

    #[test]
    fn flags_are_optional() {
        let store = FeatureStore::from_json(r#"{"order": 3.5, "name": "Empty"}"#).unwrap();
        assert_that!(store.flags).is_empty();
        assert_that!(store.order).is_equal_to(3.5);
    }

    #[test]
    fn invalid_flag_values_are_rejected() {
        assert_that!(FeatureStore::from_json(
            r#"{"order": 1, "name": "Bad", "flags": {"a": 12}}"#
        ))
        .is_err();
        assert_that!(FeatureStore::from_json(r#"{"name": "NoOrder"}"#)).is_err();
    }

    #[test]
    fn serialization_shape() {
        let store = FeatureStore::new("Local", 2.5)
            .with_flag("on", true)
            .with_flag("gated", "6.48.0");

        assert_json_eq!(
            serde_json::to_value(&store).unwrap(),
            json!({
                "order": 2.5,
                "name": "Local",
                "flags": {
                    "on": true,
                    "gated": "6.48.0"
                }
            })
        );
    }

    #[test]
    fn flag_lookup() {
        let store = default_store();
        assert_that!(store.flag("flag-1")).contains_value(&FlagValue::Bool(true));
        assert_that!(store.flag("flag-2")).contains_value(&FlagValue::from("5.27.0"));
        assert_that!(store.flag("flag-async")).is_none();
    }

    #[test]
    fn with_flag_overwrites() {
        let store = FeatureStore::new("Local", 1.0)
            .with_flag("a", true)
            .with_flag("a", false);
        assert_that!(store.flags).has_length(1);
        assert_that!(store.flag("a")).contains_value(&FlagValue::Bool(false));
    }

    #[test]
    fn nan_order_has_lowest_priority() {
        let store = FeatureStore::new("Odd", f32::NAN);
        assert_eq!(store.priority(), f32::INFINITY);
        assert_eq!(FeatureStore::new("Even", -2.0).priority(), -2.0);
    }
}
