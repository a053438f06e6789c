#![cfg(test)]

use crate::store::FeatureStore;

pub const APP_VERSION: &str = "5.27.0";

/// Low priority store with bundled defaults.
pub fn default_store() -> FeatureStore {
    serde_json::from_str(
        r#"{
            "order": 99,
            "name": "Default",
            "flags": {
                "flag-1": true,
                "flag-1-disabled": false,
                "flag-2": "5.27.0",
                "flag-2-major": "6.48.0",
                "flag-2-disabled": "1.0.1",
                "flag-invalid": "1,0.0"
            }
        }"#,
    )
    .unwrap()
}

/// High priority store, standing in for flags fetched after startup.
pub fn async_store() -> FeatureStore {
    serde_json::from_str(
        r#"{
            "order": 1,
            "name": "AsyncStore",
            "flags": {
                "flag-1": false,
                "flag-2": "5.0.2",
                "flag-invalid": "lol",
                "flag-async": true
            }
        }"#,
    )
    .unwrap()
}
