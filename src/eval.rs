use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, warn};
use serde::Serialize;

use crate::config::EvaluatorConfig;
use crate::flag_value::FlagValue;
use crate::store::FeatureStore;
use crate::version::Version;

/// Answers whether flags are enabled by checking an ordered set of [FeatureStore]s.
///
/// Stores are checked from the lowest [FeatureStore::order] to the highest, and the first store
/// that defines a flag decides it: a [FlagValue::Bool] is used as-is, while a
/// [FlagValue::VersionGate] is enabled when the application version is at or below the gate
/// version. Keys that no store defines resolve to the caller's fallback.
///
/// Decisions are cached per key until the store set changes or [Evaluator::flush_cache] is
/// called. Evaluation never fails; malformed versions resolve to [Version::NULL].
///
/// Evaluation takes `&mut self` since it may write the cache. To share an evaluator between
/// threads, wrap it in a [std::sync::Mutex].
#[derive(Clone, Debug)]
pub struct Evaluator {
    app_version: Version,
    stores: Vec<FeatureStore>,
    cache: HashMap<String, bool>,
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create an evaluator for an application at `app_version` with the default configuration.
    pub fn new(app_version: &str) -> Self {
        Self::with_config(app_version, EvaluatorConfig::default())
    }

    pub fn with_config(app_version: &str, config: EvaluatorConfig) -> Self {
        let parsed = Version::try_parse(app_version).unwrap_or_else(|| {
            warn!(
                "app version {:?} is not a valid version, using {}",
                app_version,
                Version::NULL
            );
            Version::NULL
        });

        Self {
            app_version: parsed,
            stores: Vec::new(),
            cache: HashMap::new(),
            config,
        }
    }

    pub fn app_version(&self) -> &Version {
        &self.app_version
    }

    /// The registered stores, in the order they are checked.
    pub fn stores(&self) -> &[FeatureStore] {
        &self.stores
    }

    /// Add `store`, replacing any existing store with the same name.
    ///
    /// The cache is always cleared, since the new store may change the decision for any key.
    /// Stores with equal orders keep the order in which they were added; a replaced store counts
    /// as newly added.
    pub fn upsert_store(&mut self, store: FeatureStore) {
        self.cache.clear();
        self.stores.retain(|existing| existing.name != store.name);
        self.stores.push(store);
        self.stores.sort_by(|a, b| {
            a.priority()
                .partial_cmp(&b.priority())
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            "stores are now checked in order [{}]",
            self.stores.iter().map(|s| s.name.as_str()).join(", ")
        );
    }

    pub fn flush_cache(&mut self) {
        debug!("flushing {} cached decisions", self.cache.len());
        self.cache.clear();
    }

    pub fn is_cache_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// When disabled, every evaluation walks the stores and the cache is neither read nor
    /// written.
    pub fn set_caching(&mut self, enabled: bool) {
        self.config.caching = enabled;
    }

    pub fn caching_enabled(&self) -> bool {
        self.config.caching
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.config.trace = enabled;
    }

    pub fn trace_enabled(&self) -> bool {
        self.config.trace
    }

    /// Returns whether `key` is enabled, or false if no store defines it.
    pub fn is_enabled(&mut self, key: &str) -> bool {
        self.is_enabled_or(key, false)
    }

    /// Returns whether `key` is enabled, or `fallback` if no store defines it.
    pub fn is_enabled_or(&mut self, key: &str, fallback: bool) -> bool {
        self.evaluate(key, fallback).value
    }

    /// Decide `key`, explaining how the decision was reached.
    ///
    /// Fallback decisions are not cached, so a key becomes resolvable as soon as a store
    /// defining it is added.
    pub fn evaluate(&mut self, key: &str, fallback: bool) -> Detail<bool> {
        let trace = self.config.trace;

        if self.config.caching {
            if let Some(&cached) = self.cache.get(key) {
                if trace {
                    debug!("{} served from cache: {}", key, cached);
                }
                return Detail::new(cached, Reason::Cached);
            }
        }

        let matched = self.stores.iter().find_map(|store| {
            if trace {
                debug!(
                    "checking for {} in {} with order {}",
                    key, store.name, store.order
                );
            }
            store.flag(key).map(|value| (store, value))
        });

        let (store, value) = match matched {
            Some(found) => found,
            None => {
                if trace {
                    debug!("{} not found in any store, using fallback {}", key, fallback);
                }
                return Detail::new(fallback, Reason::Fallback);
            }
        };

        let (enabled, version_gate) = match value {
            FlagValue::Bool(b) => (*b, false),
            FlagValue::VersionGate(gate) => (self.app_version <= gate_version(key, gate), true),
        };
        let reason = Reason::StoreMatch {
            store: store.name.clone(),
            version_gate,
        };

        self.cache_decision(key, enabled);
        Detail::new(enabled, reason)
    }

    fn cache_decision(&mut self, key: &str, enabled: bool) {
        if !self.config.caching {
            return;
        }
        if self.config.trace {
            debug!("caching {} with value {}", key, enabled);
        }
        self.cache.insert(key.to_owned(), enabled);
    }
}

fn gate_version(key: &str, gate: &str) -> Version {
    Version::try_parse(gate).unwrap_or_else(|| {
        warn!(
            "version gate {:?} for flag {} is not a valid version, using {}",
            gate,
            key,
            Version::NULL
        );
        Version::NULL
    })
}

/// A Detail is returned from [Evaluator::evaluate], combining a decision with an explanation of
/// how it was reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Detail<T> {
    pub value: T,
    pub reason: Reason,
}

impl<T> Detail<T> {
    pub fn new(value: T, reason: Reason) -> Detail<T> {
        Detail { value, reason }
    }

    /// Returns a new instance of this detail with `f` applied to [Detail::value].
    pub fn map<U, F>(self, f: F) -> Detail<U>
    where
        F: FnOnce(T) -> U,
    {
        Detail {
            value: f(self.value),
            reason: self.reason,
        }
    }
}

/// Reason describes how an evaluation reached its decision.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind")]
pub enum Reason {
    /// Cached indicates that the decision was memoized by an earlier evaluation.
    Cached,
    /// StoreMatch indicates that a store defined the flag.
    #[serde(rename_all = "camelCase")]
    StoreMatch {
        /// Name of the highest priority store that defined the flag.
        store: String,
        /// True if the decision came from comparing the app version with a version gate.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        version_gate: bool,
    },
    /// Fallback indicates that no store defined the flag, so the caller's fallback was used.
    Fallback,
}
