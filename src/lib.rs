//! In-process feature flag evaluation.
//!
//! An [Evaluator] holds prioritised [FeatureStore]s mapping flag keys to a [FlagValue], either a
//! boolean or a version gate compared against the application [Version]. Decisions are cached
//! until the store set changes. Evaluation never fails: unknown keys resolve to the caller's
//! fallback and malformed versions to [Version::NULL].

mod config;
mod eval;
mod flag_value;
mod store;
mod test_common;
mod version;

pub use config::*;
pub use eval::*;
pub use flag_value::*;
pub use store::*;
pub use version::*;
