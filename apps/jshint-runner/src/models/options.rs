//! Lint options: an ordered option-name → JSON value map.
//!
//! Most keys are forwarded to the lint engine untouched. The keys listed in
//! [`INTERPRETED_KEYS`] are consumed by the runner and the reporter selection
//! and are stripped before the options reach the engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

pub const EXTRA_EXT: &str = "extra-ext";
pub const JSHINTRC: &str = "jshintrc";
pub const REPORTER: &str = "reporter";
pub const JSLINT_REPORTER: &str = "jslint-reporter";
pub const CHECKSTYLE_REPORTER: &str = "checkstyle-reporter";
pub const SHOW_NON_ERRORS: &str = "show-non-errors";

pub const INTERPRETED_KEYS: [&str; 6] = [
    EXTRA_EXT,
    JSHINTRC,
    REPORTER,
    JSLINT_REPORTER,
    CHECKSTYLE_REPORTER,
    SHOW_NON_ERRORS,
];

/// Largest integer a JavaScript engine represents exactly; stands in for an
/// unbounded `maxerr`.
pub const UNBOUNDED_MAXERR: u64 = 9_007_199_254_740_991;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintOptions(Map<String, Json>);

impl LintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Json>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Json> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Json>) -> Option<Json> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Json> {
        self.0.shift_remove(key)
    }

    /// String value of `key`, if present and a string.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Json::as_str)
    }

    /// Truthiness the way a JavaScript `if` would see it.
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Json::Null) => false,
            Some(Json::Bool(b)) => *b,
            Some(Json::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Json::String(s)) => !s.is_empty(),
            Some(Json::Array(_)) | Some(Json::Object(_)) => true,
        }
    }

    /// Force the development switches to `enabled`. Enabling also lifts the
    /// per-file error cap.
    pub fn apply_debug(&mut self, enabled: bool) {
        self.0.insert("devel".into(), Json::Bool(enabled));
        self.0.insert("debug".into(), Json::Bool(enabled));
        if enabled {
            self.0.insert("maxerr".into(), Json::from(UNBOUNDED_MAXERR));
        }
    }

    /// The options the lint engine should see.
    pub fn engine_options(&self) -> LintOptions {
        let map = self
            .0
            .iter()
            .filter(|(k, _)| !INTERPRETED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        LintOptions(map)
    }

    /// Flag summary: `true` values print as the bare key, everything else as
    /// `key=<json>`.
    pub fn flags_summary(&self) -> String {
        if self.0.is_empty() {
            return "none".to_string();
        }
        self.0
            .iter()
            .map(|(k, v)| match v {
                Json::Bool(true) => k.clone(),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse a `key=value` CLI pair. Values are read as JSON when possible
    /// (`true`, `4`, `["a"]`), otherwise kept as plain strings.
    pub fn parse_pair(pair: &str) -> Option<(String, Json)> {
        let (key, raw) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let value = serde_json::from_str::<Json>(raw.trim())
            .unwrap_or_else(|_| Json::String(raw.to_string()));
        Some((key.to_string(), value))
    }
}
