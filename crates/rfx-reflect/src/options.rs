//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Policy knobs for constructor resolution.
///
/// Deserializes from camelCase JSON; missing fields keep their defaults:
///
/// ```json
/// { "autoboxing": true, "escalation": false }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolverOptions {
    /// Allow boxing and unboxing conversions when matching parameter types.
    pub autoboxing: bool,
    /// Attempt accessibility escalation for non-public candidates.
    pub escalation: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            autoboxing: true,
            escalation: true,
        }
    }
}

impl ResolverOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn with_autoboxing(mut self, autoboxing: bool) -> Self {
        self.autoboxing = autoboxing;
        self
    }

    pub fn with_escalation(mut self, escalation: bool) -> Self {
        self.escalation = escalation;
        self
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
