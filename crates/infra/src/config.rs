//! Configuration lookup with default fallback.

use std::collections::HashMap;

use serde_json::Value;

/// Optional-value configuration source.
///
/// Absence of a key is not an error; callers substitute their own default.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    /// Read a key as a non-negative integer, if present and representable.
    fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
    }
}

/// Map-backed configuration for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, Value>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for StaticConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_yields_none() {
        let config = StaticConfig::new();
        assert_eq!(config.get_usize("jobGroupMaxPortion"), None);
    }

    #[test]
    fn present_key_is_read_as_usize() {
        let config = StaticConfig::new().with("jobGroupMaxPortion", 25);
        assert_eq!(config.get_usize("jobGroupMaxPortion"), Some(25));
    }

    #[test]
    fn non_numeric_value_yields_none() {
        let config = StaticConfig::new().with("jobGroupMaxPortion", "lots");
        assert_eq!(config.get_usize("jobGroupMaxPortion"), None);
    }
}
