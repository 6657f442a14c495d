// Station domain model - how a station's record is recognised and read
use serde::Deserialize;
use serde_json::Value;

/// Identifies a station record inside an untrusted document: the record is the
/// mapping whose `field` holds exactly `value`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationKey {
    pub field: String,
    pub value: Value,
}

impl StationKey {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Strict comparison: no coercion between strings and numbers.
    pub fn matches(&self, candidate: &Value) -> bool {
        match (&self.value, candidate) {
            (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => a == b,
            },
            (a, b) => a == b,
        }
    }
}

/// Field names leading from a matched record to its current reading.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValuePath(pub Vec<String>);

impl ValuePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl Default for ValuePath {
    fn default() -> Self {
        Self::new(["current", "value"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_key_is_strict() {
        let key = StationKey::new("id", "HOE");
        assert!(key.matches(&json!("HOE")));
        assert!(!key.matches(&json!("hoe")));
        assert!(!key.matches(&Value::Null));
    }

    #[test]
    fn test_numeric_key_compares_numerically() {
        let key = StationKey::new("id", 6672);
        assert!(key.matches(&json!(6672)));
        assert!(key.matches(&json!(6672.0)));
        assert!(!key.matches(&json!("6672")));
    }

    #[test]
    fn test_default_value_path() {
        assert_eq!(ValuePath::default().segments(), ["current", "value"]);
    }
}
