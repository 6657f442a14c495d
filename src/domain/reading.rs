// Reading domain model - numeric coercion and strength indicator
use serde_json::Value;

/// Wind speeds at or above this value (km/h) are classified as strong.
pub const STRONG_THRESHOLD_KMH: f64 = 30.0;

/// Glyph rendered in every indicator slot.
pub const INDICATOR_GLYPH: &str = "\u{2191}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Strong,
    Weak,
}

impl Indicator {
    /// Non-numeric and NaN values never reach the threshold.
    pub fn classify(value: Option<f64>) -> Self {
        match value {
            Some(v) if v >= STRONG_THRESHOLD_KMH => Indicator::Strong,
            _ => Indicator::Weak,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Indicator::Strong => "strong",
            Indicator::Weak => "weak",
        }
    }
}

/// A measurement as it came from the source: the text shown to the user and
/// the number it coerces to, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub text: String,
    pub value: Option<f64>,
}

impl Reading {
    pub fn from_json(raw: &Value) -> Self {
        match raw {
            Value::Null => Self {
                text: String::new(),
                value: Some(0.0),
            },
            Value::Bool(b) => Self {
                text: b.to_string(),
                value: Some(if *b { 1.0 } else { 0.0 }),
            },
            Value::Number(n) => Self {
                text: format_number(n),
                value: n.as_f64(),
            },
            Value::String(s) => Self {
                text: s.clone(),
                value: coerce_str(s),
            },
            other => Self {
                text: other.to_string(),
                value: None,
            },
        }
    }

    pub fn indicator(&self) -> Indicator {
        Indicator::classify(self.value)
    }
}

fn coerce_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whole-valued floats are shown without a fractional part (`12.0` as `12`).
fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() => f.to_string(),
        _ => n.to_string(),
    }
}
