use serde_json::{Map, Value};
use std::fmt;

use crate::api::tracking_dto::TrackingItemDto;

/// Role label of the participant with primary responsibility for a step.
pub const MAIN_PROCESSOR_ROLE: &str = "Xử lý chính";

/// Role label of a coordinating (advisory) participant.
pub const COORDINATOR_ROLE: &str = "Phối hợp";

/// Identifier of a tracking record.
///
/// Keeps the raw JSON value for the strict root test (`key === parent`) and a
/// canonical string form used to resolve parents and to build diagram ids.
/// `1` and `"1"` share the canonical form `"1"` but are not strictly equal.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingKey {
    raw: Value,
    canonical: String,
}

impl TrackingKey {
    pub fn new(raw: Value) -> Self {
        let canonical = canonical_form(&raw);
        TrackingKey { raw, canonical }
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Strict equality: same JSON type and same value.
    pub fn strictly_equals(&self, other: &TrackingKey) -> bool {
        match (&self.raw, &other.raw) {
            (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TrackingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

impl From<Value> for TrackingKey {
    fn from(value: Value) -> Self {
        TrackingKey::new(value)
    }
}

impl From<i64> for TrackingKey {
    fn from(value: i64) -> Self {
        TrackingKey::new(Value::from(value))
    }
}

impl From<&str> for TrackingKey {
    fn from(value: &str) -> Self {
        TrackingKey::new(Value::from(value))
    }
}

impl From<bool> for TrackingKey {
    fn from(value: bool) -> Self {
        TrackingKey::new(Value::from(value))
    }
}

fn canonical_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64().filter(|i| i.unsigned_abs() <= MAX_SAFE_INTEGER) {
                i.to_string()
            } else if let Some(u) = n.as_u64().filter(|u| *u <= MAX_SAFE_INTEGER) {
                u.to_string()
            } else {
                n.as_f64().map(format_number).unwrap_or_else(|| n.to_string())
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

// Integers above 2^53 are no longer exact once read as a double.
const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// Formats a number the way JavaScript's `String(number)` does: shortest
/// round-trip digits, plain notation for exponents in [-7, 21), otherwise
/// `d.ddde±x`.
fn format_number(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if f < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", f.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp = n - 1;
        let exp_sign = if exp < 0 { '-' } else { '+' };
        let mantissa = if k == 1 { digits } else { format!("{}.{}", &digits[..1], &digits[1..]) };
        format!("{}e{}{}", mantissa, exp_sign, exp.abs())
    };

    format!("{}{}", sign, body)
}

/// One recorded step/participant in a document's routing history.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingItem {
    pub key: TrackingKey,

    /// Key of the parent step. Equal to `key` for the originating step.
    pub parent: TrackingKey,

    pub name: String,
    pub position: String,
    pub org: String,

    /// True for the main processor of the step, false for a coordinator.
    pub execute: bool,

    /// Remaining attributes of the record, carried along untouched.
    pub extra: Map<String, Value>,
}

impl TrackingItem {
    pub fn new(key: impl Into<Value>, parent: impl Into<Value>, name: impl Into<String>) -> Self {
        TrackingItem {
            key: TrackingKey::new(key.into()),
            parent: TrackingKey::new(parent.into()),
            name: name.into(),
            position: String::new(),
            org: String::new(),
            execute: false,
            extra: Map::new(),
        }
    }

    pub fn with_execute(mut self, execute: bool) -> Self {
        self.execute = execute;
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = org.into();
        self
    }

    /// A record is the root of its tree iff `key === parent`.
    pub fn is_root(&self) -> bool {
        self.key.strictly_equals(&self.parent)
    }

    pub fn role(&self) -> &'static str {
        if self.execute { MAIN_PROCESSOR_ROLE } else { COORDINATOR_ROLE }
    }
}

impl From<TrackingItemDto> for TrackingItem {
    fn from(dto: TrackingItemDto) -> Self {
        TrackingItem {
            key: TrackingKey::new(dto.key),
            parent: TrackingKey::new(dto.parent),
            name: dto.name.unwrap_or_default(),
            position: dto.position.unwrap_or_default(),
            org: dto.org.unwrap_or_default(),
            execute: dto.execute == Some(true),
            extra: dto.extra,
        }
    }
}
