//! Dynamic values evaluated by expressions.
//!
//! Role
//! - [`Value`] is both the subject handed to [`Expression::evaluate`](crate::expr::Expression::evaluate)
//!   and the operand stored inside comparison literals.
//! - [`Key`] addresses entries of lists and maps. Canonical decimal strings are folded into
//!   integer keys, so `Key::from("42") == Key::from(42)`.
//!
//! Comparison semantics
//! - [`Value::loosely_equals`] coerces numbers and numeric strings, compares booleans and `null`
//!   by truthiness and arrays entry by entry.
//! - [`Value::strictly_equals`] requires the same variant and the same payload.
//! - [`Value::loose_cmp`] orders numbers, numeric strings and strings, and sorts arrays after
//!   scalars; incomparable pairs yield `None`.
use std::{cmp::Ordering, fmt, sync::Arc};

use indexmap::IndexMap;
use strum::EnumIs;

use crate::accessor::Object;

/// Key of a list or map entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Parse a key, folding canonical decimal integers (`"42"`, `"-7"`) into [`Key::Int`].
    pub fn parse(raw: &str) -> Key {
        match canonical_int(raw) {
            Some(n) => Key::Int(n),
            None => Key::Str(raw.to_owned()),
        }
    }

    /// Convert into an equivalent [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(n) => Value::Int(*n),
            Key::Str(s) => Value::String(s.clone()),
        }
    }
}

fn canonical_int(raw: &str) -> Option<i64> {
    let negative = raw.starts_with('-');
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if (digits.len() > 1 && digits.starts_with('0')) || (negative && digits == "0") {
        return None;
    }
    raw.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Key::parse(raw)
    }
}

impl From<String> for Key {
    fn from(raw: String) -> Self {
        match canonical_int(&raw) {
            Some(n) => Key::Int(n),
            None => Key::Str(raw),
        }
    }
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    Key::Int(n as i64)
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(n) => Key::Int(n),
            Err(_) => Key::Str(n.to_string()),
        }
    }
}

/// Numeric view of a value, used for coercing comparisons.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }

    fn text(self) -> String {
        match self {
            Number::Int(n) => n.to_string(),
            Number::Float(x) => x.to_string(),
        }
    }
}

/// Parse a numeric string: optional surrounding whitespace, optional sign, digits with an
/// optional fraction and exponent. Hexadecimal, `inf` and `nan` are not numeric.
pub(crate) fn parse_numeric(raw: &str) -> Option<Number> {
    let trimmed = raw.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let bytes = trimmed.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;
    let mut is_float = false;

    if i < bytes.len() && bytes[i] == b'.' {
        is_float = true;
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_end = digits_from(i);
        if exp_end == i {
            return None;
        }
        is_float = true;
        i = exp_end;
    }
    if i != bytes.len() {
        return None;
    }

    if !is_float {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Number::Int(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

/// Dynamic value: scalars, lists, ordered maps and host objects.
#[derive(Debug, Clone, EnumIs)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<Key, Value>),
    Object(Arc<dyn Object>),
}

impl Value {
    /// Build a list from anything convertible into values.
    pub fn list<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build an ordered map from key/value pairs. Later duplicates overwrite earlier ones.
    pub fn map<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wrap a host object.
    pub fn object<O: Object + 'static>(object: O) -> Value {
        Value::Object(Arc::new(object))
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&Arc<dyn Object>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Boolean interpretation of the value.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// `null`, `false`, zero, `""`, `"0"` and empty arrays are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.truthy()
    }

    fn number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }

    fn is_array(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    fn array_len(&self) -> usize {
        match self {
            Value::List(items) => items.len(),
            Value::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Look up an entry of a list or map.
    pub fn array_get(&self, key: &Key) -> Option<&Value> {
        match (self, key) {
            (Value::List(items), Key::Int(i)) => usize::try_from(*i).ok().and_then(|i| items.get(i)),
            (Value::Map(entries), _) => entries.get(key),
            _ => None,
        }
    }

    fn array_entries(&self) -> Vec<(Key, &Value)> {
        match self {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (Key::from(i), v))
                .collect(),
            Value::Map(entries) => entries.iter().map(|(k, v)| (k.clone(), v)).collect(),
            _ => Vec::new(),
        }
    }

    /// Coercive equality.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        use Value::*;

        match (self, other) {
            (Null, Null) => true,
            (Bool(b), _) => *b == other.truthy(),
            (_, Bool(b)) => self.truthy() == *b,
            (Null, String(s)) | (String(s), Null) => s.is_empty(),
            (Null, _) => !other.truthy(),
            (_, Null) => !self.truthy(),
            (String(a), String(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x.compare(y) == Some(Ordering::Equal),
                _ => a == b,
            },
            (Int(_) | Float(_), String(s)) | (String(s), Int(_) | Float(_)) => {
                let n = self.number().or(other.number());
                match (n, parse_numeric(s)) {
                    (Some(n), Some(parsed)) => n.compare(parsed) == Some(Ordering::Equal),
                    (Some(n), None) => n.text() == *s,
                    _ => false,
                }
            }
            (Int(_) | Float(_), Int(_) | Float(_)) => match (self.number(), other.number()) {
                (Some(a), Some(b)) => a.compare(b) == Some(Ordering::Equal),
                _ => false,
            },
            (List(_) | Map(_), List(_) | Map(_)) => {
                self.array_len() == other.array_len()
                    && self.array_entries().into_iter().all(|(key, value)| {
                        other
                            .array_get(&key)
                            .is_some_and(|theirs| value.loosely_equals(theirs))
                    })
            }
            (Object(a), Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Identity: same variant and same payload. Arrays must match entry by entry, in order.
    pub fn strictly_equals(&self, other: &Value) -> bool {
        use Value::*;

        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (List(_) | Map(_), List(_) | Map(_)) => {
                let (ours, theirs) = (self.array_entries(), other.array_entries());
                ours.len() == theirs.len()
                    && ours
                        .iter()
                        .zip(theirs.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strictly_equals(vb))
            }
            (Object(a), Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Coercive ordering. Returns `None` when the two values cannot be ordered.
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        use Value::*;

        match (self, other) {
            (Null, String(s)) => Some("".cmp(s.as_str())),
            (String(s), Null) => Some(s.as_str().cmp("")),
            (Null | Bool(_), _) | (_, Null | Bool(_)) => Some(self.truthy().cmp(&other.truthy())),
            (String(a), String(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x.compare(y),
                _ => Some(a.cmp(b)),
            },
            (Int(_) | Float(_), Int(_) | Float(_)) => self.number()?.compare(other.number()?),
            (Int(_) | Float(_), String(s)) => {
                let n = self.number()?;
                match parse_numeric(s) {
                    Some(parsed) => n.compare(parsed),
                    None => Some(n.text().as_str().cmp(s.as_str())),
                }
            }
            (String(s), Int(_) | Float(_)) => {
                let n = other.number()?;
                match parse_numeric(s) {
                    Some(parsed) => parsed.compare(n),
                    None => Some(s.as_str().cmp(n.text().as_str())),
                }
            }
            _ if self.is_array() && other.is_array() => {
                match self.array_len().cmp(&other.array_len()) {
                    Ordering::Equal => {}
                    unequal => return Some(unequal),
                }
                for (key, value) in self.array_entries() {
                    match value.loose_cmp(other.array_get(&key)?)? {
                        Ordering::Equal => {}
                        unequal => return Some(unequal),
                    }
                }
                Some(Ordering::Equal)
            }
            // Arrays sort after every scalar.
            (List(_) | Map(_), Int(_) | Float(_) | String(_)) => Some(Ordering::Greater),
            (Int(_) | Float(_) | String(_), List(_) | Map(_)) => Some(Ordering::Less),
            (Object(a), Object(b)) if Arc::ptr_eq(a, b) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strictly_equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {value}", key.to_value())?;
                }
                f.write_str("}")
            }
            Value::Object(o) => f.write_str(o.class_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i64)
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(n) => Value::Int(n),
            Key::Str(s) => Value::String(s),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(entries: IndexMap<Key, Value>) -> Self {
        Value::Map(entries)
    }
}

impl From<Arc<dyn Object>> for Value {
    fn from(object: Arc<dyn Object>) -> Self {
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_fold_canonical_integers() {
        assert_eq!(Key::from("42"), Key::from(42));
        assert_eq!(Key::from("-7"), Key::Int(-7));
        assert_eq!(Key::from("042"), Key::Str("042".into()));
        assert_eq!(Key::from("-0"), Key::Str("-0".into()));
        assert_eq!(Key::from("4.2"), Key::Str("4.2".into()));
        assert_ne!(Key::from("foo"), Key::from(0));
    }

    #[test]
    fn numeric_strings() {
        assert!(parse_numeric("10").is_some());
        assert!(parse_numeric(" 10 ").is_some());
        assert!(parse_numeric("-1.5e3").is_some());
        assert!(parse_numeric(".5").is_some());
        assert!(parse_numeric("").is_none());
        assert!(parse_numeric("0x1A").is_none());
        assert!(parse_numeric("abc").is_none());
        assert!(parse_numeric("1e").is_none());
        assert!(parse_numeric("inf").is_none());
    }

    #[test]
    fn loose_equality_coerces() {
        assert!(Value::from("10").loosely_equals(&Value::from(10)));
        assert!(Value::from(10).loosely_equals(&Value::from(10.0)));
        assert!(Value::from("1e1").loosely_equals(&Value::from("10")));
        assert!(Value::Null.loosely_equals(&Value::from(false)));
        assert!(Value::Null.loosely_equals(&Value::from("")));
        assert!(!Value::Null.loosely_equals(&Value::from("a")));
        assert!(!Value::from("foo").loosely_equals(&Value::from(0)));
        assert!(Value::from("abc").loosely_equals(&Value::from(true)));
        assert!(Value::list([1, 2]).loosely_equals(&Value::list(["1", "2"])));
        assert!(!Value::list([1, 2]).loosely_equals(&Value::list([1])));
    }

    #[test]
    fn strict_equality_requires_same_type() {
        assert!(Value::from("10").strictly_equals(&Value::from("10")));
        assert!(!Value::from("10").strictly_equals(&Value::from(10)));
        assert!(!Value::from(10).strictly_equals(&Value::from(10.0)));
        assert!(Value::Null.strictly_equals(&Value::Null));
        assert!(Value::list([1, 2]).strictly_equals(&Value::map([(0, 1), (1, 2)])));
        assert!(!Value::map([("a", 1), ("b", 2)]).strictly_equals(&Value::map([("b", 2), ("a", 1)])));
    }

    #[test]
    fn loose_ordering() {
        assert_eq!(Value::from(11).loose_cmp(&Value::from(10)), Some(Ordering::Greater));
        assert_eq!(Value::from("11").loose_cmp(&Value::from(10)), Some(Ordering::Greater));
        assert_eq!(Value::from(9.5).loose_cmp(&Value::from("10")), Some(Ordering::Less));
        assert_eq!(Value::from("b").loose_cmp(&Value::from("a")), Some(Ordering::Greater));
        assert_eq!(Value::list([1, 2]).loose_cmp(&Value::list([1])), Some(Ordering::Greater));
        assert_eq!(Value::from(1).loose_cmp(&Value::list([1])), Some(Ordering::Less));
        assert_eq!(Value::list([1]).loose_cmp(&Value::from("z")), Some(Ordering::Greater));
        assert_eq!(Value::map([("a", 1)]).loose_cmp(&Value::from(10.5)), Some(Ordering::Greater));
        assert_eq!(Value::list([1]).loose_cmp(&Value::Null), Some(Ordering::Greater));
        assert_eq!(Value::list(Vec::<i32>::new()).loose_cmp(&Value::from(false)), Some(Ordering::Equal));
    }

    #[test]
    fn emptiness() {
        for empty in [
            Value::Null,
            Value::from(false),
            Value::from(0),
            Value::from(0.0),
            Value::from(""),
            Value::from("0"),
            Value::List(Vec::new()),
        ] {
            assert!(empty.is_empty(), "{empty} should be empty");
        }
        assert!(!Value::from("0.0").is_empty());
        assert!(!Value::list([0]).is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Value::from(11.0).to_string(), "11");
        assert_eq!(Value::from("a").to_string(), "\"a\"");
        assert_eq!(Value::map([("a", 1)]).to_string(), "{\"a\": 1}");
        assert_eq!(Value::list([Value::Null, Value::from(true)]).to_string(), "[null, true]");
    }
}
