//! Leaf comparisons.
//!
//! A [`Literal`] compares the subject against an immutable operand. Evaluation is total: a
//! subject of the wrong shape (a number handed to `startsWith`, a scalar handed to
//! `keyExists`, ...) makes the literal evaluate to `false`.
//!
//! Equivalence follows each literal's own comparison semantics rather than structural
//! equality of the operand, e.g. `Equals("10")` and `Equals(10)` are equivalent while
//! `Same("10")` and `Same(10)` are not.
use std::{cmp::Ordering, fmt};

use log::debug;
use regex::Regex;

use crate::{
    accessor::ValueAccessor,
    expr::variant::ExprType,
    utils::error::{ExprError, ExprResult},
    value::{Key, Value},
};

/// Compiled regular expression operand of [`Literal::Matches`].
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> ExprResult<Self> {
        match Regex::new(source) {
            Ok(regex) => Ok(Pattern { regex }),
            Err(source_error) => {
                debug!("Rejected pattern '{source}': {source_error}");
                Err(ExprError::InvalidPattern {
                    pattern: source.to_owned(),
                    source: source_error,
                })
            }
        }
    }

    /// Source text the pattern was compiled from.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

/// Leaf comparison.
#[derive(Debug, Clone)]
pub enum Literal {
    /// Loose equality.
    Equals(Value),
    NotEquals(Value),
    /// Identity: same type and same value.
    Same(Value),
    NotSame(Value),
    GreaterThan(Value),
    GreaterThanEqual(Value),
    LessThan(Value),
    LessThanEqual(Value),
    /// Membership using `Same` semantics when `strict`, `Equals` semantics otherwise.
    In { values: Vec<Value>, strict: bool },
    IsEmpty,
    NotEmpty,
    IsInstanceOf(String),
    Matches(Pattern),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    KeyExists(Key),
    KeyNotExists(Key),
}

impl Literal {
    pub fn type_(&self) -> ExprType {
        match self {
            Literal::Equals(_) => ExprType::Equals,
            Literal::NotEquals(_) => ExprType::NotEquals,
            Literal::Same(_) => ExprType::Same,
            Literal::NotSame(_) => ExprType::NotSame,
            Literal::GreaterThan(_) => ExprType::GreaterThan,
            Literal::GreaterThanEqual(_) => ExprType::GreaterThanEqual,
            Literal::LessThan(_) => ExprType::LessThan,
            Literal::LessThanEqual(_) => ExprType::LessThanEqual,
            Literal::In { .. } => ExprType::In,
            Literal::IsEmpty => ExprType::IsEmpty,
            Literal::NotEmpty => ExprType::NotEmpty,
            Literal::IsInstanceOf(_) => ExprType::IsInstanceOf,
            Literal::Matches(_) => ExprType::Matches,
            Literal::StartsWith(_) => ExprType::StartsWith,
            Literal::EndsWith(_) => ExprType::EndsWith,
            Literal::Contains(_) => ExprType::Contains,
            Literal::KeyExists(_) => ExprType::KeyExists,
            Literal::KeyNotExists(_) => ExprType::KeyNotExists,
        }
    }

    /// The compared operand of the equality and ordering families.
    pub fn operand(&self) -> Option<&Value> {
        match self {
            Literal::Equals(v)
            | Literal::NotEquals(v)
            | Literal::Same(v)
            | Literal::NotSame(v)
            | Literal::GreaterThan(v)
            | Literal::GreaterThanEqual(v)
            | Literal::LessThan(v)
            | Literal::LessThanEqual(v) => Some(v),
            _ => None,
        }
    }

    pub fn evaluate<A: ValueAccessor + ?Sized>(&self, subject: &Value, accessor: &A) -> bool {
        match self {
            Literal::Equals(v) => subject.loosely_equals(v),
            Literal::NotEquals(v) => !subject.loosely_equals(v),
            Literal::Same(v) => subject.strictly_equals(v),
            Literal::NotSame(v) => !subject.strictly_equals(v),
            Literal::GreaterThan(v) => subject.loose_cmp(v) == Some(Ordering::Greater),
            Literal::GreaterThanEqual(v) => {
                matches!(subject.loose_cmp(v), Some(Ordering::Greater | Ordering::Equal))
            }
            Literal::LessThan(v) => subject.loose_cmp(v) == Some(Ordering::Less),
            Literal::LessThanEqual(v) => {
                matches!(subject.loose_cmp(v), Some(Ordering::Less | Ordering::Equal))
            }
            Literal::In { values, strict } => values.iter().any(|v| {
                if *strict {
                    subject.strictly_equals(v)
                } else {
                    subject.loosely_equals(v)
                }
            }),
            Literal::IsEmpty => subject.is_empty(),
            Literal::NotEmpty => !subject.is_empty(),
            Literal::IsInstanceOf(class) => subject
                .as_object()
                .is_some_and(|object| object.is_instance_of(class)),
            Literal::Matches(pattern) => subject.as_str().is_some_and(|s| pattern.is_match(s)),
            Literal::StartsWith(prefix) => subject.as_str().is_some_and(|s| s.starts_with(prefix.as_str())),
            Literal::EndsWith(suffix) => subject.as_str().is_some_and(|s| s.ends_with(suffix.as_str())),
            Literal::Contains(needle) => subject.as_str().is_some_and(|s| s.contains(needle.as_str())),
            Literal::KeyExists(key) => accessor.has_key(subject, key) == Some(true),
            Literal::KeyNotExists(key) => accessor.has_key(subject, key) == Some(false),
        }
    }

    /// Semantic equivalence, including `Same(v) ≡ In([v], strict)` and
    /// `Equals(v) ≡ In([v], loose)`.
    pub fn equivalent_to(&self, other: &Literal) -> bool {
        use Literal::*;

        match (self, other) {
            (Same(a), Same(b)) | (NotSame(a), NotSame(b)) => a.strictly_equals(b),
            (Equals(a), Equals(b))
            | (NotEquals(a), NotEquals(b))
            | (GreaterThan(a), GreaterThan(b))
            | (GreaterThanEqual(a), GreaterThanEqual(b))
            | (LessThan(a), LessThan(b))
            | (LessThanEqual(a), LessThanEqual(b)) => a.loosely_equals(b),
            (
                In {
                    values: a,
                    strict: strict_a,
                },
                In {
                    values: b,
                    strict: strict_b,
                },
            ) => {
                strict_a == strict_b
                    && a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| {
                        if *strict_a {
                            x.strictly_equals(y)
                        } else {
                            x.loosely_equals(y)
                        }
                    })
            }
            (Same(v), In { values, strict: true }) | (In { values, strict: true }, Same(v)) => {
                matches!(values.as_slice(), [only] if only.strictly_equals(v))
            }
            (Equals(v), In { values, strict: false })
            | (In { values, strict: false }, Equals(v)) => {
                matches!(values.as_slice(), [only] if only.loosely_equals(v))
            }
            (IsEmpty, IsEmpty) | (NotEmpty, NotEmpty) => true,
            (IsInstanceOf(a), IsInstanceOf(b)) => a == b,
            (Matches(a), Matches(b)) => a.as_str() == b.as_str(),
            (StartsWith(a), StartsWith(b))
            | (EndsWith(a), EndsWith(b))
            | (Contains(a), Contains(b)) => a == b,
            (KeyExists(a), KeyExists(b)) | (KeyNotExists(a), KeyNotExists(b)) => a == b,
            _ => false,
        }
    }
}
