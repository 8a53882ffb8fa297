//! Unary nodes that address a sub-value and delegate to their child expression.
use smallvec::SmallVec;

use crate::{
    accessor::ValueAccessor,
    expr::{Expression, variant::ExprType},
    value::{Key, Value},
};

/// Arguments of a [`Selector::Method`] call.
pub type MethodArgs = SmallVec<[Value; 2]>;

/// Selector node. Each variant owns exactly one child expression.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Entry `key` of a list, map or array-access object.
    Key { key: Key, inner: Expression },
    /// Property of an object.
    Property { name: String, inner: Expression },
    /// Result of calling a method on an object.
    Method {
        name: String,
        args: MethodArgs,
        inner: Expression,
    },
    /// Number of elements of a countable subject.
    Count(Expression),
    /// Every element matches (vacuously true on empty subjects).
    All(Expression),
    AtLeast { count: usize, inner: Expression },
    AtMost { count: usize, inner: Expression },
    Exactly { count: usize, inner: Expression },
}

impl Selector {
    pub fn type_(&self) -> ExprType {
        match self {
            Selector::Key { .. } => ExprType::Key,
            Selector::Property { .. } => ExprType::Property,
            Selector::Method { .. } => ExprType::Method,
            Selector::Count(_) => ExprType::Count,
            Selector::All(_) => ExprType::All,
            Selector::AtLeast { .. } => ExprType::AtLeast,
            Selector::AtMost { .. } => ExprType::AtMost,
            Selector::Exactly { .. } => ExprType::Exactly,
        }
    }

    /// The wrapped child expression.
    pub fn inner(&self) -> &Expression {
        match self {
            Selector::Key { inner, .. }
            | Selector::Property { inner, .. }
            | Selector::Method { inner, .. }
            | Selector::Count(inner)
            | Selector::All(inner)
            | Selector::AtLeast { inner, .. }
            | Selector::AtMost { inner, .. }
            | Selector::Exactly { inner, .. } => inner,
        }
    }

    /// Same addressing datum, different child.
    pub fn with_inner(&self, inner: Expression) -> Selector {
        match self {
            Selector::Key { key, .. } => Selector::Key {
                key: key.clone(),
                inner,
            },
            Selector::Property { name, .. } => Selector::Property {
                name: name.clone(),
                inner,
            },
            Selector::Method { name, args, .. } => Selector::Method {
                name: name.clone(),
                args: args.clone(),
                inner,
            },
            Selector::Count(_) => Selector::Count(inner),
            Selector::All(_) => Selector::All(inner),
            Selector::AtLeast { count, .. } => Selector::AtLeast {
                count: *count,
                inner,
            },
            Selector::AtMost { count, .. } => Selector::AtMost {
                count: *count,
                inner,
            },
            Selector::Exactly { count, .. } => Selector::Exactly {
                count: *count,
                inner,
            },
        }
    }

    pub fn evaluate<A: ValueAccessor + ?Sized>(&self, subject: &Value, accessor: &A) -> bool {
        match self {
            Selector::Key { key, inner } => accessor
                .resolve_key(subject, key)
                .is_some_and(|value| inner.evaluate_with(&value, accessor)),
            Selector::Property { name, inner } => accessor
                .resolve_property(subject, name)
                .is_some_and(|value| inner.evaluate_with(&value, accessor)),
            Selector::Method { name, args, inner } => accessor
                .invoke_method(subject, name, args)
                .is_some_and(|value| inner.evaluate_with(&value, accessor)),
            Selector::Count(inner) => accessor
                .length(subject)
                .is_some_and(|len| inner.evaluate_with(&Value::from(len), accessor)),
            Selector::All(inner) => accessor
                .iterate(subject)
                .is_some_and(|mut elements| elements.all(|e| inner.evaluate_with(&e, accessor))),
            Selector::AtLeast { count, inner } => {
                let Some(elements) = accessor.iterate(subject) else {
                    return false;
                };
                if *count == 0 {
                    return true;
                }
                let mut matched = 0;
                for element in elements {
                    if inner.evaluate_with(&element, accessor) {
                        matched += 1;
                        if matched >= *count {
                            return true;
                        }
                    }
                }
                false
            }
            Selector::AtMost { count, inner } => {
                let Some(elements) = accessor.iterate(subject) else {
                    return false;
                };
                let mut matched = 0;
                for element in elements {
                    if inner.evaluate_with(&element, accessor) {
                        matched += 1;
                        if matched > *count {
                            return false;
                        }
                    }
                }
                true
            }
            Selector::Exactly { count, inner } => {
                let Some(elements) = accessor.iterate(subject) else {
                    return false;
                };
                let mut matched = 0;
                for element in elements {
                    if inner.evaluate_with(&element, accessor) {
                        matched += 1;
                        if matched > *count {
                            return false;
                        }
                    }
                }
                matched == *count
            }
        }
    }

    /// Same variant, same addressing datum and equivalent children.
    pub fn equivalent_to(&self, other: &Selector) -> bool {
        let same_datum = match (self, other) {
            (Selector::Key { key: a, .. }, Selector::Key { key: b, .. }) => a == b,
            (Selector::Property { name: a, .. }, Selector::Property { name: b, .. }) => a == b,
            (
                Selector::Method {
                    name: a, args: xs, ..
                },
                Selector::Method {
                    name: b, args: ys, ..
                },
            ) => {
                a == b
                    && xs.len() == ys.len()
                    && xs.iter().zip(ys.iter()).all(|(x, y)| x.strictly_equals(y))
            }
            (Selector::Count(_), Selector::Count(_)) | (Selector::All(_), Selector::All(_)) => true,
            (Selector::AtLeast { count: a, .. }, Selector::AtLeast { count: b, .. })
            | (Selector::AtMost { count: a, .. }, Selector::AtMost { count: b, .. })
            | (Selector::Exactly { count: a, .. }, Selector::Exactly { count: b, .. }) => a == b,
            _ => false,
        };

        same_datum && self.inner().equivalent_to(other.inner())
    }
}
