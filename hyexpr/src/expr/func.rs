//! One builder per node kind.
//!
//! ```
//! use hyexpr::expr::func::*;
//!
//! let expr = all(greater_than(10).and_x(ends_with(".css")));
//! assert_eq!(expr.to_string(), r#"all(>10 && endsWith(".css"))"#);
//! ```
use indexmap::IndexMap;
use log::debug;

use crate::{
    expr::{
        Expression,
        literal::{Literal, Pattern},
        logic::{conjunction, disjunction},
        selector::Selector,
    },
    utils::error::{ExprError, ExprResult},
    value::{Key, Value},
};

// Literals

pub fn equals(value: impl Into<Value>) -> Expression {
    Literal::Equals(value.into()).into()
}

pub fn not_equals(value: impl Into<Value>) -> Expression {
    Literal::NotEquals(value.into()).into()
}

pub fn same(value: impl Into<Value>) -> Expression {
    Literal::Same(value.into()).into()
}

pub fn not_same(value: impl Into<Value>) -> Expression {
    Literal::NotSame(value.into()).into()
}

/// `===null`
pub fn null() -> Expression {
    same(Value::Null)
}

/// `!==null`
pub fn not_null() -> Expression {
    not_same(Value::Null)
}

pub fn greater_than(value: impl Into<Value>) -> Expression {
    Literal::GreaterThan(value.into()).into()
}

pub fn greater_than_equal(value: impl Into<Value>) -> Expression {
    Literal::GreaterThanEqual(value.into()).into()
}

pub fn less_than(value: impl Into<Value>) -> Expression {
    Literal::LessThan(value.into()).into()
}

pub fn less_than_equal(value: impl Into<Value>) -> Expression {
    Literal::LessThanEqual(value.into()).into()
}

/// Membership with loose comparison.
pub fn is_in<I, V>(values: I) -> Expression
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Literal::In {
        values: values.into_iter().map(Into::into).collect(),
        strict: false,
    }
    .into()
}

/// Membership with strict comparison.
pub fn is_in_strict<I, V>(values: I) -> Expression
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Literal::In {
        values: values.into_iter().map(Into::into).collect(),
        strict: true,
    }
    .into()
}

pub fn is_empty() -> Expression {
    Literal::IsEmpty.into()
}

pub fn not_empty() -> Expression {
    Literal::NotEmpty.into()
}

pub fn is_instance_of(class: impl Into<String>) -> Expression {
    Literal::IsInstanceOf(class.into()).into()
}

/// Regular expression match. Fails when `pattern` does not compile.
pub fn matches(pattern: &str) -> ExprResult<Expression> {
    Ok(Literal::Matches(Pattern::new(pattern)?).into())
}

pub fn starts_with(prefix: impl ToString) -> Expression {
    Literal::StartsWith(prefix.to_string()).into()
}

pub fn ends_with(suffix: impl ToString) -> Expression {
    Literal::EndsWith(suffix.to_string()).into()
}

pub fn contains(needle: impl ToString) -> Expression {
    Literal::Contains(needle.to_string()).into()
}

pub fn key_exists(key: impl Into<Key>) -> Expression {
    Literal::KeyExists(key.into()).into()
}

pub fn key_not_exists(key: impl Into<Key>) -> Expression {
    Literal::KeyNotExists(key.into()).into()
}

// Selectors

/// Entry `key` of the subject.
pub fn key(key: impl Into<Key>, inner: Expression) -> Expression {
    Selector::Key {
        key: key.into(),
        inner,
    }
    .into()
}

pub fn property(name: impl Into<String>, inner: Expression) -> Expression {
    Selector::Property {
        name: name.into(),
        inner,
    }
    .into()
}

/// Result of calling method `name` with `args` on the subject.
pub fn method<I, V>(name: impl Into<String>, args: I, inner: Expression) -> Expression
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Selector::Method {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
        inner,
    }
    .into()
}

pub fn count(inner: Expression) -> Expression {
    Selector::Count(inner).into()
}

pub fn all(inner: Expression) -> Expression {
    Selector::All(inner).into()
}

fn quantity(count: i64) -> ExprResult<usize> {
    usize::try_from(count).map_err(|_| {
        debug!("Rejected quantifier count {count}");
        ExprError::InvalidArgument {
            argument: "count",
            reason: format!("expected a non-negative count, got {count}"),
        }
    })
}

/// At least `count` elements match `inner`.
pub fn at_least(count: i64, inner: Expression) -> ExprResult<Expression> {
    Ok(Selector::AtLeast {
        count: quantity(count)?,
        inner,
    }
    .into())
}

/// At most `count` elements match `inner`.
pub fn at_most(count: i64, inner: Expression) -> ExprResult<Expression> {
    Ok(Selector::AtMost {
        count: quantity(count)?,
        inner,
    }
    .into())
}

/// Exactly `count` elements match `inner`.
pub fn exactly(count: i64, inner: Expression) -> ExprResult<Expression> {
    Ok(Selector::Exactly {
        count: quantity(count)?,
        inner,
    }
    .into())
}

// Logic

pub fn not(inner: Expression) -> Expression {
    inner.negate()
}

pub fn and(operands: impl IntoIterator<Item = Expression>) -> Expression {
    conjunction(operands)
}

pub fn or(operands: impl IntoIterator<Item = Expression>) -> Expression {
    disjunction(operands)
}

#[inline]
pub fn always_true() -> Expression {
    Expression::always_true()
}

#[inline]
pub fn always_false() -> Expression {
    Expression::always_false()
}

// Collections

/// Entries of `collection` that satisfy `expr`, keyed by their original keys.
///
/// Lists, maps and traversable objects yield a [`Value::Map`], so a filtered list keeps the
/// indices of the surviving elements. Any other subject is returned as is.
///
/// ```
/// use hyexpr::expr::func::*;
/// use hyexpr::value::Value;
///
/// let kept = filter(&Value::list(1..=6), &greater_than(4));
/// assert_eq!(kept, Value::map([(4, 5), (5, 6)]));
/// ```
pub fn filter(collection: &Value, expr: &Expression) -> Value {
    let entries: IndexMap<Key, Value> = match collection {
        Value::List(items) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| expr.evaluate(item))
            .map(|(index, item)| (Key::from(index), item.clone()))
            .collect(),
        Value::Map(entries) => entries
            .iter()
            .filter(|(_, item)| expr.evaluate(item))
            .map(|(key, item)| (key.clone(), item.clone()))
            .collect(),
        Value::Object(object) => match object.elements() {
            Some(items) => items
                .into_iter()
                .enumerate()
                .filter(|(_, item)| expr.evaluate(item))
                .map(|(index, item)| (Key::from(index), item))
                .collect(),
            None => return collection.clone(),
        },
        _ => return collection.clone(),
    };
    Value::Map(entries)
}
