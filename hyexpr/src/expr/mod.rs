//! Expression trees: node model, evaluation and combination.
//!
//! Role
//! - [`Expression`] is an immutable, reference-counted handle to a node. Cloning is O(1) and
//!   shares the subtree; every combinator returns a new handle instead of mutating.
//! - [`Expression::view`] exposes the node as an [`ExprView`] for matching, and
//!   [`Expression::type_`] returns the flat [`ExprType`] discriminant.
//! - Builders live in [`func`]; combination rules (flattening, absorption, deduplication) in
//!   the `logic` module; equivalence in the `equivalence` module.
//!
//! Example
//! ```
//! use hyexpr::expr::func::*;
//! use hyexpr::value::Value;
//!
//! let adult = key("age", greater_than_equal(18)).and_x(key("name", starts_with("Tho")));
//! let person = Value::map([("age", Value::from(35)), ("name", Value::from("Thomas Edison"))]);
//! assert!(adult.evaluate(&person));
//! assert_eq!(adult.to_string(), r#"age>=18 && name.startsWith("Tho")"#);
//! ```
pub mod equivalence;
pub mod func;
pub mod literal;
pub mod logic;
pub mod pretty;
pub mod selector;
pub mod variant;

use std::{fmt, slice, sync::Arc};

use crate::{
    accessor::{StandardAccessor, ValueAccessor},
    expr::{literal::Literal, selector::Selector, variant::ExprType},
    value::Value,
};

/// Decoded node of an [`Expression`].
#[derive(Debug)]
pub enum ExprView {
    Literal(Literal),
    Selector(Selector),
    Not(Expression),
    /// Conjuncts, never containing another `And`, `True` or `False`.
    And(Vec<Expression>),
    /// Disjuncts, never containing another `Or`, `True` or `False`.
    Or(Vec<Expression>),
    /// Tautology.
    True,
    /// Contradiction.
    False,
}

impl ExprView {
    pub fn type_(&self) -> ExprType {
        match self {
            ExprView::Literal(literal) => literal.type_(),
            ExprView::Selector(selector) => selector.type_(),
            ExprView::Not(_) => ExprType::Not,
            ExprView::And(_) => ExprType::And,
            ExprView::Or(_) => ExprType::Or,
            ExprView::True => ExprType::True,
            ExprView::False => ExprType::False,
        }
    }
}

/// Immutable boolean expression over a [`Value`] subject.
#[derive(Clone)]
pub struct Expression {
    node: Arc<ExprView>,
}

impl Expression {
    #[inline]
    pub(crate) fn from_view(view: ExprView) -> Self {
        Expression {
            node: Arc::new(view),
        }
    }

    /// The tautology.
    #[inline]
    pub fn always_true() -> Self {
        Self::from_view(ExprView::True)
    }

    /// The contradiction.
    #[inline]
    pub fn always_false() -> Self {
        Self::from_view(ExprView::False)
    }

    /// Describe the node and expose its children.
    #[inline]
    pub fn view(&self) -> &ExprView {
        &self.node
    }

    /// Return the discriminant identifying the kind of this node.
    #[inline]
    pub fn type_(&self) -> ExprType {
        self.node.type_()
    }

    /// Same as [`Expression::type_`]
    #[inline]
    pub fn r#type(&self) -> ExprType {
        self.type_()
    }

    /// Whether both handles point to the very same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Expression) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(*self.node, ExprView::Literal(_))
    }

    #[inline]
    pub fn as_literal(&self) -> Option<&Literal> {
        match &*self.node {
            ExprView::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    #[inline]
    pub fn as_selector(&self) -> Option<&Selector> {
        match &*self.node {
            ExprView::Selector(selector) => Some(selector),
            _ => None,
        }
    }

    /// Child of a `Not` or of a selector.
    pub fn inner(&self) -> Option<&Expression> {
        match &*self.node {
            ExprView::Not(inner) => Some(inner),
            ExprView::Selector(selector) => Some(selector.inner()),
            _ => None,
        }
    }

    /// Conjuncts of an `And` node.
    pub fn conjuncts(&self) -> Option<&[Expression]> {
        match &*self.node {
            ExprView::And(conjuncts) => Some(conjuncts),
            _ => None,
        }
    }

    /// Disjuncts of an `Or` node.
    pub fn disjuncts(&self) -> Option<&[Expression]> {
        match &*self.node {
            ExprView::Or(disjuncts) => Some(disjuncts),
            _ => None,
        }
    }

    /// Direct children in order; empty for literals and constants.
    pub fn children(&self) -> &[Expression] {
        match &*self.node {
            ExprView::Not(inner) => slice::from_ref(inner),
            ExprView::Selector(selector) => slice::from_ref(selector.inner()),
            ExprView::And(children) | ExprView::Or(children) => children,
            ExprView::Literal(_) | ExprView::True | ExprView::False => &[],
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Expression::node_count)
            .sum::<usize>()
    }

    /// Evaluate against `subject` with the [`StandardAccessor`].
    #[inline]
    pub fn evaluate(&self, subject: &Value) -> bool {
        self.evaluate_with(subject, &StandardAccessor)
    }

    /// Evaluate against `subject`, resolving sub-values through `accessor`.
    ///
    /// Never fails: shape mismatches evaluate to `false`.
    pub fn evaluate_with<A: ValueAccessor + ?Sized>(&self, subject: &Value, accessor: &A) -> bool {
        match &*self.node {
            ExprView::Literal(literal) => literal.evaluate(subject, accessor),
            ExprView::Selector(selector) => selector.evaluate(subject, accessor),
            ExprView::Not(inner) => !inner.evaluate_with(subject, accessor),
            ExprView::And(conjuncts) => conjuncts.iter().all(|c| c.evaluate_with(subject, accessor)),
            ExprView::Or(disjuncts) => disjuncts.iter().any(|d| d.evaluate_with(subject, accessor)),
            ExprView::True => true,
            ExprView::False => false,
        }
    }

    /// Rebuild a unary node around a new child. Other nodes are returned unchanged.
    pub(crate) fn with_inner(&self, inner: Expression) -> Expression {
        match &*self.node {
            ExprView::Not(_) => inner.negate(),
            ExprView::Selector(selector) => selector.with_inner(inner).into(),
            _ => self.clone(),
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::from_view(ExprView::Literal(literal))
    }
}

impl From<Selector> for Expression {
    fn from(selector: Selector) -> Self {
        Expression::from_view(ExprView::Selector(selector))
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({self})")
    }
}

impl<E: Into<Expression>> std::ops::BitAnd<E> for Expression {
    type Output = Expression;

    fn bitand(self, rhs: E) -> Self::Output {
        self.and_x(rhs)
    }
}

impl<E: Into<Expression>> std::ops::BitOr<E> for Expression {
    type Output = Expression;

    fn bitor(self, rhs: E) -> Self::Output {
        self.or_x(rhs)
    }
}

impl std::ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Self::Output {
        self.negate()
    }
}
