//! Walking and rewriting expression trees.
//!
//! This module provides two ways to look at a tree:
//! - [`walk`] / [`walk_breadth_first`]: read-only, iterative walks with an explicit stack (no
//!   recursion). The callback borrows every node and steers the walk with [`WalkControl`].
//! - [`ExpressionTraverser`]: a rewriting pass driven by an ordered chain of
//!   [`ExpressionVisitor`]s, each of which may replace or remove any node.
//!
//! Traversal protocol
//! - For every node, `enter_expression` runs through the visitors in order. A visitor returning
//!   `None` removes the node and its subtree; later visitors do not see it.
//! - The children are traversed next, and the node is reconciled with the results: a unary
//!   node (`Not`, selectors) is removed with its child, a conjunction or disjunction drops
//!   removed children and is removed once empty. Nodes whose children all kept their identity
//!   are passed on unchanged, the others are rebuilt.
//! - `leave_expression` then runs through the visitors in order on the reconciled node, with the
//!   same removal rule. Its result is what the parent sees.
//!
//! Example: count nodes in an expression
//! ```
//! use hyexpr::prelude::*;
//!
//! let expr = key("size", greater_than(10)).and_x(not(ends_with(".css")));
//! let mut count = 0usize;
//! walk(&expr, |_, _| {
//!     count += 1;
//!     WalkControl::Continue
//! });
//! assert_eq!(count, 5);
//! ```
//!
//! Example: rewrite every `>n` into `>=n`
//! ```
//! use hyexpr::prelude::*;
//!
//! let expr = all(greater_than(10)).or_x(key("min", greater_than(0)));
//! let mut traverser = ExpressionTraverser::new().with_visitor(FnVisitor::new().on_leave(|e| {
//!     let relaxed = match e.as_literal() {
//!         Some(Literal::GreaterThan(v)) => Some(greater_than_equal(v.clone())),
//!         _ => None,
//!     };
//!     Ok(Some(relaxed.unwrap_or(e)))
//! }));
//! let rewritten = traverser.traverse(&expr)?.expect("nothing is removed");
//! assert_eq!(rewritten.to_string(), "all(>=10) || min>=0");
//! # Ok::<(), ExprError>(())
//! ```
mod immutable;
mod internal;
mod traverser;
pub mod visitors;

pub use immutable::*;
pub use traverser::*;

use crate::{expr::Expression, utils::error::ExprResult};

/// A rewrite pass over an expression tree.
///
/// Both hooks receive the node by value and return its replacement, or `None` to remove it.
/// Returning the node unchanged keeps its identity, which lets the traverser skip rebuilding
/// its ancestors. An `Err` aborts the whole traversal.
pub trait ExpressionVisitor {
    /// Called before the children of `expr` are traversed.
    fn enter_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        Ok(Some(expr))
    }

    /// Called after the children of `expr` are traversed and reconciled.
    fn leave_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        Ok(Some(expr))
    }
}

impl<V: ExpressionVisitor + ?Sized> ExpressionVisitor for &mut V {
    #[inline]
    fn enter_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        (**self).enter_expression(expr)
    }

    #[inline]
    fn leave_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        (**self).leave_expression(expr)
    }
}

impl<V: ExpressionVisitor + ?Sized> ExpressionVisitor for Box<V> {
    #[inline]
    fn enter_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        (**self).enter_expression(expr)
    }

    #[inline]
    fn leave_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        (**self).leave_expression(expr)
    }
}
