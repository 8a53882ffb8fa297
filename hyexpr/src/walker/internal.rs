//! Internal primitives powering the public walker API.
//!
//! Kept out of the public surface: the explicit stack used by [`walk`](super::walk) and the
//! child reconciliation step of [`ExpressionTraverser`](super::ExpressionTraverser).
use std::collections::VecDeque;

use log::trace;

use crate::{
    expr::{ExprView, Expression},
    utils::error::ExprResult,
};

/// Internal stack type: pairs of (node, depth).
pub(super) type WalkStack<'a> = VecDeque<(&'a Expression, usize)>;

/// Outcome of traversing the children of a node.
pub(super) enum Reconciled {
    /// Every child came back with its identity intact.
    Unchanged,
    /// A unary node lost its child, or a combinator lost all of its children.
    Removed,
    Rebuilt(Expression),
}

/// Traverse the children of `node` with `visit` and reconcile the results at `node`.
///
/// Unary nodes (`Not` and selectors) are removed with their child and rebuilt around a
/// replaced child. Combinators drop removed children, are removed once empty, and are rebuilt
/// through the normalizing constructors when any child changed.
pub(super) fn reconcile<F>(node: &Expression, mut visit: F) -> ExprResult<Reconciled>
where
    F: FnMut(Expression) -> ExprResult<Option<Expression>>,
{
    match node.view() {
        ExprView::Not(_) | ExprView::Selector(_) => {
            let Some(inner) = node.inner() else {
                return Ok(Reconciled::Unchanged);
            };
            match visit(inner.clone())? {
                None => {
                    trace!("Removing {:?} after its child was removed", node.type_());
                    Ok(Reconciled::Removed)
                }
                Some(replaced) if replaced.ptr_eq(inner) => Ok(Reconciled::Unchanged),
                Some(replaced) => Ok(Reconciled::Rebuilt(node.with_inner(replaced))),
            }
        }
        ExprView::And(children) | ExprView::Or(children) => {
            let mut survivors = Vec::with_capacity(children.len());
            let mut changed = false;
            for child in children {
                match visit(child.clone())? {
                    None => changed = true,
                    Some(replaced) => {
                        changed |= !replaced.ptr_eq(child);
                        survivors.push(replaced);
                    }
                }
            }

            if survivors.is_empty() {
                trace!("Removing {:?} after all of its children were removed", node.type_());
                Ok(Reconciled::Removed)
            } else if changed {
                Ok(Reconciled::Rebuilt(node.with_children(survivors)))
            } else {
                Ok(Reconciled::Unchanged)
            }
        }
        ExprView::Literal(_) | ExprView::True | ExprView::False => Ok(Reconciled::Unchanged),
    }
}
