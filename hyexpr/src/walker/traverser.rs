use log::trace;

use crate::{
    expr::Expression,
    utils::error::ExprResult,
    walker::{
        ExpressionVisitor,
        internal::{Reconciled, reconcile},
    },
};

/// Runs an ordered chain of [`ExpressionVisitor`]s over expression trees.
///
/// ```
/// use hyexpr::prelude::*;
///
/// // Remove every `>10` comparison.
/// let mut traverser = ExpressionTraverser::new().with_visitor(FnVisitor::new().on_leave(|e| {
///     let is_gt_10 = e.equivalent_to(&greater_than(10));
///     Ok((!is_gt_10).then_some(e))
/// }));
///
/// let expr = greater_than(10).and_x(same("5"));
/// let pruned = traverser.traverse(&expr)?.expect("one conjunct survives");
/// assert_eq!(pruned.to_string(), r#"==="5""#);
///
/// assert!(traverser.traverse(&not(greater_than(10)))?.is_none());
/// # Ok::<(), ExprError>(())
/// ```
#[derive(Default)]
pub struct ExpressionTraverser<'v> {
    visitors: Vec<Box<dyn ExpressionVisitor + 'v>>,
}

impl<'v> ExpressionTraverser<'v> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ExpressionTraverser::add_visitor`].
    pub fn with_visitor(mut self, visitor: impl ExpressionVisitor + 'v) -> Self {
        self.add_visitor(visitor);
        self
    }

    /// Append `visitor` to the end of the chain.
    pub fn add_visitor(&mut self, visitor: impl ExpressionVisitor + 'v) {
        self.visitors.push(Box::new(visitor));
    }

    /// Remove the visitor at `index`, shifting the later ones down.
    ///
    /// Visitors are addressed by position because boxed trait objects have no identity to
    /// compare. A visitor registered twice occupies two slots and needs two removals.
    /// Returns `None` when `index` is out of bounds.
    pub fn remove_visitor(&mut self, index: usize) -> Option<Box<dyn ExpressionVisitor + 'v>> {
        (index < self.visitors.len()).then(|| self.visitors.remove(index))
    }

    /// Registered visitors, in the order they run.
    pub fn visitors(&self) -> &[Box<dyn ExpressionVisitor + 'v>] {
        &self.visitors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Traverse `expr` with every visitor.
    ///
    /// Returns the rewritten tree, or `None` when the root itself was removed. Subtrees no
    /// visitor touched are shared with `expr`. The first visitor error aborts the traversal
    /// and is returned as is.
    pub fn traverse(&mut self, expr: &Expression) -> ExprResult<Option<Expression>> {
        if self.visitors.is_empty() {
            return Ok(Some(expr.clone()));
        }
        self.traverse_node(expr.clone())
    }

    fn traverse_node(&mut self, node: Expression) -> ExprResult<Option<Expression>> {
        let Some(node) = self.enter(node)? else {
            return Ok(None);
        };

        let node = match reconcile(&node, |child| self.traverse_node(child))? {
            Reconciled::Unchanged => node,
            Reconciled::Removed => return Ok(None),
            Reconciled::Rebuilt(rebuilt) => {
                trace!("Rebuilt {node} into {rebuilt}");
                rebuilt
            }
        };

        self.leave(node)
    }

    fn enter(&mut self, mut node: Expression) -> ExprResult<Option<Expression>> {
        for (index, visitor) in self.visitors.iter_mut().enumerate() {
            match visitor.enter_expression(node)? {
                Some(next) => node = next,
                None => {
                    trace!("Visitor #{index} removed a node on enter");
                    return Ok(None);
                }
            }
        }
        Ok(Some(node))
    }

    fn leave(&mut self, mut node: Expression) -> ExprResult<Option<Expression>> {
        for (index, visitor) in self.visitors.iter_mut().enumerate() {
            match visitor.leave_expression(node)? {
                Some(next) => node = next,
                None => {
                    trace!("Visitor #{index} removed a node on leave");
                    return Ok(None);
                }
            }
        }
        Ok(Some(node))
    }
}
