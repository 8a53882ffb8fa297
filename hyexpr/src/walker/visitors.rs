//! Ready-made visitors.
use log::{Level, log, trace};

use crate::{
    expr::{ExprView, Expression},
    utils::error::ExprResult,
    walker::ExpressionVisitor,
};

type Hook<'a> = Box<dyn FnMut(Expression) -> ExprResult<Option<Expression>> + 'a>;

/// Visitor built from closures. Missing hooks pass nodes through unchanged.
#[derive(Default)]
pub struct FnVisitor<'a> {
    enter: Option<Hook<'a>>,
    leave: Option<Hook<'a>>,
}

impl<'a> FnVisitor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Expression) -> ExprResult<Option<Expression>> + 'a,
    {
        self.enter = Some(Box::new(hook));
        self
    }

    pub fn on_leave<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Expression) -> ExprResult<Option<Expression>> + 'a,
    {
        self.leave = Some(Box::new(hook));
        self
    }
}

impl ExpressionVisitor for FnVisitor<'_> {
    fn enter_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        match &mut self.enter {
            Some(hook) => hook(expr),
            None => Ok(Some(expr)),
        }
    }

    fn leave_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        match &mut self.leave {
            Some(hook) => hook(expr),
            None => Ok(Some(expr)),
        }
    }
}

/// Logs every node entered and left through the `log` facade, without changing anything.
#[derive(Debug, Clone, Copy)]
pub struct LoggingVisitor {
    level: Level,
}

impl LoggingVisitor {
    pub fn new(level: Level) -> Self {
        LoggingVisitor { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LoggingVisitor {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl ExpressionVisitor for LoggingVisitor {
    fn enter_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        log!(self.level, "Entering {:?}: {expr}", expr.type_());
        Ok(Some(expr))
    }

    fn leave_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        log!(self.level, "Leaving {:?}: {expr}", expr.type_());
        Ok(Some(expr))
    }
}

/// Optimizer pass.
///
/// On leave, it
/// - collapses double negations: `not(not(x))` becomes `x`,
/// - unwraps conjunctions and disjunctions with a single child,
/// - drops conjuncts/disjuncts equivalent to an earlier sibling.
///
/// Nodes it cannot simplify are returned with their identity intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplifier {
    rewrites: usize,
}

impl Simplifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes simplified so far.
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }

    fn simplify(expr: &Expression) -> Option<Expression> {
        match expr.view() {
            ExprView::Not(inner) => match inner.view() {
                ExprView::Not(doubly) => Some(doubly.clone()),
                _ => None,
            },
            ExprView::And(children) | ExprView::Or(children) => {
                let (first, rest) = children.split_first()?;
                if rest.is_empty() {
                    return Some(first.clone());
                }

                let is_and = matches!(expr.view(), ExprView::And(_));
                let deduped = rest.iter().fold(first.clone(), |acc, child| {
                    if is_and {
                        acc.and_x(child.clone())
                    } else {
                        acc.or_x(child.clone())
                    }
                });
                let remaining = match deduped.view() {
                    ExprView::And(_) | ExprView::Or(_) => deduped.children().len(),
                    _ => 1,
                };
                (remaining < children.len()).then_some(deduped)
            }
            _ => None,
        }
    }
}

impl ExpressionVisitor for Simplifier {
    fn leave_expression(&mut self, expr: Expression) -> ExprResult<Option<Expression>> {
        match Self::simplify(&expr) {
            Some(simplified) => {
                trace!("Simplified {expr} into {simplified}");
                self.rewrites += 1;
                Ok(Some(simplified))
            }
            None => Ok(Some(expr)),
        }
    }
}
