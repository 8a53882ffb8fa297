//! Normalizing combination of expressions.
//!
//! Combinators never produce an `And` directly inside an `And` (dually for `Or`), and the
//! constants only ever survive at the root. Incremental combination (`and_x`, `or_x`)
//! additionally drops operands that are equivalent to an existing child.
use log::trace;

use crate::expr::{ExprView, Expression};

/// The two n-ary combinators, described by their identity and absorbing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    And,
    Or,
}

impl Junction {
    /// Children of `expr` if it is a node of this junction.
    fn children_of(self, expr: &Expression) -> Option<&[Expression]> {
        match (self, expr.view()) {
            (Junction::And, ExprView::And(children)) | (Junction::Or, ExprView::Or(children)) => {
                Some(children)
            }
            _ => None,
        }
    }

    /// `true` for `And`, `false` for `Or`.
    fn is_identity(self, expr: &Expression) -> bool {
        matches!(
            (self, expr.view()),
            (Junction::And, ExprView::True) | (Junction::Or, ExprView::False)
        )
    }

    /// `false` for `And`, `true` for `Or`.
    fn is_absorbing(self, expr: &Expression) -> bool {
        matches!(
            (self, expr.view()),
            (Junction::And, ExprView::False) | (Junction::Or, ExprView::True)
        )
    }

    fn identity(self) -> Expression {
        match self {
            Junction::And => Expression::always_true(),
            Junction::Or => Expression::always_false(),
        }
    }

    fn absorbing(self) -> Expression {
        match self {
            Junction::And => Expression::always_false(),
            Junction::Or => Expression::always_true(),
        }
    }

    fn build(self, children: Vec<Expression>) -> Expression {
        match self {
            Junction::And => Expression::from_view(ExprView::And(children)),
            Junction::Or => Expression::from_view(ExprView::Or(children)),
        }
    }

    /// Flatten and absorb without deduplicating.
    fn collect(self, operands: impl IntoIterator<Item = Expression>) -> Expression {
        let mut children = Vec::new();
        for operand in operands {
            if self.is_absorbing(&operand) {
                return self.absorbing();
            }
            if self.is_identity(&operand) {
                continue;
            }
            match self.children_of(&operand) {
                Some(nested) => children.extend(nested.iter().cloned()),
                None => children.push(operand),
            }
        }

        if children.is_empty() {
            self.identity()
        } else {
            self.build(children)
        }
    }

    /// Add `rhs` to `lhs`, splicing same-kind operands and skipping equivalent children.
    fn combine(self, lhs: &Expression, rhs: Expression) -> Expression {
        if self.is_identity(&rhs) || self.is_absorbing(lhs) {
            return lhs.clone();
        }
        if self.is_absorbing(&rhs) || self.is_identity(lhs) {
            return rhs;
        }

        let mut children: Vec<Expression> = match self.children_of(lhs) {
            Some(existing) => existing.to_vec(),
            None => vec![lhs.clone()],
        };
        let incoming = match self.children_of(&rhs) {
            Some(nested) => nested.to_vec(),
            None => vec![rhs],
        };

        let before = children.len();
        for operand in incoming {
            if children.iter().any(|child| child.equivalent_to(&operand)) {
                trace!("Dropping duplicate operand {operand}");
                continue;
            }
            children.push(operand);
        }

        if children.len() == before {
            lhs.clone()
        } else {
            self.build(children)
        }
    }
}

/// Conjunction of `operands`, flattened, with the constants absorbed.
///
/// An empty conjunction is [`Expression::always_true`]. Children are not deduplicated.
pub fn conjunction(operands: impl IntoIterator<Item = Expression>) -> Expression {
    Junction::And.collect(operands)
}

/// Disjunction of `operands`, flattened, with the constants absorbed.
///
/// An empty disjunction is [`Expression::always_false`]. Children are not deduplicated.
pub fn disjunction(operands: impl IntoIterator<Item = Expression>) -> Expression {
    Junction::Or.collect(operands)
}

impl Expression {
    /// `self && other`.
    ///
    /// Returns `self` unchanged when `other` is the tautology or is equivalent to a conjunct
    /// already present, and the contradiction when either side is the contradiction.
    pub fn and_x(&self, other: impl Into<Expression>) -> Expression {
        Junction::And.combine(self, other.into())
    }

    /// `self || other`. Dual of [`Expression::and_x`].
    pub fn or_x(&self, other: impl Into<Expression>) -> Expression {
        Junction::Or.combine(self, other.into())
    }

    /// `self && !other`.
    pub fn and_not(&self, other: impl Into<Expression>) -> Expression {
        self.and_x(other.into().negate())
    }

    /// `self || !other`.
    pub fn or_not(&self, other: impl Into<Expression>) -> Expression {
        self.or_x(other.into().negate())
    }

    /// Wrap in a `Not` node. Double negations are kept as written.
    pub fn negate(&self) -> Expression {
        Expression::from_view(ExprView::Not(self.clone()))
    }

    /// Rebuild an `And`/`Or` node from new children through [`conjunction`]/[`disjunction`].
    /// Other nodes are returned unchanged.
    pub(crate) fn with_children(&self, children: Vec<Expression>) -> Expression {
        match self.view() {
            ExprView::And(_) => conjunction(children),
            ExprView::Or(_) => disjunction(children),
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::func::*;

    #[test]
    fn collect_splices_nested_junctions() {
        let inner = conjunction([greater_than(1), less_than(5)]);
        let outer = conjunction([inner, equals(3)]);
        assert_eq!(outer.conjuncts().map(<[_]>::len), Some(3));
    }

    #[test]
    fn collect_absorbs_constants() {
        assert!(matches!(
            conjunction([greater_than(1), always_false()]).view(),
            ExprView::False
        ));
        assert!(matches!(
            disjunction([greater_than(1), always_true()]).view(),
            ExprView::True
        ));
        assert!(matches!(conjunction(Vec::new()).view(), ExprView::True));
        assert!(matches!(disjunction(Vec::new()).view(), ExprView::False));

        let kept = conjunction([always_true(), greater_than(1)]);
        assert_eq!(kept.conjuncts().map(<[_]>::len), Some(1));
    }

    #[test]
    fn combine_returns_self_when_nothing_added() {
        let base = greater_than(1).and_x(less_than(5));
        let again = base.and_x(less_than(5));
        assert!(again.ptr_eq(&base));
    }
}
