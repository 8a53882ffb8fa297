//! Semantic equivalence of expression trees.
use smallvec::SmallVec;

use crate::expr::{ExprView, Expression};

impl Expression {
    /// Whether `self` and `other` accept the same subjects, as far as can be decided
    /// structurally.
    ///
    /// Literals compare operands with their own comparison semantics, selectors compare their
    /// addressing datum and children, and `And`/`Or` compare their children as multisets.
    pub fn equivalent_to(&self, other: &Expression) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        match (self.view(), other.view()) {
            (ExprView::Literal(a), ExprView::Literal(b)) => a.equivalent_to(b),
            (ExprView::Selector(a), ExprView::Selector(b)) => a.equivalent_to(b),
            (ExprView::Not(a), ExprView::Not(b)) => a.equivalent_to(b),
            (ExprView::And(a), ExprView::And(b)) | (ExprView::Or(a), ExprView::Or(b)) => {
                equivalent_multisets(a, b)
            }
            (ExprView::True, ExprView::True) | (ExprView::False, ExprView::False) => true,
            _ => false,
        }
    }
}

/// Greedy first-fit matching: each left child consumes the first unused equivalent right
/// child, scanning left to right.
///
/// This can reject sequences for which some other pairing exists when children are only
/// partially equivalent to one another.
pub fn equivalent_multisets(left: &[Expression], right: &[Expression]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut unmatched: SmallVec<[&Expression; 8]> = right.iter().collect();
    for expr in left {
        match unmatched.iter().position(|candidate| expr.equivalent_to(candidate)) {
            Some(index) => {
                unmatched.remove(index);
            }
            None => return false,
        }
    }

    unmatched.is_empty()
}
