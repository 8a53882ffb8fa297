use strum::{EnumIter, FromRepr, IntoStaticStr};

/// Flat discriminant of every expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum ExprType {
    // Literals
    Equals,
    NotEquals,
    Same,
    NotSame,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    In,
    IsEmpty,
    NotEmpty,
    IsInstanceOf,
    Matches,
    StartsWith,
    EndsWith,
    Contains,
    KeyExists,
    KeyNotExists,

    // Selectors
    Key,
    Property,
    Method,
    Count,
    All,
    AtLeast,
    AtMost,
    Exactly,

    // Logic
    Not,
    And,
    Or,
    True,
    False,
}

impl ExprType {
    /// Leaf comparison without expression children.
    #[inline]
    pub fn is_literal(self) -> bool {
        (self as u8) <= (ExprType::KeyNotExists as u8)
    }

    /// Unary node addressing a sub-value of its subject.
    #[inline]
    pub fn is_selector(self) -> bool {
        (ExprType::Key as u8..=ExprType::Exactly as u8).contains(&(self as u8))
    }

    /// `Not`, `And`, `Or` and the two constants.
    #[inline]
    pub fn is_logic(self) -> bool {
        (self as u8) >= (ExprType::Not as u8)
    }

    /// Selectors iterating over every element of a traversable subject.
    #[inline]
    pub fn is_quantifier(self) -> bool {
        matches!(
            self,
            ExprType::All | ExprType::AtLeast | ExprType::AtMost | ExprType::Exactly
        )
    }

    /// Number of expression children carried by nodes of this type, `None` for n-ary nodes.
    #[inline]
    pub fn arity(self) -> Option<usize> {
        match self {
            ExprType::And | ExprType::Or => None,
            ExprType::Not => Some(1),
            t if t.is_selector() => Some(1),
            _ => Some(0),
        }
    }
}
