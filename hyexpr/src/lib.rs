//! Hyexpr: boolean predicate trees over dynamic values.
//!
//! An [`Expression`](expr::Expression) is an immutable tree of comparisons (literals),
//! sub-value selectors and logic combinators. Trees are evaluated against a
//! [`Value`](value::Value) subject, compared for semantic equivalence, rendered as a compact
//! single-line text, and rewritten by chains of visitors.
//!
//! Normalization
//!  - Combining expressions flattens nested conjunctions/disjunctions and absorbs the
//!    `true`/`false` constants, so the constants only ever appear as a root.
//!  - Incremental combination (`and_x`, `or_x`) drops operands equivalent to an existing child.
//!
//! Evaluation
//!  - Evaluation is total: a subject of the wrong shape makes the node evaluate to `false`.
//!  - Sub-values are resolved through a [`ValueAccessor`](accessor::ValueAccessor); the
//!    default one understands lists, maps and host [`Object`](accessor::Object)s.
//!
//! Example
//! ```
//! use hyexpr::prelude::*;
//!
//! let expr = key("name", starts_with("Tho"))
//!     .and_x(key("age", greater_than_equal(18)))
//!     .or_x(key("admin", same(true)));
//!
//! let person = Value::map([
//!     ("name", Value::from("Thomas")),
//!     ("age", Value::from(17)),
//!     ("admin", Value::from(true)),
//! ]);
//! assert!(expr.evaluate(&person));
//! assert_eq!(
//!     expr.to_string(),
//!     r#"(name.startsWith("Tho") && age>=18) || admin===true"#
//! );
//!
//! // Drop every `admin` check, then unwrap the leftover single-child disjunction.
//! let mut traverser = ExpressionTraverser::new()
//!     .with_visitor(FnVisitor::new().on_leave(|e| {
//!         let is_admin = matches!(
//!             e.as_selector(),
//!             Some(Selector::Key { key, .. }) if key == &Key::from("admin")
//!         );
//!         Ok((!is_admin).then_some(e))
//!     }))
//!     .with_visitor(Simplifier::new());
//! let pruned = traverser.traverse(&expr).unwrap().unwrap();
//! assert_eq!(pruned.to_string(), r#"name.startsWith("Tho") && age>=18"#);
//! ```

/// Host objects and sub-value resolution.
pub mod accessor;
/// Expressions API: node model, builders, combination and rendering.
pub mod expr;
/// Error types.
pub mod utils;
/// Dynamic values evaluated by expressions.
pub mod value;
/// Visitor-based rewriting and read-only walks.
pub mod walker;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Expression` with its node model
    //! - Free-function builders from `func::*`
    //! - Pretty-printing via `PrettyExpr`
    //! - Values, keys and host objects
    //! - Traverser and visitors
    pub use crate::expr::{
        ExprView, Expression,
        func::*,
        literal::Literal,
        pretty::PrettyExpr,
        selector::Selector,
        variant::ExprType,
    };

    pub use crate::accessor::{Object, Record, StandardAccessor, ValueAccessor};
    pub use crate::utils::error::{ExprError, ExprResult};
    pub use crate::value::{Key, Value};

    // Walker ergonomics
    pub use crate::walker::{
        ExpressionTraverser, ExpressionVisitor, WalkControl,
        visitors::{FnVisitor, LoggingVisitor, Simplifier},
        walk,
    };
}
