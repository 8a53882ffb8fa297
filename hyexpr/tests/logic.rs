use hyexpr::expr::func::*;
use hyexpr::expr::variant::ExprType;
use hyexpr::expr::{ExprView, Expression};
use hyexpr::value::Value;

fn operands() -> [Expression; 3] {
    [greater_than(10), ends_with(".css"), key("size", less_than(100))]
}

fn assert_children(expr: &Expression, ty: ExprType, expected: &[Expression]) {
    assert_eq!(expr.type_(), ty, "{expr}");
    let children = expr.children();
    assert_eq!(children.len(), expected.len(), "{expr}");
    for (child, expected) in children.iter().zip(expected) {
        assert!(child.equivalent_to(expected), "{child} vs {expected}");
        assert_ne!(child.type_(), ty, "nested {ty:?} in {expr}");
    }
}

#[test]
fn and_x_flattens_left_and_right_nesting() {
    let [a, b, c] = operands();

    let left = a.and_x(b.clone()).and_x(c.clone());
    let right = a.and_x(b.and_x(c.clone()));

    assert_children(&left, ExprType::And, &[a.clone(), b.clone(), c.clone()]);
    assert_children(&right, ExprType::And, &[a, b, c]);
    assert!(left.equivalent_to(&right));
}

#[test]
fn or_x_flattens_left_and_right_nesting() {
    let [a, b, c] = operands();

    let left = a.or_x(b.clone()).or_x(c.clone());
    let right = a.or_x(b.or_x(c.clone()));

    assert_children(&left, ExprType::Or, &[a.clone(), b.clone(), c.clone()]);
    assert_children(&right, ExprType::Or, &[a, b, c]);
}

#[test]
fn opposite_combinators_nest() {
    let [a, b, c] = operands();

    let expr = a.and_x(b.or_x(c));
    assert_eq!(expr.type_(), ExprType::And);
    assert_eq!(expr.conjuncts().map(<[_]>::len), Some(2));
    assert_eq!(expr.conjuncts().unwrap()[1].type_(), ExprType::Or);
}

#[test]
fn and_x_absorbs_constants() {
    for a in operands() {
        assert!(matches!(a.and_x(always_false()).view(), ExprView::False));
        assert!(a.and_x(always_true()).ptr_eq(&a));
        assert!(a.and_x(always_true()).equivalent_to(&a));
        assert!(always_true().and_x(a.clone()).ptr_eq(&a));
        assert!(matches!(always_false().and_x(a.clone()).view(), ExprView::False));
    }
}

#[test]
fn or_x_absorbs_constants() {
    for a in operands() {
        assert!(matches!(a.or_x(always_true()).view(), ExprView::True));
        assert!(a.or_x(always_false()).ptr_eq(&a));
        assert!(always_false().or_x(a.clone()).ptr_eq(&a));
        assert!(matches!(always_true().or_x(a.clone()).view(), ExprView::True));
    }
}

#[test]
fn combining_with_an_equivalent_operand_is_a_no_op() {
    for a in operands() {
        assert!(a.and_x(a.clone()).ptr_eq(&a));
        assert!(a.or_x(a.clone()).ptr_eq(&a));
        assert!(a.and_x(a.clone()).equivalent_to(&a));
    }

    // Equivalent, not identical.
    let expr = equals("10").and_x(equals(10));
    assert_eq!(expr.type_(), ExprType::Equals);

    let both = greater_than(10).and_x(less_than(20));
    assert!(both.and_x(less_than(20)).ptr_eq(&both));
    assert!(both.and_x(greater_than(10).and_x(less_than(20))).ptr_eq(&both));
}

#[test]
fn splicing_skips_only_duplicate_operands() {
    let expr = greater_than(10)
        .and_x(less_than(20))
        .and_x(less_than(20).and_x(not_same(15)));
    assert_children(
        &expr,
        ExprType::And,
        &[greater_than(10), less_than(20), not_same(15)],
    );
}

#[test]
fn and_not_and_or_not_negate_their_operand() {
    let expr = greater_than(10).and_not(same(15));
    assert_eq!(expr.to_string(), ">10 && not(===15)");
    assert!(expr.evaluate(&Value::from(11)));
    assert!(!expr.evaluate(&Value::from(15)));

    let expr = greater_than(10).or_not(same(5));
    assert_eq!(expr.to_string(), ">10 || not(===5)");
    assert!(expr.evaluate(&Value::from(4)));
    assert!(!expr.evaluate(&Value::from(5)));
}

#[test]
fn negate_keeps_double_negation() {
    let expr = greater_than(10).negate().negate();
    assert_eq!(expr.to_string(), "not(not(>10))");
    assert!(expr.evaluate(&Value::from(11)));
}

#[test]
fn operators_are_sugar_for_combinators() {
    let expr = greater_than(10) & less_than(20) | same(0);
    assert!(expr.equivalent_to(&greater_than(10).and_x(less_than(20)).or_x(same(0))));

    let expr = !greater_than(10);
    assert_eq!(expr.type_(), ExprType::Not);
    assert!(expr.evaluate(&Value::from(10)));
}

#[test]
fn bulk_constructors_flatten_and_absorb() {
    let expr = and([greater_than(1), and([less_than(5), not_same(3)]), always_true()]);
    assert_children(
        &expr,
        ExprType::And,
        &[greater_than(1), less_than(5), not_same(3)],
    );

    assert!(matches!(
        and([greater_than(1), always_false()]).view(),
        ExprView::False
    ));
    assert!(matches!(
        or([greater_than(1), always_true()]).view(),
        ExprView::True
    ));
    assert!(matches!(and(Vec::new()).view(), ExprView::True));
    assert!(matches!(or(Vec::new()).view(), ExprView::False));
}

#[test]
fn bulk_constructors_keep_single_children_and_duplicates() {
    let single = and([greater_than(1)]);
    assert_eq!(single.type_(), ExprType::And);
    assert_eq!(single.to_string(), ">1");

    let duplicated = or([greater_than(1), greater_than(1)]);
    assert_eq!(duplicated.disjuncts().map(<[_]>::len), Some(2));
}

#[test]
fn combinators_evaluate_their_children() {
    let expr = greater_than(10).and_x(less_than(20));
    assert!(expr.evaluate(&Value::from(15)));
    assert!(!expr.evaluate(&Value::from(25)));

    let expr = less_than(10).or_x(greater_than(20));
    assert!(expr.evaluate(&Value::from(5)));
    assert!(expr.evaluate(&Value::from(25)));
    assert!(!expr.evaluate(&Value::from(15)));

    assert!(always_true().evaluate(&Value::Null));
    assert!(!always_false().evaluate(&Value::Null));
    assert!(!not(greater_than(10)).evaluate(&Value::from(11)));
}

#[test]
fn rendering_parenthesizes_opposite_combinators() {
    let expr = greater_than(10)
        .and_x(ends_with(".css").or_x(ends_with(".scss")))
        .and_x(not(is_empty()));
    assert_eq!(
        expr.to_string(),
        r#">10 && (endsWith(".css") || endsWith(".scss")) && not(empty())"#
    );

    let expr = greater_than(10)
        .and_x(less_than(20))
        .or_x(same(0).and_x(not_null()));
    assert_eq!(expr.to_string(), "(>10 && <20) || (===0 && !==null)");

    assert_eq!(always_true().to_string(), "true");
    assert_eq!(always_false().to_string(), "false");
    assert_eq!(format!("{:?}", greater_than(10)), "Expression(>10)");
}

#[test]
fn clones_share_nodes() {
    let expr = key("size", greater_than(10));
    let copy = expr.clone();
    assert!(copy.ptr_eq(&expr));
    assert!(!key("size", greater_than(10)).ptr_eq(&expr));
    assert_eq!(expr.node_count(), 2);
}
