use hyexpr::expr::func::*;
use hyexpr::expr::variant::ExprType;
use hyexpr::expr::{ExprView, Expression};
use hyexpr::walker::ExpressionTraverser;
use hyexpr::walker::visitors::{FnVisitor, LoggingVisitor, Simplifier};
use log::Level;

fn simplify(expr: &Expression) -> (Option<Expression>, usize) {
    let mut simplifier = Simplifier::new();
    let result = ExpressionTraverser::new()
        .with_visitor(&mut simplifier)
        .traverse(expr)
        .unwrap();
    (result, simplifier.rewrites())
}

#[test]
fn fn_visitor_without_hooks_is_the_identity() {
    let expr = key("a", greater_than(1)).or_x(not(same("x")));
    let result = ExpressionTraverser::new()
        .with_visitor(FnVisitor::new())
        .traverse(&expr)
        .unwrap()
        .unwrap();
    assert!(result.ptr_eq(&expr));
}

#[test]
fn fn_visitor_runs_both_hooks() {
    let expr = not(greater_than(1));
    let mut entered = Vec::new();
    let mut left = Vec::new();

    ExpressionTraverser::new()
        .with_visitor(
            FnVisitor::new()
                .on_enter(|e: Expression| {
                    entered.push(e.type_());
                    Ok(Some(e))
                })
                .on_leave(|e: Expression| {
                    left.push(e.type_());
                    Ok(Some(e))
                }),
        )
        .traverse(&expr)
        .unwrap();

    assert_eq!(entered, [ExprType::Not, ExprType::GreaterThan]);
    assert_eq!(left, [ExprType::GreaterThan, ExprType::Not]);
}

#[test]
fn logging_visitor_passes_nodes_through() {
    let expr = all(greater_than(1).and_x(ends_with(".css")));
    let visitor = LoggingVisitor::new(Level::Trace);
    assert_eq!(visitor.level(), Level::Trace);
    assert_eq!(LoggingVisitor::default().level(), Level::Debug);

    let result = ExpressionTraverser::new()
        .with_visitor(visitor)
        .traverse(&expr)
        .unwrap()
        .unwrap();
    assert!(result.ptr_eq(&expr));
}

#[test]
fn simplifier_collapses_double_negation() {
    let inner = greater_than(1);
    let (result, rewrites) = simplify(&not(not(inner.clone())));
    assert!(result.unwrap().ptr_eq(&inner));
    assert_eq!(rewrites, 1);

    let (result, _) = simplify(&not(not(not(inner.clone()))));
    assert_eq!(result.unwrap().to_string(), "not(>1)");
}

#[test]
fn simplifier_unwraps_single_child_junctions() {
    let inner = key("a", greater_than(1));
    let (result, rewrites) = simplify(&and([inner.clone()]));
    assert!(result.unwrap().ptr_eq(&inner));
    assert_eq!(rewrites, 1);

    let (result, _) = simplify(&or([same(1)]));
    assert!(matches!(result.unwrap().view(), ExprView::Literal(_)));
}

#[test]
fn simplifier_drops_equivalent_siblings() {
    let expr = and([greater_than(1), less_than(5), greater_than(1)]);
    let (result, rewrites) = simplify(&expr);
    let result = result.unwrap();
    assert_eq!(result.to_string(), ">1 && <5");
    assert_eq!(rewrites, 1);

    let (result, _) = simplify(&or([same("x"), same("x")]));
    assert_eq!(result.unwrap().to_string(), r#"==="x""#);
}

#[test]
fn simplifier_keeps_identity_of_simple_trees() {
    let expr = key("a", greater_than(1)).or_x(all(not(same("x"))));
    let (result, rewrites) = simplify(&expr);
    assert!(result.unwrap().ptr_eq(&expr));
    assert_eq!(rewrites, 0);
}

#[test]
fn simplifier_works_bottom_up() {
    // The inner double negation collapses first, which makes the siblings duplicates.
    let expr = and([greater_than(1), not(not(greater_than(1)))]);
    let (result, rewrites) = simplify(&expr);
    assert_eq!(result.unwrap().to_string(), ">1");
    assert_eq!(rewrites, 2);
}

#[test]
fn visitors_compose_in_order() {
    // Remove `===1`, then let the simplifier clean up what is left.
    let expr = or([same(1), key("a", same(2))]);
    let mut simplifier = Simplifier::new();
    let result = ExpressionTraverser::new()
        .with_visitor(FnVisitor::new().on_leave(|e: Expression| {
            Ok((e.to_string() != "===1").then_some(e))
        }))
        .with_visitor(&mut simplifier)
        .with_visitor(LoggingVisitor::default())
        .traverse(&expr)
        .unwrap()
        .unwrap();
    assert_eq!(result.to_string(), "a===2");
    assert_eq!(simplifier.rewrites(), 1);
}
