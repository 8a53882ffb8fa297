use hyexpr::prelude::*;

#[test]
fn lib_rs_doc_example_compiles_and_behaves() {
    let expr = key("name", starts_with("Tho"))
        .and_x(key("age", greater_than_equal(18)))
        .or_x(key("admin", same(true)));
    assert_eq!(expr.type_(), ExprType::Or);

    let thomas = Value::map([
        ("name", Value::from("Thomas")),
        ("age", Value::from(17)),
        ("admin", Value::from(true)),
    ]);
    let anna = Value::map([("name", Value::from("Anna")), ("age", Value::from(30))]);
    assert!(expr.evaluate(&thomas));
    assert!(!expr.evaluate(&anna));

    let mut traverser = ExpressionTraverser::new()
        .with_visitor(FnVisitor::new().on_leave(|e: Expression| {
            let is_admin = matches!(
                e.as_selector(),
                Some(Selector::Key { key, .. }) if key == &Key::from("admin")
            );
            Ok((!is_admin).then_some(e))
        }))
        .with_visitor(Simplifier::new());
    let pruned = traverser.traverse(&expr).unwrap().unwrap();

    assert_eq!(pruned.type_(), ExprType::And);
    assert_eq!(pruned.to_string(), r#"name.startsWith("Tho") && age>=18"#);
    assert!(!pruned.evaluate(&thomas));
    assert!(pruned.equivalent_to(&expr.disjuncts().unwrap()[0]));
}

#[test]
fn module_doc_examples_behave() {
    let counted = key("size", greater_than(10)).and_x(not(ends_with(".css")));
    let mut count = 0usize;
    walk(&counted, |_, _| {
        count += 1;
        WalkControl::Continue
    });
    assert_eq!(count, 5);

    let expr = all(greater_than(10)).or_x(key("min", greater_than(0)));
    let mut traverser = ExpressionTraverser::new().with_visitor(FnVisitor::new().on_leave(
        |e: Expression| {
            let relaxed = match e.as_literal() {
                Some(Literal::GreaterThan(v)) => Some(greater_than_equal(v.clone())),
                _ => None,
            };
            Ok(Some(relaxed.unwrap_or(e)))
        },
    ));
    let rewritten = traverser.traverse(&expr).unwrap().unwrap();
    assert_eq!(rewritten.to_string(), "all(>=10) || min>=0");
}
