use hyexpr::prelude::*;

fn main() -> ExprResult<()> {
    let stylesheet = key("name", ends_with(".css")).and_x(key("size", less_than(1 << 16)));
    let expr = all(stylesheet.clone())
        .and_x(count(greater_than(0)))
        .or_x(exactly(1, not(stylesheet))?);
    expr.pretty_print().unwrap();

    let files = Value::list([
        Value::map([("name", Value::from("main.css")), ("size", Value::from(1200))]),
        Value::map([("name", Value::from("print.css")), ("size", Value::from(300))]),
    ]);
    println!("matches: {}", expr.evaluate(&files));

    // Rewrite: drop every size constraint, then clean up what is left.
    let mut traverser = ExpressionTraverser::new()
        .with_visitor(FnVisitor::new().on_enter(|e| {
            let is_size = matches!(
                e.as_selector(),
                Some(Selector::Key { key, .. }) if key == &Key::from("size")
            );
            Ok((!is_size).then_some(e))
        }))
        .with_visitor(Simplifier::new());

    match traverser.traverse(&expr)? {
        Some(rewritten) => rewritten.pretty_print().unwrap(),
        None => println!("<removed>"),
    }
    Ok(())
}
