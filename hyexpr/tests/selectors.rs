use hyexpr::accessor::Record;
use hyexpr::expr::func::*;
use hyexpr::expr::selector::Selector;
use hyexpr::utils::error::ExprError;
use hyexpr::value::Value;

fn person() -> Value {
    Record::new("Person")
        .with_property("name", "Thomas")
        .with_property("age", 35)
        .with_method("getAge", |this, _| this.get("age").cloned())
        .with_method("getAgeIn", |this, args| match (this.get("age"), args) {
            (Some(Value::Int(age)), [Value::Int(years)]) => Some(Value::Int(age + years)),
            _ => None,
        })
        .into_value()
}

#[test]
fn key_selects_map_entries() {
    let expr = key("key", greater_than(10));
    assert!(expr.evaluate(&Value::map([("key", 11)])));
    assert!(!expr.evaluate(&Value::map([("key", 9)])));
    assert!(!expr.evaluate(&Value::map([("other", 11)])));
    assert!(!expr.evaluate(&Value::from("key")));
    assert!(!expr.evaluate(&person()));
}

#[test]
fn key_selects_list_entries() {
    let expr = key(1, same("b"));
    assert!(expr.evaluate(&Value::list(["a", "b"])));
    assert!(key("1", same("b")).evaluate(&Value::list(["a", "b"])));
    assert!(!key(2, same("b")).evaluate(&Value::list(["a", "b"])));
}

#[test]
fn property_selects_object_properties() {
    let expr = property("age", greater_than(30));
    assert!(expr.evaluate(&person()));
    assert!(!property("age", greater_than(40)).evaluate(&person()));
    assert!(!property("missing", is_empty()).evaluate(&person()));
    assert!(!expr.evaluate(&Value::map([("age", 35)])));
}

#[test]
fn method_calls_object_methods() {
    assert!(method("getAge", Vec::<Value>::new(), same(35)).evaluate(&person()));
    assert!(method("getAgeIn", [5], same(40)).evaluate(&person()));
    assert!(!method("getAgeIn", ["5"], same(40)).evaluate(&person()));
    assert!(!method("missing", Vec::<Value>::new(), null()).evaluate(&person()));
    assert!(!method("getAge", Vec::<Value>::new(), same(35)).evaluate(&Value::from(35)));
}

#[test]
fn count_evaluates_the_length() {
    let expr = count(greater_than(2));
    assert!(expr.evaluate(&Value::list([1, 2, 3])));
    assert!(!expr.evaluate(&Value::list([1, 2])));
    assert!(expr.evaluate(&Value::map([("a", 1), ("b", 2), ("c", 3)])));
    assert!(!expr.evaluate(&Value::from("abc")));
    assert_eq!(expr.to_string(), "count(>2)");
}

#[test]
fn all_requires_every_element() {
    let expr = all(greater_than(10));
    assert!(expr.evaluate(&Value::list([11, 12, 13])));
    assert!(!expr.evaluate(&Value::list([10, 11, 12])));
    assert!(expr.evaluate(&Value::list(Vec::<Value>::new())));
    assert!(!expr.evaluate(&Value::from(11)));
}

#[test]
fn quantifiers_count_matching_elements() {
    let values = Value::list([9, 10, 11, 12]);

    assert!(at_least(2, greater_than(10)).unwrap().evaluate(&values));
    assert!(!at_least(3, greater_than(10)).unwrap().evaluate(&values));
    assert!(at_least(0, greater_than(100)).unwrap().evaluate(&values));

    assert!(at_most(2, greater_than(10)).unwrap().evaluate(&values));
    assert!(!at_most(1, greater_than(10)).unwrap().evaluate(&values));
    assert!(at_most(0, greater_than(100)).unwrap().evaluate(&values));

    assert!(exactly(2, greater_than(10)).unwrap().evaluate(&values));
    assert!(!exactly(1, greater_than(10)).unwrap().evaluate(&values));
    assert!(!exactly(3, greater_than(10)).unwrap().evaluate(&values));
}

#[test]
fn quantifiers_reject_non_traversable_subjects() {
    let scalar = Value::from(11);
    assert!(!at_least(0, greater_than(10)).unwrap().evaluate(&scalar));
    assert!(!at_most(5, greater_than(10)).unwrap().evaluate(&scalar));
    assert!(!exactly(0, greater_than(10)).unwrap().evaluate(&scalar));
}

#[test]
fn negative_counts_are_rejected_at_construction() {
    for result in [
        at_least(-1, greater_than(10)),
        at_most(-1, greater_than(10)),
        exactly(-3, greater_than(10)),
    ] {
        assert!(matches!(
            result,
            Err(ExprError::InvalidArgument { argument: "count", .. })
        ));
    }
}

#[test]
fn selectors_render_their_child() {
    assert_eq!(property("prop", greater_than(10)).to_string(), "prop>10");
    assert_eq!(
        property("prop", ends_with(".css")).to_string(),
        r#"prop.endsWith(".css")"#
    );
    assert_eq!(
        property("prop", greater_than(10).and_x(ends_with(".css"))).to_string(),
        r#"prop{>10 && endsWith(".css")}"#
    );
    assert_eq!(key("key", not(same(1))).to_string(), "key.not(===1)");
    assert_eq!(key(0, is_empty()).to_string(), "0.empty()");
    assert_eq!(
        key("outer", key("inner", greater_than(1))).to_string(),
        "outer{inner>1}"
    );
    assert_eq!(
        method("getAgeIn", [5], same(40)).to_string(),
        "getAgeIn(5)===40"
    );
    assert_eq!(
        method("getName", Vec::<Value>::new(), starts_with("T")).to_string(),
        r#"getName().startsWith("T")"#
    );
}

#[test]
fn quantifiers_render_as_calls() {
    assert_eq!(all(greater_than(10)).to_string(), "all(>10)");
    assert_eq!(all(ends_with(".css")).to_string(), r#"all(endsWith(".css"))"#);
    assert_eq!(
        all(greater_than(10).and_x(ends_with(".css"))).to_string(),
        r#"all(>10 && endsWith(".css"))"#
    );
    assert_eq!(
        at_least(2, greater_than(10)).unwrap().to_string(),
        "atLeast(2, >10)"
    );
    assert_eq!(at_most(1, is_empty()).unwrap().to_string(), "atMost(1, empty())");
    assert_eq!(exactly(3, null()).unwrap().to_string(), "exactly(3, ===null)");
}

#[test]
fn with_inner_keeps_the_addressing_datum() {
    let expr = method("getAgeIn", [5], same(40));
    let Some(selector) = expr.as_selector() else {
        panic!("expected a selector");
    };
    let rebuilt: hyexpr::expr::Expression = selector.with_inner(same(41)).into();
    assert_eq!(rebuilt.to_string(), "getAgeIn(5)===41");
    assert!(matches!(
        rebuilt.as_selector(),
        Some(Selector::Method { name, args, .. }) if name == "getAgeIn" && args.len() == 1
    ));
}
