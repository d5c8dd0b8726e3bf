use glint_runtime::prelude::*;

fn resolve(scope: &dyn Scope, name: &str) -> Value {
    scope
        .get(name)
        .expect("name should be accepted")
        .map(|supplier| supplier.get())
        .unwrap_or_default()
}

#[test]
fn set_then_get_returns_the_value() {
    let root = RootScope::new();
    let child = root.scope();

    let values = vec![
        Value::from(true),
        Value::from(1.5),
        Value::from("text"),
        Value::from(ValueMap::new().with("inner", 1)),
    ];

    for value in values {
        root.set("root_value", value.clone()).unwrap();
        child.set("child_value", value.clone()).unwrap();

        assert_eq!(resolve(&root, "root_value"), value);
        assert_eq!(resolve(&child, "child_value"), value);
    }
}

#[test]
fn removal_in_child_never_mutates_root() {
    let root = RootScope::new();
    root.set("x", 1).unwrap();

    let child = root.scope();
    child.remove("x").unwrap();

    assert!(child.get("x").unwrap().is_none());
    assert_eq!(resolve(&root, "x"), 1.0);
}

#[test]
fn override_clears_removal() {
    let root = RootScope::new();
    root.set("x", 1).unwrap();

    let child = root.scope();
    child.remove("x").unwrap();
    child.set("x", 2).unwrap();

    assert_eq!(resolve(&child, "x"), 2.0);
}

#[test]
fn lookups_pass_through_multiple_children() {
    let root = RootScope::new();
    root.set("y", 1).unwrap();

    let c1 = root.scope();
    let c2 = c1.scope();
    assert_eq!(resolve(&c2, "y"), 1.0);

    c1.set("y", 2).unwrap();
    assert_eq!(resolve(&c2, "y"), 2.0);

    root.set("y", 3).unwrap();
    assert_eq!(resolve(&c2, "y"), 2.0);

    c1.remove("y").unwrap();
    assert!(resolve(&c2, "y").is_nil());
    assert_eq!(resolve(&root, "y"), 3.0);
}

#[test]
fn clear_is_idempotent() {
    let root = RootScope::new();
    root.set("a", 1).unwrap().set("b", 2).unwrap();

    let child = root.scope();
    child.set("a", 10).unwrap();
    child.remove("b").unwrap();

    child.clear();
    let keys_once = child.keys();
    child.clear();

    assert_eq!(child.keys(), keys_once);
    assert_eq!(resolve(&child, "a"), 1.0);
    assert_eq!(resolve(&child, "b"), 2.0);
    assert!(child.removed_keys().is_empty());
    assert!(child.scoped_keys().is_empty());
}

#[test]
fn dotted_names_are_root_only() {
    let root = RootScope::new();
    let child = root.scope();

    assert_eq!(child.set("a.b", 1).unwrap_err(), ScopeError::UnsupportedPath {
        name: "a.b".into(),
    });

    root.set("a.b", 1).unwrap();
    assert_eq!(resolve(&root, "a.b"), 1.0);
    assert_eq!(resolve(&child, "a").get("b"), 1.0);
}

#[test]
fn unsupported_path_propagates_through_runtime() {
    let runtime = Runtime::new();
    let scope = runtime.scope();

    let error = scope.remove("player.name").unwrap_err();
    let exception = Exception::from(error.clone());

    assert_eq!(exception.as_scope_error(), Some(&error));
    assert!(exception.to_string().contains("player.name"));
}

#[test]
fn discarding_a_child_restores_visibility() {
    let root = RootScope::new();
    root.set("flag", true).unwrap();

    {
        let child = root.scope();
        child.set("flag", false).unwrap();
        assert_eq!(resolve(&child, "flag"), false);
    }

    assert_eq!(resolve(&root, "flag"), true);

    let child = root.scope();
    child.remove("flag").unwrap();
    child.close();

    assert_eq!(resolve(&root, "flag"), true);
    assert_eq!(resolve(&root.scope(), "flag"), true);
}
