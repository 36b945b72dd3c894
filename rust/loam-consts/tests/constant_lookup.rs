//! End-to-end lookup behavior: environment table, nested frames, and the
//! interplay with data loaded through the JSON bridge.

use std::rc::Rc;

use loam_consts::{ConstantScopes, StaticEnvironment, HEX_DIRECTIONS};
use loam_value::{Decimal, Value};

fn scopes_with(env: StaticEnvironment) -> ConstantScopes {
    ConstantScopes::new(Rc::new(env))
}

#[test]
fn environment_names_resolve_to_collaborator_values() {
    let scopes = scopes_with(StaticEnvironment {
        screen_width: 1920,
        screen_height: 1080,
        locale: "de_DE".to_string(),
        username: "frogger".to_string(),
        server_host: "play.example.net".to_string(),
        server_port: 9000,
        build_options: vec!["editor".to_string(), "sound".to_string()],
        ..StaticEnvironment::default()
    });

    assert_eq!(scopes.lookup("SCREEN_WIDTH"), Value::from(1920));
    assert_eq!(scopes.lookup("SCREEN_HEIGHT"), Value::from(1080));
    assert_eq!(scopes.lookup("LOCALE"), Value::from("de_DE"));
    assert_eq!(scopes.lookup("USERNAME"), Value::from("frogger"));
    assert_eq!(scopes.lookup("SERVER_ADDRESS"), Value::from("play.example.net"));
    assert_eq!(scopes.lookup("SERVER_PORT"), Value::from(9000));
    assert_eq!(
        scopes.lookup("BUILD_OPTIONS"),
        Value::string_list(["editor", "sound"])
    );
    assert_eq!(scopes.lookup("EPSILON"), Value::from(Decimal::EPSILON));
    assert_eq!(
        scopes.lookup("HEX_DIRECTIONS"),
        Value::string_list(HEX_DIRECTIONS)
    );
    assert_eq!(scopes.lookup("UP_KEY"), Value::from("Up"));
}

#[test]
fn unknown_names_resolve_to_null() {
    let scopes = scopes_with(StaticEnvironment::default());
    assert_eq!(scopes.lookup("NO_SUCH_CONSTANT"), Value::Null);
}

#[test]
fn loaded_definitions_layer_over_each_other() {
    let scopes = scopes_with(StaticEnvironment::default());
    let module = Value::from_json_str(
        r#"{"TITLE": "Swamp Quest", "MAX_LIVES": 3, "author": "ignored"}"#,
    )
    .expect("valid JSON");
    let object = Value::from_json_str(r#"{"MAX_LIVES": 5}"#).expect("valid JSON");

    let _module_guard = scopes.enter_scope(&module);
    assert_eq!(scopes.lookup("TITLE"), Value::from("Swamp Quest"));
    assert_eq!(scopes.lookup("MAX_LIVES"), Value::from(3));
    assert_eq!(scopes.lookup("author"), Value::Null);

    {
        let object_guard = scopes.enter_scope(&object);
        assert!(!object_guard.same_as_base());
        assert_eq!(scopes.lookup("MAX_LIVES"), Value::from(5));
        // Names the inner frame does not define fall through to the outer.
        assert_eq!(scopes.lookup("TITLE"), Value::from("Swamp Quest"));
    }

    assert_eq!(scopes.lookup("MAX_LIVES"), Value::from(3));
}

#[test]
fn reloading_the_same_node_is_flagged_redundant() {
    let scopes = scopes_with(StaticEnvironment::default());
    let node = Value::from_json_str(r#"{"GRAVITY": 9}"#).expect("valid JSON");
    let _outer = scopes.enter_scope(&node);
    let inner = scopes.enter_scope(&node);
    assert!(inner.same_as_base());
}
