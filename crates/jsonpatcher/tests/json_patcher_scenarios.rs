use jsonpatcher::json_patch::{ErrorKind, JsonPatcher, PatchError};
use serde_json::{json, Value};

const SAMPLE: &str = r#"{"foo": {"one": 1, "two": 2}, "bar": [1, 2, 3], "enabled": true}"#;

fn sample() -> Value {
    serde_json::from_str(SAMPLE).unwrap()
}

fn run(text: &str, ops: &[Value]) -> (Value, Option<bool>, Option<bool>) {
    let mut patcher = JsonPatcher::new(text, ops).expect("construction must succeed");
    let outcome = patcher.patch().expect("patch must succeed");
    (patcher.into_document().into_value(), outcome.modified, outcome.tested)
}

fn construction_error(text: &str, op: Value) -> PatchError {
    JsonPatcher::new(text, &[op]).expect_err("construction must fail")
}

#[test]
fn add_new_member() {
    let (doc, modified, tested) =
        run(SAMPLE, &[json!({"op": "add", "path": "/foo/three", "value": 3})]);
    assert_eq!((modified, tested), (Some(true), None));
    assert_eq!(doc["foo"]["three"], json!(3));
}

#[test]
fn add_appends_to_array() {
    let (doc, modified, _) = run(SAMPLE, &[json!({"op": "add", "path": "/bar/-", "value": 4})]);
    assert_eq!(modified, Some(true));
    assert_eq!(doc["bar"], json!([1, 2, 3, 4]));
}

#[test]
fn remove_member() {
    let (doc, modified, _) = run(SAMPLE, &[json!({"op": "remove", "path": "/foo/one"})]);
    assert_eq!(modified, Some(true));
    assert!(doc["foo"].get("one").is_none());
    assert_eq!(doc["foo"]["two"], json!(2));
}

#[test]
fn remove_absent_member_fails() {
    let mut patcher =
        JsonPatcher::new(SAMPLE, &[json!({"op": "remove", "path": "/foo/zero"})]).unwrap();
    let err = patcher.patch().unwrap_err();
    assert_eq!(err, PatchError::NotFound("/foo/zero".into()));
    assert_eq!(err.kind(), ErrorKind::Runtime);
}

#[test]
fn replace_value() {
    let (doc, modified, _) =
        run(SAMPLE, &[json!({"op": "replace", "path": "/foo/one", "value": 99})]);
    assert_eq!(modified, Some(true));
    assert_eq!(doc["foo"]["one"], json!(99));
}

#[test]
fn test_operation_never_mutates() {
    let (doc, modified, tested) =
        run(SAMPLE, &[json!({"op": "test", "path": "/foo/one", "value": 1})]);
    assert_eq!((modified, tested), (None, Some(true)));
    assert_eq!(doc, sample());

    let (doc, modified, tested) =
        run(SAMPLE, &[json!({"op": "test", "path": "/foo/one", "value": 999})]);
    assert_eq!((modified, tested), (None, Some(false)));
    assert_eq!(doc, sample());
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = construction_error(
        "not valid json",
        json!({"op": "add", "path": "/foo", "value": "bar"}),
    );
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("invalid JSON"));
}

#[test]
fn descriptor_validation_messages() {
    let cases = [
        (json!({"path": "/foo"}), "missing an 'op' member"),
        (json!({"op": "invalid_op", "path": "/foo"}), "not a valid patch operation"),
        (json!({"op": "add", "value": "test"}), "missing a 'path' member"),
        (json!({"op": "add", "path": "/foo/new"}), "does not have a 'value'"),
    ];
    for (op, needle) in cases {
        let err = construction_error(SAMPLE, op.clone());
        assert_eq!(err.kind(), ErrorKind::Validation, "descriptor {op}");
        assert!(err.to_string().contains(needle), "{err} should mention {needle:?}");
    }
}

#[test]
fn validation_covers_every_descriptor_up_front() {
    let err = JsonPatcher::new(
        SAMPLE,
        &[
            json!({"op": "add", "path": "/foo/three", "value": 3}),
            json!({"op": "add", "path": "/foo/four"}),
        ],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("[index = 1]"));
}

#[test]
fn idempotent_add() {
    let mut patcher =
        JsonPatcher::new(SAMPLE, &[json!({"op": "add", "path": "/foo/one", "value": 1})])
            .unwrap();
    let before = patcher.document().to_json_string();
    let outcome = patcher.patch().unwrap();
    assert_eq!(outcome.modified, Some(false));
    assert_eq!(patcher.document().to_json_string(), before);
}

#[test]
fn multiple_operations() {
    let (doc, modified, tested) = run(
        SAMPLE,
        &[
            json!({"op": "add", "path": "/foo/three", "value": 3}),
            json!({"op": "replace", "path": "/enabled", "value": false}),
            json!({"op": "remove", "path": "/bar/0"}),
        ],
    );
    assert_eq!((modified, tested), (Some(true), None));
    assert_eq!(
        doc,
        json!({"foo": {"one": 1, "two": 2, "three": 3}, "bar": [2, 3], "enabled": false})
    );
}

#[test]
fn nested_path() {
    let text =
        r#"{"level1": {"level2": {"level3": {"value": "deep", "sibling": [1]}}, "other": true}}"#;
    let (doc, modified, _) = run(
        text,
        &[json!({"op": "replace", "path": "/level1/level2/level3/value", "value": "modified"})],
    );
    assert_eq!(modified, Some(true));
    assert_eq!(
        doc,
        json!({"level1": {"level2": {"level3": {"value": "modified", "sibling": [1]}}, "other": true}})
    );
}

#[test]
fn empty_object() {
    let (doc, modified, _) = run("{}", &[json!({"op": "add", "path": "/new", "value": "value"})]);
    assert_eq!(modified, Some(true));
    assert_eq!(doc, json!({"new": "value"}));
}

#[test]
fn empty_array() {
    let (doc, modified, _) = run("[]", &[json!({"op": "add", "path": "/-", "value": "first"})]);
    assert_eq!(modified, Some(true));
    assert_eq!(doc, json!(["first"]));
}

#[test]
fn escaped_tokens_address_literal_keys() {
    let (doc, modified, _) = run(
        r#"{"a/b": {"c~d": 1}}"#,
        &[json!({"op": "replace", "path": "/a~1b/c~0d", "value": 2})],
    );
    assert_eq!(modified, Some(true));
    assert_eq!(doc, json!({"a/b": {"c~d": 2}}));
}

#[test]
fn insertion_index_past_the_end_fails() {
    let mut patcher =
        JsonPatcher::new(SAMPLE, &[json!({"op": "add", "path": "/bar/5", "value": 0})]).unwrap();
    assert!(matches!(patcher.patch(), Err(PatchError::InvalidIndex { len: 3, .. })));
    assert_eq!(patcher.document().value(), &sample());
}

#[test]
fn append_marker_is_only_valid_as_the_last_token() {
    let mut patcher = JsonPatcher::new(
        r#"{"bar": [{"x": 1}]}"#,
        &[json!({"op": "add", "path": "/bar/-/y", "value": 0})],
    )
    .unwrap();
    assert!(matches!(patcher.patch(), Err(PatchError::Path(_))));
}

#[test]
fn missing_intermediate_is_a_path_error() {
    let mut patcher =
        JsonPatcher::new(SAMPLE, &[json!({"op": "add", "path": "/nope/deeper", "value": 0})])
            .unwrap();
    let err = patcher.patch().unwrap_err();
    assert!(matches!(err, PatchError::Path(_)));
    assert!(err.to_string().contains("/nope"));
}

#[test]
fn deeply_nested_document_is_valid_input() {
    let depth = 200;
    let text = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
    let pointer = "/0".repeat(depth);

    let (doc, modified, tested) = run(
        &text,
        &[
            json!({"op": "test", "path": "", "value": 1}),
            json!({"op": "test", "path": pointer, "value": 1}),
            json!({"op": "replace", "path": pointer, "value": 2}),
        ],
    );
    assert_eq!((modified, tested), (Some(true), Some(false)));
    let mut leaf = &doc;
    for _ in 0..depth {
        leaf = &leaf[0];
    }
    assert_eq!(leaf, &json!(2));
}

#[test]
fn long_pointers_are_valid_input() {
    let key = "k".repeat(400);
    let text = json!({ key.clone(): { key.clone(): { key.clone(): 1 } } }).to_string();
    let pointer = format!("/{key}/{key}/{key}");
    let (doc, modified, _) =
        run(&text, &[json!({"op": "replace", "path": pointer, "value": 2})]);
    assert_eq!(modified, Some(true));
    assert_eq!(doc[key.as_str()][key.as_str()][key.as_str()], json!(2));
}

#[test]
fn large_integer_replaced_by_nearby_float_is_a_change() {
    let (doc, modified, _) = run(
        r#"{"n": 9007199254740993}"#,
        &[json!({"op": "add", "path": "/n", "value": 9007199254740992.0})],
    );
    assert_eq!(modified, Some(true));
    assert_eq!(doc["n"], json!(9007199254740992.0));
}
