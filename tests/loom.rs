//! Loom Engine Tests
//!
//! Exercises the render pipeline through a small ad-hoc loom.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use loomicode::{create_loom, Loom, LoomConfig, LoomError, LoomOptions, Schema};
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Item {
    name: String,
    value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Options {
    version: String,
    prefix: String,
}

impl LoomOptions for Options {
    fn version(&self) -> &str {
        &self.version
    }
}

fn input_schema() -> Schema {
    Schema::new(
        "test.input",
        json!({
            "type": "object",
            "required": ["name", "value"],
            "properties": {
                "name": { "type": "string" },
                "value": { "type": "number" }
            }
        }),
    )
    .unwrap()
}

fn options_schema() -> Schema {
    Schema::new(
        "test.options",
        json!({
            "type": "object",
            "required": ["version", "prefix"],
            "properties": {
                "version": { "type": "string" },
                "prefix": { "type": "string" }
            }
        }),
    )
    .unwrap()
}

fn config() -> LoomConfig<Item, Options> {
    LoomConfig::<Item, Options>::new(input_schema(), options_schema(), |ctx, item: &Item| {
        format!("{} {}: {}", ctx.options().prefix, item.name, item.value)
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn request(version: &str, input: Value) -> Value {
    json!({ "version": version, "prefix": "Test", "input": input })
}

fn two_items() -> Value {
    json!([
        { "name": "item1", "value": 42 },
        { "name": "item2", "value": 123 }
    ])
}

#[test]
fn test_renders_one_line_per_item() {
    let loom = create_loom(config());
    let output = loom.render(&request("1.0.0", two_items())).unwrap();
    assert_eq!(output, "Test item1: 42\nTest item2: 123");
}

#[test]
fn test_predicate_skips_items() {
    let loom = create_loom(config().predicate(|_, item| item.value > 50));
    let output = loom
        .render(&request(
            "1.0.0",
            json!([
                { "name": "item1", "value": 42 },
                { "name": "item2", "value": 123 },
                { "name": "item3", "value": 30 }
            ]),
        ))
        .unwrap();
    assert_eq!(output, "Test item2: 123");
}

#[test]
fn test_invalid_item_names_field_and_index() {
    let loom = create_loom(config());
    let err = loom
        .render(&request(
            "1.0.0",
            json!([
                { "name": "item1", "value": 1 },
                { "name": "item2", "value": "" }
            ]),
        ))
        .unwrap_err();

    match &err {
        LoomError::InputValidation { index, violations } => {
            assert_eq!(*index, 1);
            assert!(violations.mentions("/value"), "{err}");
            assert!(violations.mentions("number"), "{err}");
        }
        other => panic!("Expected InputValidation, got {:?}", other),
    }
}

#[test]
fn test_missing_item_field_is_named() {
    let loom = create_loom(config());
    let err = loom
        .render(&request("1.0.0", json!([{ "value": 1 }])))
        .unwrap_err();
    assert!(matches!(err, LoomError::InputValidation { index: 0, .. }));
    assert!(err.to_string().contains("\"name\""), "{err}");
}

#[test]
fn test_missing_option_is_named() {
    let loom = create_loom(config());
    let err = loom
        .render(&json!({ "prefix": "Test", "input": [{ "name": "item1", "value": 42 }] }))
        .unwrap_err();
    assert!(matches!(err, LoomError::OptionsValidation { .. }));
    assert!(err.to_string().contains("version"), "{err}");
}

#[test]
fn test_template_never_runs_when_options_fail() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let loom = create_loom(LoomConfig::<Item, Options>::new(
        input_schema(),
        options_schema(),
        move |_, item: &Item| {
            counter.fetch_add(1, Ordering::SeqCst);
            item.name.clone()
        },
    ));

    let result = loom.render(&json!({ "version": 5, "prefix": "Test", "input": two_items() }));
    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_partial_output_on_late_invalid_item() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let loom = create_loom(LoomConfig::<Item, Options>::new(
        input_schema(),
        options_schema(),
        move |_, item: &Item| {
            counter.fetch_add(1, Ordering::SeqCst);
            item.name.clone()
        },
    ));

    let result = loom.render(&request(
        "1.0.0",
        json!([{ "name": "ok", "value": 1 }, { "name": 2, "value": 1 }]),
    ));
    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_version_helpers() {
    init_tracing();
    let loom = create_loom(LoomConfig::<Item, Options>::new(
        input_schema(),
        options_schema(),
        |ctx, item: &Item| {
            let checks = [
                ctx.is_version_less_than("1.1.0"),
                ctx.is_version_greater_than("0.9.0"),
                ctx.is_version_equal("1.0.0"),
                ctx.is_version_greater_than_or_equal("1.0.0"),
                ctx.is_version_less_than_or_equal("1.0.0"),
            ];
            let checks: Vec<String> = checks.iter().map(bool::to_string).collect();
            format!("{}: {}", item.name, checks.join(", "))
        },
    ));

    let output = loom
        .render(&request("1.0.0", json!([{ "name": "test", "value": 42 }])))
        .unwrap();
    assert_eq!(output, "test: true, true, true, true, true");
}

#[test]
#[should_panic(expected = "\"3,x\"")]
fn test_mistyped_comparand_fails_loudly() {
    let loom = create_loom(
        config()
            .eof(true)
            .predicate(|ctx, _| ctx.is_version_greater_than_or_equal("3,x")),
    );
    let _ = loom.render(&request("15.0", two_items()));
}

#[test]
fn test_non_object_request_is_malformed() {
    let loom = create_loom(config());
    let err = loom.render(&json!(["x"])).unwrap_err();
    assert!(matches!(err, LoomError::MalformedRequest(_)), "{err}");
}

#[rstest]
#[case::no_eof(false)]
#[case::eof(true)]
fn test_empty_input_is_empty_string(#[case] eof: bool) {
    let loom = create_loom(config().eof(eof));
    assert_eq!(loom.render(&request("1.0.0", json!([]))).unwrap(), "");
}

#[rstest]
#[case::no_eof(false)]
#[case::eof(true)]
fn test_all_filtered_is_empty_string(#[case] eof: bool) {
    let loom = create_loom(config().eof(eof).predicate(|_, _| false));
    assert_eq!(loom.render(&request("1.0.0", two_items())).unwrap(), "");
}

#[test]
fn test_eof_marker_follows_joined_lines() {
    let loom = create_loom(config().eof(true));
    let output = loom.render(&request("1.0.0", two_items())).unwrap();
    assert_eq!(output, "Test item1: 42\nTest item2: 123\n#EOF\n");
}

#[rstest]
#[case("14.0", "Test item1: 42\n#EOF\n")]
#[case("3.0", "Test item1: 42\n#EOF\n")]
#[case("2.0", "")]
fn test_version_gated_eof(#[case] version: &str, #[case] expected: &str) {
    let loom = create_loom(
        config()
            .eof(true)
            .predicate(|ctx, _| ctx.is_version_greater_than_or_equal("3.x")),
    );
    let output = loom
        .render(&request(version, json!([{ "name": "item1", "value": 42 }])))
        .unwrap();
    assert_eq!(output, expected);
}

#[test]
fn test_line_count_matches_retained_items() {
    let loom = create_loom(config().predicate(|_, item| item.value % 2 == 0));
    let input: Vec<Value> = (0..9)
        .map(|i| json!({ "name": format!("n{i}"), "value": i }))
        .collect();
    let output = loom.render(&request("1.0.0", Value::Array(input))).unwrap();
    assert_eq!(output.lines().count(), 5);
}

#[test]
fn test_rendering_is_deterministic() {
    init_tracing();
    let loom = create_loom(config().eof(true));
    let request = request("1.0.0", two_items());
    assert_eq!(loom.render(&request).unwrap(), loom.render(&request).unwrap());
    assert_eq!(
        loom.render_checksum(&request).unwrap(),
        loom.render_checksum(&request).unwrap()
    );
}

#[test]
fn test_typed_rendering_matches_json() {
    let loom = create_loom(config());
    let options = Options {
        version: "1.0.0".to_string(),
        prefix: "Test".to_string(),
    };
    let items = vec![
        Item { name: "item1".to_string(), value: 42 },
        Item { name: "item2".to_string(), value: 123 },
    ];
    assert_eq!(
        loom.render_with(&options, &items).unwrap(),
        loom.render(&request("1.0.0", two_items())).unwrap()
    );
}

fn preset_loom() -> Loom<Item, Options> {
    create_loom(
        config()
            .eof(true)
            .preset(
                "basic",
                [
                    json!({ "name": "a", "value": 1 }),
                    json!({ "name": "b", "value": 2 }),
                ],
            )
            .preset("broken", [json!({ "name": "c" })]),
    )
}

#[test]
fn test_preset_equals_render_with_preset_input() {
    let loom = preset_loom();
    let options = json!({ "version": "1.0", "prefix": "P" });

    let via_preset = loom.render_preset("basic", &options).unwrap();
    let via_render = loom
        .render(&json!({
            "version": "1.0",
            "prefix": "P",
            "input": loom.preset("basic").unwrap().items()
        }))
        .unwrap();

    assert_eq!(via_preset, "P a: 1\nP b: 2\n#EOF\n");
    assert_eq!(via_preset, via_render);
}

#[test]
fn test_preset_ignores_input_option() {
    let loom = preset_loom();
    let output = loom
        .render_preset(
            "basic",
            &json!({ "version": "1.0", "prefix": "P", "input": [{ "name": "z", "value": 0 }] }),
        )
        .unwrap();
    assert_eq!(output, "P a: 1\nP b: 2\n#EOF\n");
}

#[test]
fn test_preset_shares_validation() {
    let loom = preset_loom();
    let err = loom
        .render_preset("broken", &json!({ "version": "1.0", "prefix": "P" }))
        .unwrap_err();
    assert!(matches!(err, LoomError::InputValidation { index: 0, .. }));
}

#[test]
fn test_unknown_preset() {
    let loom = preset_loom();
    let err = loom
        .render_preset("missing", &json!({ "version": "1.0", "prefix": "P" }))
        .unwrap_err();
    match err {
        LoomError::PresetNotFound { name, available } => {
            assert_eq!(name, "missing");
            assert_eq!(available, vec!["basic", "broken"]);
        }
        other => panic!("Expected PresetNotFound, got {:?}", other),
    }
}

#[test]
fn test_presets_are_not_mutated_by_rendering() {
    let loom = preset_loom();
    let before = loom.preset("basic").unwrap().items().to_vec();
    loom.render_preset("basic", &json!({ "version": "1.0", "prefix": "P" }))
        .unwrap();
    assert_eq!(loom.preset("basic").unwrap().items(), before.as_slice());
    assert_eq!(loom.presets().collect::<Vec<_>>(), vec!["basic", "broken"]);
}

#[test]
fn test_loom_is_shareable_across_threads() {
    let loom = Arc::new(preset_loom());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let loom = Arc::clone(&loom);
            std::thread::spawn(move || {
                loom.render_preset("basic", &json!({ "version": "1.0", "prefix": "P" }))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "P a: 1\nP b: 2\n#EOF\n");
    }
}
