//! Integration tests for the argument set resolver.

use std::cell::Cell;

use argset::args::{
    from_fn, Arg, ArgConfig, ArgError, ArgKind, ArgSet, Argument, Defaults, OptionMap, Overrides,
};
use serde_json::{json, Value};

fn scenario_configs() -> Vec<ArgConfig> {
    vec![
        ArgConfig::new("verbose").with_default(false),
        ArgConfig::new("out").with_default("a.txt"),
    ]
}

fn options(value: Value) -> OptionMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn test_defaults_only_yields_out_flag() {
    let set: ArgSet = ArgSet::new(&Defaults, scenario_configs()).unwrap();
    assert_eq!(set.arg_flags(), vec!["--out", "a.txt"]);
}

#[test]
fn test_host_override_replaces_default() {
    let host = Overrides::new().with("out", "b.txt");
    let set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();
    assert_eq!(set.arg_flags(), vec!["--out", "b.txt"]);
}

#[test]
fn test_host_override_enables_switch() {
    let host = Overrides::new().with("verbose", true);
    let set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();
    assert_eq!(set.arg_flags(), vec!["--verbose", "--out", "a.txt"]);
}

#[test]
fn test_provider_receives_defaults_and_is_called_once() {
    let calls = Cell::new(0);
    let host = from_fn(|defaults: OptionMap| {
        calls.set(calls.get() + 1);
        assert_eq!(defaults, options(json!({"verbose": false, "out": "a.txt"})));
        Ok(defaults)
    });

    let set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();
    set.arg_flags();
    set.generate_default_options();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_effective_options_are_kept() {
    let host = Overrides::new().with("out", "b.txt").with("extra", 1);
    let set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();
    assert_eq!(
        set.options(),
        &options(json!({"verbose": false, "out": "b.txt", "extra": 1}))
    );
}

#[test]
fn test_provider_failure_fails_construction() {
    let host = from_fn(|_| {
        Err(ArgError::Provider {
            message: "task has no options".into(),
        })
    });
    let err = ArgSet::<Arg>::new(&host, scenario_configs()).unwrap_err();
    assert!(matches!(err, ArgError::Provider { .. }));
}

#[test]
fn test_malformed_config_fails_construction() {
    let configs = vec![ArgConfig::new("out"), ArgConfig::new("  ")];
    let err = ArgSet::<Arg>::new(&Defaults, configs).unwrap_err();
    assert_eq!(err, ArgError::EmptyOption);
}

#[test]
fn test_invalid_override_fails_construction() {
    let host = Overrides::new().with("verbose", "loud");
    let err = ArgSet::<Arg>::new(&host, scenario_configs()).unwrap_err();
    assert!(matches!(err, ArgError::InvalidValue { option, .. } if option == "verbose"));
}

#[test]
fn test_empty_configs_yield_no_flags() {
    let set: ArgSet = ArgSet::new(&Defaults, Vec::new()).unwrap();
    assert!(set.args().is_empty());
    assert!(set.generate_default_options().is_empty());
    assert!(set.arg_flags().is_empty());
}

// =============================================================================
// DEFAULT OPTIONS
// =============================================================================

#[test]
fn test_default_options_have_one_entry_per_argument() {
    let configs = vec![
        ArgConfig::new("out").with_default("a.txt"),
        ArgConfig::new("level").with_default(3),
        ArgConfig::new("input").with_kind(ArgKind::Positional),
    ];
    let set: ArgSet = ArgSet::new(&Defaults, configs).unwrap();

    assert_eq!(
        set.generate_default_options(),
        options(json!({"out": "a.txt", "level": 3, "input": null}))
    );
}

#[test]
fn test_duplicate_option_key_later_default_wins() {
    let configs = vec![
        ArgConfig::new("mode").with_default("a"),
        ArgConfig::new("mode").with_default("b"),
    ];
    let set: ArgSet = ArgSet::new(&Defaults, configs).unwrap();

    let defaults = set.generate_default_options();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults["mode"], json!("b"));
    // Both arguments still resolve (and render) from the shared key.
    assert_eq!(set.arg_flags(), vec!["--mode", "b", "--mode", "b"]);
}

#[test]
fn test_default_options_ignore_overrides() {
    let host = Overrides::new().with("out", "b.txt");
    let set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();
    assert_eq!(set.generate_default_options()["out"], json!("a.txt"));
}

// =============================================================================
// RE-RESOLUTION
// =============================================================================

#[test]
fn test_set_arg_values_preserves_order_and_length() {
    let mut set: ArgSet = ArgSet::new(&Defaults, scenario_configs()).unwrap();
    let keys_before: Vec<String> = set.args().iter().map(|a| a.option_key().to_string()).collect();

    set.set_arg_values_from_options().unwrap();

    let keys_after: Vec<String> = set.args().iter().map(|a| a.option_key().to_string()).collect();
    assert_eq!(keys_before, keys_after);
    assert_eq!(keys_after, vec!["verbose", "out"]);
}

#[test]
fn test_set_arg_values_is_idempotent() {
    let host = Overrides::new().with("verbose", true).with("out", "b.txt");
    let mut set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();

    let first = set.arg_flags();
    let args_first = set.args().to_vec();
    set.set_arg_values_from_options().unwrap();
    set.set_arg_values_from_options().unwrap();

    assert_eq!(set.arg_flags(), first);
    assert_eq!(set.args(), args_first.as_slice());
}

#[test]
fn test_set_options_bypasses_provider() {
    let mut set: ArgSet = ArgSet::new(&Defaults, scenario_configs()).unwrap();
    set.set_options(options(json!({"out": "c.txt", "verbose": true})))
        .unwrap();

    assert_eq!(set.arg_flags(), vec!["--verbose", "--out", "c.txt"]);
    assert_eq!(set.options()["out"], json!("c.txt"));
}

#[test]
fn test_set_options_missing_keys_fall_back_to_defaults() {
    let mut set: ArgSet = ArgSet::new(&Defaults, scenario_configs()).unwrap();
    set.set_options(OptionMap::new()).unwrap();
    assert_eq!(set.arg_flags(), vec!["--out", "a.txt"]);
}

#[test]
fn test_set_options_failure_keeps_previous_state() {
    let host = Overrides::new().with("out", "b.txt");
    let mut set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();
    let options_before = set.options().clone();

    let err = set
        .set_options(options(json!({"out": "c.txt", "verbose": [1, 2]})))
        .unwrap_err();

    assert!(matches!(err, ArgError::InvalidValue { .. }));
    assert_eq!(set.options(), &options_before);
    assert_eq!(set.arg_flags(), vec!["--out", "b.txt"]);
}

// =============================================================================
// FLAG DERIVATION
// =============================================================================

#[test]
fn test_flags_never_contain_absent_slots() {
    let configs = vec![
        ArgConfig::new("unset"),
        ArgConfig::new("quiet").with_default(false),
        ArgConfig::new("level").with_default(2),
    ];
    let set: ArgSet = ArgSet::new(&Defaults, configs).unwrap();

    let present: usize = set
        .args()
        .iter()
        .map(|a| usize::from(a.flag().is_some()) + usize::from(a.value().is_some()))
        .sum();
    let flags = set.arg_flags();
    assert_eq!(flags.len(), present);
    assert_eq!(flags, vec!["--level", "2"]);
}

#[test]
fn test_flag_and_value_are_filtered_independently() {
    let configs = vec![
        ArgConfig::new("force").with_default(true),
        ArgConfig::new("input")
            .with_kind(ArgKind::Positional)
            .with_default("src.txt"),
        ArgConfig::new("out").with_flag("-o").with_default("a.txt"),
    ];
    let set: ArgSet = ArgSet::new(&Defaults, configs).unwrap();

    // switch: flag without value; positional: value without flag
    assert_eq!(set.arg_flags(), vec!["--force", "src.txt", "-o", "a.txt"]);
}

#[test]
fn test_flags_follow_configuration_order() {
    let configs = vec![
        ArgConfig::new("z").with_default("1"),
        ArgConfig::new("a").with_default("2"),
        ArgConfig::new("m").with_default("3"),
    ];
    let set: ArgSet = ArgSet::new(&Defaults, configs).unwrap();
    assert_eq!(set.arg_flags(), vec!["--z", "1", "--a", "2", "--m", "3"]);
}

#[test]
fn test_null_override_unsets_value() {
    let host = Overrides::new().with("out", Value::Null);
    let set: ArgSet = ArgSet::new(&host, scenario_configs()).unwrap();
    assert!(set.arg_flags().is_empty());
}

// =============================================================================
// CUSTOM ARGUMENT TYPES
// =============================================================================

/// Minimal argument that always renders `-D<key>=<value>`.
#[derive(Debug, Clone, PartialEq)]
struct Define {
    key: String,
    default: Value,
    value: Option<String>,
}

impl Argument for Define {
    type Config = (&'static str, &'static str);

    fn from_config((key, default): Self::Config) -> Result<Self, ArgError> {
        Ok(Self {
            key: key.to_string(),
            default: Value::from(default),
            value: None,
        })
    }

    fn option_key(&self) -> &str {
        &self.key
    }

    fn default_value(&self) -> &Value {
        &self.default
    }

    fn set_value_from_options(self, options: &OptionMap) -> Result<Self, ArgError> {
        let value = options
            .get(&self.key)
            .and_then(Value::as_str)
            .map(|v| format!("-D{}={}", self.key, v));
        Ok(Self { value, ..self })
    }

    fn flag(&self) -> Option<String> {
        None
    }

    fn value(&self) -> Option<String> {
        self.value.clone()
    }
}

#[test]
fn test_custom_argument_type_is_resolved() {
    let host = Overrides::new().with("mode", "release");
    let set = ArgSet::<Define>::new(&host, vec![("mode", "debug"), ("target", "x86")]).unwrap();
    assert_eq!(set.arg_flags(), vec!["-Dmode=release", "-Dtarget=x86"]);
}
