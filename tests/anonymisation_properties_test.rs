//! Property-based tests for the anonymising transform
//!
//! Random JSON trees are generated with a key alphabet that hits the
//! built-in force, skip and truncate tables, in mixed case.

use metascrub::anonymisation::{Anonymiser, FieldPolicy, PseudonymCategory, StringClassifier};
use proptest::prelude::*;
use regex::Regex;
use serde_json::{json, Map, Value};

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("contacts".to_string()),
        Just("Authors".to_string()),
        Just("ID".to_string()),
        Just("location".to_string()),
        Just("data_files".to_string()),
        Just("Data_Resources".to_string()),
        Just("script".to_string()),
        Just("name".to_string()),
        "[a-z_]{1,8}",
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9@. +:/()-]{0,16}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn is_truncated_key(key: &str) -> bool {
    matches!(key.to_lowercase().as_str(), "data_files" | "data_resources")
}

/// Same keys in the same order and same list lengths, allowing for truncation
fn same_shape(input: &Value, output: &Value) -> bool {
    match (input, output) {
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().zip(b.iter()).all(|((ka, va), (kb, vb))| {
                    if ka != kb {
                        return false;
                    }
                    match (va, vb) {
                        (Value::Array(x), Value::Array(y)) if is_truncated_key(ka) => {
                            let kept = x.len().min(1);
                            y.len() == kept && same_shape(&Value::Array(x[..kept].to_vec()), vb)
                        }
                        _ => same_shape(va, vb),
                    }
                })
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
        }
        (Value::String(_), Value::String(_)) => true,
        (a, b) => a == b,
    }
}

fn string_leaves<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| string_leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| string_leaves(v, out)),
        _ => {}
    }
}

fn empty_policy() -> FieldPolicy {
    FieldPolicy::new::<&str>(&[], &[], &[], &[])
}

proptest! {
    #[test]
    fn pseudonyms_are_stable_within_a_run(
        value in "[a-z0-9@. +-]{0,20}",
        others in prop::collection::vec("[a-z0-9@. +-]{0,20}", 0..8),
    ) {
        let mut anonymiser = Anonymiser::with_defaults().unwrap();
        let first = anonymiser.pseudonymise(&value);
        for other in &others {
            anonymiser.pseudonymise(other);
        }
        prop_assert_eq!(anonymiser.pseudonymise(&value), first);
    }

    #[test]
    fn distinct_values_get_distinct_tokens(
        a in "[a-z0-9@. +-]{0,20}",
        b in "[a-z0-9@. +-]{0,20}",
    ) {
        prop_assume!(a != b);
        let classifier = StringClassifier::new().unwrap();
        let mut anonymiser = Anonymiser::with_defaults().unwrap();

        let token_a = anonymiser.pseudonymise(&a);
        let token_b = anonymiser.pseudonymise(&b);

        if classifier.classify(&a) == classifier.classify(&b) {
            prop_assert_ne!(token_a, token_b);
        }
    }

    #[test]
    fn digit_runs_classify_as_phone(digits in "[0-9]{8,20}") {
        let classifier = StringClassifier::new().unwrap();
        prop_assert_eq!(classifier.classify(&digits), PseudonymCategory::Phone);
    }

    #[test]
    fn shape_is_preserved(value in json_value()) {
        let mut anonymiser = Anonymiser::with_defaults().unwrap();
        let output = anonymiser.anonymise(&value, false);
        prop_assert!(same_shape(&value, &output), "{value} -> {output}");
    }

    #[test]
    fn nothing_changes_without_forcing(value in json_value()) {
        let mut anonymiser = Anonymiser::new(empty_policy(), StringClassifier::new().unwrap());
        prop_assert_eq!(anonymiser.anonymise(&value, false), value);
    }

    #[test]
    fn forced_blocks_replace_every_string(value in json_value()) {
        let policy = FieldPolicy::new(&["contacts"], &[], &[], &[]);
        let mut anonymiser = Anonymiser::new(policy, StringClassifier::new().unwrap());
        let token = Regex::new(r"^(email|phone|url|text)[1-9][0-9]*$").unwrap();

        let output = anonymiser.anonymise(&json!({"contacts": value, "notes": "plain"}), false);

        let mut leaves = Vec::new();
        string_leaves(&output["contacts"], &mut leaves);
        for leaf in leaves {
            prop_assert!(token.is_match(leaf), "not a token: {leaf:?}");
        }
        prop_assert_eq!(&output["notes"], "plain");
    }

    #[test]
    fn skipped_values_pass_through_forced_blocks(value in json_value()) {
        let mut anonymiser = Anonymiser::with_defaults().unwrap();
        let output = anonymiser.anonymise(&json!({"contacts": {"id": value.clone()}}), false);
        prop_assert_eq!(&output["contacts"]["id"], &value);
    }
}
