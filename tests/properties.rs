//! Property tests: serialization round-trips, path identity, merge laws.

use std::collections::BTreeMap;

use docvalue::{path, NativeMode, Value, WriteOptions};
use proptest::prelude::*;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // quarters are exact in binary, so text round-trips are lossless
        (-400_000i32..400_000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        r#"[a-zA-Z0-9 _./\\"\n\t\x01]{0,12}"#.prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn native_round_trip(v in arb_value()) {
        let compact = v.to_vec(NativeMode::Compact).unwrap();
        prop_assert_eq!(Value::from_slice(&compact).unwrap(), v.clone());

        let pretty = v.to_vec(NativeMode::Pretty).unwrap();
        prop_assert_eq!(Value::from_slice(&pretty).unwrap(), v);
    }

    #[test]
    fn null_token_round_trip(v in arb_value()) {
        // top-level strings render unquoted, so wrap the tree in a container
        let doc = Value::Array(vec![v]);
        let text = doc.to_string_with(&WriteOptions::null_tokens()).unwrap();
        prop_assert_eq!(Value::parse(&text).unwrap(), doc);
    }

    #[test]
    fn serde_round_trip(v in arb_value()) {
        let text = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, v);
    }

    #[test]
    fn path_identity_on_key(
        base in prop::collection::btree_map("[a-z]{1,4}", arb_leaf(), 0..5),
        key in "[a-z]{1,4}",
        x in arb_value(),
    ) {
        let mut v = Value::Object(base);
        let p = path![key];
        prop_assert!(v.set(&p, x.clone()));
        prop_assert_eq!(v.get(&p), &x);
    }

    #[test]
    fn path_identity_nested(index in 0usize..3, x in arb_value()) {
        let mut v = Value::from(serde_json::json!({"a": {"b": [0, 0, 0]}}));
        let p = path!["a", "b", index];
        prop_assert!(v.set(&p, x.clone()));
        prop_assert_eq!(v.get(&p), &x);
    }

    #[test]
    fn merge_union_of_disjoint_objects(
        a in prop::collection::btree_map("a_[a-z]{1,4}", arb_value(), 0..5),
        b in prop::collection::btree_map("b_[a-z]{1,4}", arb_value(), 0..5),
    ) {
        let merged = Value::Object(a.clone()).merged(&Value::Object(b.clone())).unwrap();
        let mut expected = a;
        expected.extend(b);
        prop_assert_eq!(merged, Value::Object(expected));
    }

    #[test]
    fn merge_prefers_incoming_scalars(
        a in prop::collection::btree_map("[a-d]", arb_leaf(), 0..4),
        b in prop::collection::btree_map("[a-d]", arb_leaf(), 0..4),
    ) {
        let merged = Value::Object(a.clone()).merged(&Value::Object(b.clone())).unwrap();
        let mut expected: BTreeMap<String, Value> = a;
        expected.extend(b);
        prop_assert_eq!(merged, Value::Object(expected));
    }

    #[test]
    fn bool_never_equals_number(b in any::<bool>()) {
        prop_assert_ne!(Value::from(b), Value::from(i64::from(b)));
        prop_assert_eq!(Value::from(b), Value::from(b));
    }
}

#[test]
fn array_merge_is_not_associative_with_swapped_operands() {
    let a = Value::from(vec![1]);
    let b = Value::from(vec![2]);
    let c = Value::from(vec![3]);

    let left = a.merged(&b).unwrap().merged(&c).unwrap();
    let swapped = a.merged(&c).unwrap().merged(&b).unwrap();
    assert_eq!(left, Value::from(vec![1, 2, 3]));
    assert_ne!(left, swapped);
}
