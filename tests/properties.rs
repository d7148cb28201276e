use jpath_query as jpq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn doc_with(items: &[i64]) -> jpq::Jpath {
    let root = json!({ "a": items, "nested": { "a": { "b": items } } });
    match root {
        Value::Object(map) => jpq::Jpath::new(map),
        _ => unreachable!(),
    }
}

// Documents hold every number as a double.
fn doubles(items: &[i64]) -> Vec<Value> {
    items.iter().map(|i| json!(*i as f64)).collect()
}

proptest! {
    #[test]
    fn index_in_range_selects_one(items in prop::collection::vec(any::<i64>(), 1..20), seed in any::<usize>()) {
        let i = seed % items.len();
        let doc = doc_with(&items);
        let expr = format!("$.a[{i}]");
        let expected = json!(items[i] as f64);
        prop_assert_eq!(doc.query(&expr), vec![&expected]);
    }

    #[test]
    fn negative_index_counts_from_end(items in prop::collection::vec(any::<i64>(), 2..20), seed in any::<usize>()) {
        let n = items.len() as i64;
        // -n < i < 0
        let i = -1 - (seed as i64).rem_euclid(n - 1);
        let doc = doc_with(&items);
        let expr = format!("$.a[{i}]");
        let expected = json!(items[(i + n) as usize] as f64);
        prop_assert_eq!(doc.query(&expr), vec![&expected]);
    }

    #[test]
    fn out_of_range_index_is_empty(items in prop::collection::vec(any::<i64>(), 0..20), extra in 0i64..100) {
        let n = items.len() as i64;
        let doc = doc_with(&items);
        let above_expr = format!("$.a[{}]", n + extra);
        let below_expr = format!("$.a[{}]", -n - extra);
        prop_assert!(doc.query(&above_expr).is_empty(), "{} matched", above_expr);
        prop_assert!(doc.query(&below_expr).is_empty(), "{} matched", below_expr);
    }

    #[test]
    fn full_slice_and_wildcard_are_identity(items in prop::collection::vec(any::<i64>(), 0..20)) {
        let doc = doc_with(&items);
        let expected = doubles(&items);
        let sliced: Vec<Value> = doc.query("$.a[:]").into_iter().cloned().collect();
        let all: Vec<Value> = doc.query("$.a[*]").into_iter().cloned().collect();
        prop_assert_eq!(&sliced, &expected);
        prop_assert_eq!(&all, &expected);
    }

    #[test]
    fn slice_matches_subrange(items in prop::collection::vec(any::<i64>(), 1..20), a in any::<usize>(), b in any::<usize>()) {
        let n = items.len();
        let (start, end) = (a % n, b % n);
        let doc = doc_with(&items);
        let expr = format!("$.a[{start}:{end}]");
        let got: Vec<Value> = doc.query(&expr).into_iter().cloned().collect();
        let expected = if start < end {
            doubles(&items[start..end])
        } else {
            Vec::new()
        };
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn child_chain_selects_nested_value(items in prop::collection::vec(any::<i64>(), 0..5)) {
        let doc = doc_with(&items);
        let expected = Value::Array(doubles(&items));
        prop_assert_eq!(doc.query("$.nested.a.b"), vec![&expected]);
    }

    #[test]
    fn queries_are_repeatable(expr in "[$.a-z\\[\\]:*0-9-]{0,12}") {
        let doc = doc_with(&[1, 2, 3]);
        prop_assert_eq!(doc.query(&expr), doc.query(&expr));
    }
}
