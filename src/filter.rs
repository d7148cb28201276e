use serde_json::Value;

use crate::parser::Segment;

/// Apply one compiled segment to a single value.
pub fn apply<'a>(seg: &Segment, v: &'a Value) -> Vec<&'a Value> {
    match seg {
        Segment::Child(name) => child(name, v),
        Segment::Descendant(name) => descendant(name, v),
        Segment::Index(spec) => index(spec, v),
    }
}

/// `.name`: the value bound to `name` when `v` is an object holding that key.
pub fn child<'a>(name: &str, v: &'a Value) -> Vec<&'a Value> {
    match v {
        Value::Object(map) => map.get(name).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// `[spec]` on arrays, where `spec` is `*`, a signed integer or `start:end`.
///
/// Out-of-range bounds and malformed specs yield nothing. A bound `i` is out of range when
/// `|i| >= len`, so `-len` is rejected even though it would address the first element.
pub fn index<'a>(spec: &str, v: &'a Value) -> Vec<&'a Value> {
    let Value::Array(arr) = v else {
        return Vec::new();
    };

    if spec == "*" {
        return arr.iter().collect();
    }

    if let Ok(i) = spec.parse::<i64>() {
        return match normalize(i, arr.len()) {
            Some(pos) => vec![&arr[pos]],
            None => Vec::new(),
        };
    }

    if let Some((lo, hi)) = spec.split_once(':') {
        if hi.contains(':') {
            return Vec::new();
        }
        let start = match bound(lo, arr.len()) {
            Some(b) => b.unwrap_or(0),
            None => return Vec::new(),
        };
        let end = match bound(hi, arr.len()) {
            Some(b) => b.unwrap_or(arr.len()),
            None => return Vec::new(),
        };
        if start >= end {
            return Vec::new();
        }
        return arr[start..end].iter().collect();
    }

    Vec::new()
}

// `Some(None)` for an omitted bound, `None` when the bound is malformed or out of range.
fn bound(text: &str, len: usize) -> Option<Option<usize>> {
    if text.is_empty() {
        return Some(None);
    }
    let i = text.parse::<i64>().ok()?;
    normalize(i, len).map(Some)
}

fn normalize(i: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    if i.checked_abs()? >= len {
        return None;
    }
    let pos = if i < 0 { i + len } else { i };
    usize::try_from(pos).ok()
}

/// `..name`: recursive attribute search.
///
/// An object holding `name` directly yields that one value and the search stops there;
/// otherwise every child of an object or array is searched in iteration order.
pub fn descendant<'a>(name: &str, v: &'a Value) -> Vec<&'a Value> {
    let mut out = Vec::new();
    collect_descendants(name, v, &mut out);
    out
}

fn collect_descendants<'a>(name: &str, v: &'a Value, out: &mut Vec<&'a Value>) {
    match v {
        Value::Object(map) => {
            if let Some(hit) = map.get(name) {
                out.push(hit);
                return;
            }
            for child in map.values() {
                collect_descendants(name, child, out);
            }
        }
        Value::Array(arr) => {
            for elt in arr {
                collect_descendants(name, elt, out);
            }
        }
        _ => {}
    }
}
