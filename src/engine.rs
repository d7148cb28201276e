use std::str::FromStr;

use itertools::Itertools;
use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use crate::context::Context;
use crate::errors::{JpathError, Result};
use crate::filter;
use crate::parser::{self, CompiledPath};

/// A decoded JSON document rooted at an object, queried with path expressions.
///
/// The tree is never mutated, so a `Jpath` can be shared across threads and queried
/// concurrently.
#[derive(Debug, Clone)]
pub struct Jpath {
    root: Value,
    ctx: Context,
}

impl Jpath {
    /// Wrap a decoded object. Every number in the tree is stored as a double, so `1` and
    /// `1.0` are the same value.
    pub fn new(root: Map<String, Value>) -> Self {
        let root = root
            .into_iter()
            .map(|(k, v)| (k, into_doubles(v)))
            .collect();
        Self {
            root: Value::Object(root),
            ctx: Context::default(),
        }
    }

    /// Decode `data` as a JSON object. Arrays and scalars at the root are decode errors.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_slice(data)?;
        Ok(Self::new(root))
    }

    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Every value `expr` matches, in traversal order. Characters outside the segment
    /// grammars are ignored and malformed segments match nothing.
    pub fn query(&self, expr: &str) -> Vec<&Value> {
        self.query_compiled(&parser::compile(expr))
    }

    /// Like [`Jpath::query`], but compiles strictly when the context asks for it.
    pub fn try_query(&self, expr: &str) -> Result<Vec<&Value>> {
        let path = if self.ctx.strict {
            parser::compile_strict(expr)?
        } else {
            parser::compile(expr)
        };
        Ok(self.query_compiled(&path))
    }

    pub fn query_compiled(&self, path: &CompiledPath) -> Vec<&Value> {
        eval_path(&self.root, path)
    }

    /// String matches of `expr`; other variants are skipped.
    pub fn strings(&self, expr: &str) -> Vec<&str> {
        self.query(expr).into_iter().filter_map(Value::as_str).collect()
    }

    /// First string match of `expr`; matches of other variants before it are skipped.
    pub fn string(&self, expr: &str) -> Option<&str> {
        self.query(expr).into_iter().find_map(Value::as_str)
    }

    /// Boolean matches of `expr`; other variants are skipped.
    pub fn bools(&self, expr: &str) -> Vec<bool> {
        self.query(expr).into_iter().filter_map(Value::as_bool).collect()
    }

    /// First boolean match of `expr`; matches of other variants before it are skipped.
    pub fn bool(&self, expr: &str) -> Option<bool> {
        self.query(expr).into_iter().find_map(Value::as_bool)
    }

    /// Numeric matches of `expr` as `f64`, whether the source literal was an integer or not.
    pub fn floats(&self, expr: &str) -> Vec<f64> {
        self.query(expr).into_iter().filter_map(Value::as_f64).collect()
    }

    /// First numeric match of `expr`; matches of other variants before it are skipped.
    pub fn float(&self, expr: &str) -> Option<f64> {
        self.query(expr).into_iter().find_map(Value::as_f64)
    }
}

impl FromStr for Jpath {
    type Err = JpathError;

    fn from_str(data: &str) -> Result<Self> {
        Self::from_slice(data.as_bytes())
    }
}

// Rebuild every number as a double, whatever its source literal.
fn into_doubles(v: Value) -> Value {
    match v {
        Value::Number(n) => match n.as_f64().and_then(Number::from_f64) {
            Some(d) => Value::Number(d),
            None => Value::Number(n),
        },
        Value::Array(arr) => Value::Array(arr.into_iter().map(into_doubles).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, into_doubles(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Thread the working set through every segment, left to right.
pub fn eval_path<'a>(root: &'a Value, path: &CompiledPath) -> Vec<&'a Value> {
    let mut current: Vec<&Value> = vec![root];
    for seg in path.segments() {
        current = current
            .into_iter()
            .flat_map(|v| filter::apply(seg, v))
            .collect();
        trace!(segment = %seg, matches = current.len(), "applied segment");
    }
    debug!(path = %path, matches = current.len(), "query finished");
    current
}

/// Keep only the first match, if any.
pub fn first<'a>(vals: &[&'a Value]) -> Vec<&'a Value> {
    vals.first().copied().into_iter().collect()
}

/// Drop structurally equal repeats, keeping the first occurrence.
pub fn unique<'a>(vals: &[&'a Value]) -> Vec<&'a Value> {
    vals.iter()
        .copied()
        .unique_by(|x| serde_json::to_string(x).unwrap_or_default())
        .collect()
}

/// Substitute `default` when nothing matched.
pub fn or_default(vals: &[&Value], default: &Value) -> Vec<Value> {
    if vals.is_empty() {
        vec![default.clone()]
    } else {
        vals.iter().map(|v| (*v).clone()).collect()
    }
}
