//! Populate caller-owned records from query results.
//!
//! Each field is registered with the path that feeds it and a setter. Scalar fields take
//! the first match; list fields take every match and fail as soon as one does not convert.

use serde_json::Value;
use tracing::debug;

use crate::engine::Jpath;
use crate::errors::BindError;

/// Conversion from a matched JSON value into a field type.
pub trait FromJson: Sized {
    /// Name reported in type-mismatch errors.
    const TYPE_NAME: &'static str;

    fn from_json(v: &Value) -> Option<Self>;
}

impl FromJson for String {
    const TYPE_NAME: &'static str = "string";

    fn from_json(v: &Value) -> Option<Self> {
        v.as_str().map(str::to_owned)
    }
}

impl FromJson for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_json(v: &Value) -> Option<Self> {
        v.as_bool()
    }
}

impl FromJson for f64 {
    const TYPE_NAME: &'static str = "number";

    fn from_json(v: &Value) -> Option<Self> {
        v.as_f64()
    }
}

// Numbers are doubles; whole ones within `i64` range convert.
impl FromJson for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_json(v: &Value) -> Option<Self> {
        let f = v.as_f64()?;
        let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
        (f.fract() == 0.0 && in_range).then_some(f as i64)
    }
}

impl FromJson for Value {
    const TYPE_NAME: &'static str = "any";

    fn from_json(v: &Value) -> Option<Self> {
        Some(v.clone())
    }
}

pub fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn convert<V: FromJson>(field: &str, v: &Value) -> Result<V, BindError> {
    V::from_json(v).ok_or_else(|| BindError::TypeMismatch {
        field: field.to_string(),
        expected: V::TYPE_NAME,
        actual: kind_name(v),
    })
}

type Apply<T> = Box<dyn Fn(&mut T, &[&Value]) -> Result<(), BindError> + Send + Sync>;

struct FieldBinding<T> {
    name: String,
    path: String,
    apply: Apply<T>,
}

/// An ordered list of (field, path, setter) entries for records of type `T`.
pub struct Binder<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T> Default for Binder<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T: 'static> Binder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a scalar field to the first match of `path`.
    pub fn field<V, F>(mut self, name: &str, path: &str, set: F) -> Self
    where
        V: FromJson,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let field = name.to_string();
        let query = path.to_string();
        let apply = move |target: &mut T, results: &[&Value]| -> Result<(), BindError> {
            let first = results.first().ok_or_else(|| BindError::EmptyResult {
                field: field.clone(),
                path: query.clone(),
            })?;
            set(target, convert(&field, first)?);
            Ok(())
        };
        self.push(name, path, Box::new(apply));
        self
    }

    /// Bind a list field to every match of `path`. An empty match set yields an empty list.
    pub fn list<V, F>(mut self, name: &str, path: &str, set: F) -> Self
    where
        V: FromJson,
        F: Fn(&mut T, Vec<V>) + Send + Sync + 'static,
    {
        let field = name.to_string();
        let apply = move |target: &mut T, results: &[&Value]| -> Result<(), BindError> {
            let values = results
                .iter()
                .map(|v| convert(&field, v))
                .collect::<Result<Vec<V>, _>>()?;
            set(target, values);
            Ok(())
        };
        self.push(name, path, Box::new(apply));
        self
    }

    fn push(&mut self, name: &str, path: &str, apply: Apply<T>) {
        self.fields.push(FieldBinding {
            name: name.to_string(),
            path: path.to_string(),
            apply,
        });
    }
}

impl<T> Binder<T> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Run every registered field in order, stopping at the first failure.
    ///
    /// Fields set before a failure keep their new values.
    pub fn bind(&self, doc: &Jpath, target: &mut T) -> Result<(), BindError> {
        for f in &self.fields {
            let results = doc.try_query(&f.path)?;
            debug!(field = %f.name, path = %f.path, matches = results.len(), "binding field");
            (f.apply)(target, &results)?;
        }
        Ok(())
    }
}

/// Decode `data` and bind it into `target`.
pub fn unmarshal<T>(data: &[u8], target: &mut T, binder: &Binder<T>) -> Result<(), BindError> {
    let doc = Jpath::from_slice(data)?;
    binder.bind(&doc, target)
}
