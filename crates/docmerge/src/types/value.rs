use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// A node in the data context a template is rendered against.
///
/// Contexts are trees: the root is normally a [`Value::Map`] holding invoice
/// scalars, a `customer` map and a `projects` list whose items carry their own
/// `jobs` list. Maps keep insertion order so that anything derived from them
/// (suggestions, listings) is deterministic.
///
/// # Example
///
/// ```
/// use docmerge::Value;
///
/// let job: Value = [("title", Value::from("Tiling")), ("price", Value::from(500))]
///     .into_iter()
///     .collect();
/// assert_eq!(job.get("title").and_then(Value::as_str), Some("Tiling"));
/// assert_eq!(job.lookup(&["price"]), Some(&Value::Integer(500)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// An explicitly empty value. Resolves, but renders as nothing.
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A calendar date without time of day.
    Date(NaiveDate),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Creates an empty map value.
    pub fn map() -> Value {
        Value::Map(IndexMap::new())
    }

    /// Inserts `key` into a map value, returning the updated value.
    ///
    /// Non-map values are returned unchanged.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Value {
        if let Value::Map(entries) = &mut self {
            entries.insert(key.into(), value.into());
        }
        self
    }

    /// Looks up a single key in a map, or an index in a list.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.get(key),
            Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Walks a sequence of path segments starting at this value.
    ///
    /// An empty sequence resolves to the value itself.
    pub fn lookup(&self, segments: &[&str]) -> Option<&Value> {
        segments
            .iter()
            .try_fold(self, |current, segment| current.get(segment))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a float, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Short name of this value's type, used in warnings.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

/// Plain string conversion.
///
/// Integral floats print without a fractional part, dates print as ISO
/// `YYYY-MM-DD`, lists print their items joined by `", "` and maps print
/// nothing.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Null | Value::Map(_) => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}
