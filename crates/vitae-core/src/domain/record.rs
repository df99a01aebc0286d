//! Schema-free CV record.
//!
//! A [`Record`] is a tree of named fields: the root is a mapping from field
//! name to [`Value`], and every value is either a scalar leaf, an ordered
//! sequence, or another mapping. Mapping keys keep insertion order so that
//! templates iterate sections in the order the data author wrote them.
//!
//! The core imposes no schema. The only path it ever reads is
//! [`SUBJECT_NAME_PATH`], which names the CV subject.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
};

/// Dotted path of the field that names the CV subject.
pub const SUBJECT_NAME_PATH: &str = "profile.name";

/// Ordered mapping of field names to values.
pub type Mapping = IndexMap<String, Value>;

/// A single node in the record tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Child field of a mapping node.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Short type name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// Render a scalar as a plain string; `None` for containers and null.
    fn scalar_to_string(&self) -> Option<String> {
        match self {
            Self::Bool(b) => Some(b.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Null | Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Mapping(r.fields)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(m) => serializer.collect_map(m),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar, a sequence, or a mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Integer))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut fields = Mapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<Value>()? {
            // YAML allows `2021: ...`; keys are names, so scalars become strings.
            let name = key.scalar_to_string().ok_or_else(|| {
                de::Error::custom(format!("mapping keys must be scalars, found {}", key.kind()))
            })?;
            let value = map.next_value()?;
            fields.insert(name, value);
        }
        Ok(Value::Mapping(fields))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// The structured data describing the CV subject.
///
/// The root of the tree is always a mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Mapping,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping as a record root.
    pub fn from_mapping(fields: Mapping) -> Self {
        Self { fields }
    }

    /// Insert a top-level field, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder-style [`Record::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Resolve a dotted path such as `profile.name`.
    ///
    /// Only mapping nodes are traversed; sequence indices are not supported.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.fields.get(first)?, |node, segment| node.get(segment))
    }

    /// The subject's name, if present and not blank.
    ///
    /// Non-zero numbers and `true` count as names and are stringified
    /// (`name: 1984` names the subject "1984"). Null, zero, `false`,
    /// sequences and mappings do not.
    pub fn subject_name(&self) -> Option<Cow<'_, str>> {
        match self.lookup(SUBJECT_NAME_PATH)? {
            Value::String(name) if !name.trim().is_empty() => Some(Cow::Borrowed(name)),
            Value::Integer(n) if *n != 0 => Some(Cow::Owned(n.to_string())),
            Value::Float(n) if *n != 0.0 && !n.is_nan() => Some(Cow::Owned(n.to_string())),
            Value::Bool(true) => Some(Cow::Borrowed("true")),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.fields
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.fields)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Mapping(fields) => Ok(Self { fields }),
            other => Err(de::Error::custom(format!(
                "record root must be a mapping, found {}",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> Record {
        let mut profile = Mapping::new();
        profile.insert("name".into(), name.into());
        Record::new().with("profile", profile)
    }

    #[test]
    fn lookup_walks_nested_mappings() {
        let record = profile("Ada Lovelace");
        assert_eq!(
            record.lookup("profile.name").and_then(Value::as_str),
            Some("Ada Lovelace")
        );
        assert!(record.lookup("profile.email").is_none());
        assert!(record.lookup("skills").is_none());
    }

    #[test]
    fn lookup_does_not_descend_into_scalars() {
        let record = Record::new().with("profile", "flat");
        assert!(record.lookup("profile.name").is_none());
    }

    fn named(name: Value) -> Record {
        let mut p = Mapping::new();
        p.insert("name".into(), name);
        Record::new().with("profile", p)
    }

    #[test]
    fn subject_name_present() {
        assert_eq!(profile("Ada").subject_name().as_deref(), Some("Ada"));
    }

    #[test]
    fn subject_name_blank_is_absent() {
        assert_eq!(profile("   ").subject_name(), None);
        assert_eq!(profile("").subject_name(), None);
        assert_eq!(Record::new().subject_name(), None);
    }

    #[test]
    fn scalar_subject_names_are_stringified() {
        assert_eq!(named(Value::Integer(1984)).subject_name().as_deref(), Some("1984"));
        assert_eq!(named(Value::Float(2.5)).subject_name().as_deref(), Some("2.5"));
        assert_eq!(named(Value::Bool(true)).subject_name().as_deref(), Some("true"));
    }

    #[test]
    fn falsey_and_structured_names_are_absent() {
        for name in [
            Value::Null,
            Value::Integer(0),
            Value::Float(0.0),
            Value::Bool(false),
            Value::Sequence(vec!["Ada".into()]),
            Value::Mapping(Mapping::new()),
        ] {
            assert_eq!(named(name.clone()).subject_name(), None, "{name:?}");
        }
    }

    #[test]
    fn deserialize_preserves_key_order() {
        let record: Record =
            serde_json::from_str(r#"{"zeta": 1, "alpha": {"b": true, "a": null}, "mid": [1.5, "x"]}"#)
                .unwrap();

        let keys: Vec<_> = record.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let alpha = record.get("alpha").and_then(Value::as_mapping).unwrap();
        let inner: Vec<_> = alpha.keys().map(String::as_str).collect();
        assert_eq!(inner, ["b", "a"]);
        assert!(alpha["a"].is_null());

        assert_eq!(
            record.get("mid").and_then(Value::as_sequence),
            Some(&[Value::Float(1.5), Value::from("x")][..])
        );
    }

    #[test]
    fn deserialize_rejects_non_mapping_root() {
        let err = serde_json::from_str::<Record>("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn serialize_round_trips_through_json() {
        let record = profile("Ada").with("years", 7_i64).with("remote", true);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"profile": {"name": "Ada"}, "years": 7, "remote": true})
        );
    }
}
