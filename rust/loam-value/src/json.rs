//! JSON bridge for values.
//!
//! Structured configuration reaches this crate as JSON text; the serde
//! impls here are written by hand because compound values are
//! reference-counted nodes and the opaque-object variant cannot cross a
//! serialization boundary (it refuses with an error, it is never silently
//! dropped).

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::decimal::Decimal;
use crate::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Decimal(d) => serializer.serialize_f64(d.as_f64()),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(node) => {
                let mut seq = serializer.serialize_seq(Some(node.items.len()))?;
                for item in &node.items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(node) => {
                let mut map = serializer.serialize_map(Some(node.entries.len()))?;
                for (key, value) in &node.entries {
                    match key {
                        Value::String(s) => map.serialize_entry(&**s, value)?,
                        other => map.serialize_entry(&other.to_string(), value)?,
                    }
                }
                map.end()
            }
            Value::Object(obj) => Err(S::Error::custom(format!(
                "object value '{}' cannot be serialized",
                obj.type_name()
            ))),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-compatible value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        i64::try_from(n)
            .map(Value::Int)
            .map_err(|_| E::custom(format!("integer out of range: {n}")))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Value, E> {
        Ok(Value::Decimal(Decimal::from_f64(f)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::string(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::list(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.insert(Value::string(key), value);
        }
        Ok(Value::map(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Value {
    /// Parse a JSON document into a value. Floats become [`Decimal`]s.
    pub fn from_json_str(input: &str) -> Result<Value, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Render as compact JSON. Fails on values containing objects.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectData;
    use std::rc::Rc;

    #[test]
    fn parses_the_expected_shapes() {
        let v = Value::from_json_str(r#"{"hp": 12, "scale": 2.5, "tags": ["x", null, true]}"#)
            .expect("valid JSON");
        assert_eq!(v.get("hp"), Some(&Value::from(12)));
        assert_eq!(
            v.get("scale"),
            Some(&Value::from(Decimal::from_raw(2_500_000)))
        );
        assert_eq!(
            v.get("tags"),
            Some(&Value::list(vec![
                Value::from("x"),
                Value::Null,
                Value::from(true)
            ]))
        );
    }

    #[test]
    fn round_trips_through_json() {
        let v = Value::from_json_str(r#"{"a": [1, 2], "b": "two words"}"#).expect("valid JSON");
        let text = v.to_json_string().expect("serializable");
        assert_eq!(Value::from_json_str(&text).expect("valid JSON"), v);
    }

    #[derive(Debug)]
    struct Prop;

    impl ObjectData for Prop {
        fn type_name(&self) -> &str {
            "prop"
        }
    }

    #[test]
    fn objects_refuse_to_serialize() {
        let v = Value::list(vec![Value::object(Rc::new(Prop))]);
        let err = v.to_json_string().unwrap_err();
        assert!(err.to_string().contains("prop"), "{err}");
    }

    #[test]
    fn non_string_keys_serialize_by_display() {
        let mut entries = std::collections::BTreeMap::new();
        entries.insert(Value::from(7), Value::from("seven"));
        let text = Value::map(entries).to_json_string().expect("serializable");
        assert_eq!(text, r#"{"7":"seven"}"#);
    }
}
