//! Incremental construction of map values.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::ops::OpsError;
use crate::value::Value;

/// Accumulates named contributions and materializes them as a map value.
///
/// Repeated [`add`](ValueBuilder::add) calls under the same name collapse
/// into a list; a name with a single contribution yields that value
/// directly. The builder is single-use: [`build`](ValueBuilder::build)
/// consumes it.
#[derive(Debug, Default)]
pub struct ValueBuilder {
    attrs: BTreeMap<Rc<str>, Vec<Value>>,
}

impl ValueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contribution for `name`, preserving any prior ones.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.attrs
            .entry(Rc::from(name))
            .or_default()
            .push(value.into());
        self
    }

    /// Discard prior contributions for `name`, then add `value` as the sole
    /// one.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        let slot = self.attrs.entry(Rc::from(name)).or_default();
        slot.clear();
        slot.push(value.into());
        self
    }

    /// `set` every key of the map value `obj`. Merging an object in
    /// overwrites, it never appends.
    pub fn merge_object(&mut self, obj: &Value) -> Result<&mut Self, OpsError> {
        let Some(entries) = obj.as_map() else {
            return Err(OpsError::ExpectedMap {
                kind: obj.kind(),
                value: obj.to_string(),
            });
        };
        for (key, value) in entries {
            let Some(name) = key.as_str() else {
                return Err(OpsError::ExpectedStringKey {
                    kind: key.kind(),
                    value: key.to_string(),
                });
            };
            self.set(name, value.clone());
        }
        Ok(self)
    }

    /// Materialize the accumulated map.
    pub fn build(self) -> Value {
        let entries = self
            .attrs
            .into_iter()
            .map(|(name, mut values)| {
                let value = if values.len() == 1 {
                    values.pop().unwrap_or(Value::Null)
                } else {
                    Value::list(values)
                };
                (Value::String(name), value)
            })
            .collect();
        Value::map(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn map_of(pairs: &[(&str, Value)]) -> Value {
        let mut entries = BTreeMap::new();
        for (key, value) in pairs {
            entries.insert(Value::from(*key), value.clone());
        }
        Value::map(entries)
    }

    #[test]
    fn single_contribution_stays_scalar() {
        let mut builder = ValueBuilder::new();
        builder.add("k", 5);
        assert_eq!(builder.build(), map_of(&[("k", Value::from(5))]));
    }

    #[test]
    fn repeated_adds_collapse_into_list() {
        let mut builder = ValueBuilder::new();
        builder.add("k", 1).add("k", 2);
        assert_eq!(
            builder.build(),
            map_of(&[("k", Value::list(vec![Value::from(1), Value::from(2)]))])
        );
    }

    #[test]
    fn set_clears_prior_contributions() {
        let mut builder = ValueBuilder::new();
        builder.add("k", 1).add("k", 2).set("k", 3).add("k", 4);
        assert_eq!(
            builder.build(),
            map_of(&[("k", Value::list(vec![Value::from(3), Value::from(4)]))])
        );
    }

    #[test]
    fn merge_object_overwrites_per_key() {
        let mut builder = ValueBuilder::new();
        builder.add("a", 1).add("b", 2);
        builder
            .merge_object(&map_of(&[("a", Value::from(10))]))
            .expect("map merges");
        assert_eq!(
            builder.build(),
            map_of(&[("a", Value::from(10)), ("b", Value::from(2))])
        );
    }

    #[test]
    fn merge_object_rejects_non_maps() {
        let mut builder = ValueBuilder::new();
        let err = builder.merge_object(&Value::from(3)).unwrap_err();
        assert!(matches!(err, OpsError::ExpectedMap { .. }));
    }

    #[test]
    fn merge_object_rejects_non_string_keys() {
        let mut entries = BTreeMap::new();
        entries.insert(Value::from(1), Value::from("one"));
        let obj = Value::map(entries);
        let mut builder = ValueBuilder::new();
        let err = builder.merge_object(&obj).unwrap_err();
        assert!(matches!(err, OpsError::ExpectedStringKey { .. }));
    }
}
