//! Algorithms that combine, traverse, and copy values.
//!
//! These are the rules by which configuration fragments compose. An object
//! definition inheriting from a prototype goes through [`merge_over`]; a
//! module patching a base definition tree goes through [`smart_merge`].

use std::rc::Rc;

use thiserror::Error;

use crate::value::{ListNode, MapNode, Value, ValueKind};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a value algorithm. All variants abort the operation that
/// raised them; there is no recover-and-continue mode.
#[derive(Debug, Error)]
pub enum OpsError {
    /// `smart_merge` found incompatible kinds on matching slots where
    /// neither side is null.
    #[error(
        "incompatible types in merge: {dst_value} ({dst_kind}) and {src_value} ({src_kind}); \
         destination from {dst_location}, source from {src_location}"
    )]
    MergeTypeMismatch {
        dst_kind: ValueKind,
        src_kind: ValueKind,
        dst_value: String,
        src_value: String,
        dst_location: String,
        src_location: String,
    },

    /// `merge_over` was handed a non-map operand.
    #[error("merge-over expects map operands, found {dst_kind} and {src_kind}")]
    ExpectedMaps {
        dst_kind: ValueKind,
        src_kind: ValueKind,
    },

    /// A map value was required.
    #[error("expected a map value, found {kind}: {value}")]
    ExpectedMap { kind: ValueKind, value: String },

    /// A string, list of strings, or null was required.
    #[error("expected a string list, found {kind}: {value}")]
    ExpectedStringList { kind: ValueKind, value: String },

    /// A map with string keys was required.
    #[error("expected string keys when merging an object, found {kind}: {value}")]
    ExpectedStringKey { kind: ValueKind, value: String },
}

// ---------------------------------------------------------------------------
// append
// ---------------------------------------------------------------------------

/// Lists whose first element is numeric or string-typed behave like scalars
/// under [`append`]: they replace rather than concatenate.
fn has_scalar_head(items: &[Value]) -> bool {
    items
        .first()
        .is_some_and(|head| head.is_numeric() || head.is_string())
}

/// Combine two values positionally.
///
/// Null is an identity element. Two lists concatenate, except that a list of
/// numbers or strings on either side is treated as a scalar and `b` wins.
/// A scalar meeting a list is wrapped and concatenated. Two maps collect
/// into the two-element list `[a, b]`; layering them is [`smart_merge`]'s
/// job, not `append`'s. Anything else: `b` wins.
pub fn append(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Null, b) => b,
        (a, Value::Null) => a,
        (Value::List(a), Value::List(b)) => {
            if has_scalar_head(&a.items) || has_scalar_head(&b.items) {
                return Value::List(b);
            }
            let mut node = Rc::try_unwrap(a).unwrap_or_else(|shared| (*shared).clone());
            node.items.extend(b.items.iter().cloned());
            Value::List(Rc::new(node))
        }
        (Value::List(a), b) => {
            let mut node = Rc::try_unwrap(a).unwrap_or_else(|shared| (*shared).clone());
            node.items.push(b);
            Value::List(Rc::new(node))
        }
        (a, Value::List(b)) => {
            let mut items = Vec::with_capacity(1 + b.items.len());
            items.push(a);
            items.extend(b.items.iter().cloned());
            Value::list(items)
        }
        (a @ Value::Map(_), b @ Value::Map(_)) => Value::list(vec![a, b]),
        (_, b) => b,
    }
}

// ---------------------------------------------------------------------------
// merge_over
// ---------------------------------------------------------------------------

/// Shallow per-attribute override: for every key of `src`, replace
/// `dst[key]` with `append(dst[key], src[key])`.
///
/// List-valued attributes accumulate (subject to `append`'s scalar-list
/// rule); everything else is overridden. `src`'s provenance is propagated
/// onto `dst` only if `dst` has none.
pub fn merge_over(dst: &mut Value, src: &Value) -> Result<(), OpsError> {
    let Value::Map(src_node) = src else {
        return Err(OpsError::ExpectedMaps {
            dst_kind: dst.kind(),
            src_kind: src.kind(),
        });
    };
    if !dst.is_map() {
        return Err(OpsError::ExpectedMaps {
            dst_kind: dst.kind(),
            src_kind: src.kind(),
        });
    }
    for (key, src_value) in &src_node.entries {
        let prior = match dst.as_map_mut() {
            Some(entries) => entries.remove(key).unwrap_or(Value::Null),
            None => Value::Null,
        };
        let merged = append(prior, src_value.clone());
        if let Some(entries) = dst.as_map_mut() {
            entries.insert(key.clone(), merged);
        }
    }
    if dst.source().is_none() {
        if let Some(info) = src.source().cloned() {
            dst.set_source(info);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// smart_merge
// ---------------------------------------------------------------------------

/// Deep, type-checked union of `src` into `dst`.
///
/// Maps merge field-by-field (recursing into slots present on both sides),
/// lists always concatenate, and scalars override only when the kinds
/// match or either side is null. A kind conflict aborts the merge with
/// [`OpsError::MergeTypeMismatch`]; keys merged before the conflict remain
/// applied to `dst`.
pub fn smart_merge(dst: &mut Value, src: &Value) -> Result<(), OpsError> {
    match (dst, src) {
        (Value::Map(dst_node), Value::Map(src_node)) => {
            let entries = &mut Rc::make_mut(dst_node).entries;
            for (key, src_value) in &src_node.entries {
                if let Some(slot) = entries.get_mut(key) {
                    smart_merge(slot, src_value)?;
                } else {
                    entries.insert(key.clone(), src_value.clone());
                }
            }
            Ok(())
        }
        (Value::List(dst_node), Value::List(src_node)) => {
            Rc::make_mut(dst_node)
                .items
                .extend(src_node.items.iter().cloned());
            Ok(())
        }
        (dst, src) => {
            if dst.kind() == src.kind() || dst.is_null() || src.is_null() {
                *dst = src.clone();
                Ok(())
            } else {
                Err(OpsError::MergeTypeMismatch {
                    dst_kind: dst.kind(),
                    src_kind: src.kind(),
                    dst_value: dst.to_string(),
                    src_value: src.to_string(),
                    dst_location: dst.debug_location(),
                    src_location: src.debug_location(),
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// visit / deep_copy
// ---------------------------------------------------------------------------

/// Pre-order traversal: `f` sees the value itself, then list elements in
/// index order, then map values in key order. Scalars and objects are
/// leaves.
///
/// Value trees are acyclic by construction (nodes have no interior
/// mutability), so no cycle detection is needed.
pub fn visit<F: FnMut(&Value)>(v: &Value, f: &mut F) {
    f(v);
    match v {
        Value::List(node) => {
            for item in &node.items {
                visit(item, f);
            }
        }
        Value::Map(node) => {
            for value in node.entries.values() {
                visit(value, f);
            }
        }
        _ => {}
    }
}

/// Structural clone: rebuilds every list and map node so the result shares
/// no compound sub-structure with `v`. Scalars are immutable and returned
/// as-is. Provenance is carried over to the rebuilt nodes.
pub fn deep_copy(v: &Value) -> Value {
    match v {
        Value::List(node) => Value::List(Rc::new(ListNode {
            items: node.items.iter().map(deep_copy).collect(),
            source: node.source.clone(),
        })),
        Value::Map(node) => Value::Map(Rc::new(MapNode {
            entries: node
                .entries
                .iter()
                .map(|(key, value)| (deep_copy(key), deep_copy(value)))
                .collect(),
            source: node.source.clone(),
        })),
        other => other.clone(),
    }
}

// ---------------------------------------------------------------------------
// parse_list_or_csv
// ---------------------------------------------------------------------------

/// Normalize a value that may be a delimited string or a list into a string
/// sequence.
///
/// Strings split on commas and whitespace with empty tokens dropped; lists
/// must contain only strings; null yields the empty sequence.
pub fn parse_list_or_csv(v: &Value) -> Result<Vec<String>, OpsError> {
    match v {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()),
        Value::List(node) => node
            .items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| OpsError::ExpectedStringList {
                        kind: item.kind(),
                        value: item.to_string(),
                    })
            })
            .collect(),
        other => Err(OpsError::ExpectedStringList {
            kind: other.kind(),
            value: other.to_string(),
        }),
    }
}
