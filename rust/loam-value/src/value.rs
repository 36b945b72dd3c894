//! The tagged value type.
//!
//! A [`Value`] is a dynamically-typed, JSON-like variant. Compound values
//! (lists and maps) are reference-counted nodes: cloning a `Value` clones a
//! handle, never the structure, and an explicit [`crate::ops::deep_copy`]
//! exists for when callers need an unshared tree. Mutable access to a shared
//! node goes through copy-on-write ([`Rc::make_mut`]), so no caller ever
//! observes mutation of a value it merely reads.
//!
//! Equality is structural and ignores provenance metadata. Values are
//! totally ordered (kind rank first, then payload) so they can key a
//! `BTreeMap`; map keys are themselves values, commonly strings.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::decimal::Decimal;
use crate::source::SourceInfo;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Discriminant of a [`Value`], used in type-mismatch diagnostics and for
/// the cross-kind ordering rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Decimal,
    String,
    List,
    Map,
    Object,
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Backing storage of a list value. Shared via `Rc`; carries optional
/// provenance.
#[derive(Debug, Clone, Default)]
pub struct ListNode {
    pub(crate) items: Vec<Value>,
    pub(crate) source: Option<SourceInfo>,
}

/// Backing storage of a map value. Shared via `Rc`; carries optional
/// provenance.
#[derive(Debug, Clone, Default)]
pub struct MapNode {
    pub(crate) entries: BTreeMap<Value, Value>,
    pub(crate) source: Option<SourceInfo>,
}

/// An opaque engine object referenced from value space. Compared by
/// identity, never by contents.
pub trait ObjectData: fmt::Debug {
    /// Concrete type name, used in diagnostics.
    fn type_name(&self) -> &str;
}

fn object_ptr(obj: &Rc<dyn ObjectData>) -> *const u8 {
    Rc::as_ptr(obj) as *const u8
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A dynamically-typed tagged value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    String(Rc<str>),
    List(Rc<ListNode>),
    Map(Rc<MapNode>),
    Object(Rc<dyn ObjectData>),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Value {
        Value::String(s.into())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(ListNode {
            items,
            source: None,
        }))
    }

    pub fn map(entries: BTreeMap<Value, Value>) -> Value {
        Value::Map(Rc::new(MapNode {
            entries,
            source: None,
        }))
    }

    /// A list of string values, from anything yielding string-likes.
    pub fn string_list<I, S>(items: I) -> Value
    where
        I: IntoIterator<Item = S>,
        S: Into<Rc<str>>,
    {
        Value::list(items.into_iter().map(Value::string).collect())
    }

    pub fn object(obj: Rc<dyn ObjectData>) -> Value {
        Value::Object(obj)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for `Int` and `Decimal` values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Decimal(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view: decimals as-is, ints widened to decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Int(n) => Some(Decimal::from_int(*n)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(node) => Some(&node.items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Value::Map(node) => Some(&node.entries),
            _ => None,
        }
    }

    /// Copy-on-write mutable view of a list's elements. Unshares the node
    /// first if other handles point at it.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(node) => Some(&mut Rc::make_mut(node).items),
            _ => None,
        }
    }

    /// Copy-on-write mutable view of a map's entries.
    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<Value, Value>> {
        match self {
            Value::Map(node) => Some(&mut Rc::make_mut(node).entries),
            _ => None,
        }
    }

    /// Attribute read with a string key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.get_value(&Value::string(key))
    }

    /// Attribute read with an arbitrary value key.
    pub fn get_value(&self, key: &Value) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Provenance of a compound value, if any was attached.
    pub fn source(&self) -> Option<&SourceInfo> {
        match self {
            Value::List(node) => node.source.as_ref(),
            Value::Map(node) => node.source.as_ref(),
            _ => None,
        }
    }

    /// Attach provenance. Scalars carry none; for them this is a no-op.
    pub fn set_source(&mut self, info: SourceInfo) {
        match self {
            Value::List(node) => Rc::make_mut(node).source = Some(info),
            Value::Map(node) => Rc::make_mut(node).source = Some(info),
            _ => {}
        }
    }

    pub fn with_source(mut self, info: SourceInfo) -> Value {
        self.set_source(info);
        self
    }

    /// Provenance rendered for diagnostics; `"(unknown)"` when absent.
    pub fn debug_location(&self) -> String {
        match self.source() {
            Some(info) => info.to_string(),
            None => "(unknown)".to_string(),
        }
    }

    /// Identity test: true when both handles point at the same compound
    /// node, string buffer, or object. Always false for other scalars.
    pub fn same_node(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => object_ptr(a) == object_ptr(b),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<BTreeMap<Value, Value>> for Value {
    fn from(entries: BTreeMap<Value, Value>) -> Self {
        Value::map(entries)
    }
}

// ---------------------------------------------------------------------------
// Equality & ordering (structural, provenance-blind)
// ---------------------------------------------------------------------------

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.items == b.items,
            (Value::Map(a), Value::Map(b)) => a.entries == b.entries,
            (Value::Object(a), Value::Object(b)) => object_ptr(a) == object_ptr(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => a.items.cmp(&b.items),
            (Value::Map(a), Value::Map(b)) => a.entries.cmp(&b.entries),
            (Value::Object(a), Value::Object(b)) => object_ptr(a).cmp(&object_ptr(b)),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl Value {
    fn write_display(&self, f: &mut fmt::Formatter<'_>, quote_strings: bool) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => {
                if quote_strings {
                    write!(f, "\"{s}\"")
                } else {
                    write!(f, "{s}")
                }
            }
            Value::List(node) => {
                write!(f, "[")?;
                for (i, item) in node.items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.write_display(f, true)?;
                }
                write!(f, "]")
            }
            Value::Map(node) => {
                write!(f, "{{")?;
                for (i, (key, value)) in node.entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    key.write_display(f, true)?;
                    write!(f, ": ")?;
                    value.write_display(f, true)?;
                }
                write!(f, "}}")
            }
            Value::Object(obj) => write!(f, "<object {}>", obj.type_name()),
        }
    }
}

impl fmt::Display for Value {
    /// JSON-like rendering. Strings are bare at top level and quoted inside
    /// containers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_display(f, false)
    }
}
