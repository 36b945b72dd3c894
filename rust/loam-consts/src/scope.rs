//! The constant scope stack.
//!
//! Loading structured data is hierarchical: a file defines constants, an
//! object definition nested inside it may redefine some, and formulas
//! compiled while a definition is open must see the innermost bindings.
//! [`ConstantScopes`] models this as a caller-owned stack of frames with
//! RAII push/pop: entering a scope returns a [`ScopeGuard`] whose drop pops
//! the frame on every exit path, including unwinding.
//!
//! The stack is single-threaded by construction (`Rc<RefCell<_>>`); confine
//! one instance to one logical thread of loading activity.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use loam_value::Value;
use tracing::{debug, trace};

use crate::env::Environment;
use crate::registry::{builtin_providers, Provider};

/// One pushed mapping of constant names to values.
type Frame = BTreeMap<String, Value>;

/// A key names a declared constant when it contains no lower-case
/// character. This is the single definition point of the convention; frames
/// are populated only from keys that satisfy it.
pub fn is_constant_name(key: &str) -> bool {
    !key.chars().any(|c| c.is_lowercase())
}

/// A stack of constant frames plus the fixed environment name table.
pub struct ConstantScopes {
    env: Rc<dyn Environment>,
    providers: BTreeMap<&'static str, Provider>,
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl ConstantScopes {
    pub fn new(env: Rc<dyn Environment>) -> Self {
        Self {
            env,
            providers: builtin_providers(),
            frames: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Number of frames currently pushed.
    pub fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Push a frame built from `node`'s constant-name keys.
    ///
    /// `node` may be null or key-free, yielding an empty frame; the push
    /// happens unconditionally so that every guard pops exactly one frame.
    /// Guards must be dropped in reverse acquisition order; lexical nesting
    /// gives this for free.
    pub fn enter_scope(&self, node: &Value) -> ScopeGuard {
        let mut frame = Frame::new();
        if let Some(entries) = node.as_map() {
            for (key, value) in entries {
                let Some(name) = key.as_str() else {
                    continue;
                };
                if !is_constant_name(name) {
                    continue;
                }
                frame.insert(name.to_string(), value.clone());
            }
        }
        let mut frames = self.frames.borrow_mut();
        let same_as_base = frames.last().is_some_and(|top| *top == frame);
        debug!(
            names = frame.len(),
            same_as_base, "entering constant scope"
        );
        frames.push(frame);
        drop(frames);
        ScopeGuard {
            frames: Rc::clone(&self.frames),
            same_as_base,
        }
    }

    /// Resolve `name`: the fixed environment table first, then the frames
    /// innermost-to-outermost. Unknown names resolve to null; lookup is
    /// consulted speculatively and never fails loudly.
    pub fn lookup(&self, name: &str) -> Value {
        if let Some(provider) = self.providers.get(name) {
            return provider(self.env.as_ref());
        }
        for frame in self.frames.borrow().iter().rev() {
            if let Some(value) = frame.get(name) {
                return value.clone();
            }
        }
        trace!(name, "constant not defined in any scope");
        Value::Null
    }
}

/// RAII handle for one pushed frame.
#[must_use = "dropping the guard pops the scope immediately"]
pub struct ScopeGuard {
    frames: Rc<RefCell<Vec<Frame>>>,
    same_as_base: bool,
}

impl ScopeGuard {
    /// True when the pushed frame compared equal to the frame beneath it.
    /// Consumers may skip reconfiguration work for such redundant scopes.
    pub fn same_as_base(&self) -> bool {
        self.same_as_base
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let mut frames = self.frames.borrow_mut();
        // Underflow means enter/exit pairing is broken in the caller.
        assert!(!frames.is_empty(), "constant scope stack underflow");
        frames.pop();
        trace!(depth = frames.len(), "left constant scope");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnvironment;

    fn scopes() -> ConstantScopes {
        ConstantScopes::new(Rc::new(StaticEnvironment::default()))
    }

    fn node(text: &str) -> Value {
        Value::from_json_str(text).expect("test JSON is valid")
    }

    #[test]
    fn constant_names_exclude_anything_lowercase() {
        assert!(is_constant_name("MAX_HP"));
        assert!(is_constant_name("A"));
        assert!(!is_constant_name("maxHp"));
        assert!(!is_constant_name("Max_HP"));
    }

    #[test]
    fn frames_keep_only_constant_name_keys() {
        let scopes = scopes();
        let guard = scopes.enter_scope(&node(r#"{"A": 1, "b": 2}"#));
        assert_eq!(scopes.lookup("A"), Value::from(1));
        assert_eq!(scopes.lookup("b"), Value::Null);
        drop(guard);
        assert_eq!(scopes.lookup("A"), Value::Null);
    }

    #[test]
    fn null_node_pushes_an_empty_frame() {
        let scopes = scopes();
        let guard = scopes.enter_scope(&Value::Null);
        assert_eq!(scopes.depth(), 1);
        drop(guard);
        assert_eq!(scopes.depth(), 0);
    }

    #[test]
    fn inner_frames_shadow_outer_ones() {
        let scopes = scopes();
        let outer = scopes.enter_scope(&node(r#"{"HP": 10, "SPEED": 3}"#));
        {
            let _inner = scopes.enter_scope(&node(r#"{"HP": 99}"#));
            assert_eq!(scopes.lookup("HP"), Value::from(99));
            assert_eq!(scopes.lookup("SPEED"), Value::from(3));
        }
        assert_eq!(scopes.lookup("HP"), Value::from(10));
        drop(outer);
    }

    #[test]
    fn identical_frames_are_flagged_redundant() {
        let scopes = scopes();
        let first = scopes.enter_scope(&node(r#"{"A": 1}"#));
        assert!(!first.same_as_base());
        let second = scopes.enter_scope(&node(r#"{"A": 1, "ignored": 2}"#));
        assert!(second.same_as_base());
        let third = scopes.enter_scope(&node(r#"{"A": 2}"#));
        assert!(!third.same_as_base());
    }

    #[test]
    fn guard_pops_on_unwind() {
        let scopes = scopes();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = scopes.enter_scope(&node(r#"{"A": 1}"#));
            panic!("loader failed");
        }));
        assert!(result.is_err());
        assert_eq!(scopes.depth(), 0);
        assert_eq!(scopes.lookup("A"), Value::Null);
    }

    #[test]
    fn environment_names_are_never_shadowed() {
        let scopes = scopes();
        let _guard = scopes.enter_scope(&node(r#"{"SCREEN_WIDTH": 1}"#));
        assert_eq!(scopes.lookup("SCREEN_WIDTH"), Value::from(1024));
    }
}
