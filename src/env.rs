//! Lexical environments, encoded as heap pairs `(parent . bindings)`
//! where `bindings` is a proper list of `(symbol . value)` pairs.

use crate::atom::{Atom, SymbolId};
use crate::heap::Heap;

/// Allocates a fresh environment frame with the given parent (`Nil` for
/// the global frame).
pub fn env_create(heap: &mut Heap, parent: Atom) -> Atom {
    heap.cons(parent, Atom::Nil)
}

/// Walks `bindings` in this frame, then recurses into `parent`.
pub fn env_get(heap: &Heap, env: Atom, sym: SymbolId) -> Option<Atom> {
    let mut env = env;
    loop {
        let frame = env.as_pair_ref()?;
        let parent = heap.car(frame);
        let mut bindings = heap.cdr(frame);
        while let Some(binding_pair) = bindings.as_pair_ref() {
            let binding = heap.car(binding_pair);
            if let Some(pair) = binding.as_pair_ref() {
                if matches!(heap.car(pair), Atom::Symbol(s) if s == sym) {
                    return Some(heap.cdr(pair));
                }
            }
            bindings = heap.cdr(binding_pair);
        }
        if parent.is_nil() {
            return None;
        }
        env = parent;
    }
}

/// Updates the binding in the *current* frame if present (mutating the
/// binding pair's cdr in place); otherwise prepends a new binding to
/// this frame. Never ascends to the parent, matching the "assignment
/// creates in the innermost frame, never the enclosing one" rule.
pub fn env_define(heap: &mut Heap, env: Atom, sym: SymbolId, value: Atom) {
    let frame = env.as_pair_ref().expect("env_define: env must be a pair");
    let mut bindings = heap.cdr(frame);
    while let Some(binding_pair) = bindings.as_pair_ref() {
        let binding = heap.car(binding_pair);
        if let Some(pair) = binding.as_pair_ref() {
            if matches!(heap.car(pair), Atom::Symbol(s) if s == sym) {
                heap.set_cdr(pair, value);
                return;
            }
        }
        bindings = heap.cdr(binding_pair);
    }
    let new_binding = heap.cons(Atom::Symbol(sym), value);
    let old_bindings = heap.cdr(frame);
    let new_bindings = heap.cons(new_binding, old_bindings);
    heap.set_cdr(frame, new_bindings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;

    #[test]
    fn define_then_get_same_frame() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let x = syms.intern("X");
        let env = env_create(&mut heap, Atom::Nil);
        env_define(&mut heap, env, x, Atom::Integer(42));
        assert_eq!(env_get(&heap, env, x), Some(Atom::Integer(42)));
    }

    #[test]
    fn child_frame_sees_parent_binding() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let x = syms.intern("X");
        let parent = env_create(&mut heap, Atom::Nil);
        env_define(&mut heap, parent, x, Atom::Integer(7));
        let child = env_create(&mut heap, parent);
        assert_eq!(env_get(&heap, child, x), Some(Atom::Integer(7)));
    }

    #[test]
    fn define_in_child_does_not_leak_to_parent() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let y = syms.intern("Y");
        let parent = env_create(&mut heap, Atom::Nil);
        let child = env_create(&mut heap, parent);
        env_define(&mut heap, child, y, Atom::Integer(1));
        assert_eq!(env_get(&heap, parent, y), None);
    }

    #[test]
    fn unbound_symbol_is_none() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let z = syms.intern("Z");
        let env = env_create(&mut heap, Atom::Nil);
        assert_eq!(env_get(&heap, env, z), None);
    }

}
