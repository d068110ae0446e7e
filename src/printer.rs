//! Renders atoms back to text.

use crate::atom::Atom;
use crate::builtins::BuiltinTable;
use crate::heap::Heap;
use crate::symbols::SymbolTable;
use std::fmt::Write as _;

pub fn print_atom(atom: Atom, heap: &Heap, symbols: &SymbolTable, builtins: &BuiltinTable) -> String {
    let mut out = String::new();
    write_atom(&mut out, atom, heap, symbols, builtins);
    out
}

fn write_atom(out: &mut String, atom: Atom, heap: &Heap, symbols: &SymbolTable, builtins: &BuiltinTable) {
    match atom {
        Atom::Nil => out.push_str("NIL"),
        Atom::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        Atom::Symbol(s) => out.push_str(symbols.name(s)),
        Atom::Pair(p) => {
            out.push('(');
            write_atom(out, heap.car(p), heap, symbols, builtins);
            let mut rest = heap.cdr(p);
            loop {
                match rest {
                    Atom::Nil => break,
                    Atom::Pair(next) => {
                        out.push(' ');
                        write_atom(out, heap.car(next), heap, symbols, builtins);
                        rest = heap.cdr(next);
                    }
                    other => {
                        out.push_str(" . ");
                        write_atom(out, other, heap, symbols, builtins);
                        break;
                    }
                }
            }
            out.push(')');
        }
        Atom::Builtin(id) => {
            let _ = write!(out, "#<BUILTIN {}>", builtins.name(id));
        }
        Atom::Closure(p) => {
            let rest = heap.cdr(p).as_pair_ref().expect("closure shape: (env args . body)");
            out.push_str("#<CLOSURE ");
            write_atom(out, heap.car(rest), heap, symbols, builtins);
            out.push('>');
        }
        Atom::Macro(p) => {
            let rest = heap.cdr(p).as_pair_ref().expect("macro shape: (env args . body)");
            out.push_str("#<MACRO ");
            write_atom(out, heap.car(rest), heap, symbols, builtins);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;

    #[test]
    fn prints_nil_and_integers() {
        let heap = Heap::new();
        let symbols = SymbolTable::new();
        let builtins = BuiltinTable::new();
        assert_eq!(print_atom(Atom::Nil, &heap, &symbols, &builtins), "NIL");
        assert_eq!(print_atom(Atom::Integer(-7), &heap, &symbols, &builtins), "-7");
    }

    #[test]
    fn prints_proper_list() {
        let mut heap = Heap::new();
        let symbols = SymbolTable::new();
        let builtins = BuiltinTable::new();
        let list = heap.cons(Atom::Integer(1), heap_cons_list(&mut heap));
        assert_eq!(print_atom(list, &heap, &symbols, &builtins), "(1 2 3)");
    }

    fn heap_cons_list(heap: &mut Heap) -> Atom {
        let tail = heap.cons(Atom::Integer(3), Atom::Nil);
        heap.cons(Atom::Integer(2), tail)
    }

    #[test]
    fn prints_dotted_pair() {
        let mut heap = Heap::new();
        let symbols = SymbolTable::new();
        let builtins = BuiltinTable::new();
        let pair = heap.cons(Atom::Integer(1), Atom::Integer(2));
        assert_eq!(print_atom(pair, &heap, &symbols, &builtins), "(1 . 2)");
    }
}
