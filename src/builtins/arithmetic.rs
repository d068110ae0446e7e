//! Binary integer arithmetic: +, -, *, /
//!
//! Unlike a typical Lisp these are strictly binary and strictly
//! integer — there is no numeric tower and no variadic folding here.

use super::BuiltinCtx;
use crate::atom::Atom;
use crate::error::LispError;

fn binary_ints(name: &str, args: &[Atom]) -> Result<(i64, i64), LispError> {
    if args.len() != 2 {
        return Err(LispError::args(format!(
            "{name}: expected 2 arguments, got {}",
            args.len()
        )));
    }
    let a = match args[0] {
        Atom::Integer(n) => n,
        other => {
            return Err(LispError::type_error(format!(
                "{name}: expected integer, got {}",
                other.type_name()
            )))
        }
    };
    let b = match args[1] {
        Atom::Integer(n) => n,
        other => {
            return Err(LispError::type_error(format!(
                "{name}: expected integer, got {}",
                other.type_name()
            )))
        }
    };
    Ok((a, b))
}

/// `(+ a b)` => sum, wrapping on overflow.
pub fn add(_ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints("+", args)?;
    Ok(Atom::Integer(a.wrapping_add(b)))
}

/// `(- a b)` => difference, wrapping on overflow.
pub fn sub(_ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints("-", args)?;
    Ok(Atom::Integer(a.wrapping_sub(b)))
}

/// `(* a b)` => product, wrapping on overflow.
pub fn mul(_ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints("*", args)?;
    Ok(Atom::Integer(a.wrapping_mul(b)))
}

/// `(/ a b)` => truncating integer division; zero divisor is a Type error.
pub fn div(_ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints("/", args)?;
    if b == 0 {
        return Err(LispError::type_error("/: division by zero"));
    }
    Ok(Atom::Integer(a.wrapping_div(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::Heap;
    use crate::symbols::SymbolTable;

    fn ctx(heap: &mut Heap, syms: &mut SymbolTable) -> BuiltinCtx<'_> {
        BuiltinCtx {
            heap,
            t: syms.intern("T"),
        }
    }

    #[test]
    fn add_two_integers() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let mut c = ctx(&mut heap, &mut syms);
        assert_eq!(add(&mut c, &[Atom::Integer(2), Atom::Integer(3)]), Ok(Atom::Integer(5)));
    }

    #[test]
    fn div_by_zero_is_type_error() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let mut c = ctx(&mut heap, &mut syms);
        let err = div(&mut c, &[Atom::Integer(1), Atom::Integer(0)]).unwrap_err();
        assert!(matches!(err, LispError::Type(_)));
    }

    #[test]
    fn wrong_arity_is_args_error() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let mut c = ctx(&mut heap, &mut syms);
        let err = add(&mut c, &[Atom::Integer(1)]).unwrap_err();
        assert!(matches!(err, LispError::Args(_)));
    }

    #[test]
    fn non_integer_operand_is_type_error() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let mut c = ctx(&mut heap, &mut syms);
        let err = add(&mut c, &[Atom::Integer(1), Atom::Nil]).unwrap_err();
        assert!(matches!(err, LispError::Type(_)));
    }
}
