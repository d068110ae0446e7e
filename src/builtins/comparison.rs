//! Binary relational operators: =, <, <=, >, >=
//!
//! Each returns the canonical truth value `T` or `NIL`, not an ad-hoc
//! boolean type — this dialect has none.

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

fn truth(ctx: &BuiltinCtx, value: bool) -> Atom {
    if value {
        Atom::Symbol(ctx.t)
    } else {
        Atom::Nil
    }
}

pub fn eq(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints("=", args)?;
    Ok(truth(ctx, a == b))
}

pub fn lt(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints("<", args)?;
    Ok(truth(ctx, a < b))
}

pub fn le(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints("<=", args)?;
    Ok(truth(ctx, a <= b))
}

pub fn gt(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints(">", args)?;
    Ok(truth(ctx, a > b))
}

pub fn ge(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    let (a, b) = binary_ints(">=", args)?;
    Ok(truth(ctx, a >= b))
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
    fn equal_integers_yield_t() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let t = syms.intern("T");
        let mut c = ctx(&mut heap, &mut syms);
        assert_eq!(eq(&mut c, &[Atom::Integer(5), Atom::Integer(5)]), Ok(Atom::Symbol(t)));
    }

    #[test]
    fn unequal_integers_yield_nil() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let mut c = ctx(&mut heap, &mut syms);
        assert_eq!(eq(&mut c, &[Atom::Integer(5), Atom::Integer(6)]), Ok(Atom::Nil));
    }

    #[test]
    fn ordering_operators() {
        let mut heap = Heap::new();
        let mut syms = SymbolTable::new();
        let t = syms.intern("T");
        let mut c = ctx(&mut heap, &mut syms);
        assert_eq!(lt(&mut c, &[Atom::Integer(1), Atom::Integer(2)]), Ok(Atom::Symbol(t)));
        assert_eq!(gt(&mut c, &[Atom::Integer(1), Atom::Integer(2)]), Ok(Atom::Nil));
        assert_eq!(le(&mut c, &[Atom::Integer(2), Atom::Integer(2)]), Ok(Atom::Symbol(t)));
        assert_eq!(ge(&mut c, &[Atom::Integer(2), Atom::Integer(2)]), Ok(Atom::Symbol(t)));
    }
}
