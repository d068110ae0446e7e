//! List primitives and identity comparison: car, cdr, cons, pair?, eq?
//!
//! `CAR`/`CDR` of `NIL` answer `NIL` rather than erroring, matching the
//! historic leniency of this dialect's reference REPL; any other
//! non-pair argument is a type error.

use super::BuiltinCtx;
use crate::atom::Atom;
use crate::error::LispError;

fn truth(ctx: &BuiltinCtx, value: bool) -> Atom {
    if value {
        Atom::Symbol(ctx.t)
    } else {
        Atom::Nil
    }
}

pub fn car(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    match args {
        [Atom::Nil] => Ok(Atom::Nil),
        [Atom::Pair(p)] => Ok(ctx.heap.car(*p)),
        [other] => Err(LispError::type_error(format!("CAR: expected pair, got {}", other.type_name()))),
        _ => Err(LispError::args(format!("CAR: expected 1 argument, got {}", args.len()))),
    }
}

pub fn cdr(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    match args {
        [Atom::Nil] => Ok(Atom::Nil),
        [Atom::Pair(p)] => Ok(ctx.heap.cdr(*p)),
        [other] => Err(LispError::type_error(format!("CDR: expected pair, got {}", other.type_name()))),
        _ => Err(LispError::args(format!("CDR: expected 1 argument, got {}", args.len()))),
    }
}

pub fn cons(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    match args {
        [a, b] => Ok(ctx.heap.cons(*a, *b)),
        _ => Err(LispError::args(format!("CONS: expected 2 arguments, got {}", args.len()))),
    }
}

pub fn pair_p(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    match args {
        [atom] => Ok(truth(ctx, matches!(atom, Atom::Pair(_)))),
        _ => Err(LispError::args(format!("PAIR?: expected 1 argument, got {}", args.len()))),
    }
}

/// Identity on pairs/closures/macros/builtins, name identity on
/// symbols (handle equality, courtesy of interning), value equality on
/// integers, always true on `NIL`, false across different tags. The
/// derived structural equality on `Atom` already implements exactly
/// this rule, since every variant holds either a scalar or a handle.
pub fn eq_p(ctx: &mut BuiltinCtx, args: &[Atom]) -> Result<Atom, LispError> {
    match args {
        [a, b] => Ok(truth(ctx, a == b)),
        _ => Err(LispError::args(format!("EQ?: expected 2 arguments, got {}", args.len()))),
    }
}
