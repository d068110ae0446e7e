//! The evaluator: a single driver loop that rewrites `(expr, env)`
//! against an explicit stack of continuation frames until the stack is
//! empty and a final value has been produced. The stack is a plain
//! `Vec<Frame>`, not host-language recursion, so proper tail calls and
//! macro expansion never grow the Rust call stack.

use crate::atom::{Atom, PairRef, SymbolId};
use crate::builtins::{self, BuiltinCtx, BuiltinImpl, BuiltinTable};
use crate::config::GC_STEP_THRESHOLD;
use crate::env::{env_create, env_define, env_get};
use crate::error::{LispError, LispResult};
use crate::gc;
use crate::heap::Heap;
use crate::symbols::{SymbolTable, WellKnown};

/// One continuation of the evaluator's explicit stack. Each variant
/// holds exactly the atoms a literal `(parent env op pending-args
/// reversed-evaluated-args body)` frame pair would have held in its
/// slots; representing it as a Rust enum (rather than a heap pair
/// chain) is permitted by the "implementation may choose distinct
/// record types" note, as long as GC treats every atom field as a
/// root — see `Frame::roots`.
enum Frame {
    /// Awaiting the value of an `IF` condition.
    If {
        then_branch: Atom,
        else_branch: Atom,
        env: Atom,
    },
    /// Awaiting the value to bind in a `(DEFINE sym expr)` form.
    DefineVar { sym: SymbolId, env: Atom },
    /// Awaiting the operator's value before evaluating its arguments.
    AwaitOperator { args: Atom, env: Atom },
    /// Evaluating one argument of an application; `evaled` accumulates
    /// results left to right.
    EvalArg {
        op: Atom,
        remaining: Atom,
        evaled: Vec<Atom>,
        env: Atom,
    },
    /// Running a closure/macro body; all but the last expression are
    /// evaluated here for effect and discarded, the last is handled by
    /// a tail rewrite with no frame at all.
    BodySeq { remaining: Atom, env: Atom },
    /// A macro body has finished; its value is the expansion, which
    /// must be re-evaluated at the original call site's environment.
    MacroExpand { call_env: Atom },
    /// `APPLY`: awaiting the function value, still need to evaluate
    /// the argument-list expression.
    ApplyAwaitF { xs_expr: Atom, env: Atom },
    /// `APPLY`: function value in hand, awaiting the argument list.
    ApplyAwaitXs { f: Atom, env: Atom },
}

impl Frame {
    fn push_roots(&self, out: &mut Vec<Atom>) {
        match self {
            Frame::If { then_branch, else_branch, env } => {
                out.push(*then_branch);
                out.push(*else_branch);
                out.push(*env);
            }
            Frame::DefineVar { env, .. } => out.push(*env),
            Frame::AwaitOperator { args, env } => {
                out.push(*args);
                out.push(*env);
            }
            Frame::EvalArg { op, remaining, evaled, env } => {
                out.push(*op);
                out.push(*remaining);
                out.extend(evaled.iter().copied());
                out.push(*env);
            }
            Frame::BodySeq { remaining, env } => {
                out.push(*remaining);
                out.push(*env);
            }
            Frame::MacroExpand { call_env } => out.push(*call_env),
            Frame::ApplyAwaitF { xs_expr, env } => {
                out.push(*xs_expr);
                out.push(*env);
            }
            Frame::ApplyAwaitXs { f, env } => {
                out.push(*f);
                out.push(*env);
            }
        }
    }
}

/// Drives the trampoline forward by one step: either a fresh
/// sub-evaluation, or a value handed back up to the next frame.
enum Control {
    Eval(Atom, Atom),
    Return(Atom),
}

pub struct Interpreter {
    pub heap: Heap,
    pub symbols: SymbolTable,
    pub builtins: BuiltinTable,
    well_known: WellKnown,
    pub global_env: Atom,
    steps: u64,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut heap = Heap::new();
        let mut symbols = SymbolTable::new();
        let well_known = symbols.init_well_known();
        let mut builtins = BuiltinTable::new();
        let global_env = env_create(&mut heap, Atom::Nil);

        env_define(&mut heap, global_env, well_known.t, Atom::Symbol(well_known.t));

        let mut interp = Interpreter {
            heap,
            symbols,
            builtins,
            well_known,
            global_env,
            steps: 0,
        };
        interp.register_builtin("CAR", BuiltinImpl::Simple(builtins::core::car));
        interp.register_builtin("CDR", BuiltinImpl::Simple(builtins::core::cdr));
        interp.register_builtin("CONS", BuiltinImpl::Simple(builtins::core::cons));
        interp.register_builtin("PAIR?", BuiltinImpl::Simple(builtins::core::pair_p));
        interp.register_builtin("EQ?", BuiltinImpl::Simple(builtins::core::eq_p));
        interp.register_builtin("APPLY", BuiltinImpl::Apply);
        interp.register_builtin("+", BuiltinImpl::Simple(builtins::arithmetic::add));
        interp.register_builtin("-", BuiltinImpl::Simple(builtins::arithmetic::sub));
        interp.register_builtin("*", BuiltinImpl::Simple(builtins::arithmetic::mul));
        interp.register_builtin("/", BuiltinImpl::Simple(builtins::arithmetic::div));
        interp.register_builtin("=", BuiltinImpl::Simple(builtins::comparison::eq));
        interp.register_builtin("<", BuiltinImpl::Simple(builtins::comparison::lt));
        interp.register_builtin("<=", BuiltinImpl::Simple(builtins::comparison::le));
        interp.register_builtin(">", BuiltinImpl::Simple(builtins::comparison::gt));
        interp.register_builtin(">=", BuiltinImpl::Simple(builtins::comparison::ge));
        interp
    }

    fn register_builtin(&mut self, name: &'static str, imp: BuiltinImpl) {
        let id = self.builtins.register(name, imp);
        let sym = self.symbols.intern(name);
        env_define(&mut self.heap, self.global_env, sym, Atom::Builtin(id));
    }

    /// Names currently bound in the global frame, for tab completion.
    pub fn global_binding_names(&self) -> Vec<String> {
        self.symbols.all_names().to_vec()
    }

    pub fn print(&self, atom: Atom) -> String {
        crate::printer::print_atom(atom, &self.heap, &self.symbols, &self.builtins)
    }

    fn list_from_slice(&mut self, items: &[Atom]) -> Atom {
        let mut result = Atom::Nil;
        for item in items.iter().rev() {
            result = self.heap.cons(*item, result);
        }
        result
    }

    fn collect_list(&self, mut list: Atom) -> LispResult<Vec<Atom>> {
        let mut out = Vec::new();
        loop {
            match list {
                Atom::Nil => return Ok(out),
                Atom::Pair(p) => {
                    out.push(self.heap.car(p));
                    list = self.heap.cdr(p);
                }
                _ => return Err(LispError::syntax("expected a proper list")),
            }
        }
    }

    fn bind_formals(&mut self, env: Atom, formals: Atom, args: &[Atom]) -> LispResult<()> {
        let mut idx = 0usize;
        let mut cur = formals;
        loop {
            match cur {
                Atom::Nil => {
                    if idx != args.len() {
                        return Err(LispError::args(format!(
                            "expected {} arguments, got {}",
                            idx,
                            args.len()
                        )));
                    }
                    return Ok(());
                }
                Atom::Symbol(rest_sym) => {
                    let rest_list = self.list_from_slice(&args[idx..]);
                    env_define(&mut self.heap, env, rest_sym, rest_list);
                    return Ok(());
                }
                Atom::Pair(p) => {
                    let head = self.heap.car(p);
                    let sym = match head {
                        Atom::Symbol(s) => s,
                        _ => return Err(LispError::syntax("formals must be symbols")),
                    };
                    if idx >= args.len() {
                        return Err(LispError::args(format!(
                            "expected at least {} arguments, got {}",
                            idx + 1,
                            args.len()
                        )));
                    }
                    env_define(&mut self.heap, env, sym, args[idx]);
                    idx += 1;
                    cur = self.heap.cdr(p);
                }
                _ => return Err(LispError::syntax("malformed formals")),
            }
        }
    }

    fn begin_body(&mut self, body: Atom, env: Atom, stack: &mut Vec<Frame>) -> LispResult<Control> {
        match body {
            Atom::Pair(p) => {
                let rest = self.heap.cdr(p);
                if rest.is_nil() {
                    Ok(Control::Eval(self.heap.car(p), env))
                } else {
                    stack.push(Frame::BodySeq { remaining: rest, env });
                    Ok(Control::Eval(self.heap.car(p), env))
                }
            }
            _ => Err(LispError::syntax("empty body")),
        }
    }

    fn finalize_application(
        &mut self,
        op: Atom,
        args: Vec<Atom>,
        stack: &mut Vec<Frame>,
    ) -> LispResult<Control> {
        match op {
            Atom::Builtin(id) => match self.builtins.get(id) {
                BuiltinImpl::Simple(f) => {
                    let mut ctx = BuiltinCtx {
                        heap: &mut self.heap,
                        t: self.well_known.t,
                    };
                    let value = f(&mut ctx, &args)?;
                    Ok(Control::Return(value))
                }
                BuiltinImpl::Apply => {
                    if args.len() != 2 {
                        return Err(LispError::args(format!(
                            "APPLY: expected 2 arguments, got {}",
                            args.len()
                        )));
                    }
                    let inner_args = self.collect_list(args[1])?;
                    self.finalize_application(args[0], inner_args, stack)
                }
            },
            Atom::Closure(p) => {
                let rest = self
                    .heap
                    .cdr(p)
                    .as_pair_ref()
                    .ok_or_else(|| LispError::syntax("malformed closure"))?;
                let formals = self.heap.car(rest);
                let body = self.heap.cdr(rest);
                let captured_env = self.heap.car(p);
                let new_env = env_create(&mut self.heap, captured_env);
                self.bind_formals(new_env, formals, &args)?;
                self.begin_body(body, new_env, stack)
            }
            other => Err(LispError::type_error(format!(
                "cannot apply non-callable value of type {}",
                other.type_name()
            ))),
        }
    }

    fn continue_args(
        &mut self,
        op: Atom,
        remaining: Atom,
        evaled: Vec<Atom>,
        env: Atom,
        stack: &mut Vec<Frame>,
    ) -> LispResult<Control> {
        match remaining {
            Atom::Nil => self.finalize_application(op, evaled, stack),
            Atom::Pair(p) => {
                let next_expr = self.heap.car(p);
                let rest = self.heap.cdr(p);
                stack.push(Frame::EvalArg {
                    op,
                    remaining: rest,
                    evaled,
                    env,
                });
                Ok(Control::Eval(next_expr, env))
            }
            _ => Err(LispError::syntax("improper argument list")),
        }
    }

    fn begin_macro_expand(
        &mut self,
        p: PairRef,
        raw_args: Atom,
        call_env: Atom,
        stack: &mut Vec<Frame>,
    ) -> LispResult<Control> {
        let rest = self
            .heap
            .cdr(p)
            .as_pair_ref()
            .ok_or_else(|| LispError::syntax("malformed macro"))?;
        let formals = self.heap.car(rest);
        let body = self.heap.cdr(rest);
        let captured_env = self.heap.car(p);
        let args = self.collect_list(raw_args)?;
        let new_env = env_create(&mut self.heap, captured_env);
        self.bind_formals(new_env, formals, &args)?;
        stack.push(Frame::MacroExpand { call_env });
        self.begin_body(body, new_env, stack)
    }

    fn quasi_expand(&mut self, template: Atom, env: Atom) -> LispResult<Atom> {
        match template {
            Atom::Pair(p) => {
                let head = self.heap.car(p);
                if let Atom::Symbol(s) = head {
                    if s == self.well_known.unquote {
                        let rest = self
                            .heap
                            .cdr(p)
                            .as_pair_ref()
                            .ok_or_else(|| LispError::syntax("malformed unquote"))?;
                        let inner = self.heap.car(rest);
                        return self.eval(inner, env);
                    }
                }
                // Walk car/cdr, splicing when the car is (UNQUOTE-SPLICING x).
                if let Atom::Pair(car_pair) = head {
                    let car_head = self.heap.car(car_pair);
                    if let Atom::Symbol(s) = car_head {
                        if s == self.well_known.unquote_splicing {
                            let rest = self
                                .heap
                                .cdr(car_pair)
                                .as_pair_ref()
                                .ok_or_else(|| LispError::syntax("malformed unquote-splicing"))?;
                            let inner = self.heap.car(rest);
                            let spliced = self.eval(inner, env)?;
                            let spliced_items = self.collect_list(spliced)?;
                            let tail = self.heap.cdr(p);
                            let rest_expanded = self.quasi_expand(tail, env)?;
                            let mut result = rest_expanded;
                            for item in spliced_items.into_iter().rev() {
                                result = self.heap.cons(item, result);
                            }
                            return Ok(result);
                        }
                    }
                }
                let car_expanded = self.quasi_expand(head, env)?;
                let cdr_expanded = self.quasi_expand(self.heap.cdr(p), env)?;
                Ok(self.heap.cons(car_expanded, cdr_expanded))
            }
            other => Ok(other),
        }
    }

    fn try_special_form(
        &mut self,
        sym: SymbolId,
        args: Atom,
        env: Atom,
        stack: &mut Vec<Frame>,
    ) -> LispResult<Option<Control>> {
        let wk = self.well_known;
        if sym == wk.quote {
            let items = self.collect_list(args)?;
            if items.len() != 1 {
                return Err(LispError::args("QUOTE: expected 1 argument"));
            }
            return Ok(Some(Control::Return(items[0])));
        }
        if sym == wk.if_ {
            let items = self.collect_list(args)?;
            let (cond, then_branch, else_branch) = match items.as_slice() {
                [c, t, f] => (*c, *t, *f),
                _ => return Err(LispError::args("IF: expected 3 arguments")),
            };
            stack.push(Frame::If {
                then_branch,
                else_branch,
                env,
            });
            return Ok(Some(Control::Eval(cond, env)));
        }
        if sym == wk.lambda {
            let (formals, body) = self.split_head_rest(args)?;
            if body.is_nil() {
                return Err(LispError::syntax("LAMBDA: body must not be empty"));
            }
            let rest = self.heap.cons(formals, body);
            let pair = self.heap.cons(env, rest);
            let pair_ref = pair.as_pair_ref().expect("cons always returns a Pair");
            return Ok(Some(Control::Return(Atom::Closure(pair_ref))));
        }
        if sym == wk.define {
            let (head, body) = self.split_head_rest(args)?;
            match head {
                Atom::Symbol(name) => {
                    let values = self.collect_list(body)?;
                    if values.len() != 1 {
                        return Err(LispError::args("DEFINE: expected 2 arguments"));
                    }
                    stack.push(Frame::DefineVar { sym: name, env });
                    return Ok(Some(Control::Eval(values[0], env)));
                }
                Atom::Pair(header) => {
                    if body.is_nil() {
                        return Err(LispError::syntax("DEFINE: body must not be empty"));
                    }
                    let name = match self.heap.car(header) {
                        Atom::Symbol(s) => s,
                        _ => return Err(LispError::syntax("DEFINE: function name must be a symbol")),
                    };
                    let formals = self.heap.cdr(header);
                    let rest = self.heap.cons(formals, body);
                    let pair = self.heap.cons(env, rest);
                    let pair_ref = pair.as_pair_ref().expect("cons always returns a Pair");
                    env_define(&mut self.heap, env, name, Atom::Closure(pair_ref));
                    return Ok(Some(Control::Return(Atom::Symbol(name))));
                }
                _ => return Err(LispError::syntax("DEFINE: malformed header")),
            }
        }
        if sym == wk.defmacro {
            let (header, body) = self.split_head_rest(args)?;
            if body.is_nil() {
                return Err(LispError::syntax("DEFMACRO: body must not be empty"));
            }
            let header_pair = header
                .as_pair_ref()
                .ok_or_else(|| LispError::syntax("DEFMACRO: expected (name . formals)"))?;
            let name = match self.heap.car(header_pair) {
                Atom::Symbol(s) => s,
                _ => return Err(LispError::syntax("DEFMACRO: macro name must be a symbol")),
            };
            let formals = self.heap.cdr(header_pair);
            let rest = self.heap.cons(formals, body);
            let pair = self.heap.cons(env, rest);
            let pair_ref = pair.as_pair_ref().expect("cons always returns a Pair");
            env_define(&mut self.heap, env, name, Atom::Macro(pair_ref));
            return Ok(Some(Control::Return(Atom::Symbol(name))));
        }
        if sym == wk.apply {
            let items = self.collect_list(args)?;
            if items.len() != 2 {
                return Err(LispError::args("APPLY: expected 2 arguments"));
            }
            stack.push(Frame::ApplyAwaitF { xs_expr: items[1], env });
            return Ok(Some(Control::Eval(items[0], env)));
        }
        if sym == wk.quasiquote {
            let items = self.collect_list(args)?;
            if items.len() != 1 {
                return Err(LispError::args("QUASIQUOTE: expected 1 argument"));
            }
            let expanded = self.quasi_expand(items[0], env)?;
            return Ok(Some(Control::Return(expanded)));
        }
        if sym == wk.unquote || sym == wk.unquote_splicing {
            return Err(LispError::syntax("unquote used outside quasiquote"));
        }
        if sym == wk.gc {
            if !args.is_nil() {
                return Err(LispError::args("GC: expected 0 arguments"));
            }
            let mut roots = vec![env];
            for frame in stack.iter() {
                frame.push_roots(&mut roots);
            }
            gc::collect(&mut self.heap, &roots);
            return Ok(Some(Control::Return(Atom::Symbol(self.well_known.t))));
        }
        Ok(None)
    }

    /// Splits `(a b c . body...)`-shaped args into the head list `(a b
    /// c)` (itself possibly dotted, for formals) and the remainder.
    /// Used by `LAMBDA`/`DEFMACRO`, whose args are `(formals . body)`.
    fn split_head_rest(&self, args: Atom) -> LispResult<(Atom, Atom)> {
        let p = args
            .as_pair_ref()
            .ok_or_else(|| LispError::syntax("expected (formals . body)"))?;
        Ok((self.heap.car(p), self.heap.cdr(p)))
    }

    fn drive(&mut self, expr: Atom, env: Atom, stack: &mut Vec<Frame>) -> LispResult<Control> {
        match expr {
            Atom::Symbol(s) => {
                let value = env_get(&self.heap, env, s)
                    .ok_or_else(|| LispError::unbound(self.symbols.name(s)))?;
                Ok(Control::Return(value))
            }
            Atom::Nil | Atom::Integer(_) | Atom::Builtin(_) | Atom::Closure(_) | Atom::Macro(_) => {
                Ok(Control::Return(expr))
            }
            Atom::Pair(p) => {
                let op_atom = self.heap.car(p);
                let args = self.heap.cdr(p);
                if let Atom::Symbol(s) = op_atom {
                    if let Some(control) = self.try_special_form(s, args, env, stack)? {
                        return Ok(control);
                    }
                }
                stack.push(Frame::AwaitOperator { args, env });
                Ok(Control::Eval(op_atom, env))
            }
        }
    }

    fn unwind(&mut self, frame: Frame, value: Atom, stack: &mut Vec<Frame>) -> LispResult<Control> {
        match frame {
            Frame::If { then_branch, else_branch, env } => {
                if value.is_truthy() {
                    Ok(Control::Eval(then_branch, env))
                } else {
                    Ok(Control::Eval(else_branch, env))
                }
            }
            Frame::DefineVar { sym, env } => {
                env_define(&mut self.heap, env, sym, value);
                Ok(Control::Return(Atom::Symbol(sym)))
            }
            Frame::AwaitOperator { args, env } => {
                if let Atom::Macro(p) = value {
                    self.begin_macro_expand(p, args, env, stack)
                } else {
                    self.continue_args(value, args, Vec::new(), env, stack)
                }
            }
            Frame::EvalArg { op, remaining, mut evaled, env } => {
                evaled.push(value);
                self.continue_args(op, remaining, evaled, env, stack)
            }
            Frame::BodySeq { remaining, env } => self.begin_body(remaining, env, stack),
            Frame::MacroExpand { call_env } => Ok(Control::Eval(value, call_env)),
            Frame::ApplyAwaitF { xs_expr, env } => {
                stack.push(Frame::ApplyAwaitXs { f: value, env });
                Ok(Control::Eval(xs_expr, env))
            }
            Frame::ApplyAwaitXs { f, env: _env } => {
                let args = self.collect_list(value)?;
                self.finalize_application(f, args, stack)
            }
        }
    }

    /// Runs the trampoline to completion. `GC` also fires automatically
    /// every [`GC_STEP_THRESHOLD`] drive-steps, using the current
    /// expression, environment, and stack as roots.
    pub fn eval(&mut self, expr: Atom, env: Atom) -> LispResult<Atom> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut control = Control::Eval(expr, env);
        loop {
            control = match control {
                Control::Eval(e, en) => {
                    self.steps += 1;
                    if self.steps % GC_STEP_THRESHOLD == 0 {
                        let mut roots = vec![e, en];
                        for frame in stack.iter() {
                            frame.push_roots(&mut roots);
                        }
                        gc::collect(&mut self.heap, &roots);
                    }
                    self.drive(e, en, &mut stack)?
                }
                Control::Return(v) => match stack.pop() {
                    None => return Ok(v),
                    Some(frame) => self.unwind(frame, v, &mut stack)?,
                },
            };
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_and_lower;

    fn eval_str(interp: &mut Interpreter, src: &str) -> LispResult<String> {
        let atom = read_and_lower(src, &mut interp.heap, &mut interp.symbols)?;
        let result = interp.eval(atom, interp.global_env)?;
        Ok(interp.print(result))
    }

    #[test]
    fn self_evaluating_atoms() {
        let mut interp = Interpreter::new();
        assert_eq!(eval_str(&mut interp, "42").unwrap(), "42");
        assert_eq!(eval_str(&mut interp, "()").unwrap(), "NIL");
    }

    #[test]
    fn quote_returns_unevaluated() {
        let mut interp = Interpreter::new();
        assert_eq!(eval_str(&mut interp, "(QUOTE (A B C))").unwrap(), "(A B C)");
        assert_eq!(eval_str(&mut interp, "'(A B C)").unwrap(), "(A B C)");
    }

    #[test]
    fn arithmetic_and_nesting() {
        let mut interp = Interpreter::new();
        assert_eq!(eval_str(&mut interp, "(+ 1 (* 2 3))").unwrap(), "7");
    }

    #[test]
    fn define_and_lookup() {
        let mut interp = Interpreter::new();
        assert_eq!(eval_str(&mut interp, "(DEFINE X 42)").unwrap(), "X");
        assert_eq!(eval_str(&mut interp, "X").unwrap(), "42");
    }

    #[test]
    fn lambda_application() {
        let mut interp = Interpreter::new();
        assert_eq!(eval_str(&mut interp, "((LAMBDA (X Y) (+ X Y)) 3 4)").unwrap(), "7");
    }

    #[test]
    fn define_function_sugar_and_recursion() {
        let mut interp = Interpreter::new();
        eval_str(
            &mut interp,
            "(DEFINE (FACT N) (IF (= N 0) 1 (* N (FACT (- N 1)))))",
        )
        .unwrap();
        assert_eq!(eval_str(&mut interp, "(FACT 5)").unwrap(), "120");
    }

    #[test]
    fn tail_recursive_loop_does_not_overflow() {
        let mut interp = Interpreter::new();
        eval_str(
            &mut interp,
            "(DEFINE (LOOP N) (IF (= N 0) 'DONE (LOOP (- N 1))))",
        )
        .unwrap();
        assert_eq!(eval_str(&mut interp, "(LOOP 1000000)").unwrap(), "DONE");
    }

    #[test]
    fn closures_capture_lexical_environment() {
        let mut interp = Interpreter::new();
        eval_str(&mut interp, "(DEFINE (MAKE-ADDER N) (LAMBDA (X) (+ X N)))").unwrap();
        eval_str(&mut interp, "(DEFINE ADD5 (MAKE-ADDER 5))").unwrap();
        assert_eq!(eval_str(&mut interp, "(ADD5 10)").unwrap(), "15");
    }

    #[test]
    fn macro_expansion_is_unhygienic_and_reevaluated_at_call_site() {
        let mut interp = Interpreter::new();
        eval_str(
            &mut interp,
            "(DEFMACRO (MY-IF C T F) (QUOTE DUMMY))", // placeholder to check parsing only
        )
        .ok();
        // A minimal macro that doesn't rely on LIST/PROGN from a prelude:
        // (defmacro (twice x) (cons '+ (cons x (cons x '())))) => (+ x x)
        eval_str(
            &mut interp,
            "(DEFMACRO (TWICE X) (CONS '+ (CONS X (CONS X '()))))",
        )
        .unwrap();
        assert_eq!(eval_str(&mut interp, "(TWICE 21)").unwrap(), "42");
    }

    #[test]
    fn quasiquote_and_unquote_splicing() {
        let mut interp = Interpreter::new();
        eval_str(&mut interp, "(DEFINE XS (CONS 2 (CONS 3 '())))").unwrap();
        assert_eq!(
            eval_str(&mut interp, "`(1 ,@XS 4)").unwrap(),
            "(1 2 3 4)"
        );
        eval_str(&mut interp, "(DEFINE Y 10)").unwrap();
        assert_eq!(eval_str(&mut interp, "`(A ,Y C)").unwrap(), "(A 10 C)");
    }

    #[test]
    fn unbound_symbol_errors() {
        let mut interp = Interpreter::new();
        let err = eval_str(&mut interp, "NOPE").unwrap_err();
        assert_eq!(err.label(), "Symbol not bound");
    }

    #[test]
    fn wrong_type_and_arity_errors() {
        let mut interp = Interpreter::new();
        assert_eq!(eval_str(&mut interp, "(CAR 5)").unwrap_err().label(), "Wrong type");
        assert_eq!(eval_str(&mut interp, "(+ 1)").unwrap_err().label(), "Wrong number of arguments");
    }

    #[test]
    fn apply_as_special_form_and_as_value() {
        let mut interp = Interpreter::new();
        eval_str(&mut interp, "(DEFINE (ADD2 A B) (+ A B))").unwrap();
        assert_eq!(eval_str(&mut interp, "(APPLY ADD2 (CONS 1 (CONS 2 '())))").unwrap(), "3");
    }

    #[test]
    fn gc_collects_unreachable_garbage() {
        let mut interp = Interpreter::new();
        eval_str(&mut interp, "(CONS 1 2)").unwrap(); // garbage, never bound
        let before = interp.heap.live_count();
        eval_str(&mut interp, "(GC)").unwrap();
        assert!(interp.heap.live_count() <= before);
    }
}
