//! The reader: tokenization and parsing are pure (`nom`-based,
//! heap-free) and produce a [`ReadExpr`] tree; a separate `lower` pass
//! interns symbols and allocates pairs on the [`Heap`]. Splitting the
//! stages keeps the combinator grammar free of interior mutability.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1, multispace1, one_of},
    combinator::{map, opt, peek, recognize, value},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};

use crate::atom::Atom;
use crate::error::LispError;
use crate::heap::Heap;
use crate::symbols::SymbolTable;

/// The raw parse tree, before symbol interning or heap allocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadExpr {
    Nil,
    Integer(i64),
    Symbol(String),
    /// A proper list `(a b c)`.
    List(Vec<ReadExpr>),
    /// An improper, dotted list `(a b . c)`.
    Dotted(Vec<ReadExpr>, Box<ReadExpr>),
}

fn parse_regular_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';')(input)?;
    let (input, _) = take_while(|c| c != '\n')(input)?;
    Ok((input, ()))
}

fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    many0(alt((value((), multispace1), parse_regular_comment)))
        .map(|_| ())
        .parse(input)
}

fn parse_integer(input: &str) -> IResult<&str, ReadExpr> {
    map(
        recognize((opt(char('-')), digit1)),
        |s: &str| ReadExpr::Integer(s.parse::<i64>().unwrap_or_else(|_| wrapping_parse(s))),
    )
    .parse(input)
}

/// Extremely long digit runs would overflow `i64::parse`; fall back to
/// wrapping accumulation so the reader still produces a value rather
/// than failing (the dialect's integers wrap, per the evaluator's
/// arithmetic contracts).
fn wrapping_parse(s: &str) -> i64 {
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let mut acc: i64 = 0;
    for c in digits.chars() {
        acc = acc.wrapping_mul(10).wrapping_add(c.to_digit(10).unwrap_or(0) as i64);
    }
    if neg {
        acc.wrapping_neg()
    } else {
        acc
    }
}

const SYMBOL_LEAD: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ+-*/%<>=!?";

fn parse_symbol(input: &str) -> IResult<&str, ReadExpr> {
    let (input, first) = one_of(SYMBOL_LEAD)(input)?;
    let (input, rest) = take_while1::<_, _, nom::error::Error<_>>(|c: char| {
        c.is_alphanumeric() || "-_?!<>=+*/%".contains(c)
    })(input)
    .unwrap_or((input, ""));
    let mut name = String::new();
    name.push(first);
    name.push_str(rest);
    if name == "." {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        )));
    }
    Ok((input, ReadExpr::Symbol(name)))
}

fn wrap(keyword: &'static str, inner: ReadExpr) -> ReadExpr {
    ReadExpr::List(vec![ReadExpr::Symbol(keyword.to_string()), inner])
}

fn parse_quote(input: &str) -> IResult<&str, ReadExpr> {
    let (input, expr) = preceded(char('\''), parse_expr)(input)?;
    Ok((input, wrap("QUOTE", expr)))
}

fn parse_quasiquote(input: &str) -> IResult<&str, ReadExpr> {
    let (input, expr) = preceded(char('`'), parse_expr)(input)?;
    Ok((input, wrap("QUASIQUOTE", expr)))
}

fn parse_unquote(input: &str) -> IResult<&str, ReadExpr> {
    let (input, _) = char(',')(input)?;
    if let Ok((input, expr)) = preceded(char('@'), parse_expr).parse(input) {
        return Ok((input, wrap("UNQUOTE-SPLICING", expr)));
    }
    let (input, expr) = parse_expr(input)?;
    Ok((input, wrap("UNQUOTE", expr)))
}

fn parse_list(input: &str) -> IResult<&str, ReadExpr> {
    let (input, _) = char('(')(input)?;
    let (mut input, _) = ws_and_comments(input)?;
    let mut items = Vec::new();
    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(')')(input) {
            return Ok((
                rest,
                if items.is_empty() {
                    ReadExpr::Nil
                } else {
                    ReadExpr::List(items)
                },
            ));
        }
        // Dotted tail: `. expr)`.
        if !items.is_empty() {
            if let Ok((rest, _)) = char::<_, nom::error::Error<_>>('.')(input) {
                if rest.starts_with(|c: char| c.is_whitespace() || c == '(') {
                    let (rest, _) = ws_and_comments(rest)?;
                    let (rest, tail) = parse_expr(rest)?;
                    let (rest, _) = ws_and_comments(rest)?;
                    let (rest, _) = char(')')(rest)?;
                    return Ok((rest, ReadExpr::Dotted(items, Box::new(tail))));
                }
            }
        }
        let (rest, expr) = parse_expr(input)?;
        items.push(expr);
        let (rest, _) = ws_and_comments(rest)?;
        input = rest;
    }
}

fn parse_nil_literal(input: &str) -> IResult<&str, ReadExpr> {
    match parse_symbol(input)? {
        (rest, ReadExpr::Symbol(s)) if s.eq_ignore_ascii_case("nil") => Ok((rest, ReadExpr::Nil)),
        _ => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}

fn parse_expr(input: &str) -> IResult<&str, ReadExpr> {
    let (input, _) = ws_and_comments(input)?;
    alt((
        parse_quote,
        parse_quasiquote,
        parse_unquote,
        parse_list,
        parse_integer,
        parse_nil_literal,
        parse_symbol,
    ))
    .parse(input)
}

/// Parses exactly one expression and returns it with the unconsumed
/// remainder, so callers can read a file or a REPL line one top-level
/// form at a time.
pub fn read_one(input: &str) -> Result<(ReadExpr, &str), LispError> {
    match parse_expr(input) {
        Ok((rest, expr)) => Ok((expr, rest)),
        Err(e) => Err(LispError::syntax(format!("{e}"))),
    }
}

/// True if `input` contains only whitespace and comments.
pub fn is_blank(input: &str) -> bool {
    matches!(ws_and_comments(input), Ok((rest, _)) if rest.is_empty())
}

/// Parses a single expression, requiring it to consume the entire
/// input (after trailing whitespace/comments). Used by the REPL, which
/// treats one line as one form.
pub fn parse_complete(input: &str) -> Result<ReadExpr, LispError> {
    if is_blank(input) {
        return Ok(ReadExpr::Nil);
    }
    let (expr, rest) = read_one(input)?;
    let (rest, _) = ws_and_comments(rest).unwrap_or((rest, ()));
    if !rest.is_empty() {
        return Err(LispError::syntax(format!("unexpected trailing input: '{rest}'")));
    }
    if peek::<_, _, nom::error::Error<_>>(char(')')).parse(rest).is_ok() {
        return Err(LispError::syntax("unexpected ')'"));
    }
    Ok(expr)
}

/// Lowers a raw parse tree into a heap-backed [`Atom`], interning
/// symbols along the way.
pub fn lower(expr: &ReadExpr, heap: &mut Heap, symbols: &mut SymbolTable) -> Atom {
    match expr {
        ReadExpr::Nil => Atom::Nil,
        ReadExpr::Integer(n) => Atom::Integer(*n),
        ReadExpr::Symbol(name) => Atom::Symbol(symbols.intern(name)),
        ReadExpr::List(items) => lower_list(items, Atom::Nil, heap, symbols),
        ReadExpr::Dotted(items, tail) => {
            let lowered_tail = lower(tail, heap, symbols);
            lower_list(items, lowered_tail, heap, symbols)
        }
    }
}

fn lower_list(items: &[ReadExpr], tail: Atom, heap: &mut Heap, symbols: &mut SymbolTable) -> Atom {
    let mut result = tail;
    for item in items.iter().rev() {
        let lowered = lower(item, heap, symbols);
        result = heap.cons(lowered, result);
    }
    result
}

/// Convenience: parse and lower one complete top-level form.
pub fn read_and_lower(input: &str, heap: &mut Heap, symbols: &mut SymbolTable) -> Result<Atom, LispError> {
    let expr = parse_complete(input)?;
    Ok(lower(&expr, heap, symbols))
}
